//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::application::InputFormat;
use crate::domain::StylePreset;

/// Render nested JSON/TOML documents as Unix tree-style text
#[derive(Parser, Debug)]
#[command(name = "texttree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output: -d info, -dd debug, -ddd trace
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Directory holding a local .texttree.toml (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a document as a tree
    Render {
        /// JSON or TOML document
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Input format (default: from file extension)
        #[arg(short, long)]
        format: Option<InputFormat>,
        /// Glyph preset: default, compact, ascii
        #[arg(short, long)]
        style: Option<StylePreset>,
        /// Values shown per node before truncation
        #[arg(short, long)]
        max_depth: Option<usize>,
        /// Line shown in place of truncated values
        #[arg(long)]
        marker: Option<String>,
        /// Render from the first node with this title
        #[arg(short, long)]
        root: Option<String>,
    },

    /// Print the title path of every node named NAME
    Find {
        /// JSON or TOML document
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Node title to search for
        name: String,
        /// Input format (default: from file extension)
        #[arg(short, long)]
        format: Option<InputFormat>,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Show config paths
    Path,

    /// Print a config template
    Template,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn given_render_flags_when_parsing_then_fields_are_typed() {
        let cli = Cli::try_parse_from([
            "texttree", "-dd", "render", "tree.txt", "--format", "json", "--style", "ascii",
            "--max-depth", "2", "--root", "foo",
        ])
        .unwrap();

        assert_eq!(cli.debug, 2);
        match cli.command {
            Some(Commands::Render {
                format,
                style,
                max_depth,
                root,
                ..
            }) => {
                assert_eq!(format, Some(InputFormat::Json));
                assert_eq!(style, Some(StylePreset::Ascii));
                assert_eq!(max_depth, Some(2));
                assert_eq!(root.as_deref(), Some("foo"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn given_unknown_style_when_parsing_then_rejects() {
        assert!(Cli::try_parse_from(["texttree", "render", "a.json", "--style", "fancy"]).is_err());
    }
}
