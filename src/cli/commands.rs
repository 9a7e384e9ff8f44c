//! Command dispatch: one handler per subcommand.

use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::application::services::RenderRequest;
use crate::application::{ApplicationError, InputFormat};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, local_config_path, Settings};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;
use crate::render::IoLineWriter;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Err(CliError::Usage("no command given, see --help".to_string()));
    };

    if let Commands::Completion { shell } = command {
        return completion(*shell);
    }

    let config_dir = resolve_config_dir(cli.config_dir.as_deref())?;
    let settings = Settings::load(Some(&config_dir))?;
    let container = ServiceContainer::new(settings);

    match command {
        Commands::Render {
            file,
            format,
            style,
            max_depth,
            marker,
            root,
        } => render(
            &container,
            RenderRequest {
                path: file.clone(),
                format: *format,
                style: *style,
                max_depth: *max_depth,
                truncation_marker: marker.clone(),
                root: root.clone(),
            },
        ),
        Commands::Find { file, name, format } => find(&container, file, name, *format),
        Commands::Config { command } => match command {
            ConfigCommands::Show => config_show(&container),
            ConfigCommands::Path => config_path(&config_dir),
            ConfigCommands::Template => {
                output::info(&Settings::template());
                Ok(())
            }
        },
        Commands::Completion { .. } => Ok(()),
    }
}

fn resolve_config_dir(dir: Option<&Path>) -> CliResult<PathBuf> {
    match dir {
        Some(dir) if dir.is_dir() => Ok(dir.to_path_buf()),
        Some(dir) => Err(CliError::InvalidArgs(format!(
            "not a directory: {}",
            dir.display()
        ))),
        None => std::env::current_dir()
            .map_err(|e| InfraError::io("determine current directory", e).into()),
    }
}

#[instrument(level = "debug", skip(container))]
fn render(container: &ServiceContainer, request: RenderRequest) -> CliResult<()> {
    let stdout = io::stdout();
    let mut out = IoLineWriter::new(BufWriter::new(stdout.lock()));
    container.tree_service().render_file(&request, &mut out)?;
    out.into_inner()
        .flush()
        .map_err(|e| InfraError::io("flush stdout", e))?;
    Ok(())
}

#[instrument(level = "debug", skip(container))]
fn find(
    container: &ServiceContainer,
    file: &Path,
    name: &str,
    format: Option<InputFormat>,
) -> CliResult<()> {
    let paths = container.tree_service().find_in_file(file, format, name)?;
    if paths.is_empty() {
        return Err(ApplicationError::NodeNotFound(name.to_string()).into());
    }
    debug!(matches = paths.len(), "found nodes");
    for path in paths {
        output::info(&path);
    }
    Ok(())
}

fn config_show(container: &ServiceContainer) -> CliResult<()> {
    output::info(&container.settings.to_toml()?);
    Ok(())
}

fn config_path(config_dir: &Path) -> CliResult<()> {
    match global_config_path() {
        Some(path) => output::action("global", &describe(&path)),
        None => output::warning("no home directory, global config disabled"),
    }
    output::action("local", &describe(&local_config_path(config_dir)));
    Ok(())
}

fn describe(path: &Path) -> String {
    if path.exists() {
        path.display().to_string()
    } else {
        format!("{} (not found)", path.display())
    }
}

fn completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
