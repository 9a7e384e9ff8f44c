//! Unix `tree`-style text rendering.
//!
//! Rendering is a depth-first, pre-order walk over the entries of the
//! rendering root. Each entry line gets the accumulated prefix plus a
//! connector; children extend the prefix with the matching continuation
//! glyph. The tree is only read, so rendering the same tree twice yields the
//! same lines.
//!
//! ```text
//! .
//! │
//! ├── foo
//! │   ├── first foo
//! │   └── sub foo
//! │       └── 1 sub foo
//! └── bar
//!     └── first bar
//!
//! ```

pub mod error;
pub mod writer;

use itertools::{Itertools, Position};
use tracing::instrument;

use crate::domain::{Entry, Nested, NodeId, Style, TreeArena, TreeNode};

pub use error::{RenderError, RenderResult};
pub use writer::{IoLineWriter, LineWriter};

/// Line printed in place of values beyond a node's cap.
pub const TRUNCATION_MARKER: &str = "...";

/// Per-call overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Glyphs for the whole render; the rendering root's style when `None`
    pub style: Option<Style>,
    /// Value cap for nodes that have none of their own
    pub max_depth: Option<usize>,
    pub truncation_marker: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            style: None,
            max_depth: None,
            truncation_marker: TRUNCATION_MARKER.to_string(),
        }
    }
}

impl RenderOptions {
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    pub fn with_truncation_marker(mut self, marker: impl Into<String>) -> Self {
        self.truncation_marker = marker.into();
        self
    }
}

enum Line<'n> {
    Value(&'n str),
    Truncated,
    Child(NodeId),
}

pub struct Renderer<'a> {
    tree: &'a TreeArena,
    options: RenderOptions,
}

impl<'a> Renderer<'a> {
    pub fn new(tree: &'a TreeArena) -> Self {
        Self::with_options(tree, RenderOptions::default())
    }

    pub fn with_options(tree: &'a TreeArena, options: RenderOptions) -> Self {
        Self { tree, options }
    }

    /// Writes the tree below `root` to `out`, `root` acting as the top.
    ///
    /// Emits the header (title or `.`), a bare bar line, every entry, and a
    /// closing blank line. Lines already written stay written on error.
    #[instrument(level = "debug", skip(self, out))]
    pub fn render<W: LineWriter>(&self, root: NodeId, mut out: W) -> RenderResult<()> {
        let node = self.tree.get_node(root)?;
        let style = self.options.style.as_ref().unwrap_or(node.style());
        let header = match node.title() {
            Some(title) if !title.is_empty() => title,
            _ => ".",
        };
        out.write_line(header)?;
        out.write_line(style.header_bar())?;
        self.render_entries(node, "", style, &mut out)?;
        out.write_line("")?;
        Ok(())
    }

    /// Renders into a string, each line terminated by `\n`.
    pub fn render_to_string(&self, root: NodeId) -> RenderResult<String> {
        let mut out = String::new();
        self.render(root, &mut out)?;
        Ok(out)
    }

    pub fn render_lines(&self, root: NodeId) -> RenderResult<Vec<String>> {
        let mut out = Vec::new();
        self.render(root, &mut out)?;
        Ok(out)
    }

    fn render_entries<W: LineWriter>(
        &self,
        node: &TreeNode,
        prefix: &str,
        style: &Style,
        out: &mut W,
    ) -> RenderResult<()> {
        for (position, line) in self.visible_lines(node).into_iter().with_position() {
            let (connector, indent) = match position {
                Position::Last | Position::Only => (&style.last, &style.empty),
                Position::First | Position::Middle => (&style.branch, &style.continuation),
            };
            match line {
                Line::Value(value) => out.write_line(&format!("{prefix}{connector}{value}"))?,
                Line::Truncated => out.write_line(&format!(
                    "{prefix}{connector}{}",
                    self.options.truncation_marker
                ))?,
                Line::Child(id) => {
                    let child = self.tree.get_node(id)?;
                    let title = child.title().unwrap_or_default();
                    out.write_line(&format!("{prefix}{connector}{title}"))?;
                    self.render_entries(child, &format!("{prefix}{indent}"), style, out)?;
                }
            }
        }
        Ok(())
    }

    /// Entries to draw for `node`, values capped at its effective limit.
    fn visible_lines<'n>(&self, node: &'n TreeNode) -> Vec<Line<'n>> {
        let cap = node.max_depth().or(self.options.max_depth);
        let mut shown = 0;
        let mut truncated = false;
        let mut lines = Vec::with_capacity(node.entries().len());
        for entry in node.entries() {
            match entry {
                Entry::Child(id) => lines.push(Line::Child(*id)),
                Entry::Value(value) => match cap {
                    Some(limit) if shown >= limit => {
                        if !truncated {
                            lines.push(Line::Truncated);
                            truncated = true;
                        }
                    }
                    _ => {
                        shown += 1;
                        lines.push(Line::Value(value));
                    }
                },
            }
        }
        lines
    }
}

/// Renders a nested map directly, under an anonymous root.
pub fn render_nested<W: LineWriter>(
    entries: &[(String, Nested)],
    out: W,
    options: RenderOptions,
) -> RenderResult<()> {
    let mut tree = TreeArena::new();
    let root = tree.create_root();
    tree.add_from_nested_map(root, entries)?;
    Renderer::with_options(&tree, options).render(root, out)
}
