//! Tree document service
//!
//! Loads nested documents into an arena and renders or searches them with
//! the effective settings.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::loader::{load_nested, InputFormat};
use crate::application::{ApplicationError, ApplicationResult};
use crate::config::Settings;
use crate::domain::{NodeId, StylePreset, TreeArena};
use crate::infrastructure::traits::FileSystem;
use crate::render::{LineWriter, RenderOptions, Renderer};

/// What to render and how; unset fields fall back to settings.
#[derive(Debug, Clone, Default)]
pub struct RenderRequest {
    pub path: PathBuf,
    pub format: Option<InputFormat>,
    pub style: Option<StylePreset>,
    pub max_depth: Option<usize>,
    pub truncation_marker: Option<String>,
    /// Render from the first node with this title instead of the root
    pub root: Option<String>,
}

impl RenderRequest {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }
}

/// A loaded document: the arena and its anonymous root.
#[derive(Debug)]
pub struct LoadedTree {
    pub tree: TreeArena,
    pub root: NodeId,
}

pub struct TreeService {
    fs: Arc<dyn FileSystem>,
    settings: Arc<Settings>,
}

impl TreeService {
    pub fn new(fs: Arc<dyn FileSystem>, settings: Arc<Settings>) -> Self {
        Self { fs, settings }
    }

    /// Builds a tree from a document; nodes take the configured style.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, path: &Path, format: Option<InputFormat>) -> ApplicationResult<LoadedTree> {
        let entries = load_nested(self.fs.as_ref(), path, format)?;
        let mut tree = TreeArena::with_style(self.settings.style.to_style());
        let root = tree.create_root();
        tree.add_from_nested_map(root, &entries)?;
        debug!(nodes = tree.len(), depth = tree.depth(root)?, "built tree");
        Ok(LoadedTree { tree, root })
    }

    /// Settings merged with per-request overrides.
    pub fn render_options(&self, request: &RenderRequest) -> RenderOptions {
        RenderOptions {
            style: request.style.map(StylePreset::style),
            max_depth: request.max_depth.or(self.settings.max_depth),
            truncation_marker: request
                .truncation_marker
                .clone()
                .unwrap_or_else(|| self.settings.truncation_marker.clone()),
        }
    }

    #[instrument(level = "debug", skip(self, out))]
    pub fn render_file<W: LineWriter>(&self, request: &RenderRequest, out: W) -> ApplicationResult<()> {
        let loaded = self.load(&request.path, request.format)?;
        let start = match &request.root {
            Some(name) => *loaded
                .tree
                .find_node(loaded.root, name)?
                .first()
                .ok_or_else(|| ApplicationError::NodeNotFound(name.clone()))?,
            None => loaded.root,
        };
        Renderer::with_options(&loaded.tree, self.render_options(request)).render(start, out)?;
        Ok(())
    }

    /// Title paths (`a / b / c`) of all nodes named `name`, in discovery order.
    #[instrument(level = "debug", skip(self))]
    pub fn find_in_file(
        &self,
        path: &Path,
        format: Option<InputFormat>,
        name: &str,
    ) -> ApplicationResult<Vec<String>> {
        let loaded = self.load(path, format)?;
        let mut paths = Vec::new();
        for id in loaded.tree.find_node(loaded.root, name)? {
            let mut titles = Vec::new();
            for ancestor in loaded.tree.trace(id)?.into_iter().rev() {
                if let Some(title) = loaded.tree.title(ancestor)? {
                    titles.push(title.to_string());
                }
            }
            paths.push(titles.join(" / "));
        }
        Ok(paths)
    }
}
