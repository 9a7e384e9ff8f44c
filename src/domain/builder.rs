//! Fluent construction on top of [`TreeArena`].

use tracing::{instrument, warn};

use crate::domain::arena::{NodeId, TreeArena};
use crate::domain::error::{DomainError, TreeResult};
use crate::domain::nested::Nested;
use crate::domain::style::{Glyph, Style};
use crate::domain::value::Value;

/// Cursor on one node of an arena.
///
/// Value and style setters return the cursor itself; [`child`](Self::child)
/// and [`attach`](Self::attach) move it down, [`end`](Self::end) moves it
/// back up:
///
/// ```
/// use texttree::domain::{TreeArena, TreeBuilder};
///
/// let mut tree = TreeArena::new();
/// let root = TreeBuilder::root(&mut tree)
///     .child("foo")?
///         .value("first foo")
///     .end()
///     .id();
/// assert_eq!(tree.children(root)?.len(), 1);
/// # Ok::<(), texttree::domain::DomainError>(())
/// ```
pub struct TreeBuilder<'a> {
    tree: &'a mut TreeArena,
    current: NodeId,
}

impl<'a> TreeBuilder<'a> {
    /// Starts a new anonymous root in `tree`.
    pub fn root(tree: &'a mut TreeArena) -> Self {
        let current = tree.create_root();
        Self { tree, current }
    }

    /// Positions the cursor on an existing node.
    pub fn at(tree: &'a mut TreeArena, node: NodeId) -> TreeResult<Self> {
        if !tree.contains(node) {
            return Err(DomainError::UnknownNode(node));
        }
        Ok(Self {
            tree,
            current: node,
        })
    }

    pub fn id(&self) -> NodeId {
        self.current
    }

    pub fn title(self, title: &str) -> Self {
        self.apply(|tree, id| tree.set_title(id, title))
    }

    pub fn value(self, value: impl Into<Value>) -> Self {
        let value = value.into();
        self.apply(|tree, id| tree.add_value(id, value))
    }

    /// Replaces the current node's values.
    pub fn values<I>(self, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        self.apply(|tree, id| tree.set_values(id, values))
    }

    pub fn max_depth(self, max_depth: usize) -> Self {
        self.apply(|tree, id| tree.set_max_depth(id, Some(max_depth)))
    }

    pub fn style(self, style: Style) -> Self {
        self.apply(|tree, id| tree.set_style(id, style))
    }

    pub fn glyph(self, glyph: Glyph, text: &str) -> Self {
        self.apply(|tree, id| tree.set_glyph(id, glyph, text))
    }

    /// Creates a titled child and moves the cursor onto it.
    #[instrument(level = "trace", skip(self), fields(parent = %self.current))]
    pub fn child(self, title: &str) -> TreeResult<Self> {
        let child = self.tree.new_child(self.current, title)?;
        Ok(Self {
            tree: self.tree,
            current: child,
        })
    }

    /// Attaches a copy of `node` and moves the cursor onto the copy.
    #[instrument(level = "trace", skip(self), fields(parent = %self.current))]
    pub fn attach(self, node: NodeId) -> TreeResult<Self> {
        let copy = self.tree.add_child(self.current, node)?;
        Ok(Self {
            tree: self.tree,
            current: copy,
        })
    }

    /// Loads a nested structure into the current node.
    pub fn nested(self, nested: &Nested) -> TreeResult<Self> {
        self.tree.add_nested(self.current, nested)?;
        Ok(self)
    }

    /// Moves the cursor to the parent; stays put on a root.
    pub fn end(self) -> Self {
        let current = self
            .tree
            .parent(self.current)
            .ok()
            .flatten()
            .unwrap_or(self.current);
        Self {
            tree: self.tree,
            current,
        }
    }

    /// Moves the cursor to the root of the current tree.
    pub fn root_node(self) -> Self {
        let current = self.tree.root_of(self.current).unwrap_or(self.current);
        Self {
            tree: self.tree,
            current,
        }
    }

    // Setters chain, so a failure is logged and the cursor kept.
    fn apply<F>(self, f: F) -> Self
    where
        F: FnOnce(&mut TreeArena, NodeId) -> TreeResult<()>,
    {
        if let Err(error) = f(self.tree, self.current) {
            warn!(node = %self.current, %error, "builder step skipped");
        }
        self
    }
}
