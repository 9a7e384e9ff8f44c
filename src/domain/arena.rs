//! Arena-backed forest of titled nodes.
//!
//! Nodes live in a generational arena and refer to each other by [`NodeId`].
//! Identity is the id, never the content: titles may repeat anywhere.

use std::fmt;

use generational_arena::{Arena, Index};
use tracing::{debug, instrument};

use crate::domain::error::{DomainError, TreeResult};
use crate::domain::nested::Nested;
use crate::domain::style::{Glyph, Style};
use crate::domain::value::Value;

/// Handle of a node inside a [`TreeArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(Index);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (slot, generation) = self.0.into_raw_parts();
        write!(f, "#{slot}v{generation}")
    }
}

/// One line item of a node: a value or a child, in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    Value(String),
    Child(NodeId),
}

/// Tree node in the arena.
#[derive(Debug, Clone)]
pub struct TreeNode {
    title: Option<String>,
    entries: Vec<Entry>,
    parent: Option<NodeId>,
    max_depth: Option<usize>,
    style: Style,
}

impl TreeNode {
    fn new(title: Option<String>, style: Style) -> Self {
        Self {
            title,
            entries: Vec::new(),
            parent: None,
            max_depth: None,
            style,
        }
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    fn has_title(&self) -> bool {
        self.title.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Values and children interleaved, in the order they were added.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn values(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().filter_map(|e| match e {
            Entry::Value(v) => Some(v.as_str()),
            Entry::Child(_) => None,
        })
    }

    pub fn children(&self) -> impl DoubleEndedIterator<Item = NodeId> + '_ {
        self.entries.iter().filter_map(|e| match e {
            Entry::Child(c) => Some(*c),
            Entry::Value(_) => None,
        })
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Maximum number of this node's own values to render.
    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    pub fn style(&self) -> &Style {
        &self.style
    }
}

/// A forest of nodes sharing one arena.
///
/// New nodes start as roots and take the arena's default style. The
/// parent/child relation is kept acyclic: every operation that could break
/// that is checked before anything is written.
#[derive(Debug)]
pub struct TreeArena {
    arena: Arena<TreeNode>,
    default_style: Style,
}

impl Default for TreeArena {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeArena {
    pub fn new() -> Self {
        Self::with_style(Style::default())
    }

    /// Arena whose new nodes start with `style`.
    pub fn with_style(style: Style) -> Self {
        Self {
            arena: Arena::new(),
            default_style: style,
        }
    }

    pub fn default_style(&self) -> &Style {
        &self.default_style
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.arena.contains(id.0)
    }

    fn insert_node(&mut self, node: TreeNode) -> NodeId {
        NodeId(self.arena.insert(node))
    }

    /// Creates a detached, anonymous root.
    #[instrument(level = "trace", skip(self))]
    pub fn create_root(&mut self) -> NodeId {
        self.insert_node(TreeNode::new(None, self.default_style.clone()))
    }

    /// Creates a detached node with a title.
    #[instrument(level = "trace", skip(self))]
    pub fn create_node(&mut self, title: &str) -> NodeId {
        self.insert_node(TreeNode::new(
            Some(title.to_string()),
            self.default_style.clone(),
        ))
    }

    pub fn get_node(&self, id: NodeId) -> TreeResult<&TreeNode> {
        self.arena.get(id.0).ok_or(DomainError::UnknownNode(id))
    }

    fn get_node_mut(&mut self, id: NodeId) -> TreeResult<&mut TreeNode> {
        self.arena.get_mut(id.0).ok_or(DomainError::UnknownNode(id))
    }

    pub fn title(&self, id: NodeId) -> TreeResult<Option<&str>> {
        Ok(self.get_node(id)?.title())
    }

    #[instrument(level = "trace", skip(self))]
    pub fn set_title(&mut self, id: NodeId, title: &str) -> TreeResult<()> {
        self.get_node_mut(id)?.title = Some(title.to_string());
        Ok(())
    }

    /// Appends the string form of `value` to the node's values.
    pub fn add_value<V>(&mut self, id: NodeId, value: V) -> TreeResult<()>
    where
        V: TryInto<Value>,
        DomainError: From<V::Error>,
    {
        self.get_node(id)?;
        let value: Value = value.try_into()?;
        self.get_node_mut(id)?
            .entries
            .push(Entry::Value(value.to_string()));
        Ok(())
    }

    /// Replaces all values of a node; children keep their order after them.
    ///
    /// Every element is converted before the node is touched.
    pub fn set_values<I>(&mut self, id: NodeId, values: I) -> TreeResult<()>
    where
        I: IntoIterator,
        I::Item: TryInto<Value>,
        DomainError: From<<I::Item as TryInto<Value>>::Error>,
    {
        self.get_node(id)?;
        let mut entries = values
            .into_iter()
            .map(|v| -> TreeResult<Entry> {
                let value: Value = v.try_into()?;
                Ok(Entry::Value(value.to_string()))
            })
            .collect::<TreeResult<Vec<_>>>()?;
        let node = self.get_node_mut(id)?;
        entries.extend(node.children().map(Entry::Child));
        node.entries = entries;
        Ok(())
    }

    pub fn values(&self, id: NodeId) -> TreeResult<Vec<&str>> {
        Ok(self.get_node(id)?.values().collect())
    }

    /// Direct children of a node, in attachment order.
    pub fn children(&self, id: NodeId) -> TreeResult<Vec<NodeId>> {
        Ok(self.get_node(id)?.children().collect())
    }

    /// Parent of a node, `None` for a root.
    pub fn parent(&self, id: NodeId) -> TreeResult<Option<NodeId>> {
        Ok(self.get_node(id)?.parent)
    }

    /// Follows parent links up to the root.
    pub fn root_of(&self, id: NodeId) -> TreeResult<NodeId> {
        let mut current = id;
        while let Some(parent) = self.get_node(current)?.parent {
            current = parent;
        }
        Ok(current)
    }

    /// The node followed by all of its ancestors, nearest first.
    pub fn trace(&self, id: NodeId) -> TreeResult<Vec<NodeId>> {
        let mut trace = vec![id];
        let mut current = self.get_node(id)?;
        while let Some(parent) = current.parent {
            trace.push(parent);
            current = self.get_node(parent)?;
        }
        Ok(trace)
    }

    pub fn max_depth(&self, id: NodeId) -> TreeResult<Option<usize>> {
        Ok(self.get_node(id)?.max_depth)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn set_max_depth(&mut self, id: NodeId, max_depth: Option<usize>) -> TreeResult<()> {
        self.get_node_mut(id)?.max_depth = max_depth;
        Ok(())
    }

    pub fn style(&self, id: NodeId) -> TreeResult<&Style> {
        Ok(&self.get_node(id)?.style)
    }

    /// Replaces the whole glyph set of a node.
    #[instrument(level = "trace", skip(self))]
    pub fn set_style(&mut self, id: NodeId, style: Style) -> TreeResult<()> {
        self.get_node_mut(id)?.style = style;
        Ok(())
    }

    /// Overrides a single glyph of a node.
    #[instrument(level = "trace", skip(self))]
    pub fn set_glyph(&mut self, id: NodeId, glyph: Glyph, text: &str) -> TreeResult<()> {
        self.get_node_mut(id)?.style.set(glyph, text);
        Ok(())
    }

    /// Creates a titled node under `parent` and returns it.
    #[instrument(level = "trace", skip(self))]
    pub fn new_child(&mut self, parent: NodeId, title: &str) -> TreeResult<NodeId> {
        self.get_node(parent)?;
        if title.is_empty() {
            return Err(DomainError::InvalidTitle);
        }
        let child = self.create_node(title);
        self.link(parent, child)?;
        Ok(child)
    }

    /// Attaches a deep copy of `node` under `parent` and returns the copy.
    ///
    /// `node` itself is left as it was, wherever it is. Adding the same node
    /// twice therefore yields two independent subtrees.
    #[instrument(level = "debug", skip(self))]
    pub fn add_child(&mut self, parent: NodeId, node: NodeId) -> TreeResult<NodeId> {
        self.get_node(parent)?;
        if !self.get_node(node)?.has_title() {
            return Err(DomainError::InvalidTitle);
        }
        let copy = self.copy_subtree(node)?;
        self.link(parent, copy)?;
        debug!(%node, %copy, %parent, "attached copy");
        Ok(copy)
    }

    /// Moves `node` under `parent`, detaching it from its previous parent.
    ///
    /// Fails with [`DomainError::CircularReference`] when `parent` is `node`,
    /// one of its descendants or one of its ancestors.
    #[instrument(level = "debug", skip(self))]
    pub fn set_parent(&mut self, node: NodeId, parent: NodeId) -> TreeResult<()> {
        if !self.get_node(node)?.has_title() {
            return Err(DomainError::InvalidTitle);
        }
        if self.trace(parent)?.contains(&node) || self.trace(node)?.contains(&parent) {
            debug!(%node, %parent, "rejected circular parent");
            return Err(DomainError::CircularReference {
                child: node,
                parent,
            });
        }
        self.detach(node)?;
        self.link(parent, node)
    }

    /// Drops `node` and its whole subtree, detaching it from its parent first.
    ///
    /// Returns the number of nodes removed; their ids become unknown. Use it
    /// to release a source after [`add_child`](Self::add_child) copied it.
    #[instrument(level = "debug", skip(self))]
    pub fn remove(&mut self, node: NodeId) -> TreeResult<usize> {
        self.get_node(node)?;
        let subtree: Vec<NodeId> = self.iter_from(node).map(|(id, _)| id).collect();
        self.detach(node)?;
        for id in &subtree {
            self.arena.remove(id.0);
        }
        debug!(%node, removed = subtree.len(), "removed subtree");
        Ok(subtree.len())
    }

    fn link(&mut self, parent: NodeId, child: NodeId) -> TreeResult<()> {
        self.get_node_mut(child)?.parent = Some(parent);
        self.get_node_mut(parent)?.entries.push(Entry::Child(child));
        Ok(())
    }

    fn detach(&mut self, node: NodeId) -> TreeResult<()> {
        if let Some(old_parent) = self.get_node_mut(node)?.parent.take() {
            self.get_node_mut(old_parent)?
                .entries
                .retain(|e| *e != Entry::Child(node));
        }
        Ok(())
    }

    fn copy_subtree(&mut self, id: NodeId) -> TreeResult<NodeId> {
        let source = self.get_node(id)?.clone();
        let copy = self.insert_node(TreeNode {
            entries: Vec::with_capacity(source.entries.len()),
            parent: None,
            ..source.clone()
        });
        for entry in source.entries {
            match entry {
                Entry::Value(v) => self.get_node_mut(copy)?.entries.push(Entry::Value(v)),
                Entry::Child(child) => {
                    let child_copy = self.copy_subtree(child)?;
                    self.link(copy, child_copy)?;
                }
            }
        }
        Ok(copy)
    }

    /// Builds a subtree under `id` from ordered `(key, value)` pairs.
    ///
    /// Scalars become values of `id`; lists and maps become children titled
    /// by their key. The input is validated first, so a failure leaves the
    /// tree untouched.
    #[instrument(level = "debug", skip(self, entries))]
    pub fn add_from_nested_map(
        &mut self,
        id: NodeId,
        entries: &[(String, Nested)],
    ) -> TreeResult<()> {
        self.get_node(id)?;
        for (key, value) in entries {
            validate_nested_entry(key, value)?;
        }
        for (key, value) in entries {
            self.add_nested_entry(id, key, value)?;
        }
        Ok(())
    }

    /// Adds any nested shape under `id`: a scalar becomes a value, a list
    /// contributes one entry per element, a map behaves like
    /// [`add_from_nested_map`](Self::add_from_nested_map).
    pub fn add_nested(&mut self, id: NodeId, nested: &Nested) -> TreeResult<()> {
        self.get_node(id)?;
        validate_nested(nested)?;
        self.add_nested_unchecked(id, nested)
    }

    fn add_nested_unchecked(&mut self, id: NodeId, nested: &Nested) -> TreeResult<()> {
        match nested {
            Nested::Scalar(v) => self.add_value(id, v.clone()),
            Nested::List(items) => {
                for (index, item) in items.iter().enumerate() {
                    self.add_nested_entry(id, &index.to_string(), item)?;
                }
                Ok(())
            }
            Nested::Map(entries) => {
                for (key, value) in entries {
                    self.add_nested_entry(id, key, value)?;
                }
                Ok(())
            }
        }
    }

    fn add_nested_entry(&mut self, id: NodeId, key: &str, value: &Nested) -> TreeResult<()> {
        match value {
            Nested::Scalar(v) => self.add_value(id, v.clone()),
            Nested::List(_) | Nested::Map(_) => {
                let child = self.new_child(id, key)?;
                self.add_nested_unchecked(child, value)
            }
        }
    }

    /// All nodes titled `name` in the whole tree containing `id`, depth-first
    /// from its root, in discovery order.
    #[instrument(level = "debug", skip(self))]
    pub fn find_node(&self, id: NodeId, name: &str) -> TreeResult<Vec<NodeId>> {
        let root = self.root_of(id)?;
        Ok(self
            .iter_from(root)
            .filter(|(_, node)| node.title() == Some(name))
            .map(|(idx, _)| idx)
            .collect())
    }

    /// Pre-order traversal of the subtree rooted at `id`.
    pub fn iter_from(&self, id: NodeId) -> TreeIterator<'_> {
        TreeIterator::new(self, id)
    }

    /// Number of node levels in the subtree rooted at `id`.
    pub fn depth(&self, id: NodeId) -> TreeResult<usize> {
        let node = self.get_node(id)?;
        let mut deepest = 0;
        for child in node.children() {
            deepest = deepest.max(self.depth(child)?);
        }
        Ok(1 + deepest)
    }
}

/// A list element or map value needs a title when it becomes a child.
fn validate_nested_entry(key: &str, value: &Nested) -> TreeResult<()> {
    match value {
        Nested::Scalar(_) => Ok(()),
        Nested::List(_) | Nested::Map(_) if key.is_empty() => Err(DomainError::InvalidTitle),
        _ => validate_nested(value),
    }
}

fn validate_nested(nested: &Nested) -> TreeResult<()> {
    match nested {
        Nested::Scalar(_) => Ok(()),
        Nested::List(items) => items.iter().try_for_each(validate_nested),
        Nested::Map(entries) => entries
            .iter()
            .try_for_each(|(key, value)| validate_nested_entry(key, value)),
    }
}

pub struct TreeIterator<'a> {
    arena: &'a TreeArena,
    stack: Vec<NodeId>,
}

impl<'a> TreeIterator<'a> {
    fn new(arena: &'a TreeArena, start: NodeId) -> Self {
        Self {
            arena,
            stack: vec![start],
        }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (NodeId, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current) = self.stack.pop() {
            if let Ok(node) = self.arena.get_node(current) {
                // Push children in reverse order for left-to-right traversal
                self.stack.extend(node.children().rev());
                return Some((current, node));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_new_child_when_created_then_parent_links_both_ways() {
        let mut tree = TreeArena::new();
        let root = tree.create_root();
        let child = tree.new_child(root, "foo").unwrap();

        assert_eq!(tree.parent(child).unwrap(), Some(root));
        assert_eq!(tree.parent(root).unwrap(), None);
        assert_eq!(tree.children(root).unwrap(), vec![child]);
        assert_eq!(tree.root_of(child).unwrap(), root);
    }

    #[test]
    fn given_empty_title_when_new_child_then_invalid_title() {
        let mut tree = TreeArena::new();
        let root = tree.create_root();
        assert_eq!(tree.new_child(root, ""), Err(DomainError::InvalidTitle));
        assert!(tree.children(root).unwrap().is_empty());
    }

    #[test]
    fn given_values_and_children_when_added_then_entries_interleave() {
        let mut tree = TreeArena::new();
        let root = tree.create_root();
        tree.add_value(root, "a").unwrap();
        let child = tree.new_child(root, "c").unwrap();
        tree.add_value(root, 2).unwrap();

        let node = tree.get_node(root).unwrap();
        assert_eq!(
            node.entries(),
            &[
                Entry::Value("a".into()),
                Entry::Child(child),
                Entry::Value("2".into())
            ]
        );
        assert_eq!(tree.values(root).unwrap(), vec!["a", "2"]);
    }

    #[test]
    fn given_set_values_when_node_has_children_then_children_follow_values() {
        let mut tree = TreeArena::new();
        let root = tree.create_root();
        tree.add_value(root, "old").unwrap();
        let child = tree.new_child(root, "c").unwrap();

        tree.set_values(root, ["x", "y"]).unwrap();

        assert_eq!(
            tree.get_node(root).unwrap().entries(),
            &[
                Entry::Value("x".into()),
                Entry::Value("y".into()),
                Entry::Child(child)
            ]
        );
    }

    #[test]
    fn given_non_scalar_in_set_values_when_called_then_values_unchanged() {
        let mut tree = TreeArena::new();
        let root = tree.create_root();
        tree.add_value(root, "keep").unwrap();

        let result = tree.set_values(
            root,
            vec![Nested::from("x"), Nested::map([("k", Nested::from(1))])],
        );

        assert_eq!(
            result,
            Err(DomainError::UnsupportedValueType { found: "map" })
        );
        assert_eq!(tree.values(root).unwrap(), vec!["keep"]);
    }

    #[test]
    fn given_node_of_other_arena_when_accessed_then_unknown_node() {
        let mut other = TreeArena::new();
        let _ = other.create_root();
        let foreign = other.create_node("x");

        let tree = TreeArena::new();
        assert_eq!(tree.title(foreign), Err(DomainError::UnknownNode(foreign)));
    }

    #[test]
    fn given_chain_when_tracing_then_returns_node_and_ancestors() {
        let mut tree = TreeArena::new();
        let root = tree.create_root();
        let a = tree.new_child(root, "a").unwrap();
        let b = tree.new_child(a, "b").unwrap();

        assert_eq!(tree.trace(b).unwrap(), vec![b, a, root]);
        assert_eq!(tree.depth(root).unwrap(), 3);
    }

    #[test]
    fn given_subtree_when_iterating_then_visits_pre_order() {
        let mut tree = TreeArena::new();
        let root = tree.create_root();
        let a = tree.new_child(root, "a").unwrap();
        let a1 = tree.new_child(a, "a1").unwrap();
        let b = tree.new_child(root, "b").unwrap();

        let order: Vec<NodeId> = tree.iter_from(root).map(|(id, _)| id).collect();
        assert_eq!(order, vec![root, a, a1, b]);
    }

    #[test]
    fn given_attached_source_when_removed_then_only_copy_remains() {
        let mut tree = TreeArena::new();
        let root = tree.create_root();
        let source = tree.create_node("src");
        tree.new_child(source, "inner").unwrap();
        let copy = tree.add_child(root, source).unwrap();

        let removed = tree.remove(source).unwrap();

        assert_eq!(removed, 2);
        assert_eq!(tree.len(), 3);
        assert!(!tree.contains(source));
        assert_eq!(tree.children(root).unwrap(), vec![copy]);
        assert_eq!(tree.depth(root).unwrap(), 3);
    }

    #[test]
    fn given_attached_child_when_removed_then_parent_forgets_it() {
        let mut tree = TreeArena::new();
        let root = tree.create_root();
        tree.add_value(root, "v").unwrap();
        let child = tree.new_child(root, "c").unwrap();

        tree.remove(child).unwrap();

        assert_eq!(tree.get_node(root).unwrap().entries(), &[Entry::Value("v".into())]);
        assert_eq!(tree.remove(child), Err(DomainError::UnknownNode(child)));
    }

    #[test]
    fn given_node_id_when_displayed_then_shows_slot_and_generation() {
        let mut tree = TreeArena::new();
        let root = tree.create_root();
        assert_eq!(root.to_string(), "#0v0");
    }
}
