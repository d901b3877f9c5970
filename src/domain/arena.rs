use generational_arena::{Arena, Index};
use std::borrow::Borrow;
use std::collections::HashSet;
use std::fmt;
use tracing::{debug, instrument};

use crate::domain::error::{TreeError, TreeResult};
use crate::domain::search::{SearchMethod, Traversal};

/// Stable handle of a node inside a [`Tree`].
///
/// Two handles are equal iff they denote the same node instance; this is the
/// identity comparison used by membership, insertion and distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(Index);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (slot, generation) = self.0.into_raw_parts();
        write!(f, "#{slot}v{generation}")
    }
}

/// Tree node in the arena-based hierarchy structure.
#[derive(Debug, Clone)]
pub struct Node<T> {
    /// Label carried by this node, compared by value in content searches
    pub content: T,
    /// Ordered child handles; order decides traversal branching order
    pub children: Vec<NodeId>,
}

impl<T> Node<T> {
    pub fn new(content: T) -> Self {
        Self {
            content,
            children: Vec::new(),
        }
    }

    /// Appends `child` unless it is already a child of this node.
    pub fn add_child(&mut self, child: NodeId) {
        if !self.children.contains(&child) {
            self.children.push(child);
        }
    }

    /// Removes `child` if present; no-op otherwise.
    pub fn remove_child(&mut self, child: NodeId) {
        self.children.retain(|&c| c != child);
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Arena-based ordered tree with blind search operations.
///
/// Nodes are created detached with [`Tree::new_node`] and become part of the
/// tree once attached below the root. Every algorithm assumes the structure
/// reachable from the root is acyclic and that each node has one parent.
/// Neither is checked.
#[derive(Debug, Clone)]
pub struct Tree<T> {
    /// Arena storage for all nodes, attached or not
    arena: Arena<Node<T>>,
    /// Root handle, None for a tree without root
    root: Option<NodeId>,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Tree<T> {
    /// Creates a tree without a root.
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    /// Creates a tree whose root holds `content`.
    pub fn with_root(content: T) -> (Self, NodeId) {
        let mut tree = Self::new();
        let root = tree.new_node(content);
        tree.root = Some(root);
        (tree, root)
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Allocates a detached node.
    pub fn new_node(&mut self, content: T) -> NodeId {
        NodeId(self.arena.insert(Node::new(content)))
    }

    pub fn node(&self, id: NodeId) -> Option<&Node<T>> {
        self.arena.get(id.0)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node<T>> {
        self.arena.get_mut(id.0)
    }

    pub fn content(&self, id: NodeId) -> Option<&T> {
        self.node(id).map(|n| &n.content)
    }

    pub fn children(&self, id: NodeId) -> Option<&[NodeId]> {
        self.node(id).map(|n| n.children.as_slice())
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.arena.contains(id.0)
    }

    /// Number of nodes held by the arena, reachable or not.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    #[instrument(level = "trace", skip(self))]
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> TreeResult<()> {
        if !self.contains_node(child) {
            return Err(TreeError::UnknownNode(child));
        }
        self.node_mut(parent)
            .ok_or(TreeError::UnknownNode(parent))?
            .add_child(child);
        Ok(())
    }

    #[instrument(level = "trace", skip(self))]
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> TreeResult<()> {
        self.node_mut(parent)
            .ok_or(TreeError::UnknownNode(parent))?
            .remove_child(child);
        Ok(())
    }

    /// Height of the subtree rooted at `id`: 0 for a leaf.
    ///
    /// Returns None for a stale handle.
    #[instrument(level = "trace", skip(self))]
    pub fn depth(&self, id: NodeId) -> Option<usize> {
        self.node(id)?;
        let mut max_depth = 0;
        let mut stack = vec![(id, 0usize)];

        while let Some((current, level)) = stack.pop() {
            max_depth = max_depth.max(level);
            if let Some(node) = self.node(current) {
                for &child in &node.children {
                    stack.push((child, level + 1));
                }
            }
        }

        Some(max_depth)
    }

    /// Iterates over the nodes reachable from the root in `method` order.
    pub fn traverse(&self, method: SearchMethod) -> Traversal<'_, T> {
        Traversal::new(self, method)
    }

    /// Tests whether `node` is reachable from the root (identity comparison).
    #[instrument(level = "trace", skip(self))]
    pub fn is_in_tree(&self, node: NodeId, method: SearchMethod) -> bool {
        self.traverse(method).any(|id| id == node)
    }

    /// Attaches `nodes` below `parent`.
    ///
    /// Fails without mutating anything when the tree has no root, when
    /// `parent` is not reachable from the root, or when any handle is stale.
    /// Nodes already attached to `parent` are skipped.
    #[instrument(level = "debug", skip(self, nodes))]
    pub fn insert<I>(&mut self, parent: NodeId, nodes: I, method: SearchMethod) -> TreeResult<()>
    where
        I: IntoIterator<Item = NodeId>,
    {
        if self.root.is_none() {
            return Err(TreeError::NoRoot);
        }
        if !self.is_in_tree(parent, method) {
            return Err(TreeError::ParentNotInTree(parent));
        }

        let nodes: Vec<NodeId> = nodes.into_iter().collect();
        if let Some(&stale) = nodes.iter().find(|&&id| !self.contains_node(id)) {
            return Err(TreeError::UnknownNode(stale));
        }

        let parent_node = self
            .node_mut(parent)
            .ok_or(TreeError::ParentNotInTree(parent))?;
        for id in nodes {
            parent_node.add_child(id);
        }
        debug!(%parent, children = parent_node.children.len(), "inserted nodes");
        Ok(())
    }

    /// Returns the first node whose content equals `content`, in `method` order.
    pub fn search<Q>(&self, content: &Q, method: SearchMethod) -> Option<NodeId>
    where
        T: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.traverse(method)
            .find(|&id| {
                self.content(id)
                    .is_some_and(|c| <T as Borrow<Q>>::borrow(c) == content)
            })
    }

    /// Shallowest, left-most node holding `content`.
    pub fn search_bfs<Q>(&self, content: &Q) -> Option<NodeId>
    where
        T: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.search(content, SearchMethod::Bfs)
    }

    /// First node holding `content` along the left-most deepest-first path.
    pub fn search_dfs<Q>(&self, content: &Q) -> Option<NodeId>
    where
        T: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.search(content, SearchMethod::Dfs)
    }

    /// Every reachable node in `method` visitation order.
    #[instrument(level = "debug", skip(self))]
    pub fn order(&self, method: SearchMethod) -> Vec<NodeId> {
        self.traverse(method).collect()
    }

    pub fn order_bfs(&self) -> Vec<NodeId> {
        self.order(SearchMethod::Bfs)
    }

    pub fn order_dfs(&self) -> Vec<NodeId> {
        self.order(SearchMethod::Dfs)
    }

    /// Number of edges on the downward path from `from` to `to`.
    ///
    /// None when `from` is absent or `to` is not in the subtree of `from`.
    /// Children are tried in stored order and the first path found wins, which
    /// is the unique path only while the tree is single-parent and acyclic.
    #[instrument(level = "trace", skip(self))]
    pub fn distance_between(&self, from: Option<NodeId>, to: NodeId) -> Option<usize> {
        let mut stack = vec![(from?, 0usize)];

        while let Some((current, distance)) = stack.pop() {
            if current == to {
                return Some(distance);
            }
            if let Some(node) = self.node(current) {
                for &child in node.children.iter().rev() {
                    stack.push((child, distance + 1));
                }
            }
        }

        None
    }

    /// Frees every node that is no longer reachable from the root.
    ///
    /// Returns the number of nodes removed. Handles to removed nodes become
    /// stale and are rejected by later operations.
    #[instrument(level = "debug", skip(self))]
    pub fn prune_unreachable(&mut self) -> usize {
        let reachable: HashSet<NodeId> = self.traverse(SearchMethod::Bfs).collect();
        let unreachable: Vec<Index> = self
            .arena
            .iter()
            .map(|(idx, _)| idx)
            .filter(|&idx| !reachable.contains(&NodeId(idx)))
            .collect();
        for &idx in &unreachable {
            self.arena.remove(idx);
        }
        // Drop dangling child handles left behind by removed nodes
        for (_, node) in self.arena.iter_mut() {
            node.children.retain(|c| reachable.contains(c));
        }
        debug!(removed = unreachable.len(), "pruned unreachable nodes");
        unreachable.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Tree<&'static str>, NodeId, Vec<NodeId>) {
        let (mut tree, root) = Tree::with_root("1");
        let ids: Vec<NodeId> = ["2", "3", "4", "5"]
            .into_iter()
            .map(|c| tree.new_node(c))
            .collect();
        tree.insert(root, [ids[0], ids[1], ids[2]], SearchMethod::Bfs)
            .unwrap();
        tree.insert(ids[0], [ids[3]], SearchMethod::Dfs).unwrap();
        (tree, root, ids)
    }

    #[test]
    fn given_same_child_twice_when_add_child_then_children_unchanged() {
        let mut node = Node::new("p");
        let (mut tree, _) = Tree::with_root("r");
        let child = tree.new_node("c");
        node.add_child(child);
        node.add_child(child);
        assert_eq!(node.children, vec![child]);
    }

    #[test]
    fn given_absent_child_when_remove_child_then_noop() {
        let (mut tree, root) = Tree::with_root("r");
        let a = tree.new_node("a");
        let b = tree.new_node("b");
        tree.add_child(root, a).unwrap();
        tree.remove_child(root, b).unwrap();
        assert_eq!(tree.children(root), Some(&[a][..]));
        tree.remove_child(root, a).unwrap();
        assert!(tree.node(root).unwrap().is_leaf());
    }

    #[test]
    fn given_leaf_when_depth_then_zero() {
        let (tree, root, ids) = sample();
        assert_eq!(tree.depth(ids[3]), Some(0));
        assert_eq!(tree.depth(ids[0]), Some(1));
        assert_eq!(tree.depth(root), Some(2));
    }

    #[test]
    fn given_stale_handle_when_querying_then_none() {
        let (mut tree, _root, _) = sample();
        let detached = tree.new_node("x");
        assert_eq!(tree.prune_unreachable(), 1);
        assert_eq!(tree.depth(detached), None);
        assert_eq!(tree.content(detached), None);
    }

    #[test]
    fn given_node_id_when_displayed_then_shows_slot_and_generation() {
        let (_, root) = Tree::with_root("r");
        assert_eq!(root.to_string(), "#0v0");
    }

    #[test]
    fn given_rootless_tree_when_querying_then_empty_results() {
        let mut tree: Tree<&str> = Tree::new();
        let orphan = tree.new_node("o");
        assert!(tree.order_bfs().is_empty());
        assert!(!tree.is_in_tree(orphan, SearchMethod::Dfs));
        assert_eq!(tree.search_bfs("o"), None);
        assert_eq!(tree.distance_between(tree.root(), orphan), None);
    }
}
