//! Tree builder for wiring labeled nodes from a tree description.

use std::collections::HashMap;

use tracing::{debug, instrument};

use crate::domain::arena::{NodeId, Tree};
use crate::domain::entities::TreeConfig;
use crate::domain::error::DomainError;
use crate::domain::search::SearchMethod;

/// Result type for build operations.
pub type BuildResult<T> = Result<T, DomainError>;

/// Constructs a `Tree<String>` from a [`TreeConfig`].
pub struct TreeBuilder {
    method: SearchMethod,
    label_cache: HashMap<String, NodeId>,
    parent_of: HashMap<String, String>,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self {
            method: SearchMethod::default(),
            label_cache: HashMap::new(),
            parent_of: HashMap::new(),
        }
    }

    /// Membership strategy used when checking each edge's parent.
    pub fn with_method(mut self, method: SearchMethod) -> Self {
        self.method = method;
        self
    }

    pub fn method(&self) -> SearchMethod {
        self.method
    }

    /// Build the tree described by `config`.
    ///
    /// Edges are applied in order through [`Tree::insert`]. Repeating an edge
    /// is harmless; attaching a label below a second parent is rejected.
    #[instrument(level = "debug", skip(self, config), fields(root = %config.root))]
    pub fn build(&mut self, config: &TreeConfig) -> BuildResult<Tree<String>> {
        // Reset state for a fresh build
        self.label_cache.clear();
        self.parent_of.clear();

        let (mut tree, root) = Tree::with_root(config.root.clone());
        self.label_cache.insert(config.root.clone(), root);

        for edge in &config.edges {
            let parent = *self
                .label_cache
                .get(&edge.parent)
                .ok_or_else(|| DomainError::UnknownLabel(edge.parent.clone()))?;

            let mut children = Vec::with_capacity(edge.children.len());
            for label in &edge.children {
                children.push(self.child_node(&mut tree, &edge.parent, label)?);
            }

            tree.insert(parent, children, self.method)?;
            debug!(parent = %edge.parent, children = ?edge.children, "wired edge");
        }

        Ok(tree)
    }

    fn child_node(
        &mut self,
        tree: &mut Tree<String>,
        parent: &str,
        label: &str,
    ) -> BuildResult<NodeId> {
        let existing = if self.label_cache.contains_key(label) {
            // The root has no parent entry
            Some(
                self.parent_of
                    .get(label)
                    .cloned()
                    .unwrap_or_else(|| "(root)".to_string()),
            )
        } else {
            None
        };

        match existing {
            Some(existing) if existing == parent => Ok(self.label_cache[label]),
            Some(existing) => Err(DomainError::DuplicateLabel {
                label: label.to_string(),
                existing,
                requested: parent.to_string(),
            }),
            None => {
                let id = tree.new_node(label.to_string());
                self.label_cache.insert(label.to_string(), id);
                self.parent_of.insert(label.to_string(), parent.to_string());
                Ok(id)
            }
        }
    }
}
