//! Layered graph derived from a tree: the input for drawing it level by level.

use std::collections::HashMap;
use std::fmt::Display;

use itertools::Itertools;
use tracing::instrument;

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::domain::{NodeId, Tree};

/// Fill colors indexed by `depth % len`.
pub const DEFAULT_PALETTE: [&str; 6] = ["#55f", "#77f", "#99f", "#bbf", "#ddf", "#fff"];

/// A node placed on its layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutNode {
    pub id: NodeId,
    pub label: String,
    /// Distance from the root
    pub depth: usize,
    pub color: String,
}

/// Nodes keyed by label plus parent->child edges, in DFS order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayeredGraph {
    pub nodes: Vec<LayoutNode>,
    pub edges: Vec<(String, String)>,
    /// Position of each node in `nodes`
    index: HashMap<NodeId, usize>,
}

impl LayeredGraph {
    /// Lays out every node reachable from the root.
    ///
    /// An empty tree gives an empty graph; an empty palette is rejected.
    #[instrument(level = "debug", skip(tree))]
    pub fn from_tree<T: Display>(tree: &Tree<T>, palette: &[String]) -> ApplicationResult<Self> {
        if palette.is_empty() {
            return Err(ApplicationError::Config {
                message: "palette must contain at least one color".into(),
            });
        }

        let order = tree.order_dfs();
        let mut graph = LayeredGraph::default();

        for &id in &order {
            let Some(node) = tree.node(id) else {
                continue;
            };
            // Every traversed node descends from the root
            let depth = tree.distance_between(tree.root(), id).unwrap_or(0);
            graph.index.insert(id, graph.nodes.len());
            graph.nodes.push(LayoutNode {
                id,
                label: node.content.to_string(),
                depth,
                color: palette[depth % palette.len()].clone(),
            });
            for &child in &node.children {
                if let Some(child_content) = tree.content(child) {
                    graph
                        .edges
                        .push((node.content.to_string(), child_content.to_string()));
                }
            }
        }

        Ok(graph)
    }

    pub fn node(&self, id: NodeId) -> Option<&LayoutNode> {
        self.index.get(&id).and_then(|&i| self.nodes.get(i))
    }

    /// Labels grouped by depth, shallowest first, left to right within a layer.
    pub fn layers(&self) -> Vec<(usize, Vec<String>)> {
        let chunks = self
            .nodes
            .iter()
            .sorted_by_key(|n| n.depth)
            .chunk_by(|n| n.depth);
        let layers = chunks
            .into_iter()
            .map(|(depth, group)| (depth, group.map(|n| n.label.clone()).collect()))
            .collect();
        layers
    }

    /// Largest depth present, None for an empty graph.
    pub fn height(&self) -> Option<usize> {
        self.nodes.iter().map(|n| n.depth).max()
    }
}
