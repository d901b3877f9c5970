//! Blind traversal strategies shared by every search operation.

use std::collections::{HashSet, VecDeque};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::domain::arena::{NodeId, Tree};

/// Frontier discipline used by a traversal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum SearchMethod {
    /// Breadth-first: FIFO queue
    #[default]
    Bfs,
    /// Depth-first: LIFO stack
    Dfs,
}

impl fmt::Display for SearchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchMethod::Bfs => write!(f, "bfs"),
            SearchMethod::Dfs => write!(f, "dfs"),
        }
    }
}

impl FromStr for SearchMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bfs" => Ok(SearchMethod::Bfs),
            "dfs" => Ok(SearchMethod::Dfs),
            other => Err(format!("unknown search method: {other} (expected bfs or dfs)")),
        }
    }
}

impl TryFrom<String> for SearchMethod {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Pending nodes of a traversal.
enum Frontier {
    Queue(VecDeque<NodeId>),
    Stack(Vec<NodeId>),
}

impl Frontier {
    fn new(method: SearchMethod) -> Self {
        match method {
            SearchMethod::Bfs => Frontier::Queue(VecDeque::new()),
            SearchMethod::Dfs => Frontier::Stack(Vec::new()),
        }
    }

    fn pop(&mut self) -> Option<NodeId> {
        match self {
            Frontier::Queue(queue) => queue.pop_front(),
            Frontier::Stack(stack) => stack.pop(),
        }
    }

    fn push(&mut self, id: NodeId) {
        match self {
            Frontier::Queue(queue) => queue.push_back(id),
            Frontier::Stack(stack) => stack.push(id),
        }
    }
}

/// Iterator over the nodes reachable from the root, in visitation order.
///
/// Each node is yielded at most once, even if it is reachable via two paths.
pub struct Traversal<'a, T> {
    tree: &'a Tree<T>,
    method: SearchMethod,
    frontier: Frontier,
    visited: HashSet<NodeId>,
}

impl<'a, T> Traversal<'a, T> {
    #[instrument(level = "trace", skip(tree))]
    pub(crate) fn new(tree: &'a Tree<T>, method: SearchMethod) -> Self {
        let mut frontier = Frontier::new(method);
        if let Some(root) = tree.root() {
            frontier.push(root);
        }
        Self {
            tree,
            method,
            frontier,
            visited: HashSet::new(),
        }
    }
}

impl<'a, T> Iterator for Traversal<'a, T> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current) = self.frontier.pop() {
            if !self.visited.insert(current) {
                continue;
            }
            let Some(node) = self.tree.node(current) else {
                continue;
            };
            match self.method {
                SearchMethod::Bfs => {
                    for &child in &node.children {
                        if !self.visited.contains(&child) {
                            self.frontier.push(child);
                        }
                    }
                }
                // Push children in reverse order for left-to-right traversal
                SearchMethod::Dfs => {
                    for &child in node.children.iter().rev() {
                        if !self.visited.contains(&child) {
                            self.frontier.push(child);
                        }
                    }
                }
            }
            return Some(current);
        }
        None
    }
}
