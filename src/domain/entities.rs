//! Domain entities: tree shapes described as data

use serde::{Deserialize, Serialize};

/// One `parent -> [children]` wiring step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeConfig {
    pub parent: String,
    pub children: Vec<String>,
}

impl EdgeConfig {
    pub fn new(parent: &str, children: &[&str]) -> Self {
        Self {
            parent: parent.to_string(),
            children: children.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// Shape of a labeled tree: a root label plus ordered edges.
///
/// Labels identify nodes, so each label may occur at most once as a child.
/// Edges are applied in listed order; a parent must be the root or a child
/// of an earlier edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeConfig {
    pub root: String,
    #[serde(default)]
    pub edges: Vec<EdgeConfig>,
}

impl TreeConfig {
    /// The twelve-node demonstration tree.
    pub fn example() -> Self {
        Self {
            root: "1".into(),
            edges: vec![
                EdgeConfig::new("1", &["2", "3", "4"]),
                EdgeConfig::new("2", &["5", "6"]),
                EdgeConfig::new("5", &["9", "10"]),
                EdgeConfig::new("4", &["7", "8"]),
                EdgeConfig::new("7", &["11", "12"]),
            ],
        }
    }
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self::example()
    }
}
