//! Domain layer: tree entities and blind search algorithms
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod entities;
pub mod error;
pub mod search;

pub use arena::{Node, NodeId, Tree};
pub use builder::TreeBuilder;
pub use entities::{EdgeConfig, TreeConfig};
pub use error::{DomainError, TreeError, TreeResult};
pub use search::{SearchMethod, Traversal};
