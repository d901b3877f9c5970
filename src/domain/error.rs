//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::arena::NodeId;

/// Violations of the tree's operation preconditions.
///
/// Absent search results and missing ancestor paths are not errors; those
/// operations return `Option` instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("tree has no root")]
    NoRoot,

    #[error("parent {0} is not in the tree")]
    ParentNotInTree(NodeId),

    #[error("unknown node handle: {0}")]
    UnknownNode(NodeId),
}

/// Result type for tree operations.
pub type TreeResult<T> = Result<T, TreeError>;

/// Domain errors raised while turning a tree description into a tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("{0}")]
    Tree(#[from] TreeError),

    #[error("unknown parent label: {0}")]
    UnknownLabel(String),

    #[error("label {label} already attached below {existing}, cannot attach below {requested}")]
    DuplicateLabel {
        label: String,
        existing: String,
        requested: String,
    },
}
