//! Application-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::{DomainError, TreeError};

/// Application errors wrap domain errors and add application-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("no node labeled {0}")]
    LabelNotFound(String),

    #[error("invalid color {color}: {reason}")]
    InvalidColor { color: String, reason: String },

    #[error("config error: {message}")]
    Config { message: String },
}

impl From<TreeError> for ApplicationError {
    fn from(e: TreeError) -> Self {
        Self::Domain(DomainError::Tree(e))
    }
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
