//! Error types for the board engine.

use crate::board::CategoryId;
use thiserror::Error;

/// Errors from a [`CategorySource`](crate::source::CategorySource).
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Category service error: {0}")]
    Service(#[from] jservice::Error),

    #[error("Category {0} unavailable")]
    Unavailable(CategoryId),

    #[error("Category id source unavailable: {0}")]
    IdsUnavailable(String),
}

/// A rendered cell id that does not resolve to a live clue.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("Malformed cell id: {0}")]
    MalformedCellId(String),

    #[error("Category not found for slug: {0}")]
    UnknownCategory(String),

    #[error("Clue not found for index {index} in category {slug}")]
    ClueOutOfRange { slug: String, index: usize },
}
