//! Error types for task management operations.

use tasklet_core::{ParseError, StoreError, TaskId};
use thiserror::Error;

/// Errors surfaced by [`TaskManager`](crate::manager::TaskManager).
#[derive(Error, Debug)]
pub enum ManagerError {
    /// A supplied field value failed validation.
    #[error(transparent)]
    InvalidField(#[from] ParseError),

    /// Title missing or blank.
    #[error("title must not be empty")]
    EmptyTitle,

    /// Referenced task does not exist.
    #[error("task {0} not found")]
    NotFound(TaskId),

    /// The collection already holds the largest representable id.
    #[error("no task id left after {0}")]
    IdsExhausted(TaskId),

    /// Backing store returned an error.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Coarse classification used by frontends to pick messages and exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller supplied an invalid value.
    InvalidArgument,
    /// Referenced task is missing.
    NotFound,
    /// Stored collection exists but cannot be decoded.
    Malformed,
    /// No further task can be assigned an id.
    Exhausted,
    /// Reading or writing the store failed.
    Storage,
}

impl ManagerError {
    /// Classify the error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidField(_) | Self::EmptyTitle => ErrorKind::InvalidArgument,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::IdsExhausted(_) => ErrorKind::Exhausted,
            Self::Store(err) if err.is_malformed() => ErrorKind::Malformed,
            Self::Store(_) => ErrorKind::Storage,
        }
    }
}
