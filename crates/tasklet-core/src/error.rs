//! Error types for tasklet domain parsing and storage.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures while turning user-facing text into domain values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Priority outside the closed set.
    #[error("invalid priority '{value}': expected one of {allowed}")]
    InvalidPriority {
        /// Rejected input.
        value: String,
        /// Comma-separated list of accepted values.
        allowed: String,
    },

    /// Due date that is not an exact `YYYY-MM-DD` calendar date.
    #[error("invalid due date '{0}': use the YYYY-MM-DD format (e.g. 2024-12-01)")]
    InvalidDueDate(String),

    /// Listing status outside `all`, `pending`, `completed`.
    #[error("invalid status '{0}': expected one of all, pending, completed")]
    InvalidStatus(String),

    /// Timestamp not in the `YYYY-MM-DDTHH:MM:SS` storage format.
    #[error("invalid timestamp '{0}': expected YYYY-MM-DDTHH:MM:SS")]
    InvalidTimestamp(String),
}

/// Errors raised by task stores.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The durable file exists but does not hold a well-formed task list.
    #[error("task file {} is malformed: {source}", path.display())]
    Malformed {
        /// Location of the offending file.
        path: PathBuf,
        /// Underlying decoder error.
        #[source]
        source: serde_json::Error,
    },

    /// Reading, writing or replacing the durable file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File or directory being accessed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The task list could not be encoded.
    #[error("failed to encode tasks: {0}")]
    Encode(#[source] serde_json::Error),
}

impl StoreError {
    /// Wrap an I/O error with the path it concerns.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// True when the durable content exists but could not be decoded.
    #[must_use]
    pub const fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed { .. })
    }
}
