//! Error types, classified by recoverability the same way the rest of the
//! error surface is: remote failures are retryable, local parse/I-O failures
//! are not.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from the local snapshot store and config handling.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Could not find home directory")]
    NoHomeDir,

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Serialize error: {0}")]
    Serialize(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialize(err.to_string())
    }
}

/// Errors from the remote people/family API.
#[derive(Debug, Error)]
pub enum SyncError {
    // Retryable
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    #[error("Remote rejected the write: HTTP {status}")]
    Rejected { status: u16 },

    // Non-retryable
    #[error("Invalid remote base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("Serialize error: {0}")]
    Serialize(String),

    #[error(transparent)]
    Local(#[from] StoreError),
}

impl SyncError {
    /// Returns true if retrying the same write later could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            SyncError::Network(_) | SyncError::Timeout(_) => true,
            SyncError::Rejected { status } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

/// Precondition violations on a gathering pattern, rejected before any
/// projection loop runs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PatternError {
    #[error("gathering interval must be at least 1, got {0}")]
    IntervalTooSmall(u32),

    #[error("day of week must be 0-6, got {0}")]
    DayOfWeekOutOfRange(u8),

    #[error("date arithmetic overflowed while projecting occurrences")]
    DateOverflow,
}
