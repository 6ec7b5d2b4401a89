use std::path::PathBuf;
use thiserror::Error;

/// Error types for the task store and its loader
#[derive(Error, Debug)]
pub enum StoreError {
    /// Error listing the directory of persisted tasks
    #[error("Failed to read task directory at {path}: {source}")]
    ReadDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error reading a single persisted task file
    #[error("Failed to read task file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A persisted task file did not parse into a task record
    #[error("Failed to parse task file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Error for invalid submitted input
    #[error("{message}")]
    Validation { message: String },

    /// Error serializing tasks for output
    #[error("Failed to serialize tasks: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Error reading commands or writing responses
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// Convenience constructor for validation failures.
    pub fn validation(message: impl Into<String>) -> Self {
        StoreError::Validation {
            message: message.into(),
        }
    }
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;
