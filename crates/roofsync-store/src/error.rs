//! Error types for roofsync-store

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for roofsync-store operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in roofsync-store
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from roofsync-core
    #[error("Core error: {0}")]
    Core(#[from] roofsync_core::Error),

    /// Filesystem error, with the path involved
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// Path being read or written
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Key contains characters that cannot name a file
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),

    /// JSON encoding error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Wrap an I/O error with the path it concerns.
    pub fn io_with_path(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
