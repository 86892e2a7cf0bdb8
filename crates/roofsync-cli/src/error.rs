//! Error types for roofsync-cli

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for roofsync-cli operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in roofsync-cli
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from roofsync-core
    #[error(transparent)]
    Core(#[from] roofsync_core::Error),

    /// Error from roofsync-store
    #[error("Store error: {0}")]
    Store(#[from] roofsync_store::Error),

    /// Error from roofsync-client
    #[error("Client error: {0}")]
    Client(#[from] roofsync_client::Error),

    /// Error from the portfolio or report export
    #[error(transparent)]
    App(#[from] roofsync::Error),

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },

    /// Filesystem error, with the path involved
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// Path being read or written
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// No property has the requested id
    #[error("No property with id {0}")]
    PropertyNotFound(String),
}

impl Error {
    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Wrap an I/O error with the path it concerns.
    pub fn io_with_path(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
