//! Error types for roofsync-client

use thiserror::Error;

/// Result type alias for roofsync-client construction
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building a client
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from roofsync-core
    #[error("Core error: {0}")]
    Core(#[from] roofsync_core::Error),

    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Outcome of a failed remote operation.
///
/// Exactly one variant describes any non-success response or transport
/// failure. `NotFound` is only produced by fetches; the orchestrator turns it
/// into an empty collection.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum RemoteError {
    /// The document has never been created.
    #[error("remote document not found")]
    NotFound,

    /// The store rejected the credential.
    #[error("credential rejected by the remote store")]
    Unauthorized,

    /// The write was based on a version that is no longer current.
    #[error("remote document changed since it was last read")]
    Conflict,

    /// Network failure, timeout, unexpected status, or unusable content.
    #[error("transport error: {message}")]
    Transport {
        /// Human-readable description
        message: String,
        /// Source error if available
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl RemoteError {
    /// Creates a transport error with a message.
    pub fn transport<S: Into<String>>(message: S) -> Self {
        RemoteError::Transport {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a transport error with a message and source error.
    pub fn transport_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        RemoteError::Transport {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Returns whether retrying the same request might succeed.
    ///
    /// No retry is ever performed automatically; this only informs callers.
    pub fn is_retryable(&self) -> bool {
        match self {
            RemoteError::Transport { .. } => true,
            RemoteError::Conflict => true,
            RemoteError::NotFound => false,
            RemoteError::Unauthorized => false,
        }
    }
}
