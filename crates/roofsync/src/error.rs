//! Error types for the roofsync application layer.

use thiserror::Error;

/// Result type alias for roofsync operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by portfolio edits and report export.
///
/// Sync failures are not errors: they come back as a
/// [`SyncOutcome`](crate::SyncOutcome).
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Record validation or collection invariant failure.
    #[error(transparent)]
    Core(#[from] roofsync_core::Error),

    /// The local store could not be written.
    #[error("Local store error: {0}")]
    Store(#[from] roofsync_store::Error),

    /// CSV encoding failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error while writing a report.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns `true` for a record validation failure.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Core(roofsync_core::Error::Validation { .. }))
    }
}
