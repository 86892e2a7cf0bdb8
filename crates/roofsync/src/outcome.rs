//! Sync outcome types.

use std::fmt;

use roofsync_client::RemoteError;
use roofsync_core::VersionToken;

/// The result of a pull or push.
///
/// Every call to the orchestrator ends in exactly one of these. Failures
/// carry no partial effects: a failed pull leaves the local collection as it
/// was, and a push never changes local state.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SyncOutcome {
    /// The remote document replaced the local collection.
    Pulled {
        /// Number of records now held locally
        records: usize,
        /// Version that was read
        version: VersionToken,
    },

    /// The remote document does not exist; the local collection was
    /// replaced by an empty one.
    RemoteMissing,

    /// The local collection replaced the remote document.
    Pushed {
        /// Number of records written
        records: usize,
        /// Version created by the write
        version: VersionToken,
    },

    /// No credential is configured. The remote was not contacted.
    NeedsCredential,

    /// The remote rejected the credential. The credential stays stored so
    /// it can be corrected.
    Unauthorized,

    /// The remote document changed since it was last read.
    Conflict,

    /// Network failure, timeout, unexpected status, or unusable content.
    TransportError {
        /// Human-readable description
        message: String,
    },

    /// The local collection could not be saved after a pull, or could not
    /// be read before a push.
    LocalStoreFailed {
        /// Human-readable description
        message: String,
    },

    /// Another pull or push is already in flight; nothing was started.
    Busy,
}

impl SyncOutcome {
    /// Returns `true` for `Pulled`, `RemoteMissing`, and `Pushed`.
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            SyncOutcome::Pulled { .. } | SyncOutcome::RemoteMissing | SyncOutcome::Pushed { .. }
        )
    }

    /// Returns `true` if retrying the same operation later might succeed.
    ///
    /// Nothing is retried automatically.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            SyncOutcome::TransportError { .. }
                | SyncOutcome::LocalStoreFailed { .. }
                | SyncOutcome::Conflict
                | SyncOutcome::Busy
        )
    }

    /// Version token produced by a successful pull or push.
    pub fn version(&self) -> Option<&VersionToken> {
        match self {
            SyncOutcome::Pulled { version, .. } | SyncOutcome::Pushed { version, .. } => {
                Some(version)
            }
            _ => None,
        }
    }

    /// Records transferred by a successful operation (`0` for
    /// `RemoteMissing`).
    pub fn records(&self) -> Option<usize> {
        match self {
            SyncOutcome::Pulled { records, .. } | SyncOutcome::Pushed { records, .. } => {
                Some(*records)
            }
            SyncOutcome::RemoteMissing => Some(0),
            _ => None,
        }
    }
}

impl From<RemoteError> for SyncOutcome {
    fn from(error: RemoteError) -> Self {
        match error {
            RemoteError::Unauthorized => SyncOutcome::Unauthorized,
            RemoteError::Conflict => SyncOutcome::Conflict,
            RemoteError::NotFound => SyncOutcome::RemoteMissing,
            other => SyncOutcome::TransportError {
                message: other.to_string(),
            },
        }
    }
}

impl fmt::Display for SyncOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncOutcome::Pulled { records, version } => {
                write!(f, "pulled {records} properties (version {version})")
            }
            SyncOutcome::RemoteMissing => {
                write!(f, "remote document does not exist yet; local data cleared")
            }
            SyncOutcome::Pushed { records, version } => {
                write!(f, "pushed {records} properties (version {version})")
            }
            SyncOutcome::NeedsCredential => write!(f, "no access token configured"),
            SyncOutcome::Unauthorized => {
                write!(f, "access token was rejected; update it and try again")
            }
            SyncOutcome::Conflict => {
                write!(f, "remote document changed since it was last read; pull first")
            }
            SyncOutcome::TransportError { message } => write!(f, "sync failed: {message}"),
            SyncOutcome::LocalStoreFailed { message } => {
                write!(f, "local data store failed: {message}")
            }
            SyncOutcome::Busy => write!(f, "a sync is already in progress"),
        }
    }
}
