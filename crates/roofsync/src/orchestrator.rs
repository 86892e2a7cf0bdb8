//! Pull/push synchronization of the local collection with the remote
//! document.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use roofsync_client::{DocumentStore, RemoteError};
use roofsync_core::{PropertyCollection, SyncHandle, SyncState, VersionToken};
use roofsync_store::{KeyValueStore, LocalStore};
use tokio::sync::watch;

use crate::outcome::SyncOutcome;

/// Upper bound on any single remote call made by the orchestrator.
pub const DEFAULT_SYNC_TIMEOUT: Duration = Duration::from_secs(30);

/// Runs pull and push, at most one at a time.
///
/// The orchestrator holds no copy of the collection. It reads the local
/// store and the credential at the start of every operation and writes the
/// local store only after a successful pull. The only thing it remembers
/// between calls is the version of the last successful pull or push, which
/// is offered to the remote as the base of the next write.
pub struct SyncOrchestrator<R, K> {
    remote: R,
    local: Arc<LocalStore<K>>,
    handle: SyncHandle,
    timeout: Duration,
    last_version: Mutex<Option<VersionToken>>,
}

impl<R, K> SyncOrchestrator<R, K>
where
    R: DocumentStore,
    K: KeyValueStore,
{
    /// Create an orchestrator over a remote document and the local store.
    pub fn new(remote: R, local: Arc<LocalStore<K>>) -> Self {
        Self {
            remote,
            local,
            handle: SyncHandle::new("properties"),
            timeout: DEFAULT_SYNC_TIMEOUT,
            last_version: Mutex::new(None),
        }
    }

    /// Bound every remote call by `timeout` instead of the default.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The remote call bound.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// The local store this orchestrator syncs.
    pub fn local(&self) -> &Arc<LocalStore<K>> {
        &self.local
    }

    /// Whether a pull or push is in flight.
    pub fn current_sync_state(&self) -> SyncState {
        self.handle.state()
    }

    /// Observe sync state transitions.
    pub fn subscribe(&self) -> watch::Receiver<SyncState> {
        self.handle.subscribe()
    }

    /// Version of the last successful pull or push in this process.
    pub fn last_version(&self) -> Option<VersionToken> {
        self.version_slot().clone()
    }

    /// Replace the local collection with the remote document.
    ///
    /// A missing remote document counts as an empty one: the local
    /// collection is cleared. On any failure the local collection is left
    /// exactly as it was.
    pub async fn pull(&self) -> SyncOutcome {
        let Some(_guard) = self.handle.try_begin() else {
            return SyncOutcome::Busy;
        };
        let Some(credential) = self.local.credential() else {
            tracing::info!("pull skipped: no credential");
            return SyncOutcome::NeedsCredential;
        };

        tracing::info!("pull started");
        let (collection, version) = match self.bounded(self.remote.fetch_document(&credential)).await
        {
            Ok(document) => (document.content, Some(document.version)),
            Err(RemoteError::NotFound) => {
                tracing::info!("remote document not found; treating as empty");
                (PropertyCollection::new(), None)
            }
            Err(e) => return self.failed("pull", e),
        };

        if let Err(e) = self.local.save(&collection) {
            tracing::error!(error = %e, "pull fetched data but could not save it");
            return SyncOutcome::LocalStoreFailed {
                message: e.to_string(),
            };
        }

        let records = collection.len();
        *self.version_slot() = version.clone();
        match version {
            Some(version) => {
                tracing::info!(records, version = %version, "pull completed");
                SyncOutcome::Pulled { records, version }
            }
            None => SyncOutcome::RemoteMissing,
        }
    }

    /// Replace the remote document with the entire local collection.
    ///
    /// Never changes local state. If the local collection cannot be read
    /// the remote is not contacted.
    pub async fn push(&self) -> SyncOutcome {
        let Some(_guard) = self.handle.try_begin() else {
            return SyncOutcome::Busy;
        };
        let Some(credential) = self.local.credential() else {
            tracing::info!("push skipped: no credential");
            return SyncOutcome::NeedsCredential;
        };

        let collection = match self.local.try_load() {
            Ok(collection) => collection,
            Err(e) => {
                tracing::error!(error = %e, "push aborted: local properties could not be read");
                return SyncOutcome::LocalStoreFailed {
                    message: e.to_string(),
                };
            }
        };
        let base = self.last_version();
        tracing::info!(
            records = collection.len(),
            base = base.as_ref().map(VersionToken::as_str).unwrap_or("none"),
            "push started"
        );

        match self
            .bounded(
                self.remote
                    .write_document(&credential, &collection, base.as_ref()),
            )
            .await
        {
            Ok(version) => {
                *self.version_slot() = Some(version.clone());
                tracing::info!(records = collection.len(), version = %version, "push completed");
                SyncOutcome::Pushed {
                    records: collection.len(),
                    version,
                }
            }
            Err(e) => self.failed("push", e),
        }
    }

    async fn bounded<T, F>(&self, call: F) -> Result<T, RemoteError>
    where
        F: Future<Output = Result<T, RemoteError>>,
    {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(RemoteError::transport(format!(
                "remote did not respond within {}s",
                self.timeout.as_secs_f64()
            ))),
        }
    }

    fn failed(&self, operation: &str, error: RemoteError) -> SyncOutcome {
        match &error {
            RemoteError::Unauthorized => {
                tracing::warn!(operation, "credential rejected by remote");
            }
            RemoteError::Conflict => {
                tracing::warn!(operation, "remote document changed since last sync");
            }
            _ => tracing::error!(operation, error = %error, "sync failed"),
        }
        SyncOutcome::from(error)
    }

    fn version_slot(&self) -> MutexGuard<'_, Option<VersionToken>> {
        self.last_version
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<R, K> std::fmt::Debug for SyncOrchestrator<R, K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncOrchestrator")
            .field("handle", &self.handle)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
