//! Common test utilities for roofsync integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use roofsync::{Portfolio, SyncOrchestrator};
use roofsync_client::{DocumentStore, MemoryDocumentStore, RemoteDocument, RemoteError};
use roofsync_core::{Credential, NewProperty, PropertyCollection, VersionToken};
use roofsync_store::{KeyValueStore, LocalStore, MemoryStore, PROPERTIES_KEY};
use tokio::sync::Notify;

/// Token accepted by the shared remote.
pub const TOKEN: &str = "ghp_fieldteam0001";

/// One device: a local store, its portfolio, and an orchestrator talking to
/// a (possibly shared) remote.
pub struct Device<R, K = MemoryStore> {
    pub local: Arc<LocalStore<K>>,
    pub portfolio: Portfolio<K>,
    pub sync: SyncOrchestrator<R, K>,
}

impl<R: DocumentStore> Device<R> {
    /// A device with an empty in-memory local store and no credential.
    pub fn new(remote: R) -> Self {
        Self::with_backend(remote, MemoryStore::new())
    }

    /// A device that already has [`TOKEN`] configured.
    pub fn signed_in(remote: R) -> Self {
        let device = Self::new(remote);
        device.sign_in(TOKEN);
        device
    }
}

impl<R: DocumentStore, K: KeyValueStore> Device<R, K> {
    pub fn with_backend(remote: R, backend: K) -> Self {
        let local = Arc::new(LocalStore::new(backend));
        Self {
            portfolio: Portfolio::new(Arc::clone(&local)),
            sync: SyncOrchestrator::new(remote, Arc::clone(&local)),
            local,
        }
    }

    pub fn sign_in(&self, token: &str) {
        let credential = Credential::new(token).unwrap();
        self.local.set_credential(Some(&credential)).unwrap();
    }

    pub fn addresses(&self) -> Vec<String> {
        self.portfolio
            .list()
            .iter()
            .map(|p| p.address().to_string())
            .collect()
    }
}

/// A shared in-memory remote that only accepts [`TOKEN`].
pub fn shared_remote() -> Arc<MemoryDocumentStore> {
    Arc::new(MemoryDocumentStore::new().with_accepted_token(TOKEN))
}

/// Survey input with sensible contact fields.
pub fn survey(address: &str, roof_area: f64) -> NewProperty {
    NewProperty {
        address: address.to_string(),
        zip: "73301".to_string(),
        roof_area,
        email: "survey@example.com".to_string(),
        phone: "512-555-0123".to_string(),
    }
}

/// Remote that parks every call until released, so a test can observe the
/// orchestrator mid-operation.
#[derive(Default)]
pub struct GatedRemote {
    pub inner: MemoryDocumentStore,
    pub entered: Notify,
    pub release: Notify,
}

impl GatedRemote {
    async fn gate(&self) {
        self.entered.notify_one();
        self.release.notified().await;
    }
}

#[async_trait]
impl DocumentStore for GatedRemote {
    async fn fetch_document(&self, credential: &Credential) -> Result<RemoteDocument, RemoteError> {
        self.gate().await;
        self.inner.fetch_document(credential).await
    }

    async fn write_document(
        &self,
        credential: &Credential,
        content: &PropertyCollection,
        base_version: Option<&VersionToken>,
    ) -> Result<VersionToken, RemoteError> {
        self.gate().await;
        self.inner
            .write_document(credential, content, base_version)
            .await
    }
}

/// Remote that never answers.
pub struct StalledRemote;

#[async_trait]
impl DocumentStore for StalledRemote {
    async fn fetch_document(&self, _: &Credential) -> Result<RemoteDocument, RemoteError> {
        std::future::pending().await
    }

    async fn write_document(
        &self,
        _: &Credential,
        _: &PropertyCollection,
        _: Option<&VersionToken>,
    ) -> Result<VersionToken, RemoteError> {
        std::future::pending().await
    }
}

/// Backend that refuses to write the property collection but otherwise
/// behaves like [`MemoryStore`].
#[derive(Default)]
pub struct ReadOnlyCollection {
    pub inner: MemoryStore,
}

impl KeyValueStore for ReadOnlyCollection {
    fn read(&self, key: &str) -> roofsync_store::Result<Option<String>> {
        self.inner.read(key)
    }

    fn write(&self, key: &str, value: &str) -> roofsync_store::Result<()> {
        if key == PROPERTIES_KEY {
            return Err(roofsync_store::Error::io_with_path(
                std::io::Error::other("read-only file system"),
                key,
            ));
        }
        self.inner.write(key, value)
    }

    fn remove(&self, key: &str) -> roofsync_store::Result<()> {
        self.inner.remove(key)
    }
}

/// Backend whose stored property collection cannot be read (as with a
/// permission error) but otherwise behaves like [`MemoryStore`].
#[derive(Default)]
pub struct UnreadableCollection {
    pub inner: MemoryStore,
}

impl KeyValueStore for UnreadableCollection {
    fn read(&self, key: &str) -> roofsync_store::Result<Option<String>> {
        if key == PROPERTIES_KEY {
            return Err(roofsync_store::Error::io_with_path(
                std::io::Error::from(std::io::ErrorKind::PermissionDenied),
                key,
            ));
        }
        self.inner.read(key)
    }

    fn write(&self, key: &str, value: &str) -> roofsync_store::Result<()> {
        self.inner.write(key, value)
    }

    fn remove(&self, key: &str) -> roofsync_store::Result<()> {
        self.inner.remove(key)
    }
}
