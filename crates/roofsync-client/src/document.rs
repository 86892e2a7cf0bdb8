//! The fetch/write seam between the orchestrator and a remote store.

use async_trait::async_trait;
use roofsync_core::{Credential, PropertyCollection, VersionToken};

use crate::error::RemoteError;

/// The remote document as last read: content plus its version token.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteDocument {
    /// Decoded property collection.
    pub content: PropertyCollection,
    /// Version token of this content.
    pub version: VersionToken,
}

/// A versioned single-document store.
///
/// Implementations are stateless with respect to sync: they hold
/// configuration and connections, never a cached copy of the document.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Read the current document and its version.
    ///
    /// `Err(RemoteError::NotFound)` means the document was never created.
    async fn fetch_document(&self, credential: &Credential) -> Result<RemoteDocument, RemoteError>;

    /// Replace the document with `content`, returning the new version.
    ///
    /// `base_version` is the version the caller last observed. Whether it is
    /// honoured depends on the implementation's write policy.
    async fn write_document(
        &self,
        credential: &Credential,
        content: &PropertyCollection,
        base_version: Option<&VersionToken>,
    ) -> Result<VersionToken, RemoteError>;
}

#[async_trait]
impl<T: DocumentStore + ?Sized> DocumentStore for std::sync::Arc<T> {
    async fn fetch_document(&self, credential: &Credential) -> Result<RemoteDocument, RemoteError> {
        (**self).fetch_document(credential).await
    }

    async fn write_document(
        &self,
        credential: &Credential,
        content: &PropertyCollection,
        base_version: Option<&VersionToken>,
    ) -> Result<VersionToken, RemoteError> {
        (**self)
            .write_document(credential, content, base_version)
            .await
    }
}
