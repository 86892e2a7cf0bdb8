//! In-process versioned document store.
//!
//! Behaves like the contents API as far as sync is concerned: the document
//! may be absent, every successful write mints a new version token even for
//! identical content, and a credential can be refused. Useful for tests and
//! for driving the orchestrator without a network.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use roofsync_core::{Credential, PropertyCollection, VersionToken};

use crate::config::WritePolicy;
use crate::document::{DocumentStore, RemoteDocument};
use crate::error::RemoteError;

#[derive(Debug, Default)]
struct Stored {
    json: Option<String>,
    version: Option<VersionToken>,
}

/// Versioned single-document store held in memory.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    stored: Mutex<Stored>,
    accepted_token: Option<String>,
    policy: WritePolicy,
    next_version: AtomicU64,
    writes: AtomicU64,
}

impl MemoryDocumentStore {
    /// An empty store (document absent) that accepts any credential.
    pub fn new() -> Self {
        Self::default()
    }

    /// Only accept this credential; anything else is `Unauthorized`.
    pub fn with_accepted_token(mut self, token: impl Into<String>) -> Self {
        self.accepted_token = Some(token.into());
        self
    }

    /// Use a different write policy.
    pub fn with_write_policy(mut self, policy: WritePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Seed the document with raw JSON, as if written by another client.
    /// Returns the new version.
    pub fn seed_raw(&self, json: impl Into<String>) -> VersionToken {
        let version = self.mint_version();
        let mut stored = self.lock();
        stored.json = Some(json.into());
        stored.version = Some(version.clone());
        version
    }

    /// Current raw JSON of the document, if it exists.
    pub fn raw(&self) -> Option<String> {
        self.lock().json.clone()
    }

    /// Current version token, if the document exists.
    pub fn version(&self) -> Option<VersionToken> {
        self.lock().version.clone()
    }

    /// Number of successful writes.
    pub fn write_count(&self) -> u64 {
        self.writes.load(Ordering::SeqCst)
    }

    fn mint_version(&self) -> VersionToken {
        let n = self.next_version.fetch_add(1, Ordering::SeqCst) + 1;
        VersionToken::new(format!("{n:040x}"))
    }

    fn lock(&self) -> MutexGuard<'_, Stored> {
        self.stored
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn authorize(&self, credential: &Credential) -> Result<(), RemoteError> {
        match &self.accepted_token {
            Some(accepted) if accepted != credential.expose() => Err(RemoteError::Unauthorized),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn fetch_document(&self, credential: &Credential) -> Result<RemoteDocument, RemoteError> {
        self.authorize(credential)?;
        let stored = self.lock();
        let (Some(json), Some(version)) = (&stored.json, &stored.version) else {
            return Err(RemoteError::NotFound);
        };
        let content = PropertyCollection::from_json_slice(json.as_bytes()).map_err(|e| {
            RemoteError::transport_with_source("remote document is not a valid property array", e)
        })?;
        Ok(RemoteDocument {
            content,
            version: version.clone(),
        })
    }

    async fn write_document(
        &self,
        credential: &Credential,
        content: &PropertyCollection,
        base_version: Option<&VersionToken>,
    ) -> Result<VersionToken, RemoteError> {
        self.authorize(credential)?;
        let json = content.to_json_pretty().map_err(|e| {
            RemoteError::transport_with_source("failed to encode property collection", e)
        })?;

        let version = self.mint_version();
        let mut stored = self.lock();
        if self.policy == WritePolicy::RejectStale && stored.version.as_ref() != base_version {
            return Err(RemoteError::Conflict);
        }
        stored.json = Some(json);
        stored.version = Some(version.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(version)
    }
}
