//! Sync lifecycle state.
//!
//! Provides [`SyncState`] and [`SyncHandle`] for the `Idle → Syncing → Idle`
//! machine that serializes pull and push. The handle doubles as the in-flight
//! flag: [`SyncHandle::try_begin`] is a compare-and-set, so at most one
//! operation holds a [`SyncGuard`] at a time.
//!
//! # Usage
//!
//! ```rust
//! use roofsync_core::{SyncHandle, SyncState};
//!
//! let handle = SyncHandle::new("properties");
//! assert_eq!(handle.state(), SyncState::Idle);
//!
//! let guard = handle.try_begin().expect("idle");
//! assert_eq!(handle.state(), SyncState::Syncing);
//! assert!(handle.try_begin().is_none());
//!
//! drop(guard);
//! assert_eq!(handle.state(), SyncState::Idle);
//! ```

use std::fmt;
use std::sync::Arc;
use tokio::sync::watch;

// ============================================================================
// SyncState
// ============================================================================

/// Whether a sync operation is in flight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SyncState {
    /// No operation in flight. Initial and terminal state.
    #[default]
    Idle,
    /// A pull or push is in flight.
    Syncing,
}

impl SyncState {
    /// Returns `true` if nothing is in flight.
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Returns `true` if an operation is in flight.
    pub fn is_syncing(&self) -> bool {
        matches!(self, Self::Syncing)
    }
}

impl fmt::Display for SyncState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Syncing => write!(f, "syncing"),
        }
    }
}

// ============================================================================
// SyncHandle
// ============================================================================

/// Thread-safe handle for observing and claiming the sync state.
///
/// Cheap to clone (Arc internals). State changes are broadcast
/// to all subscribers via a watch channel.
#[derive(Clone)]
pub struct SyncHandle {
    inner: Arc<SyncHandleInner>,
}

struct SyncHandleInner {
    name: String,
    tx: watch::Sender<SyncState>,
}

impl SyncHandle {
    /// Create a new handle with the given name. Initial state is
    /// [`SyncState::Idle`].
    pub fn new(name: impl Into<String>) -> Self {
        let (tx, _rx) = watch::channel(SyncState::Idle);
        Self {
            inner: Arc::new(SyncHandleInner {
                name: name.into(),
                tx,
            }),
        }
    }

    /// Get the handle name.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Get the current state.
    pub fn state(&self) -> SyncState {
        *self.inner.tx.borrow()
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> watch::Receiver<SyncState> {
        self.inner.tx.subscribe()
    }

    /// Move `Idle → Syncing` atomically.
    ///
    /// Returns `None` when an operation is already in flight. The returned
    /// guard moves the state back to `Idle` when dropped, on every path.
    pub fn try_begin(&self) -> Option<SyncGuard> {
        let claimed = self.inner.tx.send_if_modified(|state| {
            if state.is_idle() {
                *state = SyncState::Syncing;
                true
            } else {
                false
            }
        });

        if claimed {
            tracing::debug!(sync = %self.inner.name, "sync state → syncing");
            Some(SyncGuard {
                handle: self.clone(),
            })
        } else {
            tracing::debug!(sync = %self.inner.name, "sync already in flight");
            None
        }
    }
}

impl fmt::Debug for SyncHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncHandle")
            .field("name", &self.inner.name)
            .field("state", &self.state())
            .finish()
    }
}

/// Claim on the in-flight flag; releases it on drop.
#[derive(Debug)]
#[must_use = "dropping the guard immediately ends the sync"]
pub struct SyncGuard {
    handle: SyncHandle,
}

impl Drop for SyncGuard {
    fn drop(&mut self) {
        self.handle.inner.tx.send_replace(SyncState::Idle);
        tracing::debug!(sync = %self.handle.inner.name, "sync state → idle");
    }
}

// ============================================================================
// Tests
// ============================================================================
