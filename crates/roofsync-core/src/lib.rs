#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! roofsync core library
//!
//! Property records, the capacity rules they are derived from, and the small
//! set of shared types (credentials, version tokens, sync state) used by the
//! store, client, and orchestrator crates.
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`rules`]: Roof-size bounds and capacity derivation
//! - [`types`]: Records, collections, identifiers, and sync state

pub mod error;
pub mod rules;
pub mod types;

// Re-exports for convenience
pub use error::{Error, Result};
pub use rules::{DerivedMetrics, derive, is_valid_roof_size};
pub use types::{
    Credential, NewProperty, PortfolioSummary, Property, PropertyCollection, PropertyId,
    SyncGuard, SyncHandle, SyncState, VersionToken,
};
