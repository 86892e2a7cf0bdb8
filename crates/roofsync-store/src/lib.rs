//! # roofsync-store
//!
//! Durable, process-local persistence for roofsync.
//!
//! This crate provides:
//! - A small key/value storage abstraction ([`KeyValueStore`])
//! - A filesystem backend with atomic writes ([`FileStore`])
//! - An in-memory backend for tests and ephemeral sessions ([`MemoryStore`])
//! - The typed store for the property collection and credential ([`LocalStore`])

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod error;
pub mod filesystem;
pub mod local;
pub mod memory;
pub mod traits;

pub use error::{Error, Result};
pub use filesystem::FileStore;
pub use local::{CREDENTIAL_KEY, LocalStore, PROPERTIES_KEY};
pub use memory::MemoryStore;
pub use traits::KeyValueStore;
