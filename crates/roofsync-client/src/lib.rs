//! # roofsync-client
//!
//! Client for the single remote JSON document that mirrors a roofsync
//! property collection.
//!
//! This crate provides:
//! - [`DocumentStore`], the fetch/write seam the sync orchestrator drives
//! - [`ContentsClient`], an implementation over the GitHub contents API
//! - [`MemoryDocumentStore`], an in-process versioned store
//! - [`RemoteConfig`], the explicit owner/repo/path configuration
//!
//! Every response and network failure is classified into exactly one
//! [`RemoteError`] variant or a success.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod config;
pub mod contents;
pub mod document;
pub mod error;
pub mod memory;

pub use config::{RemoteConfig, WritePolicy};
pub use contents::ContentsClient;
pub use document::{DocumentStore, RemoteDocument};
pub use error::{Error, RemoteError, Result};
pub use memory::MemoryDocumentStore;
