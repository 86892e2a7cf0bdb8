//! # roofsync-cli
//!
//! Command-line front end for roofsync.
//!
//! This crate provides:
//! - Property management (add, list, show, delete, summary, CSV export)
//! - Pull/push of the property collection against the remote document
//! - Access-token management
//! - Config file management (`path`, `init`, `show`)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;

pub use cli::Cli;
pub use commands::run;
pub use config::RoofsyncConfig;
pub use error::{Error, Result};
