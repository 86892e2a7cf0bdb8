//! # roofsync
//!
//! The application layer of roofsync: the local property portfolio and its
//! synchronization with a single remote document.
//!
//! - [`Portfolio`] creates, lists, and deletes property records in the
//!   local store.
//! - [`SyncOrchestrator`] runs `pull` and `push` against a
//!   [`DocumentStore`](roofsync_client::DocumentStore), one at a time, and
//!   reports every result as a [`SyncOutcome`].
//! - [`export`] renders a single property as a CSV report.

pub mod error;
pub mod export;
pub mod orchestrator;
pub mod outcome;
pub mod portfolio;

pub use error::{Error, Result};
pub use export::{report_file_name, write_report};
pub use orchestrator::{DEFAULT_SYNC_TIMEOUT, SyncOrchestrator};
pub use outcome::SyncOutcome;
pub use portfolio::Portfolio;
