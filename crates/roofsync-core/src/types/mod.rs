//! Core types for roofsync.

mod collection;
mod credential;
mod ids;
mod property;
mod proptests;
mod sync_state;

pub use collection::{PortfolioSummary, PropertyCollection};
pub use credential::{Credential, VersionToken};
pub use ids::PropertyId;
pub use property::{NewProperty, Property};
pub use sync_state::{SyncGuard, SyncHandle, SyncState};
