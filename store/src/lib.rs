//! Entity store for the engagement score engine.
//!
//! The store holds the six normalized entity collections of one platform
//! snapshot, indexed by identifier. It is built once per snapshot and never
//! mutated afterwards, so it can be shared read-only between concurrent runs.
//!
//! Snapshots arrive through a [`SnapshotSource`]; the rest of the engine
//! depends only on [`EntityStore`].

pub mod entity_store;
pub mod error;
pub mod snapshot;
pub mod summary;

pub use entity_store::EntityStore;
pub use error::StoreError;
pub use snapshot::{JsonFileSource, Snapshot, SnapshotSource};
pub use summary::{MissionSummary, StoreSummary};
