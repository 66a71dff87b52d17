//! Nullable infrastructure for deterministic testing.
//!
//! The engine's only external dependency is the snapshot loader. This crate
//! provides an in-memory [`SnapshotBuilder`] that implements
//! [`ces_store::SnapshotSource`] and a [`day`] helper for laying out mission
//! timelines, so tests never touch the filesystem and every record has a
//! predictable identifier and timestamp.

pub mod clock;
pub mod snapshot;

pub use clock::day;
pub use snapshot::SnapshotBuilder;
