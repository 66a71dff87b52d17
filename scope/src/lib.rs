//! Scope filter: restricts the entity store to a mission selection.
//!
//! Containment is causal: proposals of the selected missions, then ratings and
//! comments on those proposals created inside some mission window, then
//! reactions on those comments.
//!
//! Dangling references are dropped and tallied in [`DroppedReferences`]; they
//! never fail a run. An empty mission selection yields an empty scope.

pub mod filter;
pub mod params;
pub mod selector;

pub use filter::filter_scope;
pub use params::ScopeParams;
pub use selector::{DroppedReferences, ScopeSelector};
