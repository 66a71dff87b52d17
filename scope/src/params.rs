//! Scope parameters.

use ces_store::EntityStore;
use ces_types::params::DEFAULT_EXTRA_DAYS;
use ces_types::MissionId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Which missions a run covers and how much trailing activity it admits.
///
/// The mission set is ordered so that equal selections encode identically,
/// whatever order the caller listed them in.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScopeParams {
    pub mission_ids: BTreeSet<MissionId>,
    /// Days admitted after each mission's end.
    pub extra_days: u32,
}

impl ScopeParams {
    pub fn new(mission_ids: impl IntoIterator<Item = MissionId>, extra_days: u32) -> Self {
        Self {
            mission_ids: mission_ids.into_iter().collect(),
            extra_days,
        }
    }

    /// Every mission in the store.
    pub fn all(store: &EntityStore, extra_days: u32) -> Self {
        Self::new(store.mission_ids().cloned(), extra_days)
    }

    pub fn is_empty(&self) -> bool {
        self.mission_ids.is_empty()
    }
}

impl Default for ScopeParams {
    fn default() -> Self {
        Self {
            mission_ids: BTreeSet::new(),
            extra_days: DEFAULT_EXTRA_DAYS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_order_does_not_matter() {
        let a = ScopeParams::new([MissionId::new("m2"), MissionId::new("m1")], 7);
        let b = ScopeParams::new([MissionId::new("m1"), MissionId::new("m2")], 7);
        assert_eq!(a, b);
    }

    #[test]
    fn default_scope_is_empty() {
        let params = ScopeParams::default();
        assert!(params.is_empty());
        assert_eq!(params.extra_days, DEFAULT_EXTRA_DAYS);
    }
}
