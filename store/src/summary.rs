//! Plain summary records exposed to reporting layers.

use ces_types::{Mission, MissionId, Timestamp};
use ces_utils::format_duration_millis;
use serde::Serialize;

/// Collection sizes of an entity store.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StoreSummary {
    pub users: usize,
    pub missions: usize,
    pub proposals: usize,
    pub ratings: usize,
    pub comments: usize,
    pub reactions: usize,
}

/// One row of the mission listing used to pick a scope.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MissionSummary {
    pub mission_id: MissionId,
    pub title: String,
    pub start_timestamp: Timestamp,
    pub end_timestamp: Timestamp,
    /// Human-readable length of the mission's own interval.
    pub duration: String,
    pub num_proposals: usize,
}

impl MissionSummary {
    pub fn from_mission(mission: &Mission, num_proposals: usize) -> Self {
        Self {
            mission_id: mission.mission_id.clone(),
            title: mission.title.clone(),
            start_timestamp: mission.start_timestamp,
            end_timestamp: mission.end_timestamp,
            duration: format_duration_millis(
                mission.start_timestamp.millis_until(mission.end_timestamp),
            ),
            num_proposals,
        }
    }
}
