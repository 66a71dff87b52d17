//! In-memory, identifier-indexed entity store.

use crate::error::StoreError;
use crate::snapshot::{JsonFileSource, Snapshot, SnapshotSource};
use crate::summary::{MissionSummary, StoreSummary};
use ces_types::{
    Comment, CommentId, Mission, MissionId, Proposal, ProposalId, Rating, RatingId, Reaction,
    ReactionId, User, UserId,
};
use std::collections::BTreeMap;
use std::path::Path;

/// The six entity collections of one snapshot, indexed by identifier.
///
/// Iteration over any collection is in identifier order, so every stage that
/// walks the store is deterministic.
#[derive(Clone, Debug, Default)]
pub struct EntityStore {
    users: BTreeMap<UserId, User>,
    missions: BTreeMap<MissionId, Mission>,
    proposals: BTreeMap<ProposalId, Proposal>,
    ratings: BTreeMap<RatingId, Rating>,
    comments: BTreeMap<CommentId, Comment>,
    reactions: BTreeMap<ReactionId, Reaction>,
}

fn index<K: Ord + ToString, V>(
    collection: &'static str,
    records: Vec<V>,
    key: impl Fn(&V) -> &K,
) -> Result<BTreeMap<K, V>, StoreError>
where
    K: Clone,
{
    let mut map = BTreeMap::new();
    for record in records {
        let id = key(&record).clone();
        if map.contains_key(&id) {
            return Err(StoreError::Duplicate {
                collection,
                id: id.to_string(),
            });
        }
        map.insert(id, record);
    }
    Ok(map)
}

impl EntityStore {
    /// Index a snapshot. Duplicate identifiers within a collection are rejected.
    pub fn from_snapshot(snapshot: Snapshot) -> Result<Self, StoreError> {
        let store = Self {
            users: index("user", snapshot.users, |u| &u.user_id)?,
            missions: index("mission", snapshot.missions, |m| &m.mission_id)?,
            proposals: index("proposal", snapshot.proposals, |p| &p.proposal_id)?,
            ratings: index("rating", snapshot.ratings, |r| &r.rating_id)?,
            comments: index("comment", snapshot.comments, |c| &c.comment_id)?,
            reactions: index("reaction", snapshot.reactions, |r| &r.reaction_id)?,
        };
        let summary = store.summary();
        tracing::info!(
            users = summary.users,
            missions = summary.missions,
            proposals = summary.proposals,
            ratings = summary.ratings,
            comments = summary.comments,
            reactions = summary.reactions,
            "entity store loaded"
        );
        Ok(store)
    }

    /// Load and index a snapshot from any source.
    pub fn load(source: &dyn SnapshotSource) -> Result<Self, StoreError> {
        Self::from_snapshot(source.load_snapshot()?)
    }

    /// Parse and index a JSON-encoded snapshot.
    pub fn from_json_str(s: &str) -> Result<Self, StoreError> {
        Self::from_snapshot(Snapshot::from_json_str(s)?)
    }

    /// Read and index a JSON snapshot file.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        Self::load(&JsonFileSource::new(path))
    }

    pub fn user(&self, id: &UserId) -> Option<&User> {
        self.users.get(id)
    }

    pub fn mission(&self, id: &MissionId) -> Option<&Mission> {
        self.missions.get(id)
    }

    pub fn proposal(&self, id: &ProposalId) -> Option<&Proposal> {
        self.proposals.get(id)
    }

    pub fn rating(&self, id: &RatingId) -> Option<&Rating> {
        self.ratings.get(id)
    }

    pub fn comment(&self, id: &CommentId) -> Option<&Comment> {
        self.comments.get(id)
    }

    pub fn reaction(&self, id: &ReactionId) -> Option<&Reaction> {
        self.reactions.get(id)
    }

    pub fn has_user(&self, id: &UserId) -> bool {
        self.users.contains_key(id)
    }

    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    pub fn missions(&self) -> impl Iterator<Item = &Mission> {
        self.missions.values()
    }

    pub fn proposals(&self) -> impl Iterator<Item = &Proposal> {
        self.proposals.values()
    }

    pub fn ratings(&self) -> impl Iterator<Item = &Rating> {
        self.ratings.values()
    }

    pub fn comments(&self) -> impl Iterator<Item = &Comment> {
        self.comments.values()
    }

    pub fn reactions(&self) -> impl Iterator<Item = &Reaction> {
        self.reactions.values()
    }

    /// Every mission identifier, for callers that mean "all missions".
    pub fn mission_ids(&self) -> impl Iterator<Item = &MissionId> {
        self.missions.keys()
    }

    /// Missions ordered by creation time (ties by identifier).
    pub fn missions_by_creation(&self) -> Vec<&Mission> {
        let mut missions: Vec<&Mission> = self.missions.values().collect();
        missions.sort_by(|a, b| {
            a.creation_timestamp
                .cmp(&b.creation_timestamp)
                .then_with(|| a.mission_id.cmp(&b.mission_id))
        });
        missions
    }

    /// Listing of all missions for scope selection, ordered by creation time.
    pub fn mission_summaries(&self) -> Vec<MissionSummary> {
        self.missions_by_creation()
            .into_iter()
            .map(|m| MissionSummary::from_mission(m, self.proposal_count(&m.mission_id)))
            .collect()
    }

    /// Number of proposals submitted to a mission.
    pub fn proposal_count(&self, mission: &MissionId) -> usize {
        self.proposals
            .values()
            .filter(|p| &p.mission_id == mission)
            .count()
    }

    /// Collection sizes.
    pub fn summary(&self) -> StoreSummary {
        StoreSummary {
            users: self.users.len(),
            missions: self.missions.len(),
            proposals: self.proposals.len(),
            ratings: self.ratings.len(),
            comments: self.comments.len(),
            reactions: self.reactions.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ces_types::Timestamp;

    fn mission(id: &str, created: u64) -> Mission {
        Mission {
            mission_id: MissionId::new(id),
            creation_timestamp: Timestamp::from_millis(created),
            ..Default::default()
        }
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let snapshot = Snapshot {
            missions: vec![mission("m1", 0), mission("m1", 5)],
            ..Default::default()
        };
        match EntityStore::from_snapshot(snapshot).unwrap_err() {
            StoreError::Duplicate { collection, id } => {
                assert_eq!(collection, "mission");
                assert_eq!(id, "m1");
            }
            other => panic!("expected Duplicate, got {other:?}"),
        }
    }

    #[test]
    fn missions_listed_by_creation_time() {
        let snapshot = Snapshot {
            missions: vec![mission("b", 10), mission("a", 20), mission("c", 10)],
            ..Default::default()
        };
        let store = EntityStore::from_snapshot(snapshot).unwrap();
        let order: Vec<&str> = store
            .missions_by_creation()
            .iter()
            .map(|m| m.mission_id.as_str())
            .collect();
        assert_eq!(order, vec!["b", "c", "a"]);
    }

    #[test]
    fn lookups_and_summary() {
        let snapshot = Snapshot {
            users: vec![User {
                user_id: UserId::new("u1"),
                ..Default::default()
            }],
            missions: vec![mission("m1", 0)],
            proposals: vec![Proposal {
                proposal_id: ProposalId::new("p1"),
                mission_id: MissionId::new("m1"),
                user_id: UserId::new("u1"),
                ..Default::default()
            }],
            ..Default::default()
        };
        let store = EntityStore::from_snapshot(snapshot).unwrap();
        assert!(store.has_user(&UserId::new("u1")));
        assert!(store.user(&UserId::new("u2")).is_none());
        assert_eq!(store.proposal_count(&MissionId::new("m1")), 1);
        let summary = store.summary();
        assert_eq!(summary.users, 1);
        assert_eq!(summary.proposals, 1);
        assert_eq!(summary.reactions, 0);
    }
}
