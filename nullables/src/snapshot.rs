//! In-memory snapshot builder.

use ces_store::{EntityStore, Snapshot, SnapshotSource, StoreError};
use ces_types::{
    Comment, CommentId, Mission, MissionId, Proposal, ProposalId, Rating, RatingId, Reaction,
    ReactionId, Timestamp, User, UserId,
};

/// Fluent builder for test snapshots.
///
/// Foreign keys are taken verbatim, so dangling references can be built on
/// purpose. Timestamps are raw milliseconds; see [`crate::day`].
#[derive(Clone, Debug, Default)]
pub struct SnapshotBuilder {
    snapshot: Snapshot,
}

impl SnapshotBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user(mut self, id: &str) -> Self {
        self.snapshot.users.push(User {
            user_id: UserId::new(id),
            name: format!("User {id}"),
            ..Default::default()
        });
        self
    }

    pub fn users(mut self, ids: &[&str]) -> Self {
        for id in ids {
            self = self.user(id);
        }
        self
    }

    /// A mission running from `start` to `end`, created at `start`.
    pub fn mission(mut self, id: &str, start: u64, end: u64) -> Self {
        self.snapshot.missions.push(Mission {
            mission_id: MissionId::new(id),
            title: format!("Mission {id}"),
            creation_timestamp: Timestamp::from_millis(start),
            start_timestamp: Timestamp::from_millis(start),
            end_timestamp: Timestamp::from_millis(end),
            ..Default::default()
        });
        self
    }

    pub fn proposal(mut self, id: &str, mission: &str, author: &str, at: u64) -> Self {
        self.snapshot.proposals.push(Proposal {
            proposal_id: ProposalId::new(id),
            mission_id: MissionId::new(mission),
            user_id: UserId::new(author),
            title: format!("Proposal {id}"),
            creation_timestamp: Timestamp::from_millis(at),
            publishing_timestamp: Timestamp::from_millis(at),
            ..Default::default()
        });
        self
    }

    pub fn rating(mut self, id: &str, proposal: &str, rater: &str, value: f64, at: u64) -> Self {
        self.snapshot.ratings.push(Rating {
            rating_id: RatingId::new(id),
            proposal_id: ProposalId::new(proposal),
            user_id: UserId::new(rater),
            rating: value,
            enable: true,
            creation_timestamp: Timestamp::from_millis(at),
            ..Default::default()
        });
        self
    }

    /// A top-level comment on a proposal.
    pub fn comment(mut self, id: &str, proposal: &str, author: &str, at: u64) -> Self {
        self.snapshot.comments.push(Comment {
            comment_id: CommentId::new(id),
            proposal_id: ProposalId::new(proposal),
            user_id: UserId::new(author),
            text: format!("comment {id}"),
            creation_timestamp: Timestamp::from_millis(at),
            ..Default::default()
        });
        self
    }

    /// A reply to `parent`, filed under `proposal` (which need not be the parent's).
    pub fn reply(
        mut self,
        id: &str,
        proposal: &str,
        author: &str,
        parent: &str,
        at: u64,
    ) -> Self {
        self.snapshot.comments.push(Comment {
            comment_id: CommentId::new(id),
            proposal_id: ProposalId::new(proposal),
            user_id: UserId::new(author),
            parent_comment_id: Some(CommentId::new(parent)),
            text: format!("reply {id}"),
            level: 1,
            creation_timestamp: Timestamp::from_millis(at),
            ..Default::default()
        });
        self
    }

    pub fn reaction(mut self, id: &str, comment: &str, actor: &str, tag: &str, at: u64) -> Self {
        self.snapshot.reactions.push(Reaction {
            reaction_id: ReactionId::new(id),
            comment_id: CommentId::new(comment),
            user_id: UserId::new(actor),
            reaction_type: tag.to_string(),
            creation_timestamp: Timestamp::from_millis(at),
        });
        self
    }

    pub fn build(self) -> Snapshot {
        self.snapshot
    }

    /// Build and index the snapshot.
    pub fn build_store(self) -> Result<EntityStore, StoreError> {
        EntityStore::from_snapshot(self.snapshot)
    }
}

impl SnapshotSource for SnapshotBuilder {
    fn load_snapshot(&self) -> Result<Snapshot, StoreError> {
        Ok(self.snapshot.clone())
    }
}
