//! The result of scope filtering: identifier sets plus a replies index.

use ces_types::{CommentId, MissionId, ProposalId, RatingId, ReactionId, TimeWindow};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Rows dropped while filtering, by reason.
///
/// Out-of-window rows are not reference errors but are tallied alongside them
/// so a run can report everything it left out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DroppedReferences {
    pub unknown_missions: u64,
    pub ratings_unknown_proposal: u64,
    pub ratings_unknown_user: u64,
    pub ratings_out_of_window: u64,
    pub comments_unknown_proposal: u64,
    pub comments_unknown_user: u64,
    pub comments_out_of_window: u64,
    pub reactions_unknown_comment: u64,
    pub reactions_unknown_user: u64,
}

impl DroppedReferences {
    /// Rows dropped because a foreign key pointed nowhere.
    pub fn dangling(&self) -> u64 {
        self.ratings_unknown_proposal
            + self.ratings_unknown_user
            + self.comments_unknown_proposal
            + self.comments_unknown_user
            + self.reactions_unknown_comment
            + self.reactions_unknown_user
    }
}

/// The set of entities admitted by one mission selection.
///
/// Holds identifiers only; entity data stays in the store. The replies index
/// maps an in-scope comment to its in-scope direct replies and is built once
/// per scope.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ScopeSelector {
    pub(crate) missions: BTreeSet<MissionId>,
    pub(crate) windows: Vec<TimeWindow>,
    pub(crate) proposals: BTreeSet<ProposalId>,
    pub(crate) ratings: BTreeSet<RatingId>,
    pub(crate) comments: BTreeSet<CommentId>,
    pub(crate) reactions: BTreeSet<ReactionId>,
    pub(crate) replies: BTreeMap<CommentId, Vec<CommentId>>,
    pub(crate) dropped: DroppedReferences,
}

impl ScopeSelector {
    /// Selected missions that exist in the store.
    pub fn missions(&self) -> &BTreeSet<MissionId> {
        &self.missions
    }

    /// Creation-time windows, one per distinct mission interval.
    pub fn windows(&self) -> &[TimeWindow] {
        &self.windows
    }

    pub fn proposals(&self) -> &BTreeSet<ProposalId> {
        &self.proposals
    }

    pub fn ratings(&self) -> &BTreeSet<RatingId> {
        &self.ratings
    }

    pub fn comments(&self) -> &BTreeSet<CommentId> {
        &self.comments
    }

    pub fn reactions(&self) -> &BTreeSet<ReactionId> {
        &self.reactions
    }

    pub fn contains_proposal(&self, id: &ProposalId) -> bool {
        self.proposals.contains(id)
    }

    pub fn contains_comment(&self, id: &CommentId) -> bool {
        self.comments.contains(id)
    }

    /// Direct in-scope replies of a comment.
    pub fn replies_of(&self, id: &CommentId) -> &[CommentId] {
        self.replies.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn dropped(&self) -> &DroppedReferences {
        &self.dropped
    }

    /// Whether nothing at all was admitted.
    pub fn is_empty(&self) -> bool {
        self.proposals.is_empty()
    }
}
