//! Scope computation.

use crate::params::ScopeParams;
use crate::selector::{DroppedReferences, ScopeSelector};
use ces_store::EntityStore;
use ces_types::{TimeWindow, Timestamp};
use std::collections::{BTreeMap, BTreeSet};

/// Compute the entities causally contained in a mission selection.
///
/// - A proposal is in scope iff its mission is selected.
/// - A rating or comment is in scope iff its proposal is in scope, its user
///   exists, and its creation time falls in any mission window.
/// - A reaction is in scope iff its comment is in scope and its user exists.
///
/// Windows are `[start, end + extra_days]` per distinct mission interval and
/// are not merged. Unknown mission ids are ignored.
pub fn filter_scope(store: &EntityStore, params: &ScopeParams) -> ScopeSelector {
    let mut dropped = DroppedReferences::default();

    let mut missions = BTreeSet::new();
    let mut intervals = BTreeSet::new();
    for id in &params.mission_ids {
        match store.mission(id) {
            Some(mission) => {
                missions.insert(id.clone());
                intervals.insert((mission.start_timestamp, mission.end_timestamp));
            }
            None => {
                dropped.unknown_missions += 1;
                tracing::warn!(mission = %id, "ignoring unknown mission id");
            }
        }
    }
    let windows: Vec<TimeWindow> = intervals
        .into_iter()
        .map(|(start, end)| TimeWindow::new(start, end.plus_days(params.extra_days)))
        .collect();
    let in_window = |t: Timestamp| windows.iter().any(|w| w.contains(t));

    let proposals: BTreeSet<_> = store
        .proposals()
        .filter(|p| missions.contains(&p.mission_id))
        .map(|p| p.proposal_id.clone())
        .collect();

    let mut ratings = BTreeSet::new();
    for rating in store.ratings() {
        if !proposals.contains(&rating.proposal_id) {
            if store.proposal(&rating.proposal_id).is_none() {
                dropped.ratings_unknown_proposal += 1;
                tracing::debug!(rating = %rating.rating_id, "dropping rating with unknown proposal");
            }
            continue;
        }
        if !store.has_user(&rating.user_id) {
            dropped.ratings_unknown_user += 1;
            tracing::debug!(rating = %rating.rating_id, user = %rating.user_id, "dropping rating with unknown user");
            continue;
        }
        if !in_window(rating.creation_timestamp) {
            dropped.ratings_out_of_window += 1;
            continue;
        }
        ratings.insert(rating.rating_id.clone());
    }

    let mut comments = BTreeSet::new();
    for comment in store.comments() {
        if !proposals.contains(&comment.proposal_id) {
            if store.proposal(&comment.proposal_id).is_none() {
                dropped.comments_unknown_proposal += 1;
                tracing::debug!(comment = %comment.comment_id, "dropping comment with unknown proposal");
            }
            continue;
        }
        if !store.has_user(&comment.user_id) {
            dropped.comments_unknown_user += 1;
            tracing::debug!(comment = %comment.comment_id, user = %comment.user_id, "dropping comment with unknown user");
            continue;
        }
        if !in_window(comment.creation_timestamp) {
            dropped.comments_out_of_window += 1;
            continue;
        }
        comments.insert(comment.comment_id.clone());
    }

    // Parents on another proposal are indexed as-is; nothing walks the
    // forest transitively, so cycles are harmless here.
    let mut replies: BTreeMap<_, Vec<_>> = BTreeMap::new();
    for id in &comments {
        let Some(comment) = store.comment(id) else {
            continue;
        };
        if let Some(parent) = comment.parent() {
            if comments.contains(parent) {
                replies.entry(parent.clone()).or_default().push(id.clone());
            }
        }
    }

    let mut reactions = BTreeSet::new();
    for reaction in store.reactions() {
        if !comments.contains(&reaction.comment_id) {
            if store.comment(&reaction.comment_id).is_none() {
                dropped.reactions_unknown_comment += 1;
                tracing::debug!(reaction = %reaction.reaction_id, "dropping reaction with unknown comment");
            }
            continue;
        }
        if !store.has_user(&reaction.user_id) {
            dropped.reactions_unknown_user += 1;
            tracing::debug!(reaction = %reaction.reaction_id, user = %reaction.user_id, "dropping reaction with unknown user");
            continue;
        }
        reactions.insert(reaction.reaction_id.clone());
    }

    tracing::info!(
        missions = missions.len(),
        windows = windows.len(),
        proposals = proposals.len(),
        ratings = ratings.len(),
        comments = comments.len(),
        reactions = reactions.len(),
        dangling = dropped.dangling(),
        "scope filtered"
    );

    ScopeSelector {
        missions,
        windows,
        proposals,
        ratings,
        comments,
        reactions,
        replies,
        dropped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ces_nullables::{day, SnapshotBuilder};
    use ces_types::{CommentId, MissionId, ProposalId, RatingId, ReactionId};

    fn params(missions: &[&str], extra_days: u32) -> ScopeParams {
        ScopeParams::new(missions.iter().map(|m| MissionId::new(*m)), extra_days)
    }

    fn two_mission_store() -> EntityStore {
        SnapshotBuilder::new()
            .users(&["alice", "bob", "carol"])
            .mission("mA", day(0), day(10))
            .mission("mB", day(100), day(110))
            .proposal("pA", "mA", "alice", day(1))
            .proposal("pB", "mB", "bob", day(101))
            .rating("rA", "pA", "bob", 4.0, day(2))
            .rating("rB", "pB", "alice", 3.0, day(102))
            .comment("cA", "pA", "bob", day(3))
            .comment("cB", "pB", "carol", day(103))
            .reaction("xA", "cA", "alice", "clap", day(4))
            .reaction("xB", "cB", "alice", "love", day(104))
            .build_store()
            .unwrap()
    }

    #[test]
    fn empty_selection_is_empty_scope() {
        let store = two_mission_store();
        let scope = filter_scope(&store, &params(&[], 21));
        assert!(scope.is_empty());
        assert!(scope.ratings().is_empty());
        assert!(scope.comments().is_empty());
        assert!(scope.reactions().is_empty());
        assert!(scope.windows().is_empty());
    }

    #[test]
    fn selection_is_causal() {
        let store = two_mission_store();
        let scope = filter_scope(&store, &params(&["mA"], 0));
        assert!(scope.contains_proposal(&ProposalId::new("pA")));
        assert!(!scope.contains_proposal(&ProposalId::new("pB")));
        assert!(scope.ratings().contains(&RatingId::new("rA")));
        assert!(!scope.ratings().contains(&RatingId::new("rB")));
        assert!(scope.contains_comment(&CommentId::new("cA")));
        assert!(scope.reactions().contains(&ReactionId::new("xA")));
        assert!(!scope.reactions().contains(&ReactionId::new("xB")));
    }

    #[test]
    fn unknown_missions_are_ignored() {
        let store = two_mission_store();
        let scope = filter_scope(&store, &params(&["mA", "nope"], 0));
        assert_eq!(scope.missions().len(), 1);
        assert_eq!(scope.dropped().unknown_missions, 1);
        assert_eq!(scope.proposals().len(), 1);
    }

    #[test]
    fn extra_days_admit_late_comments() {
        let store = SnapshotBuilder::new()
            .users(&["alice", "bob"])
            .mission("m", day(0), day(10))
            .proposal("p", "m", "alice", day(1))
            .comment("late", "p", "bob", day(15))
            .build_store()
            .unwrap();

        let strict = filter_scope(&store, &params(&["m"], 0));
        assert!(!strict.contains_comment(&CommentId::new("late")));
        assert_eq!(strict.dropped().comments_out_of_window, 1);

        let lenient = filter_scope(&store, &params(&["m"], 5));
        assert!(lenient.contains_comment(&CommentId::new("late")));
    }

    #[test]
    fn windows_are_not_merged() {
        // Activity between the two missions' windows is excluded even though
        // both missions are selected.
        let store = SnapshotBuilder::new()
            .users(&["alice", "bob"])
            .mission("m1", day(0), day(10))
            .mission("m2", day(100), day(110))
            .proposal("p", "m1", "alice", day(1))
            .rating("gap", "p", "bob", 5.0, day(50))
            .rating("second", "p", "bob", 5.0, day(105))
            .build_store()
            .unwrap();
        let scope = filter_scope(&store, &params(&["m1", "m2"], 0));
        assert_eq!(scope.windows().len(), 2);
        assert!(!scope.ratings().contains(&RatingId::new("gap")));
        assert!(scope.ratings().contains(&RatingId::new("second")));
    }

    #[test]
    fn identical_intervals_collapse() {
        let store = SnapshotBuilder::new()
            .mission("m1", day(0), day(10))
            .mission("m2", day(0), day(10))
            .build_store()
            .unwrap();
        let scope = filter_scope(&store, &params(&["m1", "m2"], 0));
        assert_eq!(scope.windows().len(), 1);
    }

    #[test]
    fn dangling_references_are_dropped() {
        let store = SnapshotBuilder::new()
            .users(&["alice", "bob"])
            .mission("m", day(0), day(10))
            .proposal("p", "m", "alice", day(1))
            .rating("r-ghost-proposal", "ghost", "bob", 5.0, day(2))
            .rating("r-ghost-user", "p", "ghost", 5.0, day(2))
            .comment("c", "p", "bob", day(2))
            .comment("c-ghost-user", "p", "ghost", day(2))
            .reaction("x-ghost-comment", "ghost", "bob", "clap", day(3))
            .reaction("x-ghost-user", "c", "ghost", "clap", day(3))
            .reaction("x", "c", "alice", "clap", day(3))
            .build_store()
            .unwrap();
        let scope = filter_scope(&store, &params(&["m"], 0));
        assert_eq!(scope.ratings().len(), 0);
        assert_eq!(scope.comments().len(), 1);
        assert_eq!(scope.reactions().len(), 1);
        let dropped = scope.dropped();
        assert_eq!(dropped.ratings_unknown_proposal, 1);
        assert_eq!(dropped.ratings_unknown_user, 1);
        assert_eq!(dropped.comments_unknown_user, 1);
        assert_eq!(dropped.reactions_unknown_comment, 1);
        assert_eq!(dropped.reactions_unknown_user, 1);
        assert_eq!(dropped.dangling(), 5);
    }

    #[test]
    fn cross_proposal_parent_is_tolerated() {
        let store = SnapshotBuilder::new()
            .users(&["alice", "bob"])
            .mission("m", day(0), day(10))
            .proposal("p1", "m", "alice", day(1))
            .proposal("p2", "m", "bob", day(1))
            .comment("root", "p1", "bob", day(2))
            .reply("stray", "p2", "alice", "root", day(3))
            .build_store()
            .unwrap();
        let scope = filter_scope(&store, &params(&["m"], 0));
        assert!(scope.contains_comment(&CommentId::new("stray")));
        assert_eq!(
            scope.replies_of(&CommentId::new("root")),
            &[CommentId::new("stray")]
        );
    }

    #[test]
    fn cyclic_parents_do_not_hang() {
        let store = SnapshotBuilder::new()
            .users(&["alice", "bob"])
            .mission("m", day(0), day(10))
            .proposal("p", "m", "alice", day(1))
            .reply("a", "p", "alice", "b", day(2))
            .reply("b", "p", "bob", "a", day(2))
            .build_store()
            .unwrap();
        let scope = filter_scope(&store, &params(&["m"], 0));
        assert_eq!(scope.comments().len(), 2);
        assert_eq!(scope.replies_of(&CommentId::new("a")).len(), 1);
        assert_eq!(scope.replies_of(&CommentId::new("b")).len(), 1);
    }

    #[test]
    fn mission_with_no_proposals_is_fine() {
        let store = SnapshotBuilder::new()
            .mission("m", day(0), day(10))
            .build_store()
            .unwrap();
        let scope = filter_scope(&store, &params(&["m"], 21));
        assert!(scope.is_empty());
        assert_eq!(scope.missions().len(), 1);
    }
}
