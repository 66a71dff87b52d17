//! Per-user activity aggregation over one scope.

use crate::counts::{CountVector, ProposalRating, ProposalRatings, ScopedCounts};
use ces_scope::ScopeSelector;
use ces_store::EntityStore;
use ces_types::{CountField, ProposalId, UserId};
use std::collections::BTreeMap;

#[derive(Default)]
struct RatingSum {
    total: f64,
    count: u64,
}

/// Count every in-scope event for its actor and for the author of its target.
///
/// Every store user appears in the result, active or not. Authors of in-scope
/// proposals appear too, even without a user record.
pub fn count_activity(store: &EntityStore, scope: &ScopeSelector) -> ScopedCounts {
    let mut counts: BTreeMap<UserId, CountVector> = store
        .users()
        .map(|u| (u.user_id.clone(), CountVector::zero()))
        .collect();
    let mut bump = |user: &UserId, field: CountField| {
        counts.entry(user.clone()).or_default().increment(field);
    };

    let mut authors: BTreeMap<&ProposalId, &UserId> = BTreeMap::new();
    for id in scope.proposals() {
        let Some(proposal) = store.proposal(id) else {
            continue;
        };
        authors.insert(id, &proposal.user_id);
        bump(&proposal.user_id, CountField::ProposalsCreated);
    }

    let mut sums: BTreeMap<&ProposalId, RatingSum> = BTreeMap::new();
    for id in scope.ratings() {
        let Some(rating) = store.rating(id) else {
            continue;
        };
        bump(&rating.user_id, CountField::RatingsCreated);
        if let Some(author) = authors.get(&rating.proposal_id) {
            bump(*author, CountField::RatingsReceived);
        }
        let sum = sums.entry(&rating.proposal_id).or_default();
        sum.total += rating.rating;
        sum.count += 1;
    }

    for id in scope.comments() {
        let Some(comment) = store.comment(id) else {
            continue;
        };
        bump(&comment.user_id, CountField::CommentsCreated);
        if let Some(author) = authors.get(&comment.proposal_id) {
            bump(*author, CountField::CommentsReceived);
        }
        for reply in scope.replies_of(id) {
            if store.comment(reply).is_some() {
                bump(&comment.user_id, CountField::RepliesReceived);
            }
        }
    }

    let mut unknown_reaction_types = 0u64;
    for id in scope.reactions() {
        let Some(reaction) = store.reaction(id) else {
            continue;
        };
        let Some(kind) = reaction.kind() else {
            unknown_reaction_types += 1;
            tracing::debug!(
                reaction = %reaction.reaction_id,
                tag = %reaction.reaction_type,
                "skipping reaction with unknown type"
            );
            continue;
        };
        bump(&reaction.user_id, CountField::ReactionsCreated(kind));
        if let Some(target) = store.comment(&reaction.comment_id) {
            bump(&target.user_id, CountField::ReactionsReceived(kind));
        }
    }

    let proposals: BTreeMap<ProposalId, ProposalRating> = authors
        .iter()
        .map(|(&id, &author)| {
            let (mean_rating, num_ratings) = match sums.get(id) {
                Some(sum) if sum.count > 0 => (sum.total / sum.count as f64, sum.count),
                _ => (0.0, 0),
            };
            (
                id.clone(),
                ProposalRating {
                    author: author.clone(),
                    mean_rating,
                    num_ratings,
                },
            )
        })
        .collect();
    let cohort_mean = if proposals.is_empty() {
        0.0
    } else {
        proposals.values().map(|p| p.mean_rating).sum::<f64>() / proposals.len() as f64
    };

    if unknown_reaction_types > 0 {
        tracing::warn!(count = unknown_reaction_types, "reactions with unknown type were not counted");
    }
    tracing::info!(
        users = counts.len(),
        proposals = proposals.len(),
        cohort_mean,
        "activity counted"
    );

    ScopedCounts {
        counts,
        proposal_ratings: ProposalRatings {
            proposals,
            cohort_mean,
        },
        unknown_reaction_types,
    }
}
