//! Default run parameters.
//!
//! Every value is overridable per run; these are the values a run uses when the
//! caller leaves a parameter unset.

use crate::field::CountField;
use crate::reaction::ReactionType;

/// Days of trailing activity admitted after a mission's end.
pub const DEFAULT_EXTRA_DAYS: u32 = 21;

/// Percentile of the non-zero score population below which users are ineligible.
pub const DEFAULT_THRESHOLD_PERCENTILE: f64 = 20.0;

/// Total reward budget distributed across eligible users.
pub const DEFAULT_TOTAL_BUDGET: f64 = 100_000.0;

/// Lower bound of the voting-weight range.
pub const DEFAULT_MIN_VOTING_WEIGHT: f64 = 1.0;

/// Upper bound of the voting-weight range.
pub const DEFAULT_MAX_VOTING_WEIGHT: f64 = 5.0;

/// Identity distribution formula.
pub const DEFAULT_FORMULA: &str = "x";

/// Largest accepted weight magnitude. Any count vector scored with weights in
/// this range has a finite total.
pub const MAX_WEIGHT_MAGNITUDE: f64 = 1e12;

/// Weight name of the rating-quality bonus fraction.
pub const HIGHLY_RATED_FRACTION_NAME: &str =
    "fraction_of_contribution_scores_for_highly_rated_proposals";

/// Weight of a positive emoji reaction received.
pub const POSITIVE_REACTION_RECEIVED_WEIGHT: f64 = 2.0;

/// Weight of a negative emoji reaction received.
pub const NEGATIVE_REACTION_RECEIVED_WEIGHT: f64 = -2.0;

/// The default weight of a count field. Fields not listed here weigh zero.
pub fn default_weight(field: CountField) -> f64 {
    match field {
        CountField::CommentsCreated => 3.0,
        CountField::ReactionsReceived(ReactionType::Upvote) => 2.0,
        CountField::ReactionsReceived(ReactionType::Downvote) => -3.0,
        CountField::ReactionsReceived(t) if t.is_negative_emoji() => {
            NEGATIVE_REACTION_RECEIVED_WEIGHT
        }
        CountField::ReactionsReceived(_) => POSITIVE_REACTION_RECEIVED_WEIGHT,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reaction_defaults_follow_sentiment() {
        assert_eq!(default_weight(CountField::ReactionsReceived(ReactionType::Love)), 2.0);
        assert_eq!(default_weight(CountField::ReactionsReceived(ReactionType::Anger)), -2.0);
        assert_eq!(default_weight(CountField::ReactionsReceived(ReactionType::Downvote)), -3.0);
        assert_eq!(default_weight(CountField::ReactionsCreated(ReactionType::Love)), 0.0);
    }

    #[test]
    fn only_comments_created_weighs_among_plain_fields() {
        assert_eq!(default_weight(CountField::CommentsCreated), 3.0);
        assert_eq!(default_weight(CountField::ProposalsCreated), 0.0);
        assert_eq!(default_weight(CountField::RepliesReceived), 0.0);
    }
}
