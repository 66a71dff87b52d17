//! Weighted scoring of scoped counts.

use crate::table::{ScoreTable, UserScore};
use crate::weights::WeightVector;
use ces_activity::ScopedCounts;
use ces_types::{CountField, UserId};
use std::collections::BTreeMap;

/// Score every user of `counts`.
///
/// Each term is `weight × count`. With bonus fraction `f > 0` and a non-zero
/// cohort mean rating `Q`, the proposal term becomes
/// `w · ((1 − f)·n + f·M/Q)` where `M` sums the mean ratings of the user's
/// in-scope proposals. Across the cohort the bonus moves proposal credit
/// between authors without changing its total.
pub fn compute_scores(counts: &ScopedCounts, weights: &WeightVector) -> ScoreTable {
    let fraction = weights.highly_rated_fraction();
    let cohort_mean = counts.proposal_ratings.cohort_mean;
    let bonus_active = fraction > 0.0 && cohort_mean > 0.0 && cohort_mean.is_finite();
    let mass: BTreeMap<UserId, f64> = if bonus_active {
        counts.proposal_ratings.rating_mass_by_author()
    } else {
        BTreeMap::new()
    };

    let scores: BTreeMap<UserId, UserScore> = counts
        .counts
        .iter()
        .map(|(user, vector)| {
            let mut components = BTreeMap::new();
            let mut total = 0.0;
            for (field, weight) in weights.iter() {
                let count = vector.get(field) as f64;
                let term = if field == CountField::ProposalsCreated && bonus_active {
                    let m = mass.get(user).copied().unwrap_or(0.0);
                    weight * ((1.0 - fraction) * count + fraction * m / cohort_mean)
                } else {
                    weight * count
                };
                if term != 0.0 {
                    components.insert(field, term);
                    total += term;
                }
            }
            (user.clone(), UserScore { total, components })
        })
        .collect();

    let table = ScoreTable::new(scores);
    tracing::info!(
        users = table.len(),
        active = table.iter().filter(|(_, s)| *s != 0.0).count(),
        bonus = bonus_active,
        "scores computed"
    );
    table
}
