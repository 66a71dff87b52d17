//! Eligibility, ranking and the two normalisations.

use crate::error::RewardError;
use crate::params::DistributionParams;
use crate::percentile::percentile;
use crate::table::{FormulaFailures, RewardRow, RewardTable};
use ces_formula::{Formula, FormulaError};
use ces_scoring::{rank_order, ScoreTable};
use ces_types::UserId;

/// A formula parsed once per run, or the reason it could not be.
struct Distribution<'a> {
    name: &'static str,
    formula: Result<Formula, FormulaError>,
    source: &'a str,
}

impl<'a> Distribution<'a> {
    fn new(name: &'static str, source: &'a str) -> Self {
        let formula = Formula::parse(source);
        if let Err(err) = &formula {
            tracing::warn!(formula = name, source, error = %err, "distribution formula rejected, every value is 0");
        }
        Self {
            name,
            formula,
            source,
        }
    }

    /// Raw value at `score`; failures count and yield `0.0`.
    fn raw(&self, user: &UserId, score: f64, failures: &mut u64) -> f64 {
        let result = match &self.formula {
            Ok(formula) => formula.eval(score),
            Err(err) => Err(err.clone()),
        };
        match result {
            Ok(value) => value,
            Err(err) => {
                *failures += 1;
                tracing::debug!(formula = self.name, source = self.source, user = %user, score, error = %err, "formula failed");
                0.0
            }
        }
    }
}

/// Compute the reward table for one score table.
///
/// Parameters are validated first; an invalid set is rejected before any
/// score is read.
pub fn compute_rewards(
    scores: &ScoreTable,
    params: &DistributionParams,
) -> Result<RewardTable, RewardError> {
    params.validate()?;
    if let Some((user, score)) = scores.iter().find(|(_, s)| !s.is_finite()) {
        return Err(RewardError::NonFiniteScore {
            user: user.to_string(),
            score,
        });
    }

    let positive: Vec<f64> = scores.iter().map(|(_, s)| s).filter(|s| *s > 0.0).collect();
    let Some(threshold) = percentile(&positive, params.threshold_percentile) else {
        tracing::info!("no positive scores, no rewards");
        return Ok(RewardTable::default());
    };

    let mut eligible: Vec<(&UserId, f64)> = scores
        .iter()
        .filter(|(user, score)| *score > 0.0 && *score >= threshold && !params.is_excluded(user))
        .collect();
    eligible.sort_by(|a, b| rank_order(*a, *b));

    let agix = Distribution::new("agix", &params.agix_formula);
    let voting = Distribution::new("voting_weight", &params.voting_weight_formula);
    let mut failures = FormulaFailures::default();
    let raw: Vec<(f64, f64)> = eligible
        .iter()
        .map(|(user, score)| {
            (
                agix.raw(user, *score, &mut failures.agix),
                voting.raw(user, *score, &mut failures.voting_weight),
            )
        })
        .collect();

    let agix_sum: f64 = raw.iter().map(|(a, _)| a).sum();
    let agix_scale = if agix_sum != 0.0 && agix_sum.is_finite() {
        params.total_budget / agix_sum
    } else {
        0.0
    };

    let (lo, hi) = raw
        .iter()
        .map(|(_, v)| *v)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    let span = hi - lo;
    let (min_vw, max_vw) = (params.min_voting_weight, params.max_voting_weight);
    let voting_weight = |v: f64| {
        if span > 0.0 && span.is_finite() {
            (min_vw + (v - lo) / span * (max_vw - min_vw)).clamp(min_vw, max_vw)
        } else {
            min_vw
        }
    };

    let rows: Vec<RewardRow> = eligible
        .iter()
        .zip(&raw)
        .enumerate()
        .map(|(i, ((user, score), (raw_agix, raw_vw)))| RewardRow {
            user_id: (*user).clone(),
            rank: i as u32 + 1,
            contribution_score: *score,
            agix_reward: raw_agix * agix_scale,
            voting_weight: voting_weight(*raw_vw),
        })
        .collect();

    if failures.total() > 0 {
        tracing::warn!(
            agix = failures.agix,
            voting_weight = failures.voting_weight,
            "formula evaluation failed for some users, their raw values are 0"
        );
    }
    tracing::info!(
        positive = positive.len(),
        threshold,
        eligible = rows.len(),
        "rewards distributed"
    );

    Ok(RewardTable {
        threshold: Some(threshold),
        rows,
        formula_failures: failures,
    })
}
