//! Distribution parameters.

use ces_types::params::{
    DEFAULT_FORMULA, DEFAULT_MAX_VOTING_WEIGHT, DEFAULT_MIN_VOTING_WEIGHT,
    DEFAULT_THRESHOLD_PERCENTILE, DEFAULT_TOTAL_BUDGET,
};
use ces_types::{ParamError, UserId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Everything the distributor needs besides the scores.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DistributionParams {
    pub excluded_user_ids: BTreeSet<UserId>,
    /// Percentile of the positive scores that eligible users must reach.
    pub threshold_percentile: f64,
    pub agix_formula: String,
    pub voting_weight_formula: String,
    pub total_budget: f64,
    pub min_voting_weight: f64,
    pub max_voting_weight: f64,
}

impl Default for DistributionParams {
    fn default() -> Self {
        Self {
            excluded_user_ids: BTreeSet::new(),
            threshold_percentile: DEFAULT_THRESHOLD_PERCENTILE,
            agix_formula: DEFAULT_FORMULA.to_string(),
            voting_weight_formula: DEFAULT_FORMULA.to_string(),
            total_budget: DEFAULT_TOTAL_BUDGET,
            min_voting_weight: DEFAULT_MIN_VOTING_WEIGHT,
            max_voting_weight: DEFAULT_MAX_VOTING_WEIGHT,
        }
    }
}

impl DistributionParams {
    /// Reject out-of-range numbers. Formulas are not checked here; a formula
    /// that fails to parse only zeroes its own output.
    pub fn validate(&self) -> Result<(), ParamError> {
        let p = self.threshold_percentile;
        if !p.is_finite() || !(0.0..=100.0).contains(&p) {
            return Err(ParamError::InvalidPercentile(p));
        }
        if !self.total_budget.is_finite() || self.total_budget < 0.0 {
            return Err(ParamError::InvalidBudget(self.total_budget));
        }
        let (min, max) = (self.min_voting_weight, self.max_voting_weight);
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(ParamError::InvalidVotingWeightRange { min, max });
        }
        Ok(())
    }

    pub fn is_excluded(&self, user: &UserId) -> bool {
        self.excluded_user_ids.contains(user)
    }
}
