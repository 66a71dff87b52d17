//! Engine configuration with TOML file support.
//!
//! Every field is optional in the file. Weights given in `[weights]` are laid
//! over the platform's suggested weights; unnamed fields keep their suggestion.

use crate::engine::RunRequest;
use crate::error::PipelineError;
use ces_rewards::DistributionParams;
use ces_scope::ScopeParams;
use ces_scoring::WeightVector;
use ces_store::EntityStore;
use ces_types::params::{
    DEFAULT_EXTRA_DAYS, DEFAULT_FORMULA, DEFAULT_MAX_VOTING_WEIGHT, DEFAULT_MIN_VOTING_WEIGHT,
    DEFAULT_THRESHOLD_PERCENTILE, DEFAULT_TOTAL_BUDGET,
};
use ces_types::{MissionId, ParamError, UserId};
use ces_utils::LogFormat;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Configuration for one engine invocation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub scope: ScopeConfig,

    /// Per-field weights by count-field name, plus the bonus fraction.
    #[serde(default = "default_weights")]
    pub weights: BTreeMap<String, f64>,

    #[serde(default)]
    pub distribution: DistributionConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Which missions to score.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScopeConfig {
    /// Selected missions. An empty list selects nothing unless `all_missions` is set.
    #[serde(default)]
    pub mission_ids: Vec<MissionId>,

    /// Select every mission in the snapshot, ignoring `mission_ids`.
    #[serde(default)]
    pub all_missions: bool,

    /// Days of activity admitted after each mission's end.
    #[serde(default = "default_extra_days")]
    pub extra_days: u32,
}

/// Reward distribution settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DistributionConfig {
    #[serde(default)]
    pub excluded_user_ids: Vec<UserId>,

    #[serde(default = "default_threshold_percentile")]
    pub threshold_percentile: f64,

    #[serde(default = "default_formula")]
    pub agix_formula: String,

    #[serde(default = "default_formula")]
    pub voting_weight_formula: String,

    #[serde(default = "default_total_budget")]
    pub total_budget: f64,

    #[serde(default = "default_min_voting_weight")]
    pub min_voting_weight: f64,

    #[serde(default = "default_max_voting_weight")]
    pub max_voting_weight: f64,
}

/// Log output settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// "human" or "json".
    #[serde(default)]
    pub format: LogFormat,

    /// Filter directive, e.g. "info" or "warn,ces_rewards=debug".
    #[serde(default = "default_log_level")]
    pub level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_weights() -> BTreeMap<String, f64> {
    WeightVector::default().to_named()
}

fn default_extra_days() -> u32 {
    DEFAULT_EXTRA_DAYS
}

fn default_threshold_percentile() -> f64 {
    DEFAULT_THRESHOLD_PERCENTILE
}

fn default_formula() -> String {
    DEFAULT_FORMULA.to_string()
}

fn default_total_budget() -> f64 {
    DEFAULT_TOTAL_BUDGET
}

fn default_min_voting_weight() -> f64 {
    DEFAULT_MIN_VOTING_WEIGHT
}

fn default_max_voting_weight() -> f64 {
    DEFAULT_MAX_VOTING_WEIGHT
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            scope: ScopeConfig::default(),
            weights: default_weights(),
            distribution: DistributionConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ScopeConfig {
    fn default() -> Self {
        Self {
            mission_ids: Vec::new(),
            all_missions: false,
            extra_days: default_extra_days(),
        }
    }
}

impl Default for DistributionConfig {
    fn default() -> Self {
        Self {
            excluded_user_ids: Vec::new(),
            threshold_percentile: default_threshold_percentile(),
            agix_formula: default_formula(),
            voting_weight_formula: default_formula(),
            total_budget: default_total_budget(),
            min_voting_weight: default_min_voting_weight(),
            max_voting_weight: default_max_voting_weight(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            level: default_log_level(),
        }
    }
}

// ── Impl ───────────────────────────────────────────────────────────────

impl EngineConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, PipelineError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| PipelineError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, PipelineError> {
        toml::from_str(s).map_err(|e| PipelineError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, PipelineError> {
        toml::to_string_pretty(self).map_err(|e| PipelineError::Config(e.to_string()))
    }

    /// The mission selection, resolved against `store` when `all_missions` is set.
    pub fn scope_params(&self, store: &EntityStore) -> ScopeParams {
        if self.scope.all_missions {
            ScopeParams::all(store, self.scope.extra_days)
        } else {
            ScopeParams::new(self.scope.mission_ids.iter().cloned(), self.scope.extra_days)
        }
    }

    /// The configured weights over the suggested defaults.
    pub fn weight_vector(&self) -> Result<WeightVector, ParamError> {
        let mut weights = WeightVector::default();
        weights.apply_named(&self.weights)?;
        Ok(weights)
    }

    /// Validated distribution parameters.
    pub fn distribution_params(&self) -> Result<DistributionParams, ParamError> {
        let d = &self.distribution;
        let params = DistributionParams {
            excluded_user_ids: d.excluded_user_ids.iter().cloned().collect(),
            threshold_percentile: d.threshold_percentile,
            agix_formula: d.agix_formula.clone(),
            voting_weight_formula: d.voting_weight_formula.clone(),
            total_budget: d.total_budget,
            min_voting_weight: d.min_voting_weight,
            max_voting_weight: d.max_voting_weight,
        };
        params.validate()?;
        Ok(params)
    }

    /// Everything a run needs, validated.
    pub fn run_request(&self, store: &EntityStore) -> Result<RunRequest, PipelineError> {
        Ok(RunRequest {
            scope: self.scope_params(store),
            weights: self.weight_vector()?,
            distribution: self.distribution_params()?,
        })
    }
}
