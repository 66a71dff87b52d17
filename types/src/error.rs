//! Rejected-input error shared across crates.

use thiserror::Error;

/// A malformed run parameter, rejected before any computation starts.
///
/// This is the only failure class that is fatal to a call; dangling references,
/// formula failures and empty populations are all recovered locally.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParamError {
    #[error("unknown weight field: {0}")]
    UnknownWeight(String),

    #[error("weight {field} must be finite, got {value}")]
    NonFiniteWeight { field: String, value: f64 },

    #[error("weight {field} must lie within ±{max}, got {value}")]
    WeightOutOfRange { field: String, value: f64, max: f64 },

    #[error("highly-rated fraction must lie in [0, 1], got {0}")]
    InvalidFraction(f64),

    #[error("threshold percentile must lie in [0, 100], got {0}")]
    InvalidPercentile(f64),

    #[error("total budget must be finite and non-negative, got {0}")]
    InvalidBudget(f64),

    #[error("voting weight range [{min}, {max}] is invalid")]
    InvalidVotingWeightRange { min: f64, max: f64 },

    #[error("{0}")]
    Other(String),
}
