//! Reward distributor errors.

use ces_types::ParamError;
use thiserror::Error;

/// Why a distribution call was rejected before any computation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RewardError {
    #[error("invalid distribution parameters: {0}")]
    Param(#[from] ParamError),

    #[error("score of user {user} is not finite: {score}")]
    NonFiniteScore { user: String, score: f64 },
}
