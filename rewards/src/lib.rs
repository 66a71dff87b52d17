//! Reward distributor.
//!
//! Turns a score table into a reward table:
//!
//! 1. the eligibility threshold is a percentile of the strictly positive scores;
//! 2. users with a positive score at or above it, and not excluded, are eligible;
//! 3. two distribution formulas map each eligible score to raw AGIX and raw
//!    voting-weight values;
//! 4. AGIX is scaled to sum to the budget and voting weight is min-max
//!    normalised into the configured range.
//!
//! Formula failures are recovered to `0.0` per user. An empty positive-score
//! population yields an empty table.

pub mod distributor;
pub mod error;
pub mod params;
pub mod percentile;
pub mod table;

pub use distributor::compute_rewards;
pub use error::RewardError;
pub use params::DistributionParams;
pub use percentile::percentile;
pub use table::{FormulaFailures, RewardRow, RewardTable};
