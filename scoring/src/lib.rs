//! Score calculator.
//!
//! A user's engagement score is the weighted sum of their count vector. The
//! proposal-creation term optionally carries the rating-quality bonus: a
//! fraction `f` of it is redistributed in proportion to how well the user's
//! proposals were rated relative to the cohort.

pub mod calculator;
pub mod table;
pub mod weights;

pub use calculator::compute_scores;
pub use table::{rank_order, ScoreRow, ScoreTable, UserScore};
pub use weights::WeightVector;
