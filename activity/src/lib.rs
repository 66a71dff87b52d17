//! Activity counter: aggregates in-scope events per user.
//!
//! For every event type the counter distinguishes *created* activity (the user
//! performed it) from *received* activity (it targeted content the user
//! authored). It also records each in-scope proposal's mean rating, which the
//! score calculator needs for the rating-quality bonus.

pub mod counter;
pub mod counts;

pub use counter::count_activity;
pub use counts::{CountVector, ProposalRating, ProposalRatings, ScopedCounts};
