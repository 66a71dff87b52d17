//! Fundamental types for the community engagement score engine.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! identifiers, timestamps, the six entity records, reaction types, count fields,
//! default run parameters and the parameter error type.

pub mod digest;
pub mod entity;
pub mod error;
pub mod field;
pub mod ids;
pub mod params;
pub mod reaction;
pub mod time;

pub use digest::ArtifactKey;
pub use entity::{Comment, Mission, Proposal, Rating, Reaction, User};
pub use error::ParamError;
pub use field::CountField;
pub use ids::{CommentId, MissionId, ProposalId, RatingId, ReactionId, UserId};
pub use reaction::ReactionType;
pub use time::{TimeWindow, Timestamp};
