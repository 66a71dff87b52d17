//! Pipeline orchestration.
//!
//! Runs Scope Filter → Activity Counter → Score Calculator → Reward
//! Distributor against a shared, read-only entity store. Each stage's output
//! is cached under an [`ArtifactKey`](ces_types::ArtifactKey) derived from the
//! parameters that produced it and from its parent stage's key, so changing
//! only the distribution parameters reuses the cached counts and scores.

pub mod cache;
pub mod config;
pub mod engine;
pub mod error;
pub mod key;

pub use cache::{ArtifactCache, ScopeArtifact};
pub use config::{DistributionConfig, EngineConfig, LoggingConfig, ScopeConfig};
pub use engine::{Engine, RunKeys, RunOutput, RunRequest};
pub use error::PipelineError;
