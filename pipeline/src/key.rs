//! Artifact key derivation.
//!
//! A key is the Blake2b-256 digest of a format version byte, a stage tag, the
//! parent stage's key and the `bincode` encoding of the stage parameters.

use crate::error::PipelineError;
use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use ces_rewards::DistributionParams;
use ces_scope::ScopeParams;
use ces_scoring::WeightVector;
use ces_types::ArtifactKey;
use serde::Serialize;

type Blake2b256 = Blake2b<U32>;

/// Bumped whenever the encoding of any stage's parameters changes.
pub const KEY_FORMAT_VERSION: u8 = 1;

fn derive<T: Serialize>(
    stage: &[u8],
    parent: &ArtifactKey,
    params: &T,
) -> Result<ArtifactKey, PipelineError> {
    let encoded = bincode::serialize(params)?;
    let mut hasher = Blake2b256::new();
    hasher.update([KEY_FORMAT_VERSION]);
    hasher.update(stage);
    hasher.update(parent.as_bytes());
    hasher.update(&encoded);
    let mut output = [0u8; 32];
    output.copy_from_slice(&hasher.finalize());
    Ok(ArtifactKey::new(output))
}

/// Key of the scoped counts for a mission selection.
pub fn scope_key(params: &ScopeParams) -> Result<ArtifactKey, PipelineError> {
    derive(b"scope", &ArtifactKey::ZERO, params)
}

/// Key of the score table for `weights` over the scope named by `scope`.
pub fn score_key(scope: &ArtifactKey, weights: &WeightVector) -> Result<ArtifactKey, PipelineError> {
    derive(b"score", scope, weights)
}

/// Key of the reward table for `params` over the scores named by `score`.
pub fn reward_key(
    score: &ArtifactKey,
    params: &DistributionParams,
) -> Result<ArtifactKey, PipelineError> {
    derive(b"reward", score, params)
}
