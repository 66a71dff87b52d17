//! The engine: a read-only store, a stage cache and run statistics.

use crate::cache::{ArtifactCache, ScopeArtifact};
use crate::error::PipelineError;
use crate::key::{reward_key, score_key, scope_key};
use ces_activity::count_activity;
use ces_rewards::{compute_rewards, DistributionParams, RewardTable};
use ces_scope::{filter_scope, ScopeParams};
use ces_scoring::{compute_scores, ScoreTable, WeightVector};
use ces_store::EntityStore;
use ces_types::ArtifactKey;
use ces_utils::StatsCounter;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

const STAT_NAMES: &[&str] = &[
    "scope_hits",
    "scope_misses",
    "score_hits",
    "score_misses",
    "reward_hits",
    "reward_misses",
];

/// Parameters of one run, one group per stage.
#[derive(Clone, Debug, PartialEq)]
pub struct RunRequest {
    pub scope: ScopeParams,
    pub weights: WeightVector,
    pub distribution: DistributionParams,
}

/// The artifact key of every stage of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct RunKeys {
    pub scope: ArtifactKey,
    pub score: ArtifactKey,
    pub reward: ArtifactKey,
}

/// Shared handles to the artifacts of a run.
#[derive(Clone, Debug)]
pub struct RunOutput {
    pub keys: RunKeys,
    pub scope: Arc<ScopeArtifact>,
    pub scores: Arc<ScoreTable>,
    pub rewards: Arc<RewardTable>,
}

/// Runs the stage chain against one snapshot.
///
/// Runs share nothing mutable except the artifact cache, whose entries are
/// immutable once published. Any number of runs may execute concurrently.
///
/// The cache is never evicted: every distinct key stays resident for the
/// life of the engine. Long-lived callers that sweep many parameter sets
/// should call `engine.cache().clear()` between sweeps, or drop the engine.
pub struct Engine {
    store: Arc<EntityStore>,
    cache: ArtifactCache,
    stats: StatsCounter,
}

impl Engine {
    pub fn new(store: Arc<EntityStore>) -> Self {
        Self {
            store,
            cache: ArtifactCache::new(),
            stats: StatsCounter::new(STAT_NAMES),
        }
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn cache(&self) -> &ArtifactCache {
        &self.cache
    }

    /// Cache hit and miss counters per stage.
    pub fn stats(&self) -> BTreeMap<&'static str, u64> {
        self.stats.snapshot()
    }

    /// Scope and count stage.
    pub fn scope(
        &self,
        params: &ScopeParams,
    ) -> Result<(ArtifactKey, Arc<ScopeArtifact>), PipelineError> {
        let key = scope_key(params)?;
        if let Some(hit) = self.cache.scope(&key) {
            self.stats.increment("scope_hits");
            tracing::debug!(key = %key.short(), "scope cache hit");
            return Ok((key, hit));
        }
        self.stats.increment("scope_misses");
        let selector = filter_scope(&self.store, params);
        let counts = count_activity(&self.store, &selector);
        let artifact = self
            .cache
            .publish_scope(key, ScopeArtifact { selector, counts });
        Ok((key, artifact))
    }

    /// Score stage over an already computed scope.
    pub fn scores(
        &self,
        scope_key: &ArtifactKey,
        scope: &ScopeArtifact,
        weights: &WeightVector,
    ) -> Result<(ArtifactKey, Arc<ScoreTable>), PipelineError> {
        let key = score_key(scope_key, weights)?;
        if let Some(hit) = self.cache.scores(&key) {
            self.stats.increment("score_hits");
            tracing::debug!(key = %key.short(), "score cache hit");
            return Ok((key, hit));
        }
        self.stats.increment("score_misses");
        let table = compute_scores(&scope.counts, weights);
        Ok((key, self.cache.publish_scores(key, table)))
    }

    /// Reward stage over an already computed score table.
    pub fn rewards(
        &self,
        score_key: &ArtifactKey,
        scores: &ScoreTable,
        params: &DistributionParams,
    ) -> Result<(ArtifactKey, Arc<RewardTable>), PipelineError> {
        let key = reward_key(score_key, params)?;
        if let Some(hit) = self.cache.rewards(&key) {
            self.stats.increment("reward_hits");
            tracing::debug!(key = %key.short(), "reward cache hit");
            return Ok((key, hit));
        }
        self.stats.increment("reward_misses");
        let table = compute_rewards(scores, params)?;
        Ok((key, self.cache.publish_rewards(key, table)))
    }

    /// Run every stage, reusing cached artifacts where the keys match.
    ///
    /// Distribution parameters are validated before any stage runs.
    pub fn run(&self, request: &RunRequest) -> Result<RunOutput, PipelineError> {
        request.distribution.validate()?;

        let (scope_key, scope) = self.scope(&request.scope)?;
        let _span = tracing::info_span!("run", scope = %scope_key.short()).entered();
        let (score_key, scores) = self.scores(&scope_key, &scope, &request.weights)?;
        let (reward_key, rewards) = self.rewards(&score_key, &scores, &request.distribution)?;

        tracing::info!(
            score = %score_key.short(),
            reward = %reward_key.short(),
            eligible = rewards.len(),
            "run complete"
        );
        Ok(RunOutput {
            keys: RunKeys {
                scope: scope_key,
                score: score_key,
                reward: reward_key,
            },
            scope,
            scores,
            rewards,
        })
    }

    /// Run independent requests in parallel. Results keep the request order.
    pub fn run_many(&self, requests: &[RunRequest]) -> Vec<Result<RunOutput, PipelineError>> {
        requests.par_iter().map(|request| self.run(request)).collect()
    }
}
