//! Keyed store of stage outputs.

use ces_activity::ScopedCounts;
use ces_rewards::RewardTable;
use ces_scope::ScopeSelector;
use ces_scoring::ScoreTable;
use ces_types::ArtifactKey;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Output of the scope and counting stages, which share a key.
#[derive(Debug)]
pub struct ScopeArtifact {
    pub selector: ScopeSelector,
    pub counts: ScopedCounts,
}

/// One stage's artifacts. Entries are immutable once published.
#[derive(Debug)]
struct StageCache<T> {
    entries: RwLock<HashMap<ArtifactKey, Arc<T>>>,
}

impl<T> StageCache<T> {
    fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    fn get(&self, key: &ArtifactKey) -> Option<Arc<T>> {
        // Published entries are never mutated, so a poisoned map is still consistent.
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(key).cloned()
    }

    /// Publish `value` unless another run got there first; return the winner.
    fn publish(&self, key: ArtifactKey, value: T) -> Arc<T> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(entries.entry(key).or_insert_with(|| Arc::new(value)))
    }

    fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

/// Per-stage artifact maps shared by every run of one engine.
///
/// Grows with every distinct key; nothing is evicted until [`ArtifactCache::clear`].
#[derive(Debug)]
pub struct ArtifactCache {
    scopes: StageCache<ScopeArtifact>,
    scores: StageCache<ScoreTable>,
    rewards: StageCache<RewardTable>,
}

impl ArtifactCache {
    pub fn new() -> Self {
        Self {
            scopes: StageCache::new(),
            scores: StageCache::new(),
            rewards: StageCache::new(),
        }
    }

    pub fn scope(&self, key: &ArtifactKey) -> Option<Arc<ScopeArtifact>> {
        self.scopes.get(key)
    }

    pub fn publish_scope(&self, key: ArtifactKey, artifact: ScopeArtifact) -> Arc<ScopeArtifact> {
        self.scopes.publish(key, artifact)
    }

    pub fn scores(&self, key: &ArtifactKey) -> Option<Arc<ScoreTable>> {
        self.scores.get(key)
    }

    pub fn publish_scores(&self, key: ArtifactKey, table: ScoreTable) -> Arc<ScoreTable> {
        self.scores.publish(key, table)
    }

    pub fn rewards(&self, key: &ArtifactKey) -> Option<Arc<RewardTable>> {
        self.rewards.get(key)
    }

    pub fn publish_rewards(&self, key: ArtifactKey, table: RewardTable) -> Arc<RewardTable> {
        self.rewards.publish(key, table)
    }

    /// Number of cached artifacts per stage: `(scopes, scores, rewards)`.
    pub fn sizes(&self) -> (usize, usize, usize) {
        (self.scopes.len(), self.scores.len(), self.rewards.len())
    }

    /// Drop every artifact. Handles already returned to callers stay valid.
    pub fn clear(&self) {
        self.scopes.clear();
        self.scores.clear();
        self.rewards.clear();
    }
}

impl Default for ArtifactCache {
    fn default() -> Self {
        Self::new()
    }
}
