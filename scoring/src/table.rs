//! The score table artifact.

use ces_types::{CountField, UserId};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// One user's score and the per-field terms that produced it.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct UserScore {
    pub total: f64,
    /// Non-zero terms only, keyed by field.
    pub components: BTreeMap<CountField, f64>,
}

/// A plain `(user, score)` record for downstream consumers.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScoreRow {
    pub user_id: UserId,
    pub contribution_score: f64,
}

/// Scores of every counted user, zero-score users included.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ScoreTable {
    scores: BTreeMap<UserId, UserScore>,
}

/// Score descending, then user id descending.
pub fn rank_order(a: (&UserId, f64), b: (&UserId, f64)) -> Ordering {
    b.1.total_cmp(&a.1).then_with(|| b.0.cmp(a.0))
}

impl ScoreTable {
    pub fn new(scores: BTreeMap<UserId, UserScore>) -> Self {
        Self { scores }
    }

    pub fn get(&self, user: &UserId) -> Option<f64> {
        self.scores.get(user).map(|s| s.total)
    }

    pub fn breakdown(&self, user: &UserId) -> Option<&UserScore> {
        self.scores.get(user)
    }

    /// `(user, score)` in user id order.
    pub fn iter(&self) -> impl Iterator<Item = (&UserId, f64)> {
        self.scores.iter().map(|(u, s)| (u, s.total))
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Every user, ordered by score descending then user id descending.
    pub fn rows(&self) -> Vec<ScoreRow> {
        let mut entries: Vec<(&UserId, f64)> = self.iter().collect();
        entries.sort_by(|a, b| rank_order(*a, *b));
        entries
            .into_iter()
            .map(|(user_id, contribution_score)| ScoreRow {
                user_id: user_id.clone(),
                contribution_score,
            })
            .collect()
    }

    /// [`ScoreTable::rows`] without the zero scores.
    pub fn active_rows(&self) -> Vec<ScoreRow> {
        self.rows()
            .into_iter()
            .filter(|r| r.contribution_score != 0.0)
            .collect()
    }
}

impl FromIterator<(UserId, f64)> for ScoreTable {
    /// A table of bare totals, without component breakdowns.
    fn from_iter<I: IntoIterator<Item = (UserId, f64)>>(iter: I) -> Self {
        Self::new(
            iter.into_iter()
                .map(|(user, total)| {
                    (
                        user,
                        UserScore {
                            total,
                            components: BTreeMap::new(),
                        },
                    )
                })
                .collect(),
        )
    }
}
