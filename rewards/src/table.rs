//! The reward table artifact.

use ces_types::UserId;
use serde::Serialize;

/// One eligible user's reward.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RewardRow {
    pub user_id: UserId,
    /// 1-based, consecutive among eligible users.
    pub rank: u32,
    pub contribution_score: f64,
    pub agix_reward: f64,
    pub voting_weight: f64,
}

/// Users whose formula evaluation failed and who therefore got a raw `0.0`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FormulaFailures {
    pub agix: u64,
    pub voting_weight: u64,
}

impl FormulaFailures {
    pub fn total(&self) -> u64 {
        self.agix + self.voting_weight
    }
}

/// Rows of eligible users in rank order.
///
/// Ineligible users have no row. `threshold` is `None` when no user had a
/// positive score.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RewardTable {
    pub threshold: Option<f64>,
    pub rows: Vec<RewardRow>,
    pub formula_failures: FormulaFailures,
}

impl RewardTable {
    pub fn get(&self, user: &UserId) -> Option<&RewardRow> {
        self.rows.iter().find(|r| &r.user_id == user)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn total_agix(&self) -> f64 {
        self.rows.iter().map(|r| r.agix_reward).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_serialize_as_plain_records() {
        let table = RewardTable {
            threshold: Some(5.0),
            rows: vec![RewardRow {
                user_id: UserId::new("alice"),
                rank: 1,
                contribution_score: 10.0,
                agix_reward: 200.0,
                voting_weight: 5.0,
            }],
            formula_failures: FormulaFailures {
                agix: 0,
                voting_weight: 1,
            },
        };
        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "threshold": 5.0,
                "rows": [{
                    "user_id": "alice",
                    "rank": 1,
                    "contribution_score": 10.0,
                    "agix_reward": 200.0,
                    "voting_weight": 5.0,
                }],
                "formula_failures": { "agix": 0, "voting_weight": 1 },
            })
        );
        assert_eq!(table.formula_failures.total(), 1);
    }

    #[test]
    fn empty_table_has_no_threshold() {
        let json = serde_json::to_value(RewardTable::default()).unwrap();
        assert_eq!(json["threshold"], serde_json::Value::Null);
        assert_eq!(json["rows"], serde_json::json!([]));
    }
}
