#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use ces_rewards::{compute_rewards, DistributionParams};
use ces_scoring::ScoreTable;
use ces_types::UserId;

#[derive(Arbitrary, Debug)]
struct Input {
    scores: Vec<(u8, f64)>,
    threshold_percentile: f64,
    agix_formula: String,
    voting_weight_formula: String,
    total_budget: f64,
    min_voting_weight: f64,
    max_voting_weight: f64,
}

// Any score table and parameter set is either rejected or distributed with
// consecutive ranks and voting weights inside the configured range.
fuzz_target!(|input: Input| {
    let scores: ScoreTable = input
        .scores
        .iter()
        .map(|(id, score)| (UserId::new(format!("u{id}")), *score))
        .collect();
    let params = DistributionParams {
        threshold_percentile: input.threshold_percentile,
        agix_formula: input.agix_formula,
        voting_weight_formula: input.voting_weight_formula,
        total_budget: input.total_budget,
        min_voting_weight: input.min_voting_weight,
        max_voting_weight: input.max_voting_weight,
        ..Default::default()
    };
    let Ok(table) = compute_rewards(&scores, &params) else {
        return;
    };
    for (i, row) in table.rows.iter().enumerate() {
        assert_eq!(row.rank as usize, i + 1);
        assert!(row.contribution_score > 0.0);
        assert!(row.voting_weight >= params.min_voting_weight);
        assert!(row.voting_weight <= params.max_voting_weight);
    }
});
