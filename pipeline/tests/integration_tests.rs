//! End-to-end tests: snapshot in, reward table out.

use std::collections::BTreeMap;
use std::sync::Arc;

use ces_nullables::{day, SnapshotBuilder};
use ces_pipeline::{Engine, EngineConfig, PipelineError, RunRequest};
use ces_rewards::DistributionParams;
use ces_scope::ScopeParams;
use ces_scoring::WeightVector;
use ces_store::{EntityStore, JsonFileSource};
use ces_types::{CountField, MissionId, ParamError, UserId};

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Two missions three weeks apart, with activity trailing past the first one.
fn platform() -> SnapshotBuilder {
    SnapshotBuilder::new()
        .users(&["alice", "bob", "carol", "dave", "admin"])
        .mission("m1", day(0), day(10))
        .mission("m2", day(40), day(50))
        .proposal("p1", "m1", "alice", day(1))
        .proposal("p2", "m1", "alice", day(2))
        .proposal("p3", "m1", "bob", day(3))
        .proposal("p4", "m2", "carol", day(41))
        .rating("r1", "p1", "bob", 4.0, day(4))
        .rating("r2", "p3", "alice", 2.0, day(4))
        .comment("c1", "p1", "bob", day(5))
        .comment("c2", "p3", "carol", day(20))
        .reply("c3", "p3", "bob", "c2", day(21))
        .comment("c4", "p4", "dave", day(42))
        .comment("c5", "p1", "admin", day(6))
        .reaction("x1", "c1", "alice", "love", day(6))
        .reaction("x2", "c2", "dave", "anger", day(22))
        .reaction("x3", "c4", "carol", "sparkles", day(43))
}

fn proposals_only() -> WeightVector {
    WeightVector::from_named(&BTreeMap::from([("proposals_created".to_string(), 5.0)])).unwrap()
}

fn request(missions: &[&str], weights: WeightVector, distribution: DistributionParams) -> RunRequest {
    RunRequest {
        scope: ScopeParams::new(missions.iter().map(|m| MissionId::new(*m)), 21),
        weights,
        distribution,
    }
}

fn uid(s: &str) -> UserId {
    UserId::new(s)
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn budget_splits_in_proportion_to_score() {
    // alice 10, bob 5, everyone else 0
    let engine = Engine::new(Arc::new(platform().build_store().unwrap()));
    let out = engine
        .run(&request(
            &["m1"],
            proposals_only(),
            DistributionParams {
                threshold_percentile: 0.0,
                total_budget: 300.0,
                ..Default::default()
            },
        ))
        .unwrap();

    assert_eq!(out.scores.get(&uid("alice")), Some(10.0));
    assert_eq!(out.scores.get(&uid("bob")), Some(5.0));
    assert_eq!(out.scores.get(&uid("carol")), Some(0.0));

    let rows = &out.rewards.rows;
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].user_id, uid("alice"));
    assert_eq!(rows[0].rank, 1);
    assert!((rows[0].agix_reward - 200.0).abs() < 1e-9);
    assert_eq!(rows[0].voting_weight, 5.0);
    assert_eq!(rows[1].user_id, uid("bob"));
    assert_eq!(rows[1].rank, 2);
    assert!((rows[1].agix_reward - 100.0).abs() < 1e-9);
    assert_eq!(rows[1].voting_weight, 1.0);
}

#[test]
fn trailing_window_admits_late_activity() {
    let engine = Engine::new(Arc::new(platform().build_store().unwrap()));
    let weights = WeightVector::default();

    let with_tail = engine
        .run(&request(&["m1"], weights.clone(), DistributionParams::default()))
        .unwrap();
    // c2 at day 20 and the angry reaction at day 22 both fall inside m1 + 21 days.
    let carol = with_tail.scope.counts.get(&uid("carol")).unwrap();
    assert_eq!(carol.get(CountField::CommentsCreated), 1);

    let no_tail = engine
        .run(&RunRequest {
            scope: ScopeParams::new([MissionId::new("m1")], 0),
            weights,
            distribution: DistributionParams::default(),
        })
        .unwrap();
    let carol = no_tail.scope.counts.get(&uid("carol")).unwrap();
    assert_eq!(carol.get(CountField::CommentsCreated), 0);
    assert_ne!(with_tail.keys.scope, no_tail.keys.scope);
}

#[test]
fn excluded_users_are_removed_before_ranking() {
    let engine = Engine::new(Arc::new(platform().build_store().unwrap()));
    let out = engine
        .run(&request(
            &["m1"],
            proposals_only(),
            DistributionParams {
                threshold_percentile: 0.0,
                excluded_user_ids: [uid("alice")].into_iter().collect(),
                ..Default::default()
            },
        ))
        .unwrap();
    assert!(out.rewards.get(&uid("alice")).is_none());
    assert_eq!(out.rewards.rows[0].user_id, uid("bob"));
    assert_eq!(out.rewards.rows[0].rank, 1);
    assert!((out.rewards.total_agix() - 100_000.0).abs() < 1e-6);
    // Scores are untouched by exclusion.
    assert_eq!(out.scores.get(&uid("alice")), Some(10.0));
}

#[test]
fn distribution_changes_reuse_upstream_artifacts() {
    let engine = Engine::new(Arc::new(platform().build_store().unwrap()));
    let base = request(&["m1", "m2"], WeightVector::default(), DistributionParams::default());
    let first = engine.run(&base).unwrap();

    let mut reweighted = base.clone();
    reweighted.distribution.voting_weight_formula = "log(x + 1)".into();
    reweighted.distribution.total_budget = 50.0;
    let second = engine.run(&reweighted).unwrap();

    assert!(Arc::ptr_eq(&first.scope, &second.scope));
    assert!(Arc::ptr_eq(&first.scores, &second.scores));
    assert_ne!(first.keys.reward, second.keys.reward);
    assert!((second.rewards.total_agix() - 50.0).abs() < 1e-9);

    let stats = engine.stats();
    assert_eq!(stats["scope_misses"], 1);
    assert_eq!(stats["score_misses"], 1);
    assert_eq!(stats["reward_misses"], 2);
}

#[test]
fn concurrent_runs_agree_with_sequential_runs() {
    let store = Arc::new(platform().build_store().unwrap());
    let requests: Vec<RunRequest> = [0.0, 20.0, 50.0, 100.0]
        .into_iter()
        .flat_map(|p| {
            [&["m1"][..], &["m2"][..], &["m1", "m2"][..]].map(|missions| {
                request(
                    missions,
                    WeightVector::default(),
                    DistributionParams {
                        threshold_percentile: p,
                        ..Default::default()
                    },
                )
            })
        })
        .collect();

    let parallel = Engine::new(Arc::clone(&store));
    let sequential = Engine::new(store);
    let results = parallel.run_many(&requests);
    assert_eq!(results.len(), requests.len());
    for (request, result) in requests.iter().zip(results) {
        let concurrent = result.unwrap();
        let alone = sequential.run(request).unwrap();
        assert_eq!(concurrent.keys, alone.keys);
        assert_eq!(*concurrent.rewards, *alone.rewards);
    }
}

#[test]
fn snapshot_file_and_config_drive_a_run() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot_path = dir.path().join("snapshot.json");
    std::fs::write(&snapshot_path, platform().build().to_json_string().unwrap()).unwrap();

    let store = EntityStore::load(&JsonFileSource::new(&snapshot_path)).unwrap();
    let config = EngineConfig::from_toml_str(
        r#"
        [scope]
        all_missions = true

        [distribution]
        threshold_percentile = 0.0
        excluded_user_ids = ["admin"]
        agix_formula = "sqrt(x)"
        "#,
    )
    .unwrap();
    let run = config.run_request(&store).unwrap();
    assert_eq!(run.scope.mission_ids.len(), 2);

    let engine = Engine::new(Arc::new(store));
    let out = engine.run(&run).unwrap();
    assert!(out.rewards.get(&uid("admin")).is_none());
    assert!(out.scores.get(&uid("admin")).unwrap() > 0.0);
    assert!((out.rewards.total_agix() - 100_000.0).abs() < 1e-6);
    for pair in out.rewards.rows.windows(2) {
        assert!(pair[0].contribution_score >= pair[1].contribution_score);
        assert_eq!(pair[1].rank, pair[0].rank + 1);
    }
}

#[test]
fn empty_selection_yields_empty_tables() {
    let engine = Engine::new(Arc::new(platform().build_store().unwrap()));
    let out = engine
        .run(&request(&[], WeightVector::default(), DistributionParams::default()))
        .unwrap();
    assert!(out.scores.iter().all(|(_, score)| score == 0.0));
    assert!(out.rewards.is_empty());
    assert_eq!(out.rewards.threshold, None);
}

#[test]
fn oversized_weight_is_rejected_before_any_stage() {
    let store = platform().build_store().unwrap();
    let config = EngineConfig::from_toml_str(
        r#"
        [scope]
        mission_ids = ["m1"]

        [weights]
        comments_created = 1e308
        "#,
    )
    .unwrap();
    assert!(matches!(
        config.run_request(&store),
        Err(PipelineError::Param(ParamError::WeightOutOfRange { .. }))
    ));
}
