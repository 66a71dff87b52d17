//! `ces`: command-line entry point for the community engagement score engine.

use anyhow::Context;
use ces_pipeline::{Engine, EngineConfig};
use ces_store::EntityStore;
use ces_types::{MissionId, UserId};
use ces_utils::{init_logging, LogFormat};
use clap::Parser;
use serde::Serialize;
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "ces", about = "Community engagement scores and reward distribution")]
struct Cli {
    /// Snapshot file (JSON with users, missions, proposals, ratings, comments, reactions).
    #[arg(long, env = "CES_SNAPSHOT", global = true)]
    snapshot: Option<PathBuf>,

    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, env = "CES_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Log filter, e.g. "info" or "warn,ces_rewards=debug". RUST_LOG takes precedence.
    #[arg(long, env = "CES_LOG_LEVEL", global = true)]
    log_level: Option<String>,

    /// Log format: "human" or "json". Logs go to stderr.
    #[arg(long, env = "CES_LOG_FORMAT", global = true)]
    log_format: Option<LogFormat>,

    #[command(flatten)]
    overrides: Overrides,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    #[command(flatten)]
    Query(Query),
    /// Print the effective configuration as TOML.
    Config,
}

/// Commands that read a snapshot.
#[derive(clap::Subcommand)]
enum Query {
    /// List missions ordered by creation time.
    Missions,
    /// List user ids and names.
    Users,
    /// Per-user activity counts for the selected missions.
    Counts,
    /// Contribution scores for the selected missions.
    Scores {
        /// Include users whose score is exactly zero.
        #[arg(long)]
        include_zero: bool,
        /// Add each user's per-field score components.
        #[arg(long)]
        breakdown: bool,
    },
    /// Reward and voting-weight table.
    Rewards,
}

/// Flags laid over the configuration file.
#[derive(clap::Args, Debug, Default)]
struct Overrides {
    /// Mission to score (repeatable or comma separated). Replaces the file's list.
    #[arg(long = "mission", value_delimiter = ',', global = true)]
    missions: Vec<String>,

    /// Score every mission in the snapshot.
    #[arg(long, global = true)]
    all_missions: bool,

    /// Days of activity admitted after each mission's end.
    #[arg(long, global = true)]
    extra_days: Option<u32>,

    /// Weight override as NAME=VALUE (repeatable).
    #[arg(long = "weight", value_name = "NAME=VALUE", value_parser = parse_weight, global = true)]
    weights: Vec<(String, f64)>,

    /// User excluded from rewards, in addition to the file's list (repeatable or comma separated).
    #[arg(long = "exclude", value_delimiter = ',', global = true)]
    excluded: Vec<String>,

    #[arg(long, global = true)]
    threshold_percentile: Option<f64>,

    #[arg(long, global = true)]
    agix_formula: Option<String>,

    #[arg(long, global = true)]
    voting_weight_formula: Option<String>,

    #[arg(long, global = true)]
    total_budget: Option<f64>,

    #[arg(long, global = true)]
    min_voting_weight: Option<f64>,

    #[arg(long, global = true)]
    max_voting_weight: Option<f64>,
}

fn parse_weight(s: &str) -> Result<(String, f64), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got `{s}`"))?;
    let value = value
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid weight `{value}`: {e}"))?;
    Ok((name.trim().to_string(), value))
}

impl Overrides {
    fn apply(self, config: &mut EngineConfig) {
        if !self.missions.is_empty() {
            config.scope.mission_ids = self.missions.into_iter().map(MissionId::new).collect();
        }
        config.scope.all_missions |= self.all_missions;
        if let Some(days) = self.extra_days {
            config.scope.extra_days = days;
        }
        config.weights.extend(self.weights);

        let d = &mut config.distribution;
        d.excluded_user_ids
            .extend(self.excluded.into_iter().map(UserId::new));
        if let Some(p) = self.threshold_percentile {
            d.threshold_percentile = p;
        }
        if let Some(f) = self.agix_formula {
            d.agix_formula = f;
        }
        if let Some(f) = self.voting_weight_formula {
            d.voting_weight_formula = f;
        }
        if let Some(b) = self.total_budget {
            d.total_budget = b;
        }
        if let Some(w) = self.min_voting_weight {
            d.min_voting_weight = w;
        }
        if let Some(w) = self.max_voting_weight {
            d.max_voting_weight = w;
        }
    }
}

#[derive(Serialize)]
struct UserRow<'a> {
    user_id: &'a UserId,
    name: &'a str,
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value)?;
    println!("{out}");
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => EngineConfig::from_toml_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    if let Some(format) = cli.log_format {
        config.logging.format = format;
    }
    cli.overrides.apply(&mut config);

    init_logging(config.logging.format, &config.logging.level);

    match cli.command {
        Command::Config => print!("{}", config.to_toml_string()?),
        Command::Query(query) => {
            let Some(snapshot) = cli.snapshot else {
                anyhow::bail!("--snapshot (or CES_SNAPSHOT) is required for this command");
            };
            let store = EntityStore::load_json(&snapshot)
                .with_context(|| format!("loading snapshot {}", snapshot.display()))?;
            run_query(query, &Engine::new(Arc::new(store)), &config)?;
        }
    }
    Ok(())
}

fn run_query(query: Query, engine: &Engine, config: &EngineConfig) -> anyhow::Result<()> {
    let store = engine.store();
    match query {
        Query::Missions => print_json(&store.mission_summaries())?,
        Query::Users => {
            let users: Vec<UserRow<'_>> = store
                .users()
                .map(|u| UserRow {
                    user_id: &u.user_id,
                    name: &u.name,
                })
                .collect();
            print_json(&users)?;
        }
        Query::Counts => {
            let (key, scope) = engine.scope(&config.scope_params(store))?;
            print_json(&json!({
                "scope_key": key.to_string(),
                "missions": scope.selector.missions(),
                "dropped": scope.selector.dropped(),
                "unknown_reaction_types": scope.counts.unknown_reaction_types,
                "counts": scope.counts.counts,
            }))?;
        }
        Query::Scores {
            include_zero,
            breakdown,
        } => {
            let weights = config.weight_vector()?;
            let (scope_key, scope) = engine.scope(&config.scope_params(store))?;
            let (key, table) = engine.scores(&scope_key, &scope, &weights)?;
            let rows = if include_zero {
                table.rows()
            } else {
                table.active_rows()
            };
            let rows: Vec<_> = rows
                .into_iter()
                .map(|row| {
                    let components = breakdown
                        .then(|| table.breakdown(&row.user_id).map(|s| &s.components))
                        .flatten();
                    json!({
                        "user_id": row.user_id,
                        "contribution_score": row.contribution_score,
                        "components": components,
                    })
                })
                .collect();
            print_json(&json!({ "score_key": key.to_string(), "rows": rows }))?;
        }
        Query::Rewards => {
            let request = config.run_request(store)?;
            let out = engine.run(&request)?;
            tracing::info!(
                users = out.scores.len(),
                eligible = out.rewards.len(),
                total_agix = out.rewards.total_agix(),
                "rewards computed"
            );
            print_json(&json!({
                "reward_key": out.keys.reward.to_string(),
                "threshold": out.rewards.threshold,
                "formula_failures": out.rewards.formula_failures,
                "rows": out.rewards.rows,
            }))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn weight_flags_parse_name_value_pairs() {
        assert_eq!(
            parse_weight("comments_created = 4.5"),
            Ok(("comments_created".to_string(), 4.5))
        );
        assert!(parse_weight("comments_created").is_err());
        assert!(parse_weight("comments_created=lots").is_err());
    }

    #[test]
    fn flags_override_the_config_file() {
        let cli = Cli::try_parse_from([
            "ces",
            "--mission",
            "m1,m2",
            "--weight",
            "proposals_created=5",
            "--exclude",
            "admin",
            "rewards",
            "--total-budget",
            "300",
        ])
        .unwrap();
        assert!(matches!(cli.command, Command::Query(Query::Rewards)));

        let mut config = EngineConfig::default();
        config.distribution.excluded_user_ids = vec![UserId::new("bot")];
        cli.overrides.apply(&mut config);

        assert_eq!(
            config.scope.mission_ids,
            vec![MissionId::new("m1"), MissionId::new("m2")]
        );
        assert_eq!(config.weights["proposals_created"], 5.0);
        assert_eq!(config.weights["comments_created"], 3.0);
        assert_eq!(config.distribution.excluded_user_ids.len(), 2);
        assert_eq!(config.distribution.total_budget, 300.0);
        assert_eq!(config.distribution.agix_formula, "x");
    }

    #[test]
    fn config_command_is_separate_from_snapshot_queries() {
        let cli = Cli::try_parse_from(["ces", "config"]).unwrap();
        assert!(matches!(cli.command, Command::Config));
        assert!(cli.snapshot.is_none());

        let cli = Cli::try_parse_from(["ces", "scores", "--breakdown"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Query(Query::Scores {
                include_zero: false,
                breakdown: true
            })
        ));
    }

    #[test]
    fn queries_run_against_a_loaded_store() {
        let store = ces_nullables::SnapshotBuilder::new()
            .users(&["alice"])
            .build_store()
            .unwrap();
        let engine = Engine::new(Arc::new(store));
        let config = EngineConfig::default();
        run_query(Query::Users, &engine, &config).unwrap();
        run_query(Query::Missions, &engine, &config).unwrap();
    }

    #[test]
    fn absent_flags_leave_the_config_alone() {
        let mut config = EngineConfig::default();
        Overrides::default().apply(&mut config);
        assert_eq!(config, EngineConfig::default());
    }
}
