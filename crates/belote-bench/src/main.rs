use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use belote_bench::config::{self, RunConfig, TierChoice};
use belote_bench::harness::MatchRunner;
use belote_bench::logging::init_logging;
use belote_core::game::match_state::MATCH_TARGET;

/// Self-play benchmarking harness for the Belote search agents.
#[derive(Debug, Parser)]
#[command(
    name = "belote-bench",
    author,
    version,
    about = "Deterministic Belote self-play harness"
)]
struct Cli {
    /// Maximum number of deals to play.
    #[arg(long, value_name = "N", default_value_t = config::DEFAULT_DEALS)]
    deals: usize,

    /// RNG seed for the card shuffles (random when omitted).
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Search tier for both teams.
    #[arg(long, value_enum, value_name = "TIER", default_value = "medium")]
    tier: TierChoice,

    /// Override the North/South search tier.
    #[arg(long, value_enum, value_name = "TIER")]
    ns_tier: Option<TierChoice>,

    /// Override the East/West search tier.
    #[arg(long, value_enum, value_name = "TIER")]
    ew_tier: Option<TierChoice>,

    /// Score a team must reach for the match to end early.
    #[arg(long, value_name = "SCORE", default_value_t = MATCH_TARGET)]
    target: u32,

    /// Write a JSON report of the run to this path.
    #[arg(long, value_name = "FILE")]
    summary: Option<PathBuf>,

    /// Mirror structured logs as JSON lines to this path.
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = RunConfig {
        deals: cli.deals,
        seed: cli.seed,
        north_south: cli.ns_tier.unwrap_or(cli.tier).tier(),
        east_west: cli.ew_tier.unwrap_or(cli.tier).tier(),
        target: cli.target,
        summary: cli.summary,
        log_file: cli.log_file,
    };
    config.validate().context("invalid run configuration")?;

    let _logging_guard = init_logging(config.log_file.as_deref())?;

    let runner = MatchRunner::new(config.clone());
    let report = runner.run().context("running the match")?;

    println!(
        "Match finished after {} deal{}: North/South {} - East/West {} (seed {})",
        report.deals_played,
        if report.deals_played == 1 { "" } else { "s" },
        report.totals[0],
        report.totals[1],
        report.seed
    );
    match report.winner {
        Some(team) => println!("{team:?} reached the {} point target", config.target),
        None => println!("No team reached the {} point target", config.target),
    }

    if let Some(path) = config.summary.as_ref() {
        let json =
            serde_json::to_string_pretty(&report).context("serializing the run summary")?;
        fs::write(path, json)
            .with_context(|| format!("writing the summary to {}", path.display()))?;
        println!("Summary written to {}", path.display());
    }

    Ok(())
}
