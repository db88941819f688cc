//! tank-sim: run one German tank problem experiment and report the estimates.

mod config;
mod report;

use anyhow::{Context, Result};
use clap::Parser;
use config::{Args, Config, OutputFormat};
use tank_sim_core::{Experiment, SeededRandom};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    init_tracing();

    let config = Config::from_args(Args::parse());
    if config.print_config {
        config.print();
    }

    let experiment =
        Experiment::new(config.experiment).context("invalid experiment configuration")?;
    let mut rng = SeededRandom::from_seed(config.seed);
    info!(seed = rng.seed(), "starting run");

    let outcome = experiment.run(&mut rng).context("experiment aborted")?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match config.format {
        OutputFormat::Text => report::write_text(&mut out, &outcome)?,
        OutputFormat::Json => report::write_json(&mut out, &outcome, config.seed)?,
    }

    if config.print_metrics && config.format == OutputFormat::Text {
        outcome.metrics.print_summary();
    }

    Ok(())
}

/// Logs go to stderr so stdout carries only the report.
///
/// Respects `TANK_SIM_LOG`, defaulting to `info`.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("TANK_SIM_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
