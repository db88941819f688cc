//! Configuration for the tank-sim application.
//!
//! Handles parsing command-line arguments and resolving defaults. The tool
//! works with ZERO arguments: it then runs the reference experiment with a
//! time-derived seed. The resolved seed is always reported so any run can be
//! repeated with `--seed`.

use clap::{Parser, ValueEnum};
use tank_sim_core::capture::DEFAULT_SIDE;
use tank_sim_core::generator::{MAX_UNITS, MIN_UNITS};
use tank_sim_core::{CaptureConfig, ExperimentConfig, GeneratorConfig};

/// Report layout on stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(
    name = "tank-sim",
    about = "Estimate a population size from serial numbers seen in a small capture area"
)]
pub struct Args {
    /// Random seed for determinism (default: derived from the clock)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Smallest population size that can be drawn
    #[arg(long, value_name = "N", default_value_t = MIN_UNITS)]
    pub min_units: u64,

    /// Largest population size that can be drawn
    #[arg(long, value_name = "N", default_value_t = MAX_UNITS)]
    pub max_units: u64,

    /// Side length of the square capture area
    #[arg(long, value_name = "LEN", default_value_t = DEFAULT_SIDE)]
    pub side: f64,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Print resolved configuration
    #[arg(long)]
    pub print_config: bool,

    /// Don't print the run metrics summary
    #[arg(long)]
    pub no_metrics: bool,
}

/// Complete configuration for one run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Resolved seed
    pub seed: u64,

    /// Experiment parameters (validated later by `Experiment::new`)
    pub experiment: ExperimentConfig,

    pub format: OutputFormat,

    /// Whether to print detailed config
    pub print_config: bool,

    /// Whether to print the metrics summary
    pub print_metrics: bool,
}

impl Config {
    /// Resolve parsed arguments into a run configuration.
    pub fn from_args(args: Args) -> Self {
        // Determine seed (explicit or time-based)
        let seed = args.seed.unwrap_or_else(clock_seed);

        Self {
            seed,
            experiment: ExperimentConfig {
                generator: GeneratorConfig::new(args.min_units, args.max_units),
                capture: CaptureConfig::new(args.side),
            },
            format: args.format,
            print_config: args.print_config,
            print_metrics: !args.no_metrics,
        }
    }

    /// Print the configuration in human-readable form.
    pub fn print(&self) {
        println!("=== Configuration ===");
        println!("Seed: {}", self.seed);
        println!(
            "Population range: {}..={}",
            self.experiment.generator.min_units, self.experiment.generator.max_units
        );
        println!("Capture side: {}", self.experiment.capture.side);
        println!();
    }
}

fn clock_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}
