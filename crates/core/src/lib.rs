//! tank-sim-core: German tank problem simulation
//!
//! This library provides the core components for an experiment that:
//! - Generates a population of serially numbered units scattered over a unit square
//! - Observes the units that fall inside a small capture area
//! - Estimates the population size from the sample size and largest serial
//! - Pairs every estimate with the ground truth for reporting
//!
//! # Architecture
//!
//! - `unit`: Units and the population container
//! - `random`: Explicitly passed random sources (seeded and scripted)
//! - `generator`: Population synthesis
//! - `capture`: Capture-area placement and sampling
//! - `estimator`: Frequentist and Bayesian estimators
//! - `experiment`: The end-to-end pipeline
//! - `metrics`: Observable run behavior
//!
//! # Design Principles
//!
//! - **No panics**: Configuration and estimator failures are structured values
//! - **Explicit degeneracy**: Too-small samples are reported, never divided by zero
//! - **Deterministic**: A seeded source makes every run reproducible

pub mod capture;
pub mod error;
pub mod estimator;
pub mod experiment;
pub mod generator;
pub mod metrics;
pub mod random;
pub mod unit;

// Re-export commonly used types
pub use capture::{CaptureArea, CaptureConfig, Sample, SampleSummary, Sampler};
pub use error::{ConfigError, EstimateError, Error, Result, UnitError};
pub use estimator::{EstimateResult, Estimator};
pub use experiment::{Experiment, ExperimentConfig, Outcome, Prediction};
pub use generator::{GeneratorConfig, PopulationGenerator};
pub use random::{RandomSource, SeededRandom};
#[cfg(any(test, feature = "scripted"))]
pub use random::{Draw, ScriptedRandom};
pub use unit::{Population, Unit};
