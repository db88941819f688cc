//! Error types for the tank-sim system.
//!
//! Configuration problems are fatal and surface before any random draw is
//! consumed. Estimator failures are not fatal: each estimator reports its own
//! [`EstimateError`] and the run still completes.

use crate::estimator::Estimator;
use thiserror::Error;

/// Top-level error type for all operations in the system.
#[derive(Debug, Error)]
pub enum Error {
    /// Experiment parameters rejected at construction time
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Population could not be allocated for the drawn size
    #[error("population of {requested} units exceeds addressable memory")]
    PopulationTooLarge { requested: u64 },
}

/// Invalid experiment parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Generator range is inverted
    #[error("population range is empty: min {min} > max {max}")]
    EmptyRange { min: u64, max: u64 },

    /// Serials start at 1, so a population needs at least one unit
    #[error("population minimum must be at least 1")]
    ZeroMinimum,

    /// Capture-area side is not a finite positive number
    #[error("capture side {0} must be a finite positive number")]
    InvalidSide(f64),

    /// Capture area cannot fit strictly inside the unit square
    #[error("capture side {side} is too large (maximum {max})")]
    SideTooLarge { side: f64, max: f64 },
}

/// A unit that would break the population invariants.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UnitError {
    /// Serials start at 1
    #[error("unit serial must be at least 1")]
    ZeroSerial,

    /// Coordinate outside the half-open unit interval
    #[error("unit {serial} coordinate {value} is outside [0, 1)")]
    OutOfSquare { serial: u64, value: f64 },
}

/// Reasons an estimator cannot produce a definite prediction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EstimateError {
    /// Sample is smaller than the estimator's minimum
    #[error("{estimator} needs at least {required} observed units, got {sample_size}")]
    DegenerateSample {
        estimator: Estimator,
        sample_size: u64,
        required: u64,
    },

    /// Integer intermediate overflowed `u64`
    #[error("{estimator} overflowed for k={sample_size}, m={max_serial}")]
    Overflow {
        estimator: Estimator,
        sample_size: u64,
        max_serial: u64,
    },

    /// Integer input cannot be represented exactly as `f64`
    #[error("value {0} cannot be represented exactly as a float")]
    Precision(u64),
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
