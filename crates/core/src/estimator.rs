//! Closed-form population-size estimators.
//!
//! Each estimator works from the sample size k and the largest observed
//! serial m, and each needs a different minimum k:
//!
//! | estimator       | formula                       | needs  |
//! |-----------------|-------------------------------|--------|
//! | Frequentist     | `m + m / k - 1` (integer div) | k >= 1 |
//! | Bayesian median | `m + m * ln 2 / (k - 1)`      | k >= 2 |
//! | Bayesian mean   | `(m - 1)(k - 1) / (k - 2)`    | k >= 3 |
//!
//! Below its minimum an estimator returns [`EstimateError::DegenerateSample`]
//! instead of dividing by zero. No fallback formula is substituted.

use crate::capture::SampleSummary;
use crate::error::EstimateError;
use serde::Serialize;
use std::f64::consts::LN_2;
use std::fmt;

/// Largest integer every `u64` up to which converts to `f64` exactly.
const MAX_EXACT_F64: u64 = 1 << f64::MANTISSA_DIGITS;

/// Outcome of a single estimator.
pub type EstimateResult = std::result::Result<f64, EstimateError>;

/// The three estimators, in reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Estimator {
    Frequentist,
    BayesianMedian,
    BayesianMean,
}

impl Estimator {
    pub const ALL: [Estimator; 3] = [
        Estimator::Frequentist,
        Estimator::BayesianMedian,
        Estimator::BayesianMean,
    ];

    /// Human-readable name used by reporters.
    pub fn label(&self) -> &'static str {
        match self {
            Estimator::Frequentist => "Frequentist",
            Estimator::BayesianMedian => "Bayesian median",
            Estimator::BayesianMean => "Bayesian mean",
        }
    }

    /// Smallest sample size the formula is defined for.
    pub fn min_sample(&self) -> u64 {
        match self {
            Estimator::Frequentist => 1,
            Estimator::BayesianMedian => 2,
            Estimator::BayesianMean => 3,
        }
    }

    /// Predict the population size from a sample summary.
    pub fn estimate(&self, summary: &SampleSummary) -> EstimateResult {
        let k = summary.size;
        let m = match summary.max_serial {
            Some(m) if k >= self.min_sample() => m,
            _ => {
                return Err(EstimateError::DegenerateSample {
                    estimator: *self,
                    sample_size: k,
                    required: self.min_sample(),
                })
            }
        };

        match self {
            Estimator::Frequentist => frequentist(k, m),
            Estimator::BayesianMedian => bayesian_median(k, m),
            Estimator::BayesianMean => bayesian_mean(k, m),
        }
    }
}

impl fmt::Display for Estimator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Callers guarantee `k >= 1` and `m >= 1`.
fn frequentist(k: u64, m: u64) -> EstimateResult {
    // m / k truncates, matching the reference estimator
    let value = m
        .checked_add(m / k)
        .and_then(|v| v.checked_sub(1))
        .ok_or(EstimateError::Overflow {
            estimator: Estimator::Frequentist,
            sample_size: k,
            max_serial: m,
        })?;
    exact_f64(value)
}

/// Callers guarantee `k >= 2`.
fn bayesian_median(k: u64, m: u64) -> EstimateResult {
    let m = exact_f64(m)?;
    let spread = exact_f64(k - 1)?;
    Ok(m + m * LN_2 / spread)
}

/// Callers guarantee `k >= 3`.
fn bayesian_mean(k: u64, m: u64) -> EstimateResult {
    let below_max = exact_f64(m.saturating_sub(1))?;
    let numerator = exact_f64(k - 1)?;
    let denominator = exact_f64(k - 2)?;
    Ok(below_max * numerator / denominator)
}

fn exact_f64(value: u64) -> EstimateResult {
    if value > MAX_EXACT_F64 {
        return Err(EstimateError::Precision(value));
    }
    Ok(value as f64)
}

/// Run every estimator on one summary, in [`Estimator::ALL`] order.
pub fn estimate_all(summary: &SampleSummary) -> [(Estimator, EstimateResult); 3] {
    Estimator::ALL.map(|estimator| (estimator, estimator.estimate(summary)))
}
