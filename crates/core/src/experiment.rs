//! The full experiment: generate, sample, estimate.
//!
//! Configuration is validated when the [`Experiment`] is built, so a run can
//! only fail before estimation starts. Once estimation is reached every
//! estimator yields either a value or its own [`EstimateError`].

use crate::capture::{CaptureArea, CaptureConfig, Sample, SampleSummary, Sampler};
use crate::error::Result;
use crate::estimator::{estimate_all, EstimateResult, Estimator};
use crate::generator::{GeneratorConfig, PopulationGenerator};
use crate::metrics::RunMetrics;
use crate::random::RandomSource;
use std::time::Instant;
use tracing::{info, info_span, warn};

/// Parameters for one experiment.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ExperimentConfig {
    pub generator: GeneratorConfig,
    pub capture: CaptureConfig,
}

/// A validated, reusable experiment.
#[derive(Debug, Clone, Copy)]
pub struct Experiment {
    generator: PopulationGenerator,
    sampler: Sampler,
}

impl Experiment {
    pub fn new(config: ExperimentConfig) -> Result<Self> {
        Ok(Self {
            generator: PopulationGenerator::new(config.generator)?,
            sampler: Sampler::new(config.capture)?,
        })
    }

    pub fn config(&self) -> ExperimentConfig {
        ExperimentConfig {
            generator: self.generator.config(),
            capture: CaptureConfig::new(self.sampler.side()),
        }
    }

    /// Run the pipeline once against `rng`.
    ///
    /// The population is dropped after sampling; only the sample is kept.
    pub fn run<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Result<Outcome> {
        let _span = info_span!("experiment").entered();
        let mut metrics = RunMetrics::new();
        let draws_before = rng.draws();

        let started = Instant::now();
        let population = self.generator.generate(rng)?;
        metrics.generation = started.elapsed();

        let truth = population.size();

        let started = Instant::now();
        let (area, sample) = self.sampler.sample(&population, rng);
        metrics.sampling = started.elapsed();
        drop(population);

        metrics.draws = rng.draws() - draws_before;
        metrics.population_size = truth;
        metrics.sample_size = sample.size();

        let started = Instant::now();
        let summary = sample.summary();
        let predictions: Vec<Prediction> = estimate_all(&summary)
            .into_iter()
            .map(|(estimator, result)| Prediction {
                estimator,
                result,
                truth,
            })
            .collect();
        metrics.estimation = started.elapsed();

        for prediction in &predictions {
            match &prediction.result {
                Ok(value) => {
                    info!(estimator = %prediction.estimator, value = *value, truth, "estimate")
                }
                Err(err) => {
                    metrics.degenerate_estimators += 1;
                    warn!(estimator = %prediction.estimator, error = %err, "no estimate");
                }
            }
        }
        metrics.complete();

        Ok(Outcome {
            population_size: truth,
            area,
            sample,
            summary,
            predictions,
            metrics,
        })
    }
}

/// One estimator's answer alongside the ground truth.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub estimator: Estimator,
    pub result: EstimateResult,
    pub truth: u64,
}

impl Prediction {
    /// `(truth - predicted) / ((truth + predicted) / 2) * 100`, or `None`
    /// when the estimator had no definite value.
    pub fn relative_difference(&self) -> Option<f64> {
        self.result
            .as_ref()
            .ok()
            .map(|&predicted| relative_difference(predicted, self.truth))
    }
}

/// Percentage difference between a prediction and the ground truth,
/// relative to their mean.
pub fn relative_difference(predicted: f64, truth: u64) -> f64 {
    let truth = truth as f64;
    (truth - predicted) / ((truth + predicted) / 2.0) * 100.0
}

/// Everything a run produced.
#[derive(Debug, Clone)]
pub struct Outcome {
    /// Ground-truth N
    pub population_size: u64,
    pub area: CaptureArea,
    pub sample: Sample,
    pub summary: SampleSummary,
    /// One entry per estimator, in [`Estimator::ALL`] order
    pub predictions: Vec<Prediction>,
    pub metrics: RunMetrics,
}

impl Outcome {
    pub fn prediction(&self, estimator: Estimator) -> Option<&Prediction> {
        self.predictions.iter().find(|p| p.estimator == estimator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigError, EstimateError, Error};
    use crate::random::{ScriptedRandom, SeededRandom};

    fn config(min: u64, max: u64, side: f64) -> ExperimentConfig {
        ExperimentConfig {
            generator: GeneratorConfig::new(min, max),
            capture: CaptureConfig::new(side),
        }
    }

    #[test]
    fn test_rejects_full_square_capture() {
        let err = Experiment::new(config(10, 10, 1.0)).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::SideTooLarge { .. })));
    }

    #[test]
    fn test_rejects_inverted_range() {
        let err = Experiment::new(config(100, 10, 0.005)).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::EmptyRange { .. })));
    }

    #[test]
    fn test_scripted_run() {
        // Units 1, 2, 4 and 5 fall inside (0.2, 0.3) x (0.2, 0.3)
        let units = [
            (0.21, 0.22),
            (0.25, 0.25),
            (0.80, 0.10),
            (0.29, 0.21),
            (0.23, 0.28),
            (0.35, 0.25),
        ];
        let mut rng = ScriptedRandom::for_experiment(&units, (0.2, 0.2));
        let experiment = Experiment::new(config(1, 100, 0.1)).unwrap();

        let outcome = experiment.run(&mut rng).unwrap();

        assert_eq!(rng.remaining(), 0);
        assert_eq!(outcome.population_size, 6);
        assert_eq!(outcome.summary, SampleSummary::observed(4, 5));
        assert_eq!(outcome.metrics.draws, 15);

        // 5 + 5/4 - 1 = 5
        let frequentist = outcome.prediction(Estimator::Frequentist).unwrap();
        assert_eq!(frequentist.result, Ok(5.0));
        assert_eq!(frequentist.truth, 6);
        let mean = outcome.prediction(Estimator::BayesianMean).unwrap();
        assert_eq!(mean.result, Ok(6.0));
        assert_eq!(outcome.metrics.degenerate_estimators, 0);
    }

    #[test]
    fn test_empty_capture_is_degenerate_everywhere() {
        let units = [(0.9, 0.9), (0.8, 0.8)];
        let mut rng = ScriptedRandom::for_experiment(&units, (0.1, 0.1));
        let experiment = Experiment::new(config(1, 100, 0.005)).unwrap();

        let outcome = experiment.run(&mut rng).unwrap();

        assert!(outcome.sample.is_empty());
        assert_eq!(outcome.predictions.len(), 3);
        for prediction in &outcome.predictions {
            assert!(matches!(
                prediction.result,
                Err(EstimateError::DegenerateSample { sample_size: 0, .. })
            ));
            assert_eq!(prediction.relative_difference(), None);
        }
        assert_eq!(outcome.metrics.degenerate_estimators, 3);
    }

    #[test]
    fn test_relative_difference() {
        assert_eq!(relative_difference(100.0, 100), 0.0);
        // (100 - 50) / 75 * 100
        assert!((relative_difference(50.0, 100) - 66.666_666_666_666_67).abs() < 1e-9);
        assert!(relative_difference(150.0, 100) < 0.0);
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let experiment = Experiment::new(config(10, 50_000, 0.05)).unwrap();
        let a = experiment.run(&mut SeededRandom::from_seed(2024)).unwrap();
        let b = experiment.run(&mut SeededRandom::from_seed(2024)).unwrap();

        assert_eq!(a.population_size, b.population_size);
        assert_eq!(a.area, b.area);
        assert_eq!(a.sample, b.sample);
        assert_eq!(a.predictions, b.predictions);
        assert_eq!(a.metrics.draws, 2 * a.population_size + 3);
    }

    #[test]
    fn test_config_round_trip() {
        let cfg = config(10, 20, 0.01);
        assert_eq!(Experiment::new(cfg).unwrap().config(), cfg);
    }
}
