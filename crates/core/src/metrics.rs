//! Metrics collection and reporting for one experiment run.
//!
//! Tracks how long each pipeline phase took and how much randomness and data
//! flowed through it. Updates happen explicitly at each stage; the run is
//! single-threaded so no synchronisation is involved.

use std::time::{Duration, Instant};

/// Timing and volume for one run.
#[derive(Debug, Clone)]
pub struct RunMetrics {
    // === Timing ===
    /// When the run started
    pub start_time: Instant,

    /// When the run ended (set on completion)
    pub end_time: Option<Instant>,

    /// Time spent synthesising the population
    pub generation: Duration,

    /// Time spent placing the capture area and scanning
    pub sampling: Duration,

    /// Time spent in the estimators
    pub estimation: Duration,

    // === Volume ===
    /// Random draws consumed by the whole run
    pub draws: u64,

    /// Ground-truth population size N
    pub population_size: u64,

    /// Sample size k
    pub sample_size: u64,

    /// Estimators that could not produce a definite value
    pub degenerate_estimators: u64,
}

impl RunMetrics {
    /// Create new metrics with start time set to now.
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            end_time: None,
            generation: Duration::ZERO,
            sampling: Duration::ZERO,
            estimation: Duration::ZERO,
            draws: 0,
            population_size: 0,
            sample_size: 0,
            degenerate_estimators: 0,
        }
    }

    /// Mark the run as complete.
    pub fn complete(&mut self) {
        self.end_time = Some(Instant::now());
    }

    /// Get total duration (or current elapsed if not complete).
    pub fn duration(&self) -> Duration {
        match self.end_time {
            Some(end) => end.duration_since(self.start_time),
            None => self.start_time.elapsed(),
        }
    }

    /// Fraction of the population that was captured.
    ///
    /// Returns 0.0 for an empty population.
    pub fn capture_rate(&self) -> f64 {
        if self.population_size == 0 {
            0.0
        } else {
            self.sample_size as f64 / self.population_size as f64
        }
    }

    /// Units generated per second.
    pub fn generation_rate(&self) -> f64 {
        let secs = self.generation.as_secs_f64();
        if secs == 0.0 {
            0.0
        } else {
            self.population_size as f64 / secs
        }
    }

    /// Print a human-readable summary to stdout.
    pub fn print_summary(&self) {
        println!("\n=== Run Summary ===");
        println!("Duration: {} ms", self.duration().as_millis());
        println!("  generation: {} ms", self.generation.as_millis());
        println!("  sampling:   {} ms", self.sampling.as_millis());
        println!("  estimation: {} us", self.estimation.as_micros());
        println!();
        println!("Random draws: {}", self.draws);
        println!("Units: {}", self.population_size);
        println!(
            "Captured: {} ({:.6}%)",
            self.sample_size,
            self.capture_rate() * 100.0
        );
        println!("Degenerate estimators: {}", self.degenerate_estimators);
        println!(
            "Generation rate: {:.2} M units/s",
            self.generation_rate() / 1_000_000.0
        );
    }

    /// Export metrics as a simple text format (for parsing/testing).
    pub fn export_text(&self) -> String {
        format!(
            "duration_ms={}\n\
             generation_ms={}\n\
             sampling_ms={}\n\
             draws={}\n\
             population_size={}\n\
             sample_size={}\n\
             capture_rate={:.8}\n\
             degenerate_estimators={}\n",
            self.duration().as_millis(),
            self.generation.as_millis(),
            self.sampling.as_millis(),
            self.draws,
            self.population_size,
            self.sample_size,
            self.capture_rate(),
            self.degenerate_estimators,
        )
    }
}

impl Default for RunMetrics {
    fn default() -> Self {
        Self::new()
    }
}
