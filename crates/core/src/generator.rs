//! Population synthesis.
//!
//! # Draw order
//!
//! One integer draw picks N, then two unit draws (x, then y) per unit in
//! serial order. A population of N units therefore consumes exactly
//! `2N + 1` draws, which keeps seeded runs reproducible.

use crate::error::{ConfigError, Error, Result};
use crate::random::RandomSource;
use crate::unit::{Population, Unit};
use tracing::{debug, info};

/// Smallest population of the reference experiment.
pub const MIN_UNITS: u64 = 10;

/// Largest population of the reference experiment.
pub const MAX_UNITS: u64 = 100_000_000;

/// Closed range the population size is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub min_units: u64,
    pub max_units: u64,
}

impl GeneratorConfig {
    pub fn new(min_units: u64, max_units: u64) -> Self {
        Self {
            min_units,
            max_units,
        }
    }

    /// Range holding exactly `n` units.
    pub fn fixed(n: u64) -> Self {
        Self::new(n, n)
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.min_units == 0 {
            return Err(ConfigError::ZeroMinimum);
        }
        if self.min_units > self.max_units {
            return Err(ConfigError::EmptyRange {
                min: self.min_units,
                max: self.max_units,
            });
        }
        Ok(())
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::new(MIN_UNITS, MAX_UNITS)
    }
}

/// Produces populations of randomly sized, randomly placed units.
#[derive(Debug, Clone, Copy)]
pub struct PopulationGenerator {
    config: GeneratorConfig,
}

impl PopulationGenerator {
    /// Create a generator, rejecting an invalid size range.
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> GeneratorConfig {
        self.config
    }

    /// Draw N, then place units `1..=N` uniformly in the unit square.
    ///
    /// Capacity for all N units is reserved before the first unit is placed.
    pub fn generate<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Result<Population> {
        let n = rng.next_in_range(self.config.min_units, self.config.max_units);
        info!(units = n, "generating population");

        let mut population =
            Population::try_with_capacity(n).ok_or(Error::PopulationTooLarge { requested: n })?;

        for serial in 1..=n {
            let x = rng.next_unit();
            let y = rng.next_unit();
            population.push(Unit::new_unchecked(serial, x, y));
        }

        debug!(units = population.size(), draws = rng.draws(), "population ready");
        Ok(population)
    }
}
