//! Capture-area sampling.
//!
//! A capture area is a small axis-aligned square placed at a random origin.
//! Any origin coordinate whose far edge would reach 1.0 is shifted down by
//! one side length, so the square always lies strictly inside the unit
//! square. Containment is open on every edge: a unit sitting exactly on a
//! boundary is not captured.

use crate::error::{ConfigError, Result};
use crate::random::RandomSource;
use crate::unit::{Population, Unit};
use serde::Serialize;
use tracing::{debug, info};

/// Side length used by the reference experiment.
pub const DEFAULT_SIDE: f64 = 0.005;

/// Largest side for which the clamp keeps the origin non-negative.
pub const MAX_SIDE: f64 = 0.5;

/// Validated capture-area side length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptureConfig {
    pub side: f64,
}

impl CaptureConfig {
    pub fn new(side: f64) -> Self {
        Self { side }
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if !self.side.is_finite() || self.side <= 0.0 {
            return Err(ConfigError::InvalidSide(self.side));
        }
        if self.side > MAX_SIDE {
            return Err(ConfigError::SideTooLarge {
                side: self.side,
                max: MAX_SIDE,
            });
        }
        Ok(())
    }
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SIDE)
    }
}

/// Axis-aligned square `(x1, y1)..(x1 + side, y1 + side)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CaptureArea {
    x1: f64,
    y1: f64,
    side: f64,
}

impl CaptureArea {
    /// Place an area at `origin`, clamping each axis independently.
    pub fn at(origin: (f64, f64), side: f64) -> Self {
        Self {
            x1: clamp_origin(origin.0, side),
            y1: clamp_origin(origin.1, side),
            side,
        }
    }

    /// Draw an origin (x then y) and clamp it.
    pub fn draw<R: RandomSource + ?Sized>(rng: &mut R, side: f64) -> Self {
        let x = rng.next_unit();
        let y = rng.next_unit();
        Self::at((x, y), side)
    }

    /// Near corner `(x1, y1)`.
    pub fn origin(&self) -> (f64, f64) {
        (self.x1, self.y1)
    }

    /// Far corner `(x2, y2)`.
    pub fn far_corner(&self) -> (f64, f64) {
        (self.x1 + self.side, self.y1 + self.side)
    }

    pub fn side(&self) -> f64 {
        self.side
    }

    /// Strict containment on both axes.
    pub fn contains(&self, unit: &Unit) -> bool {
        let (x, y) = unit.position();
        let (x2, y2) = self.far_corner();
        x > self.x1 && x < x2 && y > self.y1 && y < y2
    }

    /// Collect every contained unit, in population order.
    pub fn capture(&self, population: &Population) -> Sample {
        let units = population.iter().filter(|u| self.contains(u)).copied().collect();
        Sample { units }
    }
}

fn clamp_origin(coordinate: f64, side: f64) -> f64 {
    if coordinate + side < 1.0 {
        return coordinate;
    }
    let mut shifted = coordinate - side;
    // (c - side) + side can round back up to 1.0; step down until it cannot
    while shifted > 0.0 && shifted + side >= 1.0 {
        shifted = f64::from_bits(shifted.to_bits() - 1);
    }
    shifted
}

/// Units observed inside a capture area.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sample {
    units: Vec<Unit>,
}

impl Sample {
    /// Sample size k.
    pub fn size(&self) -> u64 {
        self.units.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    /// Largest observed serial m; `None` for an empty sample.
    pub fn max_serial(&self) -> Option<u64> {
        self.units.iter().map(Unit::serial).max()
    }

    pub fn summary(&self) -> SampleSummary {
        SampleSummary {
            size: self.size(),
            max_serial: self.max_serial(),
        }
    }
}

/// The `(k, m)` pair the estimators work from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SampleSummary {
    /// k: number of observed units
    pub size: u64,
    /// m: largest observed serial, absent when nothing was observed
    pub max_serial: Option<u64>,
}

impl SampleSummary {
    /// Summary of a non-empty sample.
    pub fn observed(size: u64, max_serial: u64) -> Self {
        Self {
            size,
            max_serial: Some(max_serial),
        }
    }

    /// Summary of an empty sample.
    pub fn empty() -> Self {
        Self {
            size: 0,
            max_serial: None,
        }
    }
}

/// Draws a capture area and extracts the sample it covers.
#[derive(Debug, Clone, Copy)]
pub struct Sampler {
    side: f64,
}

impl Sampler {
    /// Create a sampler, rejecting an invalid side length.
    pub fn new(config: CaptureConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { side: config.side })
    }

    pub fn side(&self) -> f64 {
        self.side
    }

    /// Place one capture area and scan the population once.
    ///
    /// An empty sample is a normal outcome, not an error.
    pub fn sample<R: RandomSource + ?Sized>(
        &self,
        population: &Population,
        rng: &mut R,
    ) -> (CaptureArea, Sample) {
        let area = CaptureArea::draw(rng, self.side);
        let sample = area.capture(population);

        let (x1, y1) = area.origin();
        debug!(x1, y1, side = self.side, "capture area placed");
        info!(
            captured = sample.size(),
            max_serial = ?sample.max_serial(),
            "sample drawn"
        );

        (area, sample)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::generator::{GeneratorConfig, PopulationGenerator};
    use crate::random::{Draw, ScriptedRandom};

    fn population_at(points: &[(f64, f64)]) -> Population {
        let generator = PopulationGenerator::new(GeneratorConfig::new(1, 1_000)).unwrap();
        let mut script = vec![Draw::Integer(points.len() as u64)];
        for &(x, y) in points {
            script.push(Draw::Unit(x));
            script.push(Draw::Unit(y));
        }
        generator.generate(&mut ScriptedRandom::new(script)).unwrap()
    }

    #[test]
    fn test_side_validation() {
        assert!(CaptureConfig::default().validate().is_ok());
        assert_eq!(
            CaptureConfig::new(0.0).validate(),
            Err(ConfigError::InvalidSide(0.0))
        );
        assert!(CaptureConfig::new(f64::NAN).validate().is_err());
        assert!(matches!(
            CaptureConfig::new(1.0).validate(),
            Err(ConfigError::SideTooLarge { .. })
        ));
        assert!(matches!(
            Sampler::new(CaptureConfig::new(0.75)),
            Err(Error::Config(ConfigError::SideTooLarge { .. }))
        ));
        assert!(CaptureConfig::new(0.5).validate().is_ok());
    }

    #[test]
    fn test_clamp_near_far_edge() {
        let area = CaptureArea::at((0.999, 0.4), 0.005);
        let (x1, y1) = area.origin();
        assert!((x1 - 0.994).abs() < 1e-12);
        assert_eq!(y1, 0.4);
        let (x2, y2) = area.far_corner();
        assert!(x2 < 1.0);
        assert!(y2 < 1.0);
    }

    #[test]
    fn test_clamp_at_exact_boundary() {
        // 0.5 + 0.5 == 1.0 exactly, so the origin must move
        let area = CaptureArea::at((0.5, 0.25), 0.5);
        assert_eq!(area.origin(), (0.0, 0.25));
    }

    #[test]
    fn test_clamp_survives_rounding_near_one() {
        let largest_below_one = 1.0 - f64::EPSILON / 2.0;
        let area = CaptureArea::at((largest_below_one, 0.1), 0.3);

        let (x1, _) = area.origin();
        let (x2, _) = area.far_corner();
        assert!(x2 < 1.0, "far edge at {}", x2);
        assert!(x1 > 0.69 && x1 < 0.7);
    }

    #[test]
    fn test_clamp_holds_for_coordinates_nearest_one() {
        for side in [0.005, 0.1, 0.25, 0.3, 0.3333, 0.45, 0.5] {
            let mut coordinate = 1.0 - f64::EPSILON / 2.0;
            for _ in 0..10_000 {
                let area = CaptureArea::at((coordinate, coordinate), side);
                let (x1, y1) = area.origin();
                let (x2, y2) = area.far_corner();
                assert!(x2 < 1.0 && y2 < 1.0, "coordinate={} side={}", coordinate, side);
                assert!(x1 >= 0.0 && y1 >= 0.0);
                coordinate = f64::from_bits(coordinate.to_bits() - 1);
            }
        }
    }

    #[test]
    fn test_strict_containment() {
        let area = CaptureArea::at((0.25, 0.25), 0.5);
        let inside = Unit::try_new(1, 0.5, 0.5).unwrap();
        let on_edge = Unit::try_new(2, 0.25, 0.5).unwrap();
        let on_far_edge = Unit::try_new(3, 0.5, 0.75).unwrap();
        let outside = Unit::try_new(4, 0.9, 0.5).unwrap();

        assert!(area.contains(&inside));
        assert!(!area.contains(&on_edge));
        assert!(!area.contains(&on_far_edge));
        assert!(!area.contains(&outside));
    }

    #[test]
    fn test_sample_keeps_population_order() {
        let population = population_at(&[(0.3, 0.3), (0.9, 0.9), (0.4, 0.4), (0.35, 0.45)]);
        let sampler = Sampler::new(CaptureConfig::new(0.25)).unwrap();
        let mut rng = ScriptedRandom::new([Draw::Unit(0.25), Draw::Unit(0.25)]);

        let (area, sample) = sampler.sample(&population, &mut rng);

        assert_eq!(area.origin(), (0.25, 0.25));
        let serials: Vec<u64> = sample.units().iter().map(Unit::serial).collect();
        assert_eq!(serials, vec![1, 3, 4]);
        assert_eq!(sample.summary(), SampleSummary::observed(3, 4));
    }

    #[test]
    fn test_empty_sample_is_valid() {
        let population = population_at(&[(0.9, 0.9)]);
        let sampler = Sampler::new(CaptureConfig::default()).unwrap();
        let mut rng = ScriptedRandom::new([Draw::Unit(0.1), Draw::Unit(0.1)]);

        let (_, sample) = sampler.sample(&population, &mut rng);

        assert!(sample.is_empty());
        assert_eq!(sample.max_serial(), None);
        assert_eq!(sample.summary(), SampleSummary::empty());
    }
}
