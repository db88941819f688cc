//! Random sources threaded explicitly through the generator and sampler.
//!
//! Nothing in this crate reaches for a global generator: every stage takes a
//! `&mut impl RandomSource`, so a run is fully determined by the source it is
//! handed.
//!
//! # Determinism
//!
//! [`SeededRandom`] wraps a seeded ChaCha8 RNG. Given the same seed and the
//! same parameters, every draw is bit-identical across runs and platforms.
//! `ScriptedRandom` replays a fixed list of values so tests can place units
//! and capture areas exactly; it is only built for tests or with the
//! `scripted` feature.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
#[cfg(any(test, feature = "scripted"))]
use std::collections::VecDeque;

/// Source of the two kinds of uniform draws the experiment needs.
pub trait RandomSource {
    /// Uniform real in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Uniform integer in the closed range `[lo, hi]`.
    ///
    /// Callers guarantee `lo <= hi`.
    fn next_in_range(&mut self, lo: u64, hi: u64) -> u64;

    /// Number of values handed out so far.
    fn draws(&self) -> u64;
}

/// Seeded ChaCha8 source.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: ChaCha8Rng,
    seed: u64,
    draws: u64,
}

impl SeededRandom {
    /// Create a source from a 64-bit seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
            draws: 0,
        }
    }

    /// Seed this source was created from.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SeededRandom {
    fn next_unit(&mut self) -> f64 {
        self.draws += 1;
        // Standard f64 sampling is half-open: [0, 1)
        self.rng.gen()
    }

    fn next_in_range(&mut self, lo: u64, hi: u64) -> u64 {
        self.draws += 1;
        self.rng.gen_range(lo..=hi)
    }

    fn draws(&self) -> u64 {
        self.draws
    }
}

#[cfg(any(test, feature = "scripted"))]
/// A scripted draw for [`ScriptedRandom`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Draw {
    Unit(f64),
    Integer(u64),
}

#[cfg(any(test, feature = "scripted"))]
/// Replays a fixed sequence of draws. Test support only, compiled under
/// `cfg(test)` or the `scripted` feature.
///
/// Panics when the script runs out or when the next scripted value has the
/// wrong kind; both mean the test script does not match the pipeline.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    script: VecDeque<Draw>,
    draws: u64,
}

#[cfg(any(test, feature = "scripted"))]
impl ScriptedRandom {
    pub fn new(script: impl IntoIterator<Item = Draw>) -> Self {
        Self {
            script: script.into_iter().collect(),
            draws: 0,
        }
    }

    /// Script for a whole experiment: population size, unit coordinates in
    /// serial order, then the capture-area origin.
    pub fn for_experiment(units: &[(f64, f64)], origin: (f64, f64)) -> Self {
        let mut script = Vec::with_capacity(units.len() * 2 + 3);
        script.push(Draw::Integer(units.len() as u64));
        for &(x, y) in units {
            script.push(Draw::Unit(x));
            script.push(Draw::Unit(y));
        }
        script.push(Draw::Unit(origin.0));
        script.push(Draw::Unit(origin.1));
        Self::new(script)
    }

    /// Draws left in the script.
    pub fn remaining(&self) -> usize {
        self.script.len()
    }

    fn next(&mut self) -> Draw {
        self.draws += 1;
        match self.script.pop_front() {
            Some(draw) => draw,
            None => panic!("scripted random source exhausted after {} draws", self.draws - 1),
        }
    }
}

#[cfg(any(test, feature = "scripted"))]
impl RandomSource for ScriptedRandom {
    fn next_unit(&mut self) -> f64 {
        match self.next() {
            Draw::Unit(value) => value,
            other => panic!("expected a unit draw, script has {:?}", other),
        }
    }

    fn next_in_range(&mut self, lo: u64, hi: u64) -> u64 {
        match self.next() {
            Draw::Integer(value) if (lo..=hi).contains(&value) => value,
            Draw::Integer(value) => panic!("scripted integer {} outside [{}, {}]", value, lo, hi),
            other => panic!("expected an integer draw, script has {:?}", other),
        }
    }

    fn draws(&self) -> u64 {
        self.draws
    }
}
