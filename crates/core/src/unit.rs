//! Serially numbered units and the population that holds them.
//!
//! Units are plain `Copy` values with private fields: once built, nothing can
//! change a unit's serial or position, so a sample can never drift from the
//! population it was drawn from.

use crate::error::UnitError;
use serde::Serialize;

/// One member of the population.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Unit {
    serial: u64,
    x: f64,
    y: f64,
}

impl Unit {
    /// Build a unit, rejecting serial 0 and coordinates outside `[0, 1)`.
    pub fn try_new(serial: u64, x: f64, y: f64) -> Result<Self, UnitError> {
        if serial == 0 {
            return Err(UnitError::ZeroSerial);
        }
        for value in [x, y] {
            if !(0.0..1.0).contains(&value) {
                return Err(UnitError::OutOfSquare { serial, value });
            }
        }
        Ok(Self { serial, x, y })
    }

    pub(crate) fn new_unchecked(serial: u64, x: f64, y: f64) -> Self {
        debug_assert!(serial >= 1);
        debug_assert!((0.0..1.0).contains(&x) && (0.0..1.0).contains(&y));
        Self { serial, x, y }
    }

    pub fn serial(&self) -> u64 {
        self.serial
    }

    /// Coordinates as `(x, y)`.
    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

/// Ordered sequence of units with serials `1..=N` in generation order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Population {
    units: Vec<Unit>,
}

impl Population {
    /// Empty population with room for `capacity` units, or `None` if the
    /// allocation cannot be made.
    pub(crate) fn try_with_capacity(capacity: u64) -> Option<Self> {
        let capacity = usize::try_from(capacity).ok()?;
        let mut units = Vec::new();
        units.try_reserve_exact(capacity).ok()?;
        Some(Self { units })
    }

    pub(crate) fn push(&mut self, unit: Unit) {
        debug_assert_eq!(unit.serial, self.units.len() as u64 + 1);
        self.units.push(unit);
    }

    /// Ground-truth population size N.
    pub fn size(&self) -> u64 {
        self.units.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Unit> {
        self.units.iter()
    }

    /// Look up a unit by serial.
    pub fn get(&self, serial: u64) -> Option<&Unit> {
        let index = usize::try_from(serial.checked_sub(1)?).ok()?;
        self.units.get(index)
    }
}

impl<'a> IntoIterator for &'a Population {
    type Item = &'a Unit;
    type IntoIter = std::slice::Iter<'a, Unit>;

    fn into_iter(self) -> Self::IntoIter {
        self.units.iter()
    }
}
