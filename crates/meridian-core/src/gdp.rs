//! The estimated-GDP metric.
//!
//! The figure is a unitless placeholder: population scaled by a random
//! multiplier and divided by the exchange rate. It is not an economic
//! measurement.

use std::ops::RangeInclusive;

use rand::Rng as _;

/// Default multiplier range for a refresh cycle.
pub const DEFAULT_MULTIPLIER_RANGE: RangeInclusive<f64> = 1000.0..=2000.0;

/// `(population × multiplier) / exchange_rate`.
///
/// A zero, negative or non-finite rate is treated as a missing rate and
/// yields `None`.
pub fn estimate_gdp(population: u64, exchange_rate: f64, multiplier: f64) -> Option<f64> {
  if !exchange_rate.is_finite() || exchange_rate <= 0.0 {
    return None;
  }
  Some(population as f64 * multiplier / exchange_rate)
}

/// Round to two decimal places.
pub fn round_2dp(value: f64) -> f64 { (value * 100.0).round() / 100.0 }

// ─── Multiplier sources ──────────────────────────────────────────────────────

/// Supplies the multiplier for a refresh cycle. Drawn once per cycle.
pub trait MultiplierSource: Send + Sync {
  fn draw(&self) -> f64;
}

/// Uniform random draw from an inclusive range.
#[derive(Debug, Clone)]
pub struct UniformMultiplier {
  low:  f64,
  high: f64,
}

impl UniformMultiplier {
  /// Returns `None` unless `0 < low <= high` and both bounds are finite.
  pub fn new(low: f64, high: f64) -> Option<Self> {
    (low.is_finite() && high.is_finite() && low > 0.0 && low <= high)
      .then_some(Self { low, high })
  }
}

impl Default for UniformMultiplier {
  fn default() -> Self {
    Self {
      low:  *DEFAULT_MULTIPLIER_RANGE.start(),
      high: *DEFAULT_MULTIPLIER_RANGE.end(),
    }
  }
}

impl MultiplierSource for UniformMultiplier {
  fn draw(&self) -> f64 { rand::thread_rng().gen_range(self.low..=self.high) }
}

/// Always returns the same value.
#[derive(Debug, Clone, Copy)]
pub struct FixedMultiplier(pub f64);

impl MultiplierSource for FixedMultiplier {
  fn draw(&self) -> f64 { self.0 }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn nigeria_example() {
    let gdp = estimate_gdp(206_139_589, 1567.88, 1500.0).unwrap();
    assert!((gdp - 206_139_589.0 * 1500.0 / 1567.88).abs() < 1e-6);
    assert_eq!(round_2dp(gdp), 197_214_954.91);
  }

  #[test]
  fn zero_rate_is_missing_rate() {
    assert_eq!(estimate_gdp(1_000, 0.0, 1500.0), None);
    assert_eq!(estimate_gdp(1_000, -3.0, 1500.0), None);
    assert_eq!(estimate_gdp(1_000, f64::NAN, 1500.0), None);
  }

  #[test]
  fn zero_population_gives_zero() {
    assert_eq!(estimate_gdp(0, 2.0, 1500.0), Some(0.0));
  }

  #[test]
  fn uniform_draw_stays_in_range() {
    let source = UniformMultiplier::default();
    for _ in 0..1_000 {
      let m = source.draw();
      assert!(DEFAULT_MULTIPLIER_RANGE.contains(&m), "{m} out of range");
    }
  }

  #[test]
  fn uniform_rejects_bad_bounds() {
    assert!(UniformMultiplier::new(2000.0, 1000.0).is_none());
    assert!(UniformMultiplier::new(0.0, 1000.0).is_none());
    assert!(UniformMultiplier::new(5.0, 5.0).is_some());
  }
}
