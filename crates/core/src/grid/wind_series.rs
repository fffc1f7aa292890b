//! Pre-generated wind observations indexed by tick.
//!
//! The series is drawn once at model construction rather than lazily per tick, so its
//! length is a configuration input that must cover the tick budget. Lookups past the end
//! are an error rather than wrapping.

use crate::core_types::error::{Result, WildfireError};
use crate::core_types::rng::SimRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Sampling bounds for wind speed and direction (inclusive, integer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindConfig {
    /// Minimum wind speed
    pub speed_min: u32,
    /// Maximum wind speed
    pub speed_max: u32,
    /// Minimum direction (degrees)
    pub direction_min: u32,
    /// Maximum direction (degrees)
    pub direction_max: u32,
}

impl Default for WindConfig {
    fn default() -> Self {
        Self {
            speed_min: 15,
            speed_max: 45,
            direction_min: 0,
            direction_max: 180,
        }
    }
}

impl WindConfig {
    /// # Errors
    ///
    /// `InvalidConfiguration` if either range is inverted.
    pub fn validate(&self) -> Result<()> {
        if self.speed_min > self.speed_max {
            return Err(WildfireError::invalid_config(
                "wind.speed_max",
                format!(
                    "must be at least speed_min ({}), got {}",
                    self.speed_min, self.speed_max
                ),
            ));
        }
        if self.direction_min > self.direction_max {
            return Err(WildfireError::invalid_config(
                "wind.direction_max",
                format!(
                    "must be at least direction_min ({}), got {}",
                    self.direction_min, self.direction_max
                ),
            ));
        }
        Ok(())
    }
}

/// One wind observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindSample {
    pub speed: u32,
    /// Direction in degrees
    pub direction: u32,
}

/// Fixed-length sequence of wind samples plus the bounds they were drawn from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindSeries {
    samples: Vec<WindSample>,
    bounds: WindConfig,
}

impl WindSeries {
    /// Draw `length` samples.
    ///
    /// All speeds are drawn first, then all directions, and paired by index, so a sample's
    /// speed is independent of its direction.
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` if `length` is zero or the bounds are inverted.
    pub fn generate(length: usize, config: &WindConfig, rng: &mut SimRng) -> Result<Self> {
        if length == 0 {
            return Err(WildfireError::invalid_config(
                "wind.length",
                "must be at least one sample",
            ));
        }
        config.validate()?;

        let speeds: Vec<u32> = (0..length)
            .map(|_| rng.random_range(config.speed_min..=config.speed_max))
            .collect();
        let directions: Vec<u32> = (0..length)
            .map(|_| rng.random_range(config.direction_min..=config.direction_max))
            .collect();

        let samples = speeds
            .into_iter()
            .zip(directions)
            .map(|(speed, direction)| WindSample { speed, direction })
            .collect();

        Ok(Self {
            samples,
            bounds: *config,
        })
    }

    /// Build a series from explicit samples.
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` if `samples` is empty, the bounds are inverted, or a sample
    /// falls outside them.
    pub fn from_samples(samples: Vec<WindSample>, bounds: WindConfig) -> Result<Self> {
        if samples.is_empty() {
            return Err(WildfireError::invalid_config(
                "wind.length",
                "must be at least one sample",
            ));
        }
        bounds.validate()?;
        let in_bounds = |s: &WindSample| {
            (bounds.speed_min..=bounds.speed_max).contains(&s.speed)
                && (bounds.direction_min..=bounds.direction_max).contains(&s.direction)
        };
        if let Some(bad) = samples.iter().find(|s| !in_bounds(s)) {
            return Err(WildfireError::invalid_config(
                "wind.samples",
                format!("sample {bad:?} lies outside the series bounds"),
            ));
        }
        Ok(Self { samples, bounds })
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Generation bounds.
    pub fn bounds(&self) -> &WindConfig {
        &self.bounds
    }

    pub fn samples(&self) -> &[WindSample] {
        &self.samples
    }

    /// Sample for `tick`.
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` if the series is shorter than `tick + 1`.
    pub fn sample_at(&self, tick: u64) -> Result<WindSample> {
        usize::try_from(tick)
            .ok()
            .and_then(|i| self.samples.get(i))
            .copied()
            .ok_or_else(|| {
                WildfireError::invalid_config(
                    "wind.length",
                    format!(
                        "series of {} samples has no entry for tick {tick}",
                        self.samples.len()
                    ),
                )
            })
    }

    /// Wind speed for `tick`.
    ///
    /// # Errors
    ///
    /// See [`WindSeries::sample_at`].
    pub fn speed_at(&self, tick: u64) -> Result<u32> {
        self.sample_at(tick).map(|s| s.speed)
    }

    /// Wind direction for `tick`, in degrees.
    ///
    /// # Errors
    ///
    /// See [`WindSeries::sample_at`].
    pub fn direction_at(&self, tick: u64) -> Result<u32> {
        self.sample_at(tick).map(|s| s.direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::rng::sim_rng;

    #[test]
    fn samples_respect_bounds() {
        let cfg = WindConfig::default();
        let series = WindSeries::generate(500, &cfg, &mut sim_rng(3)).expect("valid");
        assert_eq!(series.len(), 500);
        for s in series.samples() {
            assert!((15..=45).contains(&s.speed), "speed {} out of range", s.speed);
            assert!((0..=180).contains(&s.direction), "direction {} out of range", s.direction);
        }
        assert_eq!(series.bounds(), &cfg);
    }

    #[test]
    fn samples_cover_range() {
        let cfg = WindConfig {
            speed_min: 1,
            speed_max: 3,
            direction_min: 10,
            direction_max: 11,
        };
        let series = WindSeries::generate(200, &cfg, &mut sim_rng(8)).expect("valid");
        for speed in 1..=3 {
            assert!(series.samples().iter().any(|s| s.speed == speed));
        }
        for direction in 10..=11 {
            assert!(series.samples().iter().any(|s| s.direction == direction));
        }
    }

    #[test]
    fn degenerate_bounds_give_constant_series() {
        let cfg = WindConfig {
            speed_min: 20,
            speed_max: 20,
            direction_min: 90,
            direction_max: 90,
        };
        let series = WindSeries::generate(10, &cfg, &mut sim_rng(0)).expect("valid");
        assert!(series
            .samples()
            .iter()
            .all(|s| *s == WindSample { speed: 20, direction: 90 }));
    }

    #[test]
    fn lookup_past_end_is_an_error() {
        let series = WindSeries::generate(4, &WindConfig::default(), &mut sim_rng(1)).expect("valid");
        assert!(series.speed_at(3).is_ok());
        assert!(series.direction_at(3).is_ok());
        assert!(matches!(
            series.speed_at(4),
            Err(WildfireError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn invalid_requests_are_rejected() {
        let mut rng = sim_rng(1);
        assert!(WindSeries::generate(0, &WindConfig::default(), &mut rng).is_err());

        let inverted = WindConfig {
            speed_min: 50,
            speed_max: 10,
            ..Default::default()
        };
        assert!(WindSeries::generate(5, &inverted, &mut rng).is_err());

        let out_of_bounds = vec![WindSample {
            speed: 99,
            direction: 0,
        }];
        assert!(WindSeries::from_samples(out_of_bounds, WindConfig::default()).is_err());
    }
}
