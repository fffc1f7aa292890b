//! Ignition policies.
//!
//! A scored heuristic, not a rate-of-spread model. Three interchangeable policies:
//!
//! - **Elevation threshold**: a neighbor ignites unless it sits more than `max_drop`
//!   below the burning tree (`neighbor > source - max_drop`).
//! - **Wind score**: `score = wind_speed * wind_weight + (neighbor - source) * elevation_weight`
//!   compared against the midpoint of the score's theoretical extremes.
//! - **Unconditional**: every fine neighbor ignites.

use crate::core_types::error::{Result, WildfireError};
use crate::grid::{ElevationField, WindSeries};
use serde::{Deserialize, Serialize};

/// Default elevation drop that stops spread.
pub const DEFAULT_MAX_DROP: f64 = 75.0;
/// Default wind weight of the fire score.
pub const DEFAULT_WIND_WEIGHT: f64 = 0.6;
/// Default elevation weight of the fire score.
pub const DEFAULT_ELEVATION_WEIGHT: f64 = 0.4;

/// Rule deciding whether a burning tree ignites a fine neighbor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IgnitionPolicy {
    /// Ignite if `neighbor.elevation > source.elevation - max_drop`.
    ElevationThreshold { max_drop: f64 },
    /// Ignite if the wind/elevation fire score reaches the series threshold.
    WindScore {
        wind_weight: f64,
        elevation_weight: f64,
    },
    /// Ignite every fine neighbor.
    Unconditional,
}

impl Default for IgnitionPolicy {
    fn default() -> Self {
        Self::elevation_threshold()
    }
}

/// Per-tick inputs to the ignition decision, resolved once before any tree is activated.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TickConditions {
    /// Wind speed at this tick (0 when the policy ignores wind)
    pub wind_speed: f64,
    /// Score a neighbor must reach under the wind policy
    pub threshold: f64,
}

impl IgnitionPolicy {
    /// Elevation threshold policy with the default 75-unit drop.
    pub fn elevation_threshold() -> Self {
        Self::ElevationThreshold {
            max_drop: DEFAULT_MAX_DROP,
        }
    }

    /// Wind score policy with the default 0.6 / 0.4 weights.
    pub fn wind_score() -> Self {
        Self::WindScore {
            wind_weight: DEFAULT_WIND_WEIGHT,
            elevation_weight: DEFAULT_ELEVATION_WEIGHT,
        }
    }

    /// Whether decisions depend on the wind series.
    pub fn uses_wind(&self) -> bool {
        matches!(self, Self::WindScore { .. })
    }

    /// Short name for logs and reports.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ElevationThreshold { .. } => "elevation",
            Self::WindScore { .. } => "wind",
            Self::Unconditional => "unconditional",
        }
    }

    /// # Errors
    ///
    /// `InvalidConfiguration` for non-finite constants or a negative drop.
    pub fn validate(&self) -> Result<()> {
        match *self {
            Self::ElevationThreshold { max_drop } => {
                if !max_drop.is_finite() || max_drop < 0.0 {
                    return Err(WildfireError::invalid_config(
                        "policy.max_drop",
                        format!("must be finite and non-negative, got {max_drop}"),
                    ));
                }
            }
            Self::WindScore {
                wind_weight,
                elevation_weight,
            } => {
                if !wind_weight.is_finite() || !elevation_weight.is_finite() {
                    return Err(WildfireError::invalid_config(
                        "policy.weights",
                        format!("must be finite, got {wind_weight} / {elevation_weight}"),
                    ));
                }
            }
            Self::Unconditional => {}
        }
        Ok(())
    }

    /// Resolve the wind sample and score threshold for `tick`.
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` if a wind-aware policy runs past the end of the series.
    pub fn conditions_for(
        &self,
        tick: u64,
        wind: &WindSeries,
        elevation: &ElevationField,
    ) -> Result<TickConditions> {
        match *self {
            Self::WindScore {
                wind_weight,
                elevation_weight,
            } => {
                let speed = wind.speed_at(tick)?;
                let bounds = wind.bounds();
                let (low, high) = elevation.bounds();
                Ok(TickConditions {
                    wind_speed: f64::from(speed),
                    threshold: score_threshold(
                        f64::from(bounds.speed_min),
                        f64::from(bounds.speed_max),
                        low,
                        high,
                        wind_weight,
                        elevation_weight,
                    ),
                })
            }
            Self::ElevationThreshold { .. } | Self::Unconditional => Ok(TickConditions::default()),
        }
    }

    /// Decide whether a tree at `source_elevation` ignites a fine neighbor at
    /// `target_elevation`.
    pub fn ignites(
        &self,
        source_elevation: f64,
        target_elevation: f64,
        conditions: &TickConditions,
    ) -> bool {
        match *self {
            Self::ElevationThreshold { max_drop } => target_elevation > source_elevation - max_drop,
            Self::WindScore {
                wind_weight,
                elevation_weight,
            } => {
                fire_score(
                    conditions.wind_speed,
                    source_elevation,
                    target_elevation,
                    wind_weight,
                    elevation_weight,
                ) >= conditions.threshold
            }
            Self::Unconditional => true,
        }
    }
}

/// Weighted wind/slope score for spreading from `source` to `target`.
#[inline]
pub fn fire_score(
    wind_speed: f64,
    source_elevation: f64,
    target_elevation: f64,
    wind_weight: f64,
    elevation_weight: f64,
) -> f64 {
    wind_speed * wind_weight + (target_elevation - source_elevation) * elevation_weight
}

/// Midpoint of the lowest and highest attainable fire scores.
///
/// The lowest score pairs the weakest wind with the steepest drop (`low - high`), the
/// highest the strongest wind with the steepest rise (`high - low`).
pub fn score_threshold(
    speed_min: f64,
    speed_max: f64,
    elevation_low: f64,
    elevation_high: f64,
    wind_weight: f64,
    elevation_weight: f64,
) -> f64 {
    let lowest = speed_min * wind_weight + (elevation_low - elevation_high) * elevation_weight;
    let highest = speed_max * wind_weight + (elevation_high - elevation_low) * elevation_weight;
    (lowest + highest) / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::rng::sim_rng;
    use crate::grid::{WindConfig, WindSample};
    use approx::assert_relative_eq;

    #[test]
    fn elevation_threshold_blocks_steep_drops_only() {
        let policy = IgnitionPolicy::elevation_threshold();
        let calm = TickConditions::default();

        assert!(policy.ignites(1000.0, 1000.0, &calm), "flat spreads");
        assert!(policy.ignites(1000.0, 1400.0, &calm), "uphill spreads");
        assert!(policy.ignites(1000.0, 926.0, &calm), "small drop spreads");
        assert!(!policy.ignites(1000.0, 925.0, &calm), "drop of exactly 75 is blocked");
        assert!(!policy.ignites(1000.0, 600.0, &calm), "steep drop is blocked");
    }

    #[test]
    fn elevation_threshold_ignores_wind() {
        let policy = IgnitionPolicy::elevation_threshold();
        let gusty = TickConditions {
            wind_speed: 45.0,
            threshold: -1e9,
        };
        assert_eq!(
            policy.ignites(1000.0, 900.0, &TickConditions::default()),
            policy.ignites(1000.0, 900.0, &gusty)
        );
    }

    #[test]
    fn threshold_is_midpoint_of_extremes() {
        // (15*0.6 - 400 + 45*0.6 + 400) / 2 = 18
        let t = score_threshold(15.0, 45.0, 500.0, 1500.0, 0.6, 0.4);
        assert_relative_eq!(t, 18.0, epsilon = 1e-9);
    }

    #[test]
    fn wind_score_compares_against_threshold() {
        let policy = IgnitionPolicy::wind_score();
        let conditions = TickConditions {
            wind_speed: 30.0,
            threshold: 18.0,
        };
        // 30*0.6 + 0*0.4 = 18 -> reaches threshold
        assert!(policy.ignites(1000.0, 1000.0, &conditions));
        // 18 + 10*0.4 = 22
        assert!(policy.ignites(1000.0, 1010.0, &conditions));
        // 18 - 10*0.4 = 14
        assert!(!policy.ignites(1000.0, 990.0, &conditions));
    }

    #[test]
    fn unconditional_always_ignites() {
        let policy = IgnitionPolicy::Unconditional;
        assert!(policy.ignites(1500.0, 500.0, &TickConditions::default()));
    }

    #[test]
    fn conditions_resolve_from_series() {
        let samples = vec![
            WindSample {
                speed: 20,
                direction: 0,
            },
            WindSample {
                speed: 40,
                direction: 90,
            },
        ];
        let wind = WindSeries::from_samples(samples, WindConfig::default()).expect("valid");
        let mut rng = sim_rng(2);
        let terrain =
            ElevationField::generate(3, 3, &crate::grid::ElevationConfig::default(), &mut rng)
                .expect("valid");

        let policy = IgnitionPolicy::wind_score();
        let c = policy.conditions_for(1, &wind, &terrain).expect("in range");
        assert_relative_eq!(c.wind_speed, 40.0);
        assert_relative_eq!(c.threshold, 18.0, epsilon = 1e-9);

        assert!(policy.conditions_for(2, &wind, &terrain).is_err());

        // Non-wind policies never touch the series
        let c = IgnitionPolicy::elevation_threshold()
            .conditions_for(99, &wind, &terrain)
            .expect("no lookup");
        assert_eq!(c, TickConditions::default());
    }

    #[test]
    fn invalid_constants_are_rejected() {
        assert!(IgnitionPolicy::ElevationThreshold { max_drop: -1.0 }
            .validate()
            .is_err());
        assert!(IgnitionPolicy::WindScore {
            wind_weight: f64::NAN,
            elevation_weight: 0.4
        }
        .validate()
        .is_err());
        assert!(IgnitionPolicy::default().validate().is_ok());
    }
}
