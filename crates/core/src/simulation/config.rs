//! Run configuration.

use crate::core_types::error::{Result, WildfireError};
use crate::grid::{ElevationConfig, WindConfig};
use crate::physics::IgnitionPolicy;
use serde::{Deserialize, Serialize};

/// Complete configuration of one simulation run.
///
/// Compose with struct-update syntax:
///
/// ```
/// use wildfire_core::SimulationConfig;
///
/// let config = SimulationConfig {
///     height: 50,
///     width: 50,
///     density: 0.65,
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Grid rows
    pub height: usize,
    /// Grid columns
    pub width: usize,
    /// Probability that a slot holds a tree, in `[0, 1]`
    pub density: f64,
    /// Column whose trees start on fire
    pub ignition_column: usize,
    /// Ignition rule
    pub policy: IgnitionPolicy,
    /// Terrain generation bounds
    pub elevation: ElevationConfig,
    /// Wind sampling bounds
    pub wind: WindConfig,
    /// Tick budget; also the length of the generated wind series
    pub max_ticks: u64,
    /// Seed for every random draw of the run
    pub seed: u64,
    /// Let trees ignited earlier in a tick spread when activated later in that same tick
    pub cascade_within_tick: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            height: 100,
            width: 100,
            density: 0.6,
            ignition_column: 0,
            policy: IgnitionPolicy::default(),
            elevation: ElevationConfig::default(),
            wind: WindConfig::default(),
            max_ticks: 500,
            seed: 42,
            cascade_within_tick: false,
        }
    }
}

impl SimulationConfig {
    /// Check every parameter up front.
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` naming the first offending parameter.
    pub fn validate(&self) -> Result<()> {
        if self.height == 0 {
            return Err(WildfireError::invalid_config("height", "must be positive"));
        }
        if self.width == 0 {
            return Err(WildfireError::invalid_config("width", "must be positive"));
        }
        if !(0.0..=1.0).contains(&self.density) {
            return Err(WildfireError::invalid_config(
                "density",
                format!("must lie in [0, 1], got {}", self.density),
            ));
        }
        if self.ignition_column >= self.width {
            return Err(WildfireError::invalid_config(
                "ignition_column",
                format!(
                    "must be below width ({}), got {}",
                    self.width, self.ignition_column
                ),
            ));
        }
        if self.max_ticks == 0 {
            return Err(WildfireError::invalid_config("max_ticks", "must be positive"));
        }
        if usize::try_from(self.max_ticks).is_err() {
            return Err(WildfireError::invalid_config(
                "max_ticks",
                format!("{} does not fit in memory", self.max_ticks),
            ));
        }
        self.policy.validate()?;
        self.elevation.validate()?;
        self.wind.validate()?;
        Ok(())
    }
}
