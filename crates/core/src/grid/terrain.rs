//! Synthetic terrain elevation for fire spread.
//!
//! Terrain is a proxy surface: independent uniform samples smoothed with a truncated
//! Gaussian kernel so that neighboring cells have correlated heights, giving ridges and
//! hollows instead of white noise.

use crate::core_types::error::{Result, WildfireError};
use crate::core_types::rng::SimRng;
use crate::core_types::spatial::Position;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Default lower bound of sampled elevation.
pub const DEFAULT_ELEVATION_LOW: f64 = 500.0;
/// Default upper bound of sampled elevation.
pub const DEFAULT_ELEVATION_HIGH: f64 = 1500.0;
/// Default smoothing kernel standard deviation, in cells.
pub const DEFAULT_SMOOTHING_SIGMA: f64 = 2.0;
/// Kernel is truncated at this many standard deviations.
pub const SMOOTHING_TRUNCATE: f64 = 9.0;
/// Largest accepted smoothing sigma. Keeps the kernel radius at or below 9000 cells.
pub const MAX_SMOOTHING_SIGMA: f64 = 1000.0;

/// Generation bounds and smoothing for synthetic terrain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElevationConfig {
    /// Lower bound of raw samples (must be positive)
    pub low: f64,
    /// Upper bound of raw samples
    pub high: f64,
    /// Gaussian kernel standard deviation in cells (0 disables smoothing)
    pub sigma: f64,
}

impl Default for ElevationConfig {
    fn default() -> Self {
        Self {
            low: DEFAULT_ELEVATION_LOW,
            high: DEFAULT_ELEVATION_HIGH,
            sigma: DEFAULT_SMOOTHING_SIGMA,
        }
    }
}

impl ElevationConfig {
    /// Check bounds and smoothing parameters.
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` if bounds are non-finite, non-positive or inverted, or if
    /// `sigma` is not in `[0, MAX_SMOOTHING_SIGMA]`.
    pub fn validate(&self) -> Result<()> {
        validate_bounds(self.low, self.high)?;
        if !(0.0..=MAX_SMOOTHING_SIGMA).contains(&self.sigma) {
            return Err(WildfireError::invalid_config(
                "elevation.sigma",
                format!(
                    "must be in [0, {MAX_SMOOTHING_SIGMA}], got {}",
                    self.sigma
                ),
            ));
        }
        Ok(())
    }
}

fn validate_bounds(low: f64, high: f64) -> Result<()> {
    if !low.is_finite() || low <= 0.0 {
        return Err(WildfireError::invalid_config(
            "elevation.low",
            format!("must be finite and positive, got {low}"),
        ));
    }
    if !high.is_finite() || high < low {
        return Err(WildfireError::invalid_config(
            "elevation.high",
            format!("must be finite and at least low ({low}), got {high}"),
        ));
    }
    Ok(())
}

/// Terrain height per grid position, row-major (`[y * width + x]`).
///
/// Generated once per run and shared read-only; cells copy the value at their own
/// position when they are placed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElevationField {
    height: usize,
    width: usize,
    values: Vec<f64>,
    /// Generation bounds, used by score thresholds
    low: f64,
    high: f64,
}

impl ElevationField {
    /// Generate smoothed random terrain.
    ///
    /// Draws `height * width` uniform samples in `[low, high]`, arranges them row by row and
    /// applies a Gaussian blur with standard deviation `sigma`, truncated at
    /// [`SMOOTHING_TRUNCATE`] deviations.
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` for zero dimensions or invalid bounds.
    pub fn generate(
        height: usize,
        width: usize,
        config: &ElevationConfig,
        rng: &mut SimRng,
    ) -> Result<Self> {
        validate_dimensions(height, width)?;
        config.validate()?;

        let raw: Vec<f64> = (0..height * width)
            .map(|_| rng.random_range(config.low..=config.high))
            .collect();
        let values = gaussian_smooth(&raw, height, width, config.sigma);

        Ok(Self {
            height,
            width,
            values,
            low: config.low,
            high: config.high,
        })
    }

    /// Create level terrain at a single elevation.
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` for zero dimensions or a non-positive elevation.
    pub fn flat(height: usize, width: usize, elevation: f64) -> Result<Self> {
        validate_dimensions(height, width)?;
        validate_bounds(elevation, elevation)?;
        Ok(Self {
            height,
            width,
            values: vec![elevation; height * width],
            low: elevation,
            high: elevation,
        })
    }

    /// Wrap caller-supplied elevations (row-major) with their generation bounds.
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` if the value count does not match the dimensions, the
    /// bounds are invalid, or a value lies outside `[low, high]`.
    pub fn from_values(
        height: usize,
        width: usize,
        values: Vec<f64>,
        low: f64,
        high: f64,
    ) -> Result<Self> {
        validate_dimensions(height, width)?;
        validate_bounds(low, high)?;
        if values.len() != height * width {
            return Err(WildfireError::invalid_config(
                "elevation.values",
                format!(
                    "expected {} values for a {width}x{height} grid, got {}",
                    height * width,
                    values.len()
                ),
            ));
        }
        // Bounds are finite and positive, so this also rejects NaN and non-positive values
        if let Some(bad) = values.iter().find(|v| !(low..=high).contains(*v)) {
            return Err(WildfireError::invalid_config(
                "elevation.values",
                format!("{bad} lies outside the field bounds [{low}, {high}]"),
            ));
        }
        Ok(Self {
            height,
            width,
            values,
            low,
            high,
        })
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Generation bounds `(low, high)`.
    pub fn bounds(&self) -> (f64, f64) {
        (self.low, self.high)
    }

    /// Row-major elevation values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Elevation at a grid position.
    ///
    /// # Errors
    ///
    /// `InvalidPosition` if the position is outside the field.
    pub fn at(&self, position: Position) -> Result<f64> {
        if position.x >= self.width || position.y >= self.height {
            return Err(WildfireError::InvalidPosition {
                x: position.x,
                y: position.y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(self.values[position.y * self.width + position.x])
    }
}

pub(crate) fn validate_dimensions(height: usize, width: usize) -> Result<()> {
    if height == 0 {
        return Err(WildfireError::invalid_config("height", "must be positive"));
    }
    if width == 0 {
        return Err(WildfireError::invalid_config("width", "must be positive"));
    }
    Ok(())
}

/// Normalized 1D Gaussian kernel of radius `round(truncate * sigma)`.
///
/// `sigma` is clamped to `MAX_SMOOTHING_SIGMA`.
pub fn gaussian_kernel(sigma: f64) -> Vec<f64> {
    let sigma = sigma.min(MAX_SMOOTHING_SIGMA);
    let radius = (SMOOTHING_TRUNCATE * sigma + 0.5) as isize;
    let two_sigma_sq = 2.0 * sigma * sigma;
    let mut weights: Vec<f64> = (-radius..=radius)
        .map(|i| (-((i * i) as f64) / two_sigma_sq).exp())
        .collect();
    let sum: f64 = weights.iter().sum();
    for w in &mut weights {
        *w /= sum;
    }
    weights
}

/// Mirror an out-of-range index back into `0..n` (half-sample symmetric: `d c b a | a b c d`).
#[inline]
fn reflect_index(i: isize, n: usize) -> usize {
    let n = n as isize;
    let period = 2 * n;
    let m = i.rem_euclid(period);
    if m < n {
        m as usize
    } else {
        (period - 1 - m) as usize
    }
}

/// Separable Gaussian blur of a row-major `height x width` array.
///
/// Boundaries are reflected, so a constant field stays constant and the output never
/// leaves the input's value range. `sigma == 0` returns the input unchanged.
pub fn gaussian_smooth(values: &[f64], height: usize, width: usize, sigma: f64) -> Vec<f64> {
    if sigma <= 0.0 || values.is_empty() {
        return values.to_vec();
    }
    let kernel = gaussian_kernel(sigma);
    let radius = (kernel.len() / 2) as isize;

    // Along rows (x)
    let mut rows = vec![0.0; values.len()];
    for y in 0..height {
        let row = &values[y * width..(y + 1) * width];
        for x in 0..width {
            let mut acc = 0.0;
            for (k, w) in kernel.iter().enumerate() {
                let src = x as isize + k as isize - radius;
                acc += w * row[reflect_index(src, width)];
            }
            rows[y * width + x] = acc;
        }
    }

    // Along columns (y)
    let mut out = vec![0.0; values.len()];
    for y in 0..height {
        for x in 0..width {
            let mut acc = 0.0;
            for (k, w) in kernel.iter().enumerate() {
                let src = y as isize + k as isize - radius;
                acc += w * rows[reflect_index(src, height) * width + x];
            }
            out[y * width + x] = acc;
        }
    }
    out
}
