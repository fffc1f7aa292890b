//! Error types for the wildfire core.

use thiserror::Error;

/// Errors raised by configuration, generation and query operations.
///
/// None of these are transient: the simulation is an in-memory computation, so every
/// error is fatal to the call that raised it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WildfireError {
    /// A configuration value is out of range or inconsistent.
    #[error("invalid configuration: {parameter} {reason}")]
    InvalidConfiguration {
        parameter: &'static str,
        reason: String,
    },

    /// A lookup outside the grid bounds.
    #[error("position ({x}, {y}) is outside the {width}x{height} grid")]
    InvalidPosition {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
}

impl WildfireError {
    pub(crate) fn invalid_config(parameter: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            parameter,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, WildfireError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_context() {
        let err = WildfireError::invalid_config("density", "must lie in [0, 1], got 1.5");
        assert_eq!(
            err.to_string(),
            "invalid configuration: density must lie in [0, 1], got 1.5"
        );

        let err = WildfireError::InvalidPosition {
            x: 7,
            y: 2,
            width: 5,
            height: 4,
        };
        assert_eq!(err.to_string(), "position (7, 2) is outside the 5x4 grid");
    }
}
