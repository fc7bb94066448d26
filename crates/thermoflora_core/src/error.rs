//! Error types for the simulation engine.
//!
//! Construction-time invariant violations surface immediately as a
//! [`SimError`]. Per-tick degenerate samples are recovered locally by the
//! callers that hit them and never abort a tick.

use thiserror::Error;

/// Main error type for engine operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    /// A body or medium was given a non-positive or non-finite extent.
    #[error("Invalid dimension: {0}")]
    InvalidDimension(String),

    /// A thermal coefficient fell outside its documented range.
    #[error("Invalid coefficient: {0}")]
    InvalidCoefficient(String),

    /// A species template has a degenerate band or an unknown id was used.
    #[error("Invalid species: {0}")]
    InvalidSpecies(String),

    /// A tunable in the run configuration is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The initial body set did not contain exactly one agent.
    #[error("Expected exactly one agent body, found {0}")]
    AgentCount(usize),

    /// A step was driven with a non-positive or non-finite timestep.
    #[error("Invalid timestep: {0}")]
    InvalidTimestep(f64),

    /// An air cell index outside `[0, width)` was accessed.
    #[error("Air cell index {index} out of range (width {width})")]
    OutOfRangeIndex { index: usize, width: usize },

    /// A mean was requested over an empty index range.
    #[error("Degenerate sample over empty range [{lower}, {upper})")]
    DegenerateSample { lower: usize, upper: usize },
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, SimError>;

impl SimError {
    #[must_use]
    pub fn dimension<S: Into<String>>(msg: S) -> Self {
        Self::InvalidDimension(msg.into())
    }

    #[must_use]
    pub fn coefficient<S: Into<String>>(msg: S) -> Self {
        Self::InvalidCoefficient(msg.into())
    }

    #[must_use]
    pub fn species<S: Into<String>>(msg: S) -> Self {
        Self::InvalidSpecies(msg.into())
    }
}

/// Rejects timesteps that would make a step meaningless.
pub fn ensure_timestep(dt: f64) -> Result<()> {
    if dt.is_finite() && dt > 0.0 {
        Ok(())
    } else {
        Err(SimError::InvalidTimestep(dt))
    }
}
