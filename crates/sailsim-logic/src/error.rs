//! Error and validation types.
//!
//! Validation functions return every problem they find as a list of
//! [`ConfigError`]; constructors and setters wrap that list in a
//! [`SimError`] so callers get a single `Result`.

use thiserror::Error;

/// A single configuration problem found by a `validate()` call.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Vessel mass must be finite and strictly positive.
    NonPositiveMass(f32),
    /// A physical constant is NaN, infinite or negative.
    InvalidConstant { name: &'static str, value: f32 },
    /// Yaw moment of inertia must be finite and strictly positive.
    NonPositiveMomentOfInertia(f32),
    /// A wind-speed scalar or the sail angle is NaN or infinite.
    NonFiniteParameter { name: &'static str, value: f32 },
    /// A yaw or floor limit is NaN, infinite or negative.
    InvalidLimit { name: &'static str, value: f32 },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NonPositiveMass(m) => write!(f, "mass must be > 0 (got {m})"),
            ConfigError::InvalidConstant { name, value } => {
                write!(f, "constant `{name}` must be finite and >= 0 (got {value})")
            }
            ConfigError::NonPositiveMomentOfInertia(i) => {
                write!(f, "moment of inertia must be > 0 (got {i})")
            }
            ConfigError::NonFiniteParameter { name, value } => {
                write!(f, "parameter `{name}` must be finite (got {value})")
            }
            ConfigError::InvalidLimit { name, value } => {
                write!(f, "limit `{name}` must be finite and >= 0 (got {value})")
            }
        }
    }
}

/// Errors surfaced by the simulation core.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    /// `dt` passed to `step` was zero, negative, NaN or infinite.
    #[error("invalid time step: {dt} (must be finite and > 0)")]
    InvalidTimeStep { dt: f32 },

    /// Yaw moment of inertia would divide by zero or produce a non-finite rate.
    #[error("invalid moment of inertia: {value} (must be finite and > 0)")]
    InvalidMomentOfInertia { value: f32 },

    /// Physical constants or dynamics limits failed validation.
    #[error("invalid physical configuration: {}", join(.0))]
    InvalidConstants(Vec<ConfigError>),

    /// Environment parameters failed validation.
    #[error("invalid environment parameters: {}", join(.0))]
    InvalidEnvironment(Vec<ConfigError>),

    /// Integration produced NaN or infinity; the step was rolled back.
    #[error("integration produced a non-finite state at step {step}")]
    NonFiniteState { step: u64 },
}

fn join(errors: &[ConfigError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
