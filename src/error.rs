//! Error types for the tissue model.
//!
//! Validation errors are raised at the call that received bad input, state
//! errors at the call that violates the model lifecycle. Nothing is written
//! to the model when an error is returned.

use thiserror::Error;

/// Result of model operations
pub type ModelResult<T> = Result<T, ModelError>;

/// Validation, lifecycle and numeric-domain errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// Argument is NaN or infinite
    #[error("parameter `{field}` is not a number")]
    NotANumber { field: &'static str },

    /// Argument outside its permitted closed range
    #[error("parameter `{field}` = {value} is outside [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Argument must be strictly positive
    #[error("parameter `{field}` = {value} must be greater than zero")]
    NonPositive { field: &'static str, value: f64 },

    /// Compartments can only be populated once per configuration
    #[error("compartments are already populated")]
    AlreadyPopulated,

    /// Operation needs the compartment set
    #[error("compartments have not been populated")]
    NotPopulated,

    /// Ceiling is undefined without inert gas in the compartment
    #[error("compartment {compartment} carries no inert gas")]
    NoInertGasLoaded { compartment: usize },

    /// Leg references a gas mix that was never added
    #[error("gas mix {index} does not exist ({available} defined)")]
    UnknownGas { index: usize, available: usize },
}

/// Reject NaN and infinities
pub(crate) fn require_finite(field: &'static str, value: f64) -> ModelResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ModelError::NotANumber { field })
    }
}

/// Reject values outside `[min, max]`
pub(crate) fn require_range(field: &'static str, value: f64, min: f64, max: f64) -> ModelResult<f64> {
    require_finite(field, value)?;
    if value < min || value > max {
        return Err(ModelError::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(value)
}

/// Reject zero, negative and non-finite values
pub(crate) fn require_positive(field: &'static str, value: f64) -> ModelResult<f64> {
    require_finite(field, value)?;
    if value <= 0.0 {
        return Err(ModelError::NonPositive { field, value });
    }
    Ok(value)
}
