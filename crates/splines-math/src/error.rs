//! Error types for spline construction and evaluation.

use thiserror::Error;

use crate::spline::SplineState;

/// A specialized Result type for spline operations.
pub type SplineResult<T> = Result<T, SplineError>;

/// Errors that can occur while building or querying a spline.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SplineError {
    /// Operation requires a built spline.
    #[error("Invalid state: cannot {operation} a spline in state {state}")]
    InvalidState {
        /// The rejected operation.
        operation: &'static str,
        /// State the spline was in.
        state: SplineState,
    },

    /// A node buffer is too small for the requested write.
    #[error("Capacity exceeded: need room for {required} values, buffer holds {capacity}")]
    CapacityExceeded {
        /// Number of values the operation needs.
        required: usize,
        /// Number of values the buffer can hold.
        capacity: usize,
    },

    /// Insufficient data points for operation.
    #[error("Insufficient data: need at least {required} nodes, got {actual}")]
    InsufficientData {
        /// Minimum required nodes.
        required: usize,
        /// Actual number of nodes.
        actual: usize,
    },

    /// Node abscissa and ordinate sequences have incompatible lengths.
    #[error("Dimension mismatch: {x_len} abscissas and {y_len} ordinates")]
    DimensionMismatch {
        /// Length of the abscissa sequence.
        x_len: usize,
        /// Length of the ordinate sequence.
        y_len: usize,
    },

    /// Query point is outside the node range and extrapolation is rejected.
    #[error("Extrapolation not allowed: {x} is outside [{min}, {max}]")]
    ExtrapolationNotAllowed {
        /// The query point.
        x: f64,
        /// First node abscissa.
        min: f64,
        /// Last node abscissa.
        max: f64,
    },

    /// Invalid input parameter.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Description of the invalid input.
        reason: String,
    },
}

impl SplineError {
    /// Creates an invalid state error.
    #[must_use]
    pub fn invalid_state(operation: &'static str, state: SplineState) -> Self {
        Self::InvalidState { operation, state }
    }

    /// Creates a capacity exceeded error.
    #[must_use]
    pub fn capacity_exceeded(required: usize, capacity: usize) -> Self {
        Self::CapacityExceeded { required, capacity }
    }

    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Creates an insufficient data error.
    #[must_use]
    pub fn insufficient_data(required: usize, actual: usize) -> Self {
        Self::InsufficientData { required, actual }
    }

    /// Creates a dimension mismatch error.
    #[must_use]
    pub fn dimension_mismatch(x_len: usize, y_len: usize) -> Self {
        Self::DimensionMismatch { x_len, y_len }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SplineError::insufficient_data(2, 1);
        assert!(err.to_string().contains("at least 2 nodes"));

        let err = SplineError::invalid_state("evaluate", SplineState::Reserved);
        assert_eq!(
            err.to_string(),
            "Invalid state: cannot evaluate a spline in state Reserved"
        );
    }

    #[test]
    fn test_capacity_display() {
        let err = SplineError::capacity_exceeded(5, 4);
        assert!(err.to_string().contains("need room for 5"));
    }
}
