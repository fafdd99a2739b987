//! Error types for the sparsereg-losses crate.
//!
//! This module defines error types for regularization loss computations,
//! including shape mismatches between activation batches, empty batches,
//! and invalid hyperparameter configurations.

use thiserror::Error;

/// Error type for loss operations.
#[derive(Debug, Error)]
pub enum LossError {
    /// Shape mismatch between expected and actual activation shapes.
    #[error("Shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        /// The expected shape
        expected: Vec<usize>,
        /// The actual shape that was provided
        actual: Vec<usize>,
    },

    /// A shape error raised by the underlying tensor library.
    #[error("Tensor shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    /// The concatenated activation batch has no rows to average over.
    #[error("Empty batch: activation statistics need at least one row")]
    EmptyBatch,

    /// Configuration error for the loss.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration error
        message: String,
    },
}

/// Result type alias for loss operations.
pub type LossResult<T> = Result<T, LossError>;
