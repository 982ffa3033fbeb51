//! Error types for model construction and diagnostics.

use thiserror::Error;

/// Errors raised while building or driving a QG model.
///
/// Every failure is local to the call that produced it and none of them are
/// transient, so callers should not retry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QgError {
    /// Physical parameters or cadence settings are inconsistent.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A field or layer profile does not match the expected shape.
    #[error("Shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch { expected: String, actual: String },

    /// The spectral grid descriptor is malformed.
    #[error("Invalid grid: {0}")]
    InvalidGrid(String),

    /// A hook was used before its lifecycle stage ran.
    #[error("Model not initialized: {0} has not been set up")]
    NotInitialized(&'static str),
}

impl QgError {
    /// Create a shape mismatch error.
    pub fn shape_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::ShapeMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type QgResult<T> = Result<T, QgError>;
