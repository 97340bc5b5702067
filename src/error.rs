//! Errors raised while building gradients and mapping distances.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for gradient operations.
pub type Result<T> = std::result::Result<T, GradientError>;

/// Errors that can occur when configuring or querying a gradient.
#[derive(Debug, Error)]
pub enum GradientError {
    /// The gradient configuration violates its invariants (length
    /// mismatch, fewer than two keys, non finite or unsorted keys,
    /// malformed description).
    #[error("Invalid gradient configuration: {reason}")]
    InvalidConfig { reason: String },

    /// The distance lies outside `[min, max]` and no clip color
    /// covers that side.
    #[error("Distance {distance} outside of gradient range [{min}, {max}]")]
    OutOfRange { distance: f64, min: f64, max: f64 },

    /// The gradient description is not valid Hjson.
    #[error("Cannot parse gradient description: {0}")]
    Parse(String),

    /// Failed to read a gradient description from disk.
    #[error("Failed to read gradient file: {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GradientError {
    /// Create an InvalidConfig error.
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig { reason: reason.into() }
    }

    /// Create an Io error.
    pub fn io(path: PathBuf, source: std::io::Error) -> Self {
        Self::Io { path, source }
    }
}

impl From<serde_hjson::Error> for GradientError {
    fn from(err: serde_hjson::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
