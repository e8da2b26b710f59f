//! Error types for transform configuration.

use thiserror::Error;

/// Error type for interpolator, auto-scaler and transform configuration.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Invalid parameter value (e.g. a zero Lanczos support radius).
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The requested combination has no implementation.
    #[error("unsupported configuration: {0}")]
    Unsupported(String),

    /// The auto-scale search could not bracket a solution.
    #[error("auto-scale failed: {0}")]
    AutoScale(String),
}

/// Result type for transform configuration.
pub type OpsResult<T> = Result<T, OpsError>;
