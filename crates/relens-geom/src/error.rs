//! Error types for model configuration.

use thiserror::Error;

/// Error type for geometry and model configuration.
#[derive(Error, Debug)]
pub enum GeomError {
    /// Invalid parameter value (e.g. non-positive focal length).
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type for geometry and model configuration.
pub type GeomResult<T> = Result<T, GeomError>;
