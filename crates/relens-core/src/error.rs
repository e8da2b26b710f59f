//! Error types for relens-core operations.
//!
//! All errors here surface at *configuration* time — when a view is created
//! over a caller buffer, or when storage and buffer element types disagree.
//! The pixel loop itself never fails: out-of-range samples are handled
//! numerically by the interpolators.

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while configuring views over caller-owned pixel buffers.
#[derive(Debug, Error)]
pub enum Error {
    /// Width or height is unusable (e.g. zero).
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
        /// Reason why dimensions are invalid.
        reason: String,
    },

    /// The storage descriptor's channel depth does not match the buffer's
    /// element type.
    #[error("storage expects {storage_bits}-bit channels, buffer has {buffer_bits}-bit elements")]
    StorageMismatch {
        /// Channel depth demanded by the storage descriptor.
        storage_bits: u32,
        /// Bit width of the buffer element type.
        buffer_bits: u32,
    },

    /// The caller buffer is too small for the described image.
    #[error("buffer too small: need {required} channel values, got {got}")]
    BufferTooSmall {
        /// Channel values required by width x height x channels.
        required: usize,
        /// Channel values actually present.
        got: usize,
    },

    /// Pixel coordinates outside the view bounds.
    #[error("pixel ({x}, {y}) out of bounds for view {width}x{height}")]
    OutOfBounds {
        /// X coordinate that was accessed.
        x: usize,
        /// Y coordinate that was accessed.
        y: usize,
        /// View width.
        width: usize,
        /// View height.
        height: usize,
    },
}

impl Error {
    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: usize, height: usize, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::StorageMismatch`] error.
    #[inline]
    pub fn storage_mismatch(storage_bits: u32, buffer_bits: u32) -> Self {
        Self::StorageMismatch {
            storage_bits,
            buffer_bits,
        }
    }

    /// Creates an [`Error::BufferTooSmall`] error.
    #[inline]
    pub fn buffer_too_small(required: usize, got: usize) -> Self {
        Self::BufferTooSmall { required, got }
    }

    /// Creates an [`Error::OutOfBounds`] error.
    #[inline]
    pub fn out_of_bounds(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self::OutOfBounds {
            x,
            y,
            width,
            height,
        }
    }
}
