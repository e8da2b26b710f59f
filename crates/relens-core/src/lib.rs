//! # relens-core
//!
//! Core types for the relens lens-correction pipeline.
//!
//! This crate provides the foundation the rest of the workspace builds on:
//!
//! - [`Storage`] / [`LayoutInfo`] - pixel storage descriptors over
//!   RGB/RGBA x 8/16/32-bit x interleaved/planar buffers
//! - [`ImageViewR`] / [`ImageViewW`] - non-owning views over caller buffers,
//!   with cheap pixel iterators and row-parallel write access
//! - [`CoordTuple`] / [`ColourTuple`] - the per-channel coordinate and gain
//!   carriers of the correction pipeline
//! - [`ChannelStorage`] - the raw-range `u8`/`u16`/`u32` channel contract
//!
//! ## Design
//!
//! Buffers are always owned by the caller; every view is a borrowed window
//! whose lifetime the compiler ties to the caller's allocation. The storage
//! variant is a plain enum resolved into addressing constants once, so the
//! per-pixel loops in `relens-ops` stay branch-free.
//!
//! ## Crate structure
//!
//! ```text
//! relens-core (this crate)
//!    ^
//!    |
//!    +-- relens-geom (projections, correction models, queues)
//!    +-- relens-ops  (interpolators, auto-scaler, transform driver)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod channel;
pub mod error;
pub mod storage;
pub mod tuple;
pub mod view;

// Re-exports for convenience
pub use channel::{Channel, ChannelStorage};
pub use error::{Error, Result};
pub use storage::{LayoutInfo, Storage};
pub use tuple::{
    ColourTuple, ColourTupleRgb, ColourTupleRgba, CoordTuple, CoordTupleMono, CoordTupleRgb,
    CoordTupleRgba,
};
pub use view::{ImageViewR, ImageViewW, PixelIterR, PixelIterW, RowW};

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```
/// use relens_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::channel::{Channel, ChannelStorage};
    pub use crate::error::{Error, Result};
    pub use crate::storage::{LayoutInfo, Storage};
    pub use crate::tuple::{ColourTuple, CoordTuple, CoordTupleMono};
    pub use crate::view::{ImageViewR, ImageViewW, RowW};
}
