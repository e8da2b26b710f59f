//! # relens-ops
//!
//! Sampling and the transform loop for the relens lens-correction
//! pipeline.
//!
//! This crate turns the pure math of `relens-geom` into pixels:
//!
//! - [`interp`] - nearest / bilinear / Lanczos sampling of a reader view at
//!   per-channel normalised coordinates
//! - [`scale`] - the auto-scaler choosing the output scale that fits or
//!   fills the corrected frame
//! - [`transform`] - the reverse-mapping driver looping over output
//!   scanlines
//!
//! # Example
//!
//! ```rust
//! use relens_core::{ImageViewR, ImageViewW, Storage};
//! use relens_geom::{CoordParams, Ptlens};
//! use relens_ops::{Interpolation, Transform};
//!
//! let src = vec![200u8; 32 * 32 * 3];
//! let mut dst = vec![0u8; 32 * 32 * 3];
//! let reader = ImageViewR::new(&src, 32, 32, Storage::Rgb8Inter).unwrap();
//! let writer = ImageViewW::new(&mut dst, 32, 32, Storage::Rgb8Inter).unwrap();
//!
//! let mut transform = Transform::new(reader, writer, Interpolation::Lanczos(3)).unwrap();
//! transform
//!     .subpixel_queue
//!     .add_model(Ptlens::new(0.0, 0.05, 0.0, CoordParams::for_aspect(1.0)));
//! transform.run().unwrap();
//! ```
//!
//! # Feature flags
//!
//! - `parallel` (default) - rayon-parallel scanline loop; without it the
//!   driver renders rows sequentially.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod interp;
pub mod scale;
pub mod transform;

pub use error::{OpsError, OpsResult};
pub use interp::{Interpolation, Interpolator};
pub use scale::{AutoScaler, ScaleMode};
pub use transform::Transform;
