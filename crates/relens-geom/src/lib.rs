//! # relens-geom
//!
//! Lens geometry and correction models for the relens pipeline.
//!
//! This crate holds the mathematical middle of the library:
//!
//! - [`geometry`] - projections between the image plane and spherical view
//!   angles (rectilinear plus four fisheye mappings)
//! - [`model`] - the concrete correction models: PTLens/Hugin radial
//!   polynomial, scaling, rotation, shift, vignetting, colour balance and
//!   projection conversion
//! - [`queue`] - ordered, deep-cloning compositions of models, one queue
//!   per model kind
//! - [`CoordParams`] - the aspect/crop parameterisation every model shares
//!
//! Everything operates on normalised coordinates (y in `[-1, 1]`, x in
//! `[-aspect, aspect]`, origin at the image centre) and is pure math: no
//! buffers, no I/O. Sampling and the transform loop live in `relens-ops`.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod coord;
mod error;
pub mod geometry;
pub mod model;
pub mod queue;

pub use coord::CoordParams;
pub use error::{GeomError, GeomResult};
pub use geometry::{LensGeometry, Projection};
pub use model::{
    ColourBalance, ColourModel, GeometryConvert, PixelModel, Ptlens, Rotation, Scaler, Shift,
    SubpixelModel, Vignetting,
};
pub use queue::{ColourQueue, PixelQueue, SubpixelQueue};
