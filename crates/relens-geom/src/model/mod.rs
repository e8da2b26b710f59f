//! Correction models.
//!
//! Models come in three kinds, matching the queue they can occupy:
//!
//! - **subpixel** models rewrite one source coordinate pair *per channel*
//!   (the representation of transverse chromatic aberration);
//! - **pixel** models rewrite a single monochrome coordinate pair;
//! - **colour** models return a multiplicative gain per channel.
//!
//! All model traits are object safe and cloneable through `clone_box`, so a
//! queue owns its models as boxed trait objects and deep-copies them when
//! the queue is cloned. Every model carries its own [`CoordParams`] and can
//! be re-tuned in place after it was added to a queue.

mod balance;
mod geometry_convert;
mod ptlens;
mod scaler;
mod shift;
mod vignette;

pub use balance::ColourBalance;
pub use geometry_convert::GeometryConvert;
pub use ptlens::Ptlens;
pub use scaler::{Rotation, Scaler};
pub use shift::Shift;
pub use vignette::Vignetting;

use crate::coord::CoordParams;

/// Geometric model producing per-channel source coordinates.
///
/// `x` and `y` arrive holding the destination coordinate once per channel
/// and leave holding the per-channel source coordinates. Slices have one
/// entry per channel (3 for RGB, 4 for RGBA).
pub trait SubpixelModel: Send + Sync {
    /// Rewrites destination coordinates into source coordinates, per
    /// channel, in place.
    fn src_coords(&self, x: &mut [f64], y: &mut [f64]);

    /// Replaces the aspect/crop parameterisation.
    fn set_coord_params(&mut self, params: CoordParams);

    /// Deep copy for queue ownership.
    fn clone_box(&self) -> Box<dyn SubpixelModel>;
}

impl Clone for Box<dyn SubpixelModel> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Geometric model producing a single monochrome source coordinate.
pub trait PixelModel: Send + Sync {
    /// Rewrites the destination coordinate into the source coordinate in
    /// place.
    fn src_coords(&self, x: &mut f64, y: &mut f64);

    /// Replaces the aspect/crop parameterisation.
    fn set_coord_params(&mut self, params: CoordParams);

    /// Deep copy for queue ownership.
    fn clone_box(&self) -> Box<dyn PixelModel>;
}

impl Clone for Box<dyn PixelModel> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Colour model producing per-channel multiplicative gains.
pub trait ColourModel: Send + Sync {
    /// Writes the gain for each channel at the evaluation point `(x, y)`
    /// into `factors` (one entry per channel).
    fn factors(&self, x: f64, y: f64, factors: &mut [f64]);

    /// Replaces the aspect/crop parameterisation.
    fn set_coord_params(&mut self, params: CoordParams);

    /// Deep copy for queue ownership.
    fn clone_box(&self) -> Box<dyn ColourModel>;
}

impl Clone for Box<dyn ColourModel> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}
