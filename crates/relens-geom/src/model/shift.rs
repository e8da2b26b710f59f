//! Image shift correction.

use super::{PixelModel, SubpixelModel};
use crate::coord::CoordParams;

/// Translation of the image content by `(dx, dy)`.
///
/// The offsets are given in calibration-frame units; the reverse mapping
/// subtracts them from the sampling coordinates, so positive `dy` moves
/// the content down the frame.
#[derive(Debug, Clone, Copy)]
pub struct Shift {
    dx: f64,
    dy: f64,
    coord: CoordParams,
}

impl Shift {
    /// Creates a shift by `(dx, dy)`.
    pub fn new(dx: f64, dy: f64) -> Self {
        Self {
            dx,
            dy,
            coord: CoordParams::default(),
        }
    }

    #[inline]
    fn apply(&self, x: &mut f64, y: &mut f64) {
        let cf = self.coord.coord_fact();
        *x = (*x * cf - self.dx) / cf;
        *y = (*y * cf - self.dy) / cf;
    }
}

impl SubpixelModel for Shift {
    fn src_coords(&self, x: &mut [f64], y: &mut [f64]) {
        for chan in 0..x.len() {
            let (xs, ys) = (&mut x[chan], &mut y[chan]);
            self.apply(xs, ys);
        }
    }

    fn set_coord_params(&mut self, params: CoordParams) {
        self.coord = params;
    }

    fn clone_box(&self) -> Box<dyn SubpixelModel> {
        Box::new(*self)
    }
}

impl PixelModel for Shift {
    fn src_coords(&self, x: &mut f64, y: &mut f64) {
        self.apply(x, y);
    }

    fn set_coord_params(&mut self, params: CoordParams) {
        self.coord = params;
    }

    fn clone_box(&self) -> Box<dyn PixelModel> {
        Box::new(*self)
    }
}
