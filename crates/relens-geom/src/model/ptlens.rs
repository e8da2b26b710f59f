//! PTLens/Hugin radial polynomial distortion model.

use relens_core::Channel;

use super::{PixelModel, SubpixelModel};
use crate::coord::CoordParams;

/// Radial polynomial distortion in the PTLens/Hugin parameterisation.
///
/// For radius `r` in the calibration frame the model scales coordinates by
///
/// ```text
/// s(r) = a*r^3 + b*r^2 + c*r + d
/// ```
///
/// `d` defaults so that `a + b + c + d = 1`, which keeps the frame centre
/// scale-free. The parameters are held *per channel*: identical parameters
/// give a plain geometric distortion, while per-channel `d` values act as
/// per-channel global scales and model transverse chromatic aberration
/// (chromatic scaling).
#[derive(Debug, Clone, Copy)]
pub struct Ptlens {
    /// (a, b, c, d) per channel, indexed in storage order.
    params: [[f64; 4]; 4],
    coord: CoordParams,
}

impl Ptlens {
    /// Creates the model with identical `(a, b, c)` on every channel and
    /// `d = 1 - a - b - c`.
    pub fn new(a: f64, b: f64, c: f64, coord: CoordParams) -> Self {
        let d = 1.0 - a - b - c;
        Self {
            params: [[a, b, c, d]; 4],
            coord,
        }
    }

    /// Replaces the parameters of every channel.
    pub fn set_params(&mut self, a: f64, b: f64, c: f64, d: f64) {
        self.params = [[a, b, c, d]; 4];
    }

    /// Replaces the parameters of a single channel.
    pub fn set_channel_params(&mut self, chan: Channel, a: f64, b: f64, c: f64, d: f64) {
        self.params[chan.index()] = [a, b, c, d];
    }

    /// The `(a, b, c, d)` parameters of a channel.
    pub fn channel_params(&self, chan: Channel) -> [f64; 4] {
        self.params[chan.index()]
    }

    #[inline]
    fn apply(&self, chan: usize, x: &mut f64, y: &mut f64) {
        let cf = self.coord.coord_fact();
        let [a, b, c, d] = self.params[chan];
        let xf = *x * cf;
        let yf = *y * cf;
        let r = (xf * xf + yf * yf).sqrt();
        let s = ((a * r + b) * r + c) * r + d;
        *x = xf * s / cf;
        *y = yf * s / cf;
    }
}

impl SubpixelModel for Ptlens {
    fn src_coords(&self, x: &mut [f64], y: &mut [f64]) {
        for chan in 0..x.len() {
            let (xs, ys) = (&mut x[chan], &mut y[chan]);
            self.apply(chan, xs, ys);
        }
    }

    fn set_coord_params(&mut self, params: CoordParams) {
        self.coord = params;
    }

    fn clone_box(&self) -> Box<dyn SubpixelModel> {
        Box::new(*self)
    }
}

impl PixelModel for Ptlens {
    fn src_coords(&self, x: &mut f64, y: &mut f64) {
        self.apply(0, x, y);
    }

    fn set_coord_params(&mut self, params: CoordParams) {
        self.coord = params;
    }

    fn clone_box(&self) -> Box<dyn PixelModel> {
        Box::new(*self)
    }
}
