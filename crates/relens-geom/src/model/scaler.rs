//! Linear geometric corrections: scaling and rotation.

use relens_core::Channel;

use super::{PixelModel, SubpixelModel};
use crate::coord::CoordParams;
use crate::error::{GeomError, GeomResult};

/// Pure scaling `(x, y) -> (k*x, k*y)` of the sampling coordinates.
///
/// Factors above 1 sample farther from the centre (the output appears
/// zoomed out); factors between 0 and 1 magnify. A per-channel factor set
/// turns the model into a chromatic scaler; the auto-scaler consumes the
/// uniform form.
#[derive(Debug, Clone, Copy)]
pub struct Scaler {
    factors: [f64; 4],
    coord: CoordParams,
}

impl Scaler {
    /// Uniform scaling by `factor`.
    ///
    /// # Errors
    ///
    /// Rejects a zero factor (the mapping would be non-invertible).
    pub fn new(factor: f64) -> GeomResult<Self> {
        Self::per_channel([factor; 4])
    }

    /// Per-channel scaling factors, indexed in storage order.
    ///
    /// # Errors
    ///
    /// Rejects zero factors.
    pub fn per_channel(factors: [f64; 4]) -> GeomResult<Self> {
        if factors.iter().any(|k| *k == 0.0) {
            return Err(GeomError::InvalidParameter(
                "scaling factor must be non-zero".into(),
            ));
        }
        Ok(Self {
            factors,
            coord: CoordParams::default(),
        })
    }

    /// The scaling factor of a channel.
    pub fn factor(&self, chan: Channel) -> f64 {
        self.factors[chan.index()]
    }

    #[inline]
    fn apply(&self, chan: usize, x: &mut f64, y: &mut f64) {
        let cf = self.coord.coord_fact();
        let k = self.factors[chan];
        *x = *x * cf * k / cf;
        *y = *y * cf * k / cf;
    }
}

impl SubpixelModel for Scaler {
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

impl PixelModel for Scaler {
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

/// Rotation about the image centre.
///
/// `angle` is the rotation of the image content in radians,
/// counter-clockwise in the usual mathematical orientation; the reverse
/// mapping applies the inverse rotation to the sampling coordinates.
#[derive(Debug, Clone, Copy)]
pub struct Rotation {
    sin: f64,
    cos: f64,
    coord: CoordParams,
}

impl Rotation {
    /// Creates a rotation by `angle` radians.
    pub fn new(angle: f64) -> Self {
        Self {
            sin: angle.sin(),
            cos: angle.cos(),
            coord: CoordParams::default(),
        }
    }

    #[inline]
    fn apply(&self, x: &mut f64, y: &mut f64) {
        let cf = self.coord.coord_fact();
        let (xd, yd) = (*x * cf, *y * cf);
        *x = (self.cos * xd + self.sin * yd) / cf;
        *y = (-self.sin * xd + self.cos * yd) / cf;
    }
}

impl SubpixelModel for Rotation {
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

impl PixelModel for Rotation {
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
