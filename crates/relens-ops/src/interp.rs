//! Subpixel interpolation over reader views.
//!
//! An interpolator samples a borrowed [`ImageViewR`] at non-integer,
//! per-channel positions given in normalised coordinates (y in `[-1, 1]`,
//! x in `[-aspect, aspect]`). Sampling never fails: a coordinate outside
//! the image resolves to the null value `0.0`, which the transform driver
//! clamps into the output range like any other sample.
//!
//! Values are raw channel values as `f64` (no 0..1 rescaling), so the
//! integer storage depths stay bit-exact through the pipeline.

use relens_core::{ChannelStorage, ColourTuple, CoordTuple, ImageViewR};

use crate::error::{OpsError, OpsResult};

/// Interpolation method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interpolation {
    /// Nearest neighbour (fastest, blocky).
    Nearest,
    /// Bilinear blend of the four surrounding pixels.
    #[default]
    Bilinear,
    /// Sinc-windowed sinc with the given support radius (typically 3).
    Lanczos(u32),
}

impl Interpolation {
    /// Validates the parameters of this interpolation method.
    ///
    /// # Errors
    ///
    /// Rejects a Lanczos support radius of zero.
    pub fn validate(&self) -> OpsResult<()> {
        if let Interpolation::Lanczos(0) = self {
            return Err(OpsError::InvalidParameter(
                "Lanczos support radius must be >= 1".into(),
            ));
        }
        Ok(())
    }
}

/// Lanczos kernel weight at distance `t` for support radius `a`.
#[inline]
fn lanczos_weight(t: f64, a: f64) -> f64 {
    let at = t.abs();
    if at < 1e-12 {
        1.0
    } else if at < a {
        let pi_t = std::f64::consts::PI * at;
        let pi_t_a = pi_t / a;
        (pi_t.sin() / pi_t) * (pi_t_a.sin() / pi_t_a)
    } else {
        0.0
    }
}

/// Samples a reader view at normalised per-channel coordinates.
#[derive(Debug, Clone, Copy)]
pub struct Interpolator<'a, T: ChannelStorage> {
    view: ImageViewR<'a, T>,
    kind: Interpolation,
    width: isize,
    height: isize,
    scale_x: f64,
    scale_y: f64,
    half_x: f64,
    half_y: f64,
}

impl<'a, T: ChannelStorage> Interpolator<'a, T> {
    /// Creates an interpolator over `view`.
    ///
    /// # Errors
    ///
    /// Fails when the interpolation parameters are invalid.
    pub fn new(view: ImageViewR<'a, T>, kind: Interpolation) -> OpsResult<Self> {
        kind.validate()?;
        let (w, h) = view.dimensions();
        let half_x = (w as f64 - 1.0) / 2.0;
        let half_y = (h as f64 - 1.0) / 2.0;
        Ok(Self {
            view,
            kind,
            width: w as isize,
            height: h as isize,
            scale_x: (w as f64 - 1.0) / (2.0 * view.aspect_ratio()),
            scale_y: half_y,
            half_x,
            half_y,
        })
    }

    /// The value of channel index `chan` at normalised `(x, y)`.
    pub fn px_val(&self, chan: usize, x: f64, y: f64) -> f64 {
        let px = x * self.scale_x + self.half_x;
        let py = y * self.scale_y + self.half_y;
        match self.kind {
            Interpolation::Nearest => self.nearest(chan, px, py),
            Interpolation::Bilinear => self.bilinear(chan, px, py),
            Interpolation::Lanczos(radius) => self.lanczos(chan, px, py, radius as f64),
        }
    }

    /// Per-channel batch sampling for the transform driver: each channel
    /// samples its own coordinate pair.
    pub fn px_vals<const N: usize>(&self, coords: &CoordTuple<N>) -> ColourTuple<N> {
        let mut values = ColourTuple::default();
        for chan in 0..N {
            values.values[chan] = self.px_val(chan, coords.x[chan], coords.y[chan]);
        }
        values
    }

    /// One pixel read with the null value outside the image.
    #[inline]
    fn sample(&self, chan: usize, ix: isize, iy: isize) -> f64 {
        if ix < 0 || iy < 0 || ix >= self.width || iy >= self.height {
            0.0
        } else {
            self.view.px(chan, ix as usize, iy as usize).to_f64()
        }
    }

    fn nearest(&self, chan: usize, px: f64, py: f64) -> f64 {
        let ix = (px + 0.5).floor() as isize;
        let iy = (py + 0.5).floor() as isize;
        self.sample(chan, ix, iy)
    }

    fn bilinear(&self, chan: usize, px: f64, py: f64) -> f64 {
        let x0 = px.floor();
        let y0 = py.floor();
        let fx = px - x0;
        let fy = py - y0;
        let x0 = x0 as isize;
        let y0 = y0 as isize;

        let top = self.sample(chan, x0, y0) * (1.0 - fx) + self.sample(chan, x0 + 1, y0) * fx;
        let bot =
            self.sample(chan, x0, y0 + 1) * (1.0 - fx) + self.sample(chan, x0 + 1, y0 + 1) * fx;
        top * (1.0 - fy) + bot * fy
    }

    fn lanczos(&self, chan: usize, px: f64, py: f64, radius: f64) -> f64 {
        let x_lo = (px - radius).ceil() as isize;
        let x_hi = (px + radius).floor() as isize;
        let y_lo = (py - radius).ceil() as isize;
        let y_hi = (py + radius).floor() as isize;

        let mut acc = 0.0;
        let mut weight_sum = 0.0;
        for iy in y_lo..=y_hi {
            if iy < 0 || iy >= self.height {
                continue;
            }
            let wy = lanczos_weight(py - iy as f64, radius);
            for ix in x_lo..=x_hi {
                if ix < 0 || ix >= self.width {
                    continue;
                }
                let w = wy * lanczos_weight(px - ix as f64, radius);
                acc += w * self.view.px(chan, ix as usize, iy as usize).to_f64();
                weight_sum += w;
            }
        }

        // Weights are renormalised over the taps that fell inside the image.
        if weight_sum.abs() > 1e-12 {
            acc / weight_sum
        } else {
            0.0
        }
    }
}
