//! Automatic output scaling.
//!
//! A correction stack usually moves the image border: barrel correction
//! pulls the corners outside the frame, projection conversion bends the
//! edges. The auto-scaler finds the uniform pre-scale `k` that, applied to
//! the destination coordinates before the geometric queues (i.e. a
//! [`Scaler`](relens_geom::Scaler) prepended to the subpixel queue), makes
//! the corrected frame sit exactly on the viewport:
//!
//! - [`ScaleMode::Fit`] drives the *maximum* border excursion to the
//!   viewport edge, so the whole mapped frame fits and no output pixel
//!   samples outside the source;
//! - [`ScaleMode::Fill`] drives the *minimum* excursion there, so the
//!   mapped border everywhere reaches the viewport edge.
//!
//! The search seeds with the closed-form estimate `1/m(1)` (exact when the
//! queue is linear in the radius) and refines with exponential bracketing
//! plus bisection, since the queue mathematics is non-linear in general.

use relens_geom::{PixelQueue, SubpixelQueue};
use tracing::{debug, trace};

use crate::error::{OpsError, OpsResult};

/// Auto-scaling target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleMode {
    /// The mapped frame's extremes just fit inside the viewport.
    Fit,
    /// The mapped frame covers the viewport everywhere along the border.
    Fill,
}

/// Border samples per viewport edge.
const EDGE_SAMPLES: usize = 64;

/// Bisection iterations after bracketing.
const BISECT_STEPS: usize = 60;

/// Determines the uniform scale that fits or fills the corrected frame.
#[derive(Debug)]
pub struct AutoScaler<'a> {
    subpixel: &'a SubpixelQueue,
    pixel: &'a PixelQueue,
    aspect: f64,
}

impl<'a> AutoScaler<'a> {
    /// Creates a scaler over a configured queue pair.
    pub fn new(subpixel: &'a SubpixelQueue, pixel: &'a PixelQueue, aspect: f64) -> Self {
        Self {
            subpixel,
            pixel,
            aspect,
        }
    }

    /// Computes the scale factor for `mode`.
    ///
    /// `N` is the coordinate tuple arity (3 for RGB, 4 for RGBA). The
    /// result is meant to be consumed as a `Scaler` prepended to the
    /// subpixel queue.
    ///
    /// # Errors
    ///
    /// Fails when the queue mapping is degenerate or no bracket can be
    /// found (e.g. every border sample lands outside every scale).
    pub fn scale<const N: usize>(&self, mode: ScaleMode) -> OpsResult<f64> {
        let measure = |k: f64| -> f64 {
            let (min, max) = self.border_extrema::<N>(k);
            match mode {
                ScaleMode::Fit => max,
                ScaleMode::Fill => min,
            }
        };

        let m1 = measure(1.0);
        if !m1.is_finite() || m1 <= 0.0 {
            return Err(OpsError::AutoScale(format!(
                "degenerate border mapping (measure {m1})"
            )));
        }

        // Closed-form seed, exact when the mapping is linear in the radius.
        let seed = 1.0 / m1;
        let mut lo = seed;
        let mut hi = seed;

        let mut steps = 0;
        while measure(lo) > 1.0 {
            lo *= 0.5;
            steps += 1;
            if steps > 64 {
                return Err(OpsError::AutoScale("no lower bracket found".into()));
            }
        }
        steps = 0;
        while measure(hi) < 1.0 {
            hi *= 2.0;
            steps += 1;
            if steps > 64 {
                return Err(OpsError::AutoScale("no upper bracket found".into()));
            }
        }

        for _ in 0..BISECT_STEPS {
            let mid = 0.5 * (lo + hi);
            if measure(mid) > 1.0 {
                hi = mid;
            } else {
                lo = mid;
            }
        }

        let k = 0.5 * (lo + hi);
        debug!(?mode, scale = k, seed, "auto-scale converged");
        Ok(k)
    }

    /// Minimum and maximum border excursion `max(|x|/aspect, |y|)` over the
    /// sampled viewport border, after pre-scaling the destination
    /// coordinates by `prescale` and mapping through both queues.
    fn border_extrema<const N: usize>(&self, prescale: f64) -> (f64, f64) {
        let mut min = f64::INFINITY;
        let mut max: f64 = 0.0;

        for i in 0..=EDGE_SAMPLES {
            let t = (i as f64 / EDGE_SAMPLES as f64) * 2.0 - 1.0;
            let border = [
                (t * self.aspect, -1.0),
                (t * self.aspect, 1.0),
                (-self.aspect, t),
                (self.aspect, t),
            ];
            for (x, y) in border {
                let mono = self.pixel.src_coords(x * prescale, y * prescale);
                let coords = self.subpixel.src_coords_from::<N>(&mono);
                for chan in 0..N {
                    let m = (coords.x[chan].abs() / self.aspect).max(coords.y[chan].abs());
                    min = min.min(m);
                    max = max.max(m);
                }
            }
        }

        trace!(prescale, min, max, "border extrema");
        (min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use relens_geom::{CoordParams, Ptlens, Scaler};

    #[test]
    fn test_empty_queues_scale_to_one() {
        let subpixel = SubpixelQueue::new();
        let pixel = PixelQueue::new();
        let scaler = AutoScaler::new(&subpixel, &pixel, 1.0);
        assert_relative_eq!(
            scaler.scale::<3>(ScaleMode::Fit).unwrap(),
            1.0,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            scaler.scale::<3>(ScaleMode::Fill).unwrap(),
            1.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_linear_scale_inverts_exactly() {
        let mut subpixel = SubpixelQueue::new();
        subpixel.add_model(Scaler::new(2.0).unwrap());
        let pixel = PixelQueue::new();
        let scaler = AutoScaler::new(&subpixel, &pixel, 1.5);
        // A pure doubling needs a pre-scale of one half, in both modes.
        assert_relative_eq!(
            scaler.scale::<3>(ScaleMode::Fit).unwrap(),
            0.5,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            scaler.scale::<4>(ScaleMode::Fill).unwrap(),
            0.5,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_barrel_fill_is_unity() {
        // s(r) = 0.1 r^2 + 0.9 equals 1 exactly at r = 1, which is where
        // the edge midpoints sit on a square frame.
        let mut subpixel = SubpixelQueue::new();
        subpixel.add_model(Ptlens::new(0.0, 0.1, 0.0, CoordParams::default()));
        let pixel = PixelQueue::new();
        let scaler = AutoScaler::new(&subpixel, &pixel, 1.0);
        assert_relative_eq!(
            scaler.scale::<3>(ScaleMode::Fill).unwrap(),
            1.0,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_barrel_fit_matches_corner_equation() {
        // Fit is bound by the corners: k satisfies
        // k * sqrt(2) * s(k * sqrt(2)) = sqrt(2), i.e. 0.2 k^3 + 0.9 k = 1.
        let mut subpixel = SubpixelQueue::new();
        subpixel.add_model(Ptlens::new(0.0, 0.1, 0.0, CoordParams::default()));
        let pixel = PixelQueue::new();
        let scaler = AutoScaler::new(&subpixel, &pixel, 1.0);
        let k = scaler.scale::<3>(ScaleMode::Fit).unwrap();

        let (mut lo, mut hi) = (0.0, 2.0);
        for _ in 0..80 {
            let mid = 0.5 * (lo + hi);
            if 0.2 * mid * mid * mid + 0.9 * mid > 1.0 {
                hi = mid;
            } else {
                lo = mid;
            }
        }
        assert_relative_eq!(k, 0.5 * (lo + hi), epsilon = 1e-6);
        assert!(k < 1.0);
    }
}
