//! Rectilinear ('gnomonic') lens geometry.

use super::{plane_angle, plane_coords, LensGeometry};
use std::f64::consts::FRAC_PI_2;

/// Rectilinear geometry: `r = f * tan(theta)`.
///
/// The projection of an ordinary (non-fisheye) lens. Straight lines in the
/// scene stay straight in the image; the field of view is strictly below
/// 180 degrees, so `theta >= pi/2` has no cartesian image.
#[derive(Debug, Clone, Copy)]
pub struct Rectilinear {
    focal_length: f64,
}

impl Rectilinear {
    /// Creates the geometry for the given focal length.
    #[inline]
    pub fn new(focal_length: f64) -> Self {
        Self { focal_length }
    }
}

impl LensGeometry for Rectilinear {
    #[inline]
    fn focal_length(&self) -> f64 {
        self.focal_length
    }

    fn to_spherical(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        let r = (x * x + y * y).sqrt();
        let phi = plane_angle(x, y, r);
        let theta = (r / self.focal_length).atan();
        Some((phi, theta))
    }

    fn to_cartesian(&self, phi: f64, theta: f64) -> Option<(f64, f64)> {
        if theta >= FRAC_PI_2 {
            return None;
        }
        let r = theta.tan() * self.focal_length;
        Some(plane_coords(phi, r))
    }

    fn clone_box(&self) -> Box<dyn LensGeometry> {
        Box::new(*self)
    }
}
