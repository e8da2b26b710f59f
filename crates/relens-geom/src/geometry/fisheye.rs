//! Fisheye lens geometries.
//!
//! Four classical fisheye mapping functions. All share the in-plane angle
//! handling of [`plane_angle`]/[`plane_coords`]; they differ only in how the
//! radius relates to the angle from the optical axis.

use super::{plane_angle, plane_coords, LensGeometry};
use std::f64::consts::FRAC_PI_2;

/// Equidistant fisheye: `r = f * theta`.
///
/// The most common fisheye mapping; the radius is proportional to the view
/// angle. The usable image circle ends at `r = f * pi/2`.
#[derive(Debug, Clone, Copy)]
pub struct FisheyeEquidistant {
    focal_length: f64,
}

impl FisheyeEquidistant {
    /// Creates the geometry for the given focal length.
    #[inline]
    pub fn new(focal_length: f64) -> Self {
        Self { focal_length }
    }
}

impl LensGeometry for FisheyeEquidistant {
    #[inline]
    fn focal_length(&self) -> f64 {
        self.focal_length
    }

    fn to_spherical(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        let r = (x * x + y * y).sqrt();
        if r >= self.focal_length * FRAC_PI_2 {
            return None;
        }
        let phi = plane_angle(x, y, r);
        let theta = r / self.focal_length;
        Some((phi, theta))
    }

    fn to_cartesian(&self, phi: f64, theta: f64) -> Option<(f64, f64)> {
        let r = theta * self.focal_length;
        Some(plane_coords(phi, r))
    }

    fn clone_box(&self) -> Box<dyn LensGeometry> {
        Box::new(*self)
    }
}

/// Equisolid-angle fisheye: `r = 2f * sin(theta/2)`.
///
/// Preserves surface area; used by most real fisheye lenses. The `asin`
/// argument leaves its domain at `r >= 2f`.
#[derive(Debug, Clone, Copy)]
pub struct FisheyeEquisolid {
    focal_length: f64,
}

impl FisheyeEquisolid {
    /// Creates the geometry for the given focal length.
    #[inline]
    pub fn new(focal_length: f64) -> Self {
        Self { focal_length }
    }
}

impl LensGeometry for FisheyeEquisolid {
    #[inline]
    fn focal_length(&self) -> f64 {
        self.focal_length
    }

    fn to_spherical(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        let r = (x * x + y * y).sqrt();
        let asin_arg = r / (2.0 * self.focal_length);
        if asin_arg >= 1.0 {
            return None;
        }
        let phi = plane_angle(x, y, r);
        let theta = 2.0 * asin_arg.asin();
        Some((phi, theta))
    }

    fn to_cartesian(&self, phi: f64, theta: f64) -> Option<(f64, f64)> {
        let r = 2.0 * self.focal_length * (theta / 2.0).sin();
        Some(plane_coords(phi, r))
    }

    fn clone_box(&self) -> Box<dyn LensGeometry> {
        Box::new(*self)
    }
}

/// Orthographic fisheye: `r = f * sin(theta)`.
///
/// Projects onto the image plane as seen from infinity; the image circle
/// ends at `r = f` and the field of view at 180 degrees.
#[derive(Debug, Clone, Copy)]
pub struct FisheyeOrtho {
    focal_length: f64,
}

impl FisheyeOrtho {
    /// Creates the geometry for the given focal length.
    #[inline]
    pub fn new(focal_length: f64) -> Self {
        Self { focal_length }
    }
}

impl LensGeometry for FisheyeOrtho {
    #[inline]
    fn focal_length(&self) -> f64 {
        self.focal_length
    }

    fn to_spherical(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        let r = (x * x + y * y).sqrt();
        let asin_arg = r / self.focal_length;
        if asin_arg >= 1.0 {
            return None;
        }
        let phi = plane_angle(x, y, r);
        let theta = asin_arg.asin();
        Some((phi, theta))
    }

    fn to_cartesian(&self, phi: f64, theta: f64) -> Option<(f64, f64)> {
        if theta >= FRAC_PI_2 {
            return None;
        }
        let r = theta.sin() * self.focal_length;
        Some(plane_coords(phi, r))
    }

    fn clone_box(&self) -> Box<dyn LensGeometry> {
        Box::new(*self)
    }
}

/// Stereographic fisheye: `r = 2f * tan(theta/2)`.
///
/// Rare but visually pleasing, since shapes near the border stay closer to
/// their true proportions. Neither direction leaves its domain for finite
/// inputs.
#[derive(Debug, Clone, Copy)]
pub struct FisheyeStereo {
    focal_length: f64,
}

impl FisheyeStereo {
    /// Creates the geometry for the given focal length.
    #[inline]
    pub fn new(focal_length: f64) -> Self {
        Self { focal_length }
    }
}

impl LensGeometry for FisheyeStereo {
    #[inline]
    fn focal_length(&self) -> f64 {
        self.focal_length
    }

    fn to_spherical(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        let r = (x * x + y * y).sqrt();
        let phi = plane_angle(x, y, r);
        let theta = 2.0 * (r / (2.0 * self.focal_length)).atan();
        Some((phi, theta))
    }

    fn to_cartesian(&self, phi: f64, theta: f64) -> Option<(f64, f64)> {
        let r = 2.0 * self.focal_length * (theta / 2.0).tan();
        Some(plane_coords(phi, r))
    }

    fn clone_box(&self) -> Box<dyn LensGeometry> {
        Box::new(*self)
    }
}
