//! Lens geometry projections.
//!
//! A projection maps between cartesian image-plane coordinates `(x, y)` and
//! spherical view coordinates `(phi, theta)`: `phi` is the angle in the
//! image plane, `theta` the angle to the optical axis. Both directions can
//! be undefined (a rectilinear lens cannot see `theta >= pi/2`; a fisheye
//! image has a finite image circle), which the conversions signal with
//! `None` rather than an error: an undefined mapping simply means the output
//! pixel has no source and samples as the null value.

mod fisheye;
mod rectilinear;

pub use fisheye::{FisheyeEquidistant, FisheyeEquisolid, FisheyeOrtho, FisheyeStereo};
pub use rectilinear::Rectilinear;

use crate::error::{GeomError, GeomResult};

/// Mapping between cartesian image coordinates and spherical view angles
/// for a particular lens geometry.
pub trait LensGeometry: Send + Sync {
    /// The focal length the geometry was built with.
    fn focal_length(&self) -> f64;

    /// Converts cartesian `(x, y)` to spherical `(phi, theta)`.
    ///
    /// Returns `None` when the radius lies outside the geometry's image
    /// circle.
    fn to_spherical(&self, x: f64, y: f64) -> Option<(f64, f64)>;

    /// Converts spherical `(phi, theta)` to cartesian `(x, y)`.
    ///
    /// Returns `None` when `theta` lies outside the geometry's field of
    /// view.
    fn to_cartesian(&self, phi: f64, theta: f64) -> Option<(f64, f64)>;

    /// Deep copy, for storage inside cloneable models.
    fn clone_box(&self) -> Box<dyn LensGeometry>;
}

impl Clone for Box<dyn LensGeometry> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// In-plane angle of `(x, y)` at radius `r`, in `[0, 2*pi)`.
///
/// Degenerates to 0 at the image centre (`r = 0`) instead of producing NaN.
#[inline]
pub(crate) fn plane_angle(x: f64, y: f64, r: f64) -> f64 {
    if r == 0.0 {
        return 0.0;
    }
    let phi = (x / r).acos();
    if y > 0.0 {
        2.0 * std::f64::consts::PI - phi
    } else {
        phi
    }
}

/// Cartesian coordinates for in-plane angle `phi` and radius `r`.
#[inline]
pub(crate) fn plane_coords(phi: f64, r: f64) -> (f64, f64) {
    (phi.cos() * r, -phi.sin() * r)
}

/// The supported lens projection kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Projection {
    /// Rectilinear ('gnomonic') geometry: straight lines stay straight.
    Rectilinear,
    /// Equidistant fisheye: `r = f * theta`.
    FisheyeEquidistant,
    /// Equisolid-angle fisheye: `r = 2f * sin(theta/2)`.
    FisheyeEquisolid,
    /// Orthographic fisheye: `r = f * sin(theta)`.
    FisheyeOrtho,
    /// Stereographic fisheye: `r = 2f * tan(theta/2)`.
    FisheyeStereo,
}

impl Projection {
    /// Builds the geometry for this projection kind.
    ///
    /// # Errors
    ///
    /// Rejects non-positive focal lengths.
    pub fn geometry(self, focal_length: f64) -> GeomResult<Box<dyn LensGeometry>> {
        if !(focal_length > 0.0) {
            return Err(GeomError::InvalidParameter(format!(
                "focal length must be > 0, got {focal_length}"
            )));
        }
        Ok(match self {
            Projection::Rectilinear => Box::new(Rectilinear::new(focal_length)),
            Projection::FisheyeEquidistant => Box::new(FisheyeEquidistant::new(focal_length)),
            Projection::FisheyeEquisolid => Box::new(FisheyeEquisolid::new(focal_length)),
            Projection::FisheyeOrtho => Box::new(FisheyeOrtho::new(focal_length)),
            Projection::FisheyeStereo => Box::new(FisheyeStereo::new(focal_length)),
        })
    }
}
