//! Projection geometry conversion model.

use super::{PixelModel, SubpixelModel};
use crate::coord::CoordParams;
use crate::error::GeomResult;
use crate::geometry::{LensGeometry, Projection};

/// Diagonal of the full 35mm frame (36mm x 24mm) in millimetres.
const FULL_FRAME_DIAG: f64 = 43.26661530556787;

/// Sentinel source coordinate far outside any frame; the interpolators
/// resolve it to the null value.
const OUT_OF_FRAME: f64 = 1.0e6;

/// Conversion between two lens projection geometries.
///
/// A destination coordinate is lifted to spherical view angles through the
/// *destination* geometry and projected back to the image plane through the
/// *source* geometry, converting e.g. a fisheye capture into a rectilinear
/// rendering. Both geometries share one focal length, given in millimetres
/// and translated into normalised-frame units via the input crop factor and
/// aspect ratio.
///
/// Where either conversion leg is undefined (view angle outside the
/// destination's field, radius outside the source's image circle) the pixel
/// has no source; its coordinates are parked far outside the frame so the
/// sampling stage yields the null value.
pub struct GeometryConvert {
    src_geom: Box<dyn LensGeometry>,
    dst_geom: Box<dyn LensGeometry>,
    coord: CoordParams,
}

impl GeometryConvert {
    /// Creates a conversion from `src` (the capture geometry) to `dst` (the
    /// rendering geometry) with a shared focal length in millimetres.
    ///
    /// # Errors
    ///
    /// Rejects non-positive focal lengths.
    pub fn new(
        src: Projection,
        dst: Projection,
        focal_length: f64,
        coord: CoordParams,
    ) -> GeomResult<Self> {
        let aspect = coord.input_aspect();
        let norm_focal = focal_length * 2.0 * coord.input_crop() * (1.0 + aspect * aspect).sqrt()
            / FULL_FRAME_DIAG;
        Ok(Self {
            src_geom: src.geometry(norm_focal)?,
            dst_geom: dst.geometry(norm_focal)?,
            coord,
        })
    }

    #[inline]
    fn apply(&self, x: &mut f64, y: &mut f64) {
        let cf = self.coord.coord_fact();
        let xf = *x * cf;
        let yf = *y * cf;
        let mapped = self
            .dst_geom
            .to_spherical(xf, yf)
            .and_then(|(phi, theta)| self.src_geom.to_cartesian(phi, theta));
        match mapped {
            Some((sx, sy)) => {
                *x = sx / cf;
                *y = sy / cf;
            }
            None => {
                *x = OUT_OF_FRAME;
                *y = OUT_OF_FRAME;
            }
        }
    }
}

impl Clone for GeometryConvert {
    fn clone(&self) -> Self {
        Self {
            src_geom: self.src_geom.clone(),
            dst_geom: self.dst_geom.clone(),
            coord: self.coord,
        }
    }
}

impl std::fmt::Debug for GeometryConvert {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeometryConvert")
            .field("focal_length", &self.src_geom.focal_length())
            .field("coord", &self.coord)
            .finish()
    }
}

impl PixelModel for GeometryConvert {
    fn src_coords(&self, x: &mut f64, y: &mut f64) {
        self.apply(x, y);
    }

    fn set_coord_params(&mut self, params: CoordParams) {
        self.coord = params;
    }

    fn clone_box(&self) -> Box<dyn PixelModel> {
        Box::new(self.clone())
    }
}

impl SubpixelModel for GeometryConvert {
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
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rejects_bad_focal_length() {
        let coord = CoordParams::default();
        assert!(
            GeometryConvert::new(Projection::Rectilinear, Projection::Rectilinear, 0.0, coord)
                .is_err()
        );
        assert!(
            GeometryConvert::new(Projection::Rectilinear, Projection::Rectilinear, -5.0, coord)
                .is_err()
        );
    }

    #[test]
    fn test_same_geometry_is_identity() {
        let model = GeometryConvert::new(
            Projection::FisheyeEquidistant,
            Projection::FisheyeEquidistant,
            20.0,
            CoordParams::default(),
        )
        .unwrap();
        for &(x0, y0) in &[(0.0, 0.0), (0.4, -0.3), (-0.8, 0.6)] {
            let mut x = x0;
            let mut y = y0;
            PixelModel::src_coords(&model, &mut x, &mut y);
            assert_relative_eq!(x, x0, epsilon = 1e-9);
            assert_relative_eq!(y, y0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_centre_is_fixed_point() {
        let model = GeometryConvert::new(
            Projection::Rectilinear,
            Projection::FisheyeEquidistant,
            50.0,
            CoordParams::default(),
        )
        .unwrap();
        let mut x = 0.0;
        let mut y = 0.0;
        PixelModel::src_coords(&model, &mut x, &mut y);
        assert_relative_eq!(x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rectilinear_source_pulls_outward() {
        // Rendering a rectilinear capture as equidistant: tan(theta) grows
        // faster than theta, so source radii exceed destination radii.
        let model = GeometryConvert::new(
            Projection::Rectilinear,
            Projection::FisheyeEquidistant,
            18.0,
            CoordParams::default(),
        )
        .unwrap();
        let mut x = 0.8;
        let mut y = 0.0;
        PixelModel::src_coords(&model, &mut x, &mut y);
        assert!(x > 0.8);
        assert_relative_eq!(y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_out_of_domain_parks_outside_frame() {
        // A short rectilinear focal length cannot supply the view angles an
        // equidistant rendering asks for near its image-circle edge.
        let model = GeometryConvert::new(
            Projection::Rectilinear,
            Projection::FisheyeEquidistant,
            8.0,
            CoordParams::default(),
        )
        .unwrap();
        // Walk outward until the destination angle passes 90 degrees.
        let mut parked = false;
        for i in 1..100 {
            let mut x = i as f64 * 0.05;
            let mut y = 0.0;
            PixelModel::src_coords(&model, &mut x, &mut y);
            if x >= OUT_OF_FRAME {
                parked = true;
                break;
            }
        }
        assert!(parked);
    }
}
