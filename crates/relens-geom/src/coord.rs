//! Shared coordinate parameterisation of correction models.
//!
//! Correction parameters are usually calibrated against a particular sensor
//! (aspect ratio and crop factor). When such parameters are applied to an
//! image from a *different* sensor, the normalised coordinates have to be
//! rescaled or the correction lands at the wrong radius. [`CoordParams`]
//! carries the calibration aspect/crop next to the input aspect/crop and
//! derives the single scalar that bridges them.

/// Aspect/crop parameterisation shared by all correction models.
///
/// The derived factor is
///
/// ```text
/// coord_fact = sqrt(1 + param_aspect^2) / sqrt(1 + input_aspect^2)
///            * param_crop / input_crop
/// ```
///
/// Models multiply incoming normalised coordinates by `coord_fact`, apply
/// their own mathematics in the calibration frame, and divide the factor
/// back out. With matching aspects and crops the factor is exactly `1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordParams {
    param_aspect: f64,
    input_aspect: f64,
    param_crop: f64,
    input_crop: f64,
    coord_fact: f64,
}

impl CoordParams {
    /// Creates parameters from explicit calibration and input values.
    pub fn new(param_aspect: f64, input_aspect: f64, param_crop: f64, input_crop: f64) -> Self {
        let mut params = Self {
            param_aspect,
            input_aspect,
            param_crop,
            input_crop,
            coord_fact: 1.0,
        };
        params.recalc();
        params
    }

    /// Creates parameters when only the input aspect is known.
    ///
    /// The calibration aspect is assumed to be the landscape orientation of
    /// the input aspect; both crops default to 1.
    pub fn for_aspect(input_aspect: f64) -> Self {
        let param_aspect = if input_aspect > 1.0 {
            input_aspect
        } else {
            1.0 / input_aspect
        };
        Self::new(param_aspect, input_aspect, 1.0, 1.0)
    }

    /// Replaces all four parameters and recomputes the factor.
    pub fn set(
        &mut self,
        param_aspect: f64,
        input_aspect: f64,
        param_crop: f64,
        input_crop: f64,
    ) {
        self.param_aspect = param_aspect;
        self.input_aspect = input_aspect;
        self.param_crop = param_crop;
        self.input_crop = input_crop;
        self.recalc();
    }

    /// Aspect ratio the parameters were calibrated against.
    #[inline]
    pub fn param_aspect(&self) -> f64 {
        self.param_aspect
    }

    /// Aspect ratio of the input image.
    #[inline]
    pub fn input_aspect(&self) -> f64 {
        self.input_aspect
    }

    /// Crop factor the parameters were calibrated against.
    #[inline]
    pub fn param_crop(&self) -> f64 {
        self.param_crop
    }

    /// Crop factor of the input image.
    #[inline]
    pub fn input_crop(&self) -> f64 {
        self.input_crop
    }

    /// The derived coordinate rescaling factor.
    #[inline]
    pub fn coord_fact(&self) -> f64 {
        self.coord_fact
    }

    fn recalc(&mut self) {
        self.coord_fact = (1.0 + self.param_aspect * self.param_aspect).sqrt()
            / (1.0 + self.input_aspect * self.input_aspect).sqrt()
            * self.param_crop
            / self.input_crop;
    }
}

impl Default for CoordParams {
    fn default() -> Self {
        Self::new(1.0, 1.0, 1.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_matching_params_give_unity() {
        // Exact equality is part of the contract, not just a tolerance.
        let p = CoordParams::new(1.5, 1.5, 1.6, 1.6);
        assert_eq!(p.coord_fact(), 1.0);

        let p = CoordParams::new(0.75, 0.75, 1.0, 1.0);
        assert_eq!(p.coord_fact(), 1.0);
    }

    #[test]
    fn test_for_aspect_flips_portrait() {
        let p = CoordParams::for_aspect(2.0 / 3.0);
        assert_relative_eq!(p.param_aspect(), 1.5, max_relative = 1e-12);
        assert_eq!(p.input_aspect(), 2.0 / 3.0);
    }

    #[test]
    fn test_crop_scales_linearly() {
        let p = CoordParams::new(1.5, 1.5, 2.0, 1.0);
        assert_relative_eq!(p.coord_fact(), 2.0, max_relative = 1e-12);
    }

    #[test]
    fn test_aspect_term() {
        // 3:2 parameters applied to a square input.
        let p = CoordParams::new(1.5, 1.0, 1.0, 1.0);
        let expected = (1.0f64 + 2.25).sqrt() / 2.0f64.sqrt();
        assert_relative_eq!(p.coord_fact(), expected, max_relative = 1e-12);
    }

    #[test]
    fn test_set_recomputes() {
        let mut p = CoordParams::default();
        assert_eq!(p.coord_fact(), 1.0);
        p.set(1.5, 1.5, 1.0, 2.0);
        assert_relative_eq!(p.coord_fact(), 0.5, max_relative = 1e-12);
    }
}
