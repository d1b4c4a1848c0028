//! Point Light Source

use haze_core::colour::*;
use haze_core::geometry::*;
use haze_core::light::*;
use haze_core::math::*;
use haze_core::paramset::*;

/// Implements an isotropic point light source that emits the same amount of
/// light in all directions.
#[derive(Clone, Debug)]
pub struct PointLight {
    /// Media interaction flags.
    pub flags: LightFlags,

    /// Position.
    pub p_light: Point3f,

    /// Colour.
    pub colour: Colour,
}

impl PointLight {
    /// Returns a new `PointLight`.
    ///
    /// * `p_light` - Position.
    /// * `colour`  - Colour.
    /// * `flags`   - Media interaction flags.
    pub fn new(p_light: Point3f, colour: Colour, flags: LightFlags) -> Self {
        Self {
            flags,
            p_light,
            colour,
        }
    }

    /// Create a `PointLight` from given parameter set.
    ///
    /// * `params` - Parameter set.
    pub fn from_params(params: &ParamSet) -> Result<Self, String> {
        let colour = params.find_one_colour("colour", Colour::grey(1.0));
        let scale = params.find_one_float("scale", 1.0);
        let from = params.find_one_point3f("from", Point3f::zero());

        Ok(Self::new(
            from,
            colour * scale,
            super::flags_from_params(params),
        ))
    }
}

impl Light for PointLight {
    fn kind(&self) -> LightKind {
        LightKind::Point
    }

    fn flags(&self) -> LightFlags {
        self.flags
    }

    fn position(&self) -> Point3f {
        self.p_light
    }

    fn colour(&self) -> Colour {
        self.colour
    }

    /// A point light reaches the whole ray.
    fn intersect_ray(&self, _ray: &Ray, depth: Float) -> Option<(Float, Float)> {
        Some((0.0, depth))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lights_whole_ray() {
        let light = PointLight::new(Point3f::zero(), Colour::grey(1.0), LightFlags::default());
        let ray = Ray::new(
            Point3f::new(3.0, 1.0, -2.0),
            Vector3f::new(0.0, 0.0, 1.0),
            INFINITY,
        );
        assert_eq!(light.intersect_ray(&ray, 10.0), Some((0.0, 10.0)));
    }

    #[test]
    fn scaled_colour() {
        let mut params = ParamSet::new();
        params.add_rgb("colour", &[1.0, 0.5, 0.0]);
        params.add_float("scale", &[2.0]);
        params.add_point3f("from", &[Point3f::new(0.0, 4.0, 0.0)]);
        let light = PointLight::from_params(&params).unwrap();
        assert_eq!(light.colour(), Colour::rgb(2.0, 1.0, 0.0));
        assert_eq!(light.position(), Point3f::new(0.0, 4.0, 0.0));
    }
}
