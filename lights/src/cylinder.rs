//! Cylinder Light Source

use haze_core::colour::*;
use haze_core::geometry::*;
use haze_core::light::*;
use haze_core::math::*;
use haze_core::paramset::*;

/// Implements a light source that emits parallel light along an axis inside
/// an infinite cylinder. Only the half of the cylinder in front of the
/// light position is lit.
#[derive(Clone, Debug)]
pub struct CylinderLight {
    /// Media interaction flags.
    pub flags: LightFlags,

    /// Position (centre of the cap).
    pub p_light: Point3f,

    /// Unit direction of the cylinder axis.
    pub axis: Vector3f,

    /// Colour.
    pub colour: Colour,

    /// Radius of the cylinder.
    pub radius: Float,
}

impl CylinderLight {
    /// Returns a new `CylinderLight`.
    ///
    /// * `p_light`  - Position.
    /// * `point_at` - A point on the cylinder axis.
    /// * `colour`   - Colour.
    /// * `radius`   - Radius of the cylinder.
    /// * `flags`    - Media interaction flags.
    pub fn new(
        p_light: Point3f,
        point_at: Point3f,
        colour: Colour,
        radius: Float,
        flags: LightFlags,
    ) -> Result<Self, String> {
        if !(radius > 0.0) {
            return Err(format!("cylinder light radius {} must be positive", radius));
        }

        let axis = point_at - p_light;
        if axis.length_squared() == 0.0 {
            return Err(String::from("cylinder light points at its own position"));
        }

        Ok(Self {
            flags,
            p_light,
            axis: axis.normalize(),
            colour,
            radius,
        })
    }

    /// Create a `CylinderLight` from given parameter set.
    ///
    /// * `params` - Parameter set.
    pub fn from_params(params: &ParamSet) -> Result<Self, String> {
        let colour = params.find_one_colour("colour", Colour::grey(1.0));
        let scale = params.find_one_float("scale", 1.0);
        let from = params.find_one_point3f("from", Point3f::zero());
        let to = params.find_one_point3f("to", Point3f::new(0.0, 0.0, 1.0));
        let radius = params.find_one_float("radius", 1.0);

        let light = Self::new(
            from,
            to,
            colour * scale,
            radius,
            super::flags_from_params(params),
        )?;
        debug!("cylinder light at {:?} with radius {}", from, radius);
        Ok(light)
    }
}

impl Light for CylinderLight {
    fn kind(&self) -> LightKind {
        LightKind::Cylinder
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

    /// Intersects the ray with the cylinder `|W|² - (W·A)² = r²` where `W`
    /// is the offset of a ray point from the light and `A` the axis, bounded
    /// by the cap plane `W·A = 0`.
    fn intersect_ray(&self, ray: &Ray, depth: Float) -> Option<(Float, Float)> {
        let v = ray.o - self.p_light;
        let d = ray.d;

        let h0 = v.dot(&self.axis);
        let hd = d.dot(&self.axis);

        let a = -(d.dot(&d) - hd * hd);
        let b = -2.0 * (v.dot(&d) - h0 * hd);
        let c = self.radius * self.radius - (v.dot(&v) - h0 * h0);

        clip_to_light_volume(a, b, c, h0, hd, depth)
    }
}
