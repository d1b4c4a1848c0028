//! Spot Light Source

use haze_core::colour::*;
use haze_core::geometry::*;
use haze_core::light::*;
use haze_core::math::*;
use haze_core::paramset::*;

/// Implements a spot light source that emits light in a cone of directions
/// from its position. The cone is infinite and its half-angle is the angle
/// whose cosine is `cos_falloff`.
#[derive(Clone, Debug)]
pub struct SpotLight {
    /// Media interaction flags.
    pub flags: LightFlags,

    /// Position (apex of the cone).
    pub p_light: Point3f,

    /// Unit direction of the cone axis.
    pub axis: Vector3f,

    /// Colour.
    pub colour: Colour,

    /// Cosine of the cone half-angle.
    pub cos_falloff: Float,
}

impl SpotLight {
    /// Returns a new `SpotLight`.
    ///
    /// * `p_light`     - Position.
    /// * `point_at`    - A point on the cone axis.
    /// * `colour`      - Colour.
    /// * `cos_falloff` - Cosine of the cone half-angle in (0, 1).
    /// * `flags`       - Media interaction flags.
    pub fn new(
        p_light: Point3f,
        point_at: Point3f,
        colour: Colour,
        cos_falloff: Float,
        flags: LightFlags,
    ) -> Result<Self, String> {
        if !(cos_falloff > 0.0 && cos_falloff < 1.0) {
            return Err(format!(
                "spot light cone cosine {} not in (0, 1)",
                cos_falloff
            ));
        }

        let axis = point_at - p_light;
        if axis.length_squared() == 0.0 {
            return Err(String::from("spot light points at its own position"));
        }

        Ok(Self {
            flags,
            p_light,
            axis: axis.normalize(),
            colour,
            cos_falloff,
        })
    }

    /// Create a `SpotLight` from given parameter set. The cone is given by
    /// its half-angle `falloff` in degrees.
    ///
    /// * `params` - Parameter set.
    pub fn from_params(params: &ParamSet) -> Result<Self, String> {
        let colour = params.find_one_colour("colour", Colour::grey(1.0));
        let scale = params.find_one_float("scale", 1.0);
        let from = params.find_one_point3f("from", Point3f::zero());
        let to = params.find_one_point3f("to", Point3f::new(0.0, 0.0, 1.0));
        let falloff = params.find_one_float("falloff", 30.0);
        if !(falloff > 0.0 && falloff < 90.0) {
            return Err(format!("spot light falloff {} not in (0, 90) degrees", falloff));
        }

        let light = Self::new(
            from,
            to,
            colour * scale,
            falloff.to_radians().cos(),
            super::flags_from_params(params),
        )?;
        debug!("spot light at {:?} with half-angle {}", from, falloff);
        Ok(light)
    }
}

impl Light for SpotLight {
    fn kind(&self) -> LightKind {
        LightKind::Spot
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

    /// Intersects the ray with the cone `(W·A)² = cos²·|W|²` where `W` is the
    /// offset of a ray point from the apex and `A` the axis. The quadric also
    /// contains the backward nappe, which the half-space `W·A >= 0` removes.
    fn intersect_ray(&self, ray: &Ray, depth: Float) -> Option<(Float, Float)> {
        let v = ray.o - self.p_light;
        let d = ray.d;
        let cos2 = self.cos_falloff * self.cos_falloff;

        let h0 = v.dot(&self.axis);
        let hd = d.dot(&self.axis);

        let a = hd * hd - cos2 * d.dot(&d);
        let b = 2.0 * (h0 * hd - cos2 * v.dot(&d));
        let c = h0 * h0 - cos2 * v.dot(&v);

        clip_to_light_volume(a, b, c, h0, hd, depth)
    }
}
