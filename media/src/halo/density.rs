//! Density Fields

use haze_core::geometry::*;
use haze_core::math::*;
use haze_core::paramset::*;
use haze_core::texture::*;
use std::sync::Arc;

/// How a point in local space is reduced to a radius.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum HaloMapping {
    /// Distance from the origin.
    Spherical,

    /// Distance from the Y axis.
    Cylindrical,

    /// Distance from the X-Z plane.
    Planar,

    /// Largest absolute coordinate.
    Box,
}

impl HaloMapping {
    /// Returns the mapping by name.
    ///
    /// * `name` - One of "spherical", "cylindrical", "planar" or "box".
    pub fn from_name(name: &str) -> Result<Self, String> {
        match name {
            "spherical" => Ok(Self::Spherical),
            "cylindrical" => Ok(Self::Cylindrical),
            "planar" => Ok(Self::Planar),
            "box" => Ok(Self::Box),
            _ => Err(format!("unknown halo mapping '{}'", name)),
        }
    }

    /// Returns the radius of a point in [0, 1].
    ///
    /// * `p` - Point in local space.
    pub fn radius(&self, p: &Point3f) -> Float {
        let r = match self {
            Self::Spherical => Vector3f::from(*p).length(),
            Self::Cylindrical => (p.x * p.x + p.z * p.z).sqrt(),
            Self::Planar => abs(p.y),
            Self::Box => Vector3f::from(*p).abs().max_component(),
        };
        clamp(r, 0.0, 1.0)
    }
}

/// How density falls off with radius.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum DensityFalloff {
    /// `max·(1 - r)`.
    Linear,

    /// `max·((2r - 3)r² + 1)`, smooth at both ends.
    Cubic,

    /// `max·(1 - r)^exponent`.
    Polynomial,

    /// `max` everywhere.
    Constant,
}

impl DensityFalloff {
    /// Returns the falloff law by name.
    ///
    /// * `name` - One of "linear", "cubic", "polynomial" or "constant".
    pub fn from_name(name: &str) -> Result<Self, String> {
        match name {
            "linear" => Ok(Self::Linear),
            "cubic" => Ok(Self::Cubic),
            "polynomial" => Ok(Self::Polynomial),
            "constant" => Ok(Self::Constant),
            _ => Err(format!("unknown density falloff '{}'", name)),
        }
    }
}

/// Scalar density in [0, 1] defined over local space.
#[derive(Clone)]
pub struct DensityField {
    /// Radius mapping.
    pub mapping: HaloMapping,

    /// Falloff law.
    pub falloff: DensityFalloff,

    /// Exponent of the polynomial falloff.
    pub exponent: Float,

    /// Density at radius 0.
    pub max_value: Float,

    /// Optional displacement of the lookup point.
    pub turbulence: Option<TurbulenceParams>,

    /// Generates the displacement.
    pub noise: ArcTurbulence,
}

impl DensityField {
    /// Create a new `DensityField` without turbulence.
    ///
    /// * `mapping`   - Radius mapping.
    /// * `falloff`   - Falloff law.
    /// * `max_value` - Density at radius 0.
    pub fn new(mapping: HaloMapping, falloff: DensityFalloff, max_value: Float) -> Self {
        Self {
            mapping,
            falloff,
            exponent: 1.0,
            max_value,
            turbulence: None,
            noise: Arc::new(NoiseTurbulence),
        }
    }

    /// Create a `DensityField` from a parameter set.
    ///
    /// * `params` - Parameter set.
    pub fn from_params(params: &ParamSet) -> Result<Self, String> {
        let mapping = HaloMapping::from_name(&params.find_one_string("mapping", String::from("spherical")))?;
        let falloff = DensityFalloff::from_name(&params.find_one_string("falloff", String::from("linear")))?;

        let max_value = params.find_one_float("max_value", 1.0);
        let clamped = clamp(max_value, 0.0, 1.0);
        if clamped != max_value {
            warn!("halo max_value {} clamped to {}", max_value, clamped);
        }

        let exponent = params.find_one_float("exponent", 1.0);
        if exponent < 0.0 {
            return Err(format!("density exponent must not be negative, got {}", exponent));
        }

        let mut field = Self::new(mapping, falloff, clamped);
        field.exponent = exponent;
        field.turbulence = TurbulenceParams::from_params(params)?;
        Ok(field)
    }

    /// Returns the density at a point, clamped to [0, 1].
    ///
    /// * `p` - Point in local space.
    pub fn evaluate(&self, p: &Point3f) -> Float {
        let p = match &self.turbulence {
            Some(params) => *p + self.noise.displacement(p, params).scale_by(&params.amount),
            None => *p,
        };

        let r = self.mapping.radius(&p);
        let density = match self.falloff {
            DensityFalloff::Linear => self.max_value * (1.0 - r),
            DensityFalloff::Cubic => self.max_value * ((2.0 * r - 3.0) * r * r + 1.0),
            DensityFalloff::Polynomial => self.max_value * (1.0 - r).powf(self.exponent),
            DensityFalloff::Constant => self.max_value,
        };
        clamp(density, 0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    const FALLOFFS: [DensityFalloff; 4] = [
        DensityFalloff::Linear,
        DensityFalloff::Cubic,
        DensityFalloff::Polynomial,
        DensityFalloff::Constant,
    ];

    fn field(falloff: DensityFalloff) -> DensityField {
        let mut f = DensityField::new(HaloMapping::Spherical, falloff, 0.8);
        f.exponent = 2.5;
        f
    }

    #[test]
    fn max_value_at_centre() {
        for falloff in FALLOFFS {
            assert_eq!(field(falloff).evaluate(&Point3f::zero()), 0.8, "{:?}", falloff);
        }
    }

    #[test]
    fn edge_of_unit_radius() {
        let edge = Point3f::new(0.0, 1.0, 0.0);
        assert_eq!(field(DensityFalloff::Linear).evaluate(&edge), 0.0);
        assert_eq!(field(DensityFalloff::Cubic).evaluate(&edge), 0.0);
        assert_eq!(field(DensityFalloff::Polynomial).evaluate(&edge), 0.0);
        assert_eq!(field(DensityFalloff::Constant).evaluate(&edge), 0.8);
    }

    #[test]
    fn radius_clamped_outside_unit_radius() {
        let far = Point3f::new(3.0, 4.0, 0.0);
        assert_eq!(field(DensityFalloff::Linear).evaluate(&far), 0.0);
        assert_eq!(field(DensityFalloff::Constant).evaluate(&far), 0.8);
    }

    #[test]
    fn mappings() {
        let p = Point3f::new(0.3, -0.4, 0.0);
        assert!(approx_eq!(Float, HaloMapping::Spherical.radius(&p), 0.5, epsilon = 1e-6));
        assert!(approx_eq!(Float, HaloMapping::Cylindrical.radius(&p), 0.3, epsilon = 1e-6));
        assert!(approx_eq!(Float, HaloMapping::Planar.radius(&p), 0.4, epsilon = 1e-6));
        assert!(approx_eq!(Float, HaloMapping::Box.radius(&p), 0.4, epsilon = 1e-6));
    }

    #[test]
    fn density_clamped_to_unit_range() {
        let f = DensityField::new(HaloMapping::Spherical, DensityFalloff::Constant, 3.0);
        assert_eq!(f.evaluate(&Point3f::zero()), 1.0);

        let f = DensityField::new(HaloMapping::Spherical, DensityFalloff::Linear, -1.0);
        assert_eq!(f.evaluate(&Point3f::zero()), 0.0);
    }

    #[test]
    fn from_params_clamps_max_value() {
        let mut params = ParamSet::new();
        params.add_string("falloff", &[String::from("cubic")]);
        params.add_string("mapping", &[String::from("box")]);
        params.add_float("max_value", &[2.0]);

        let f = DensityField::from_params(&params).unwrap();
        assert_eq!(f.falloff, DensityFalloff::Cubic);
        assert_eq!(f.mapping, HaloMapping::Box);
        assert_eq!(f.max_value, 1.0);
        assert!(f.turbulence.is_none());
    }

    #[test]
    fn from_params_rejects_unknown_names() {
        let mut params = ParamSet::new();
        params.add_string("falloff", &[String::from("quartic")]);
        assert!(DensityField::from_params(&params).is_err());

        let mut params = ParamSet::new();
        params.add_string("mapping", &[String::from("toroidal")]);
        assert!(DensityField::from_params(&params).is_err());
    }

    proptest! {
        #[test]
        fn non_increasing_with_radius(r1 in 0.0..1.5f32, r2 in 0.0..1.5f32, i in 0..4usize) {
            let (near, far) = if r1 <= r2 { (r1, r2) } else { (r2, r1) };
            let f = field(FALLOFFS[i]);
            let d_near = f.evaluate(&Point3f::new(near, 0.0, 0.0));
            let d_far = f.evaluate(&Point3f::new(far, 0.0, 0.0));
            prop_assert!(d_far <= d_near + 1e-6);
        }
    }
}
