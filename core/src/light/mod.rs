//! Light

use crate::colour::*;
use crate::geometry::*;
use crate::math::*;
use std::fmt;
use std::sync::Arc;

mod light_flags;
mod visibility_tester;
mod volume;

// Re-export
pub use light_flags::*;
pub use visibility_tester::*;
pub use volume::*;

/// Kinds of light sources.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LightKind {
    /// Radiates in all directions from a point.
    Point,

    /// Radiates in a cone around an axis.
    Spot,

    /// Radiates parallel to an axis within a fixed radius.
    Cylinder,
}

impl fmt::Display for LightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Point => write!(f, "point"),
            Self::Spot => write!(f, "spot"),
            Self::Cylinder => write!(f, "cylinder"),
        }
    }
}

/// Light trait provides common behavior.
pub trait Light {
    /// Returns the kind of light.
    fn kind(&self) -> LightKind;

    /// Returns the media interaction flags.
    fn flags(&self) -> LightFlags;

    /// Returns the light position.
    fn position(&self) -> Point3f;

    /// Returns the light colour.
    fn colour(&self) -> Colour;

    /// Returns the interval `[t1, t2]` of the ray parameter where the light
    /// can illuminate points on the ray, ignoring occlusion. The interval is
    /// clipped to `[0, depth]`; `None` if the ray misses the lit volume.
    ///
    /// * `ray`   - The ray.
    /// * `depth` - Distance to the intersection ending the ray.
    fn intersect_ray(&self, ray: &Ray, depth: Float) -> Option<(Float, Float)>;

    /// Returns true if the light scatters in the atmosphere.
    fn interacts_with_atmosphere(&self) -> bool {
        self.flags().matches(LightFlags::ATMOSPHERE)
    }
}

/// Atomic reference counted `Light`.
pub type ArcLight = Arc<dyn Light + Send + Sync>;

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed;

    impl Light for Fixed {
        fn kind(&self) -> LightKind {
            LightKind::Point
        }

        fn flags(&self) -> LightFlags {
            LightFlags::default()
        }

        fn position(&self) -> Point3f {
            Point3f::new(0.0, 10.0, 0.0)
        }

        fn colour(&self) -> Colour {
            Colour::grey(1.0)
        }

        fn intersect_ray(&self, _ray: &Ray, depth: Float) -> Option<(Float, Float)> {
            Some((0.0, depth))
        }
    }

    #[test]
    fn unoccluded_sample() {
        let s = Unoccluded
            .test(&Fixed, &Point3f::new(0.0, 4.0, 0.0), &Ray::default())
            .unwrap();
        assert_eq!(s.wi, Vector3f::new(0.0, 1.0, 0.0));
        assert_eq!(s.distance, 6.0);
        assert_eq!(s.colour, Colour::grey(1.0));
    }

    #[test]
    fn sphere_blocks_light() {
        let occluders = SphereOccluders::new(vec![Sphere {
            centre: Point3f::new(0.0, 7.0, 0.0),
            radius: 1.0,
        }]);
        let ray = Ray::default();
        assert!(occluders
            .test(&Fixed, &Point3f::new(0.0, 4.0, 0.0), &ray)
            .is_none());
        assert!(occluders
            .test(&Fixed, &Point3f::new(5.0, 4.0, 0.0), &ray)
            .is_some());
        // Sphere behind the point does not block.
        assert!(occluders
            .test(&Fixed, &Point3f::new(0.0, 9.0, 0.0), &ray)
            .is_some());
    }

    #[test]
    fn display_kind() {
        assert_eq!(LightKind::Cylinder.to_string(), "cylinder");
    }
}
