//! Rays

use super::{Float, Point3f, Vector3f, INFINITY};
use std::fmt::{Debug, Formatter, Result};

/// A Ray
#[derive(Copy, Clone)]
pub struct Ray {
    /// Origin.
    pub o: Point3f,

    /// Direction.
    pub d: Vector3f,

    /// Maximum extent of the ray.
    pub t_max: Float,
}

impl Ray {
    /// Returns a new ray.
    ///
    /// * `o`      - Origin.
    /// * `d`      - Direction.
    /// * `t_max`  - Maximum extent of the ray.
    pub fn new(o: Point3f, d: Vector3f, t_max: Float) -> Self {
        Self { o, d, t_max }
    }

    /// Returns true if either coordinate is NaN.
    pub fn has_nans(&self) -> bool {
        self.o.has_nans() || self.d.has_nans() || self.t_max.is_nan()
    }

    /// Get position along the ray at given parameter.
    ///
    /// * `t` - Parameter to evaluate.
    pub fn at(&self, t: Float) -> Point3f {
        self.o + self.d * t
    }
}

impl Default for Ray {
    /// Returns a ray at the origin pointing down +z.
    fn default() -> Self {
        Self::new(Point3f::zero(), Vector3f::new(0.0, 0.0, 1.0), INFINITY)
    }
}

impl Debug for Ray {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.debug_struct("Ray")
            .field("o", &self.o)
            .field("d", &self.d)
            .field("t_max", &self.t_max)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_along_ray() {
        let r = Ray::new(
            Point3f::new(1.0, 0.0, 0.0),
            Vector3f::new(0.0, 2.0, 0.0),
            INFINITY,
        );
        assert_eq!(r.at(1.5), Point3f::new(1.0, 3.0, 0.0));
    }
}
