//! Visibility Tester

use super::Light;
use crate::colour::*;
use crate::geometry::*;
use crate::math::*;
use std::sync::Arc;

/// Light arriving at a point from an unoccluded light source.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LightSample {
    /// Unit direction from the point towards the light.
    pub wi: Vector3f,

    /// Distance from the point to the light.
    pub distance: Float,

    /// Colour of the light arriving at the point.
    pub colour: Colour,
}

impl LightSample {
    /// Returns the sample for a light assuming nothing blocks it.
    ///
    /// * `light` - The light source.
    /// * `p`     - The point being lit.
    pub fn unoccluded(light: &dyn Light, p: &Point3f) -> Self {
        let d = light.position() - *p;
        let distance = d.length();
        let wi = if distance > 0.0 { d / distance } else { d };
        Self {
            wi,
            distance,
            colour: light.colour(),
        }
    }
}

/// Shadow testing interface used by the volumetric samplers.
pub trait VisibilityTester {
    /// Traces from a point towards a light and returns the light arriving at
    /// the point, or `None` if it is occluded.
    ///
    /// * `light` - The light source.
    /// * `p`     - The point being lit.
    /// * `ray`   - The ray being integrated; lets implementations skip
    ///             surfaces that the ray itself started on.
    fn test(&self, light: &dyn Light, p: &Point3f, ray: &Ray) -> Option<LightSample>;
}

/// Atomic reference counted `VisibilityTester`.
pub type ArcVisibilityTester = Arc<dyn VisibilityTester + Send + Sync>;

/// A visibility tester for scenes without occluders.
#[derive(Copy, Clone, Debug, Default)]
pub struct Unoccluded;

impl VisibilityTester for Unoccluded {
    fn test(&self, light: &dyn Light, p: &Point3f, _ray: &Ray) -> Option<LightSample> {
        Some(LightSample::unoccluded(light, p))
    }
}

/// An opaque sphere.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sphere {
    /// Centre.
    pub centre: Point3f,

    /// Radius.
    pub radius: Float,
}

impl Sphere {
    /// Returns true if the segment from `p` along unit direction `wi` up to
    /// `distance` hits the sphere.
    ///
    /// * `p`        - Start of the segment.
    /// * `wi`       - Unit direction.
    /// * `distance` - Length of the segment.
    fn blocks(&self, p: &Point3f, wi: &Vector3f, distance: Float) -> bool {
        let oc = *p - self.centre;
        let b = 2.0 * oc.dot(wi);
        let c = oc.length_squared() - self.radius * self.radius;
        match Quadratic::solve(1.0, b, c) {
            Some((t0, t1)) => t1 > 0.0 && t0 < distance,
            None => false,
        }
    }
}

/// A visibility tester that checks shadow rays against a list of spheres.
#[derive(Clone, Debug, Default)]
pub struct SphereOccluders {
    /// The occluding spheres.
    pub spheres: Vec<Sphere>,
}

impl SphereOccluders {
    /// Create a new `SphereOccluders`.
    ///
    /// * `spheres` - The occluding spheres.
    pub fn new(spheres: Vec<Sphere>) -> Self {
        Self { spheres }
    }
}

impl VisibilityTester for SphereOccluders {
    fn test(&self, light: &dyn Light, p: &Point3f, _ray: &Ray) -> Option<LightSample> {
        let sample = LightSample::unoccluded(light, p);
        if self
            .spheres
            .iter()
            .any(|s| s.blocks(p, &sample.wi, sample.distance))
        {
            None
        } else {
            Some(sample)
        }
    }
}
