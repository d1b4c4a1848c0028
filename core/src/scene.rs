//! Scene

use crate::geometry::*;
use crate::light::*;
use crate::{stat_inc, stat_percent, stat_register_fns};
use std::sync::Arc;

stat_percent!(
    "Lights/Occluded shadow tests",
    OCCLUDED_TESTS,
    TOTAL_SHADOW_TESTS,
    shadow_test_stats
);

stat_register_fns!(shadow_test_stats);

/// The scene collaborators the volumetric effects consult.
#[derive(Clone)]
pub struct Scene {
    /// All light sources in the scene.
    pub lights: Vec<ArcLight>,

    /// Shadow testing.
    pub visibility: ArcVisibilityTester,
}

impl Scene {
    /// Creates a new `Scene`.
    ///
    /// * `lights`     - All light sources in the scene.
    /// * `visibility` - Shadow testing.
    pub fn new(lights: Vec<ArcLight>, visibility: ArcVisibilityTester) -> Self {
        register_stats();

        debug!("Scene with {} lights", lights.len());
        Self { lights, visibility }
    }

    /// Creates a new `Scene` without occluders.
    ///
    /// * `lights` - All light sources in the scene.
    pub fn unoccluded(lights: Vec<ArcLight>) -> Self {
        Self::new(lights, Arc::new(Unoccluded))
    }

    /// Tests whether a light reaches a point and returns the light arriving
    /// there.
    ///
    /// * `light` - The light source.
    /// * `p`     - The point being lit.
    /// * `ray`   - The ray being integrated.
    pub fn shadow_test(&self, light: &ArcLight, p: &Point3f, ray: &Ray) -> Option<LightSample> {
        stat_inc!(TOTAL_SHADOW_TESTS, 1);

        let sample = self.visibility.test(light.as_ref(), p, ray);
        if sample.is_none() {
            stat_inc!(OCCLUDED_TESTS, 1);
        }
        sample
    }
}
