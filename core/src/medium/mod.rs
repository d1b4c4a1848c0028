//! Medium

use crate::colour::*;
use crate::geometry::*;
use crate::math::*;
use crate::rng::UniformSampler;
use crate::scene::Scene;
use std::sync::Arc;

mod adaptive_refiner;
mod henyey_greenstein;
mod light_intervals;
mod phase_function;

// Re-exports
pub use adaptive_refiner::*;
pub use henyey_greenstein::*;
pub use light_intervals::*;
pub use phase_function::*;

/// Per-step scattering weights below this end an interval early.
pub const BLACK_LEVEL: Float = 0.003;

/// Default cap on the accumulated scattering per channel.
pub const SATURATION_LEVEL: Float = 1.0;

/// Medium trait for volumetric effects applied to the colour carried by a
/// ray.
pub trait Medium {
    /// Returns the colour arriving at the ray origin after the medium acts on
    /// the colour `colour` found at distance `depth`.
    ///
    /// * `scene`        - The scene.
    /// * `ray`          - The ray.
    /// * `depth`        - Distance to the intersection ending the ray.
    /// * `colour`       - Colour at the intersection.
    /// * `is_light_ray` - True for shadow rays, which only receive
    ///                    attenuation.
    /// * `rng`          - Random source for jittering.
    fn apply(
        &self,
        scene: &Scene,
        ray: &Ray,
        depth: Float,
        colour: Colour,
        is_light_ray: bool,
        rng: &mut dyn UniformSampler,
    ) -> Colour;
}

/// Atomic reference counted `Medium`.
pub type ArcMedium = Arc<dyn Medium + Send + Sync>;
