//! Turbulence

use super::vector_noise;
use crate::geometry::*;
use crate::math::*;
use crate::paramset::ParamSet;
use std::sync::Arc;

/// Parameters controlling a turbulent displacement of space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TurbulenceParams {
    /// Per-axis strength of the displacement.
    pub amount: Vector3f,

    /// Number of octaves of noise summed.
    pub octaves: usize,

    /// Amplitude multiplier between successive octaves.
    pub omega: Float,

    /// Frequency multiplier between successive octaves.
    pub lambda: Float,
}

impl Default for TurbulenceParams {
    fn default() -> Self {
        Self {
            amount: Vector3f::new(1.0, 1.0, 1.0),
            octaves: 6,
            omega: 0.5,
            lambda: 2.0,
        }
    }
}

impl TurbulenceParams {
    /// Build turbulence parameters from a parameter set. Returns `None` when
    /// the set does not request any turbulence.
    ///
    /// * `params` - Parameter set.
    pub fn from_params(params: &ParamSet) -> Result<Option<Self>, String> {
        let amount = params.find_one_vector3f("turbulence", Vector3f::zero());
        if amount == Vector3f::zero() {
            return Ok(None);
        }

        let defaults = Self::default();
        let octaves = params.find_one_int("octaves", defaults.octaves as Int);
        if octaves < 1 {
            return Err(format!("turbulence octaves must be positive, got {}", octaves));
        }

        Ok(Some(Self {
            amount,
            octaves: octaves as usize,
            omega: params.find_one_float("omega", defaults.omega),
            lambda: params.find_one_float("lambda", defaults.lambda),
        }))
    }
}

/// Interface for turbulent displacement of points.
pub trait Turbulence {
    /// Returns a displacement vector for a point. The caller scales it by
    /// `params.amount`.
    ///
    /// * `p`      - The point.
    /// * `params` - Turbulence parameters.
    fn displacement(&self, p: &Point3f, params: &TurbulenceParams) -> Vector3f;
}

/// Atomic reference counted `Turbulence`.
pub type ArcTurbulence = Arc<dyn Turbulence + Send + Sync>;

/// Turbulence as a fractal sum of vector gradient noise.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoiseTurbulence;

impl Turbulence for NoiseTurbulence {
    /// Returns the octave sum of `vector_noise()`.
    ///
    /// * `p`      - The point.
    /// * `params` - Turbulence parameters.
    fn displacement(&self, p: &Point3f, params: &TurbulenceParams) -> Vector3f {
        let mut sum = Vector3f::zero();
        let mut lambda = 1.0;
        let mut o = 1.0;
        for _i in 0..params.octaves {
            let q = Point3f::new(p.x * lambda, p.y * lambda, p.z * lambda);
            sum += vector_noise(&q) * o;
            lambda *= params.lambda;
            o *= params.omega;
        }
        sum
    }
}
