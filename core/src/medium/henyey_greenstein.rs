//! Henyey-Greenstein

use crate::math::*;

/// Computes the Henyey-Greenstein phase function. It is not normalised by
/// 1/4π; callers fold the constant into their scattering coefficient.
/// Undefined for `g = ±1` at `cos_theta = g`.
///
/// * `cos_theta` - Cosine of the angle between ray direction and light direction.
/// * `g`         - Asymmetry parameter in (-1, 1). Positive values favour
///                 forward scattering.
#[inline]
pub fn phase_hg(cos_theta: Float, g: Float) -> Float {
    let denom = 1.0 + g * g - 2.0 * g * cos_theta;
    (1.0 - g * g) / (denom * denom.sqrt())
}
