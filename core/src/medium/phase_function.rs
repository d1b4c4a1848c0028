//! Phase Function

use super::phase_hg;
use crate::math::*;
use std::fmt;

/// Models the angular distribution of light scattered by a medium as a
/// function of the cosine between the ray direction and the direction to
/// the light.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PhaseFunction {
    /// Scatters equally in all directions.
    Isotropic,

    /// Scattering by particles much smaller than the wavelength.
    Rayleigh,

    /// Murphy's approximation of Mie scattering for sparse particles.
    MieHazy,

    /// Murphy's approximation of Mie scattering for dense particles.
    MieMurky,

    /// Henyey-Greenstein with the given eccentricity.
    HenyeyGreenstein(Float),
}

impl PhaseFunction {
    /// Returns the phase function by name. Names are those used in
    /// parameter sets: "isotropic", "rayleigh", "mie-hazy", "mie-murky" and
    /// "henyey-greenstein".
    ///
    /// * `name`         - Name of the phase function.
    /// * `eccentricity` - Henyey-Greenstein asymmetry; ignored by the others.
    pub fn from_name(name: &str, eccentricity: Float) -> Result<Self, String> {
        match name {
            "isotropic" => Ok(Self::Isotropic),
            "rayleigh" => Ok(Self::Rayleigh),
            "mie-hazy" => Ok(Self::MieHazy),
            "mie-murky" => Ok(Self::MieMurky),
            "henyey-greenstein" => {
                if eccentricity <= -1.0 || eccentricity >= 1.0 {
                    Err(format!(
                        "eccentricity {} outside (-1, 1) for henyey-greenstein",
                        eccentricity
                    ))
                } else {
                    Ok(Self::HenyeyGreenstein(eccentricity))
                }
            }
            _ => Err(format!("unknown phase function '{}'", name)),
        }
    }

    /// Returns the value of the phase function.
    ///
    /// * `cos_theta` - Cosine of the angle between the ray direction and the
    ///                 direction to the light.
    pub fn p(&self, cos_theta: Float) -> Float {
        match self {
            Self::Isotropic => 1.0,
            Self::Rayleigh => 0.5 * (1.0 + cos_theta * cos_theta),
            Self::MieHazy => 0.1 * (1.0 + 0.03515625 * (1.0 + cos_theta).powi(8)),
            Self::MieMurky => 0.0196078 * (1.0 + 1.1641532e-8 * (1.0 + cos_theta).powi(32)),
            Self::HenyeyGreenstein(g) => phase_hg(cos_theta, *g),
        }
    }
}

impl Default for PhaseFunction {
    fn default() -> Self {
        Self::Isotropic
    }
}

impl fmt::Display for PhaseFunction {
    /// Formats the value using the given formatter.
    ///
    /// * `f` - Formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Isotropic => write!(f, "isotropic"),
            Self::Rayleigh => write!(f, "rayleigh"),
            Self::MieHazy => write!(f, "mie-hazy"),
            Self::MieMurky => write!(f, "mie-murky"),
            Self::HenyeyGreenstein(g) => write!(f, "henyey-greenstein({})", g),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;
    use proptest::prelude::*;

    #[test]
    fn rayleigh_forward() {
        assert_eq!(PhaseFunction::Rayleigh.p(1.0), 1.0);
        assert_eq!(PhaseFunction::Rayleigh.p(0.0), 0.5);
    }

    #[test]
    fn mie_forward() {
        assert!(approx_eq!(Float, PhaseFunction::MieHazy.p(1.0), 1.0, epsilon = 1e-5));
        assert!(approx_eq!(Float, PhaseFunction::MieMurky.p(1.0), 1.0, epsilon = 1e-4));
    }

    #[test]
    fn parse_names() {
        assert_eq!(
            PhaseFunction::from_name("mie-murky", 0.0),
            Ok(PhaseFunction::MieMurky)
        );
        assert_eq!(
            PhaseFunction::from_name("henyey-greenstein", 0.3),
            Ok(PhaseFunction::HenyeyGreenstein(0.3))
        );
        assert!(PhaseFunction::from_name("henyey-greenstein", 1.0).is_err());
        assert!(PhaseFunction::from_name("fog", 0.0).is_err());
    }

    proptest! {
        #[test]
        fn isotropic_is_one(c in -1.0..=1.0f32) {
            prop_assert_eq!(PhaseFunction::Isotropic.p(c), 1.0);
        }

        #[test]
        fn hg_zero_is_isotropic(c in -1.0..=1.0f32) {
            prop_assert_eq!(PhaseFunction::HenyeyGreenstein(0.0).p(c), 1.0);
        }

        #[test]
        fn non_negative(c in -1.0..=1.0f32, g in -0.9..0.9f32) {
            prop_assert!(PhaseFunction::Rayleigh.p(c) >= 0.0);
            prop_assert!(PhaseFunction::MieHazy.p(c) >= 0.0);
            prop_assert!(PhaseFunction::MieMurky.p(c) >= 0.0);
            prop_assert!(PhaseFunction::HenyeyGreenstein(g).p(c) > 0.0);
        }
    }
}
