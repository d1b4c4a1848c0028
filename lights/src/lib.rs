//! Lights

#[macro_use]
extern crate log;

use haze_core::light::*;
use haze_core::paramset::*;
use std::sync::Arc;

mod cylinder;
mod point;
mod spot;

// Re-export.
pub use cylinder::*;
pub use point::*;
pub use spot::*;

/// Creates a light source by name from a parameter set.
///
/// * `name`   - One of "point", "spot" or "cylinder".
/// * `params` - Parameter set.
pub fn create_light(name: &str, params: &ParamSet) -> Result<ArcLight, String> {
    match name {
        "point" => Ok(Arc::new(PointLight::from_params(params)?)),
        "spot" => Ok(Arc::new(SpotLight::from_params(params)?)),
        "cylinder" => Ok(Arc::new(CylinderLight::from_params(params)?)),
        _ => Err(format!("Light '{}' unknown.", name)),
    }
}

/// Reads the media interaction flags common to all lights.
///
/// * `params` - Parameter set.
pub(crate) fn flags_from_params(params: &ParamSet) -> LightFlags {
    let mut flags = LightFlags::empty();
    if params.find_one_bool("atmosphere", true) {
        flags |= LightFlags::ATMOSPHERE;
    }
    if params.find_one_bool("atmospheric_attenuation", true) {
        flags |= LightFlags::ATMOSPHERIC_ATTENUATION;
    }
    flags
}
