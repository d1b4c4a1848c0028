//! Halos

use haze_core::colour::*;
use haze_core::geometry::*;
use haze_core::math::*;
use haze_core::medium::*;
use haze_core::paramset::*;
use std::fmt;

mod chain;
mod density;

// Re-export
pub use chain::*;
pub use density::*;

/// How a halo affects the light passing through it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum HaloMode {
    /// Adds its own colour.
    Emitting,

    /// Adds its own colour, occluding itself as it gets denser.
    Glowing,

    /// Blends the background towards the colour map.
    Attenuating,

    /// Scatters light from the light sources.
    Dust,
}

impl HaloMode {
    /// Returns the mode by name.
    ///
    /// * `name` - One of "emitting", "glowing", "attenuating" or "dust".
    pub fn from_name(name: &str) -> Result<Self, String> {
        match name {
            "emitting" => Ok(Self::Emitting),
            "glowing" => Ok(Self::Glowing),
            "attenuating" => Ok(Self::Attenuating),
            "dust" => Ok(Self::Dust),
            _ => Err(format!("unknown halo mode '{}'", name)),
        }
    }

    /// Returns true if accumulation stops once the halo is fully dense.
    pub fn saturates(&self) -> bool {
        matches!(self, Self::Glowing | Self::Attenuating)
    }

    /// Returns true if shadow rays pass unchanged.
    pub fn ignores_light_rays(&self) -> bool {
        matches!(self, Self::Emitting | Self::Glowing)
    }
}

impl fmt::Display for HaloMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Emitting => write!(f, "emitting"),
            Self::Glowing => write!(f, "glowing"),
            Self::Attenuating => write!(f, "attenuating"),
            Self::Dust => write!(f, "dust"),
        }
    }
}

/// Shape of the region containing a halo, in container space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ContainerShape {
    /// Unit sphere at the origin.
    Sphere,

    /// Axis aligned box from (-1, -1, -1) to (1, 1, 1).
    Box,
}

impl ContainerShape {
    /// Returns the container shape by name.
    ///
    /// * `name` - One of "sphere" or "box".
    pub fn from_name(name: &str) -> Result<Self, String> {
        match name {
            "sphere" => Ok(Self::Sphere),
            "box" => Ok(Self::Box),
            _ => Err(format!("unknown halo container '{}'", name)),
        }
    }

    /// Returns the parametric range `(t_near, t_far)` where a ray in
    /// container space is inside the shape.
    ///
    /// * `r` - Ray in container space.
    pub fn intersect(&self, r: &Ray) -> Option<(Float, Float)> {
        match self {
            Self::Sphere => {
                let o = Vector3f::from(r.o);
                let a = r.d.length_squared();
                if a == 0.0 {
                    return None;
                }
                Quadratic::solve(a, 2.0 * o.dot(&r.d), o.length_squared() - 1.0)
            }
            Self::Box => {
                let mut t0 = -INFINITY;
                let mut t1 = INFINITY;
                for axis in 0..3 {
                    let o = r.o[axis];
                    let d = r.d[axis];
                    if abs(d) < EPSILON {
                        // Parallel to the slab.
                        if !(-1.0..=1.0).contains(&o) {
                            return None;
                        }
                        continue;
                    }

                    let inv_d = 1.0 / d;
                    let mut t_near = (-1.0 - o) * inv_d;
                    let mut t_far = (1.0 - o) * inv_d;
                    if t_near > t_far {
                        std::mem::swap(&mut t_near, &mut t_far);
                    }

                    t0 = max(t0, t_near);
                    t1 = min(t1, t_far);
                    if t0 > t1 {
                        return None;
                    }
                }
                Some((t0, t1))
            }
        }
    }
}

/// A volumetric density field rendered inside a container.
#[derive(Clone)]
pub struct Halo {
    /// Rendering mode.
    pub mode: HaloMode,

    /// Density in local space.
    pub density: DensityField,

    /// Colour looked up by density.
    pub colour_map: ColourMap,

    /// Phase function used by dust halos.
    pub dust_phase: PhaseFunction,

    /// Number of samples along the part of a ray inside the container.
    pub samples: usize,

    /// Maximum refinement level; 0 disables refinement.
    pub aa_level: usize,

    /// Neighbouring samples at least this far apart are refined.
    pub aa_threshold: Float,

    /// Amount of random offset applied to sample positions in [0, 1].
    pub jitter: Float,

    /// Maps local (density) space to container space.
    pub transform: Transform,

    /// Maps container space to world space.
    pub container: Transform,

    /// Shape of the container.
    pub container_shape: ContainerShape,
}

impl Halo {
    /// Create a new `Halo` filling a unit sphere at the origin, with 10
    /// samples and no refinement.
    ///
    /// * `mode`       - Rendering mode.
    /// * `density`    - Density field.
    /// * `colour_map` - Colour looked up by density.
    pub fn new(mode: HaloMode, density: DensityField, colour_map: ColourMap) -> Self {
        Self {
            mode,
            density,
            colour_map,
            dust_phase: PhaseFunction::Isotropic,
            samples: 10,
            aa_level: 0,
            aa_threshold: 0.3,
            jitter: 0.0,
            transform: Transform::default(),
            container: Transform::default(),
            container_shape: ContainerShape::Sphere,
        }
    }

    /// Create a `Halo` from a parameter set.
    ///
    /// * `params`       - Parameter set.
    /// * `quick_render` - Disables refinement.
    pub fn from_params(params: &ParamSet, quick_render: bool) -> Result<Self, String> {
        let mode = HaloMode::from_name(&params.find_one_string("mode", String::from("emitting")))?;
        let density = DensityField::from_params(params)?;
        let colour_map = params.find_colour_map("colour_map")?;

        let mut halo = Self::new(mode, density, colour_map);

        halo.dust_phase = PhaseFunction::from_name(
            &params.find_one_string("dust_type", String::from("isotropic")),
            params.find_one_float("eccentricity", 0.0),
        )?;

        let samples = params.find_one_int("samples", 10);
        if samples < 1 {
            return Err(format!("halo samples must be positive, got {}", samples));
        }
        halo.samples = samples as usize;

        let aa_level = params.find_one_int("aa_level", 0);
        if aa_level < 0 {
            warn!("halo aa_level {} clamped to 0", aa_level);
        }
        halo.aa_level = if quick_render { 0 } else { max(aa_level, 0) as usize };
        halo.aa_threshold = params.find_one_float("aa_threshold", 0.3);

        let jitter = params.find_one_float("jitter", 0.0);
        halo.jitter = clamp(jitter, 0.0, 1.0);
        if halo.jitter != jitter {
            warn!("halo jitter {} clamped to {}", jitter, halo.jitter);
        }

        halo.transform = transform_from_params(params, "")?;
        halo.container = transform_from_params(params, "container_")?;
        halo.container_shape =
            ContainerShape::from_name(&params.find_one_string("container", String::from("sphere")))?;

        debug!(
            "Halo {} {:?} {:?}, {} samples",
            halo.mode, halo.density.mapping, halo.density.falloff, halo.samples
        );
        Ok(halo)
    }

    /// Returns the part of a ray inside the container and in front of the
    /// intersection ending the ray.
    ///
    /// * `ray`   - The ray in world space.
    /// * `depth` - Distance to the intersection ending the ray.
    pub fn segment(&self, ray: &Ray, depth: Float) -> Option<(Float, Float)> {
        let r = self.container.inverse_transform_ray(ray);
        let (t0, t1) = self.container_shape.intersect(&r)?;

        let t_near = max(t0, 0.0);
        let t_far = min(t1, depth);
        if t_far > t_near {
            Some((t_near, t_far))
        } else {
            None
        }
    }

    /// Returns the length of a ray segment in container space relative to
    /// the container's diameter of 2. A segment through the centre of the
    /// sphere has thickness 1; a diagonal of the box has thickness √3.
    ///
    /// * `ray`    - The ray in world space.
    /// * `t_near` - Start of the segment.
    /// * `t_far`  - End of the segment.
    pub fn thickness(&self, ray: &Ray, t_near: Float, t_far: Float) -> Float {
        let p0 = self.container.inverse_transform_point(&ray.at(t_near));
        let p1 = self.container.inverse_transform_point(&ray.at(t_far));
        0.5 * (p1 - p0).length()
    }

    /// Maps a world space point to local space.
    ///
    /// * `p` - The point.
    pub fn to_local(&self, p: &Point3f) -> Point3f {
        let pc = self.container.inverse_transform_point(p);
        self.transform.inverse_transform_point(&pc)
    }
}

/// Builds `translate · rotate_z · rotate_y · rotate_x · scale` from the
/// parameters `{prefix}translate`, `{prefix}rotate` (degrees about each
/// axis) and `{prefix}scale`.
///
/// * `params` - Parameter set.
/// * `prefix` - Parameter name prefix.
fn transform_from_params(params: &ParamSet, prefix: &str) -> Result<Transform, String> {
    let s = params.find_one_vector3f(&format!("{}scale", prefix), Vector3f::new(1.0, 1.0, 1.0));
    if s.x == 0.0 || s.y == 0.0 || s.z == 0.0 {
        return Err(format!("halo {}scale {:?} is degenerate", prefix, s));
    }

    let r = params.find_one_vector3f(&format!("{}rotate", prefix), Vector3f::zero());
    let t = params.find_one_vector3f(&format!("{}translate", prefix), Vector3f::zero());

    Ok(translate(&t) * rotate_z(r.z) * rotate_y(r.y) * rotate_x(r.x) * scale(s.x, s.y, s.z))
}
