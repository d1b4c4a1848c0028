//! Demo Scene

use haze_core::colour::*;
use haze_core::geometry::*;
use haze_core::light::*;
use haze_core::math::*;
use haze_core::medium::*;
use haze_core::paramset::*;
use haze_core::rng::UniformSampler;
use haze_core::scene::Scene;
use haze_lights::create_light;
use haze_media::*;
use std::sync::Arc;

/// Distance to the sky for rays that miss the ground.
const SKY_DEPTH: Float = 200.0;

/// A street lit by spot lights on a hazy night, with a glowing lantern.
pub struct DemoScene {
    /// Lights and occluders.
    pub scene: Scene,

    /// Haze filling the scene.
    pub atmosphere: Atmosphere,

    /// Halos around the lantern.
    pub halos: HaloChain,

    /// Camera position.
    pub eye: Point3f,

    /// Half-width of the image plane at unit distance.
    pub half_width: Float,
}

impl DemoScene {
    /// Builds the scene from parameter sets.
    ///
    /// * `quick_render` - Disables refinement in the media.
    pub fn new(quick_render: bool) -> Result<Self, String> {
        let warm = spot_params(
            Point3f::new(-4.0, 8.0, 10.0),
            Point3f::new(-2.0, 0.0, 12.0),
            [1.0, 0.9, 0.7],
            20.0,
        );
        let cold = spot_params(
            Point3f::new(5.0, 8.0, 16.0),
            Point3f::new(3.0, 0.0, 14.0),
            [0.6, 0.7, 1.0],
            15.0,
        );
        let lights = vec![
            create_light("spot", &warm)?,
            create_light("spot", &cold)?,
            create_light("cylinder", &cylinder_params())?,
            create_light("point", &point_params())?,
        ];

        let occluders = SphereOccluders::new(vec![Sphere {
            centre: Point3f::new(-2.0, 1.5, 12.0),
            radius: 1.5,
        }]);

        let scene = Scene::new(lights, Arc::new(occluders));
        let atmosphere = Atmosphere::from_params(&atmosphere_params(), quick_render)?;
        let halos = HaloChain::new(vec![
            Halo::from_params(&glow_params(), quick_render)?,
            Halo::from_params(&wisp_params(), quick_render)?,
        ]);

        Ok(Self {
            scene,
            atmosphere,
            halos,
            eye: Point3f::new(0.0, 2.0, -8.0),
            half_width: (30.0 as Float).to_radians().tan(),
        })
    }

    /// Returns the camera ray through the centre of a pixel.
    ///
    /// * `x`      - Column.
    /// * `y`      - Row; 0 is the top.
    /// * `width`  - Number of columns.
    /// * `height` - Number of rows.
    pub fn camera_ray(&self, x: usize, y: usize, width: usize, height: usize) -> Ray {
        let aspect = height as Float / width as Float;
        let u = (2.0 * (x as Float + 0.5) / width as Float - 1.0) * self.half_width;
        let v = (1.0 - 2.0 * (y as Float + 0.5) / height as Float) * self.half_width * aspect;
        Ray::new(self.eye, Vector3f::new(u, v, 1.0).normalize(), INFINITY)
    }

    /// Returns the distance to and colour of the surface a ray hits: a
    /// checkered ground plane at y = 0 or the sky.
    ///
    /// * `ray` - The ray.
    pub fn surface(&self, ray: &Ray) -> (Float, Colour) {
        if ray.d.y < 0.0 {
            let t = -ray.o.y / ray.d.y;
            if t < SKY_DEPTH {
                let p = ray.at(t);
                let check = (p.x.floor() + p.z.floor()) as Int & 1;
                let grey = if check == 0 { 0.35 } else { 0.2 };
                return (t, Colour::grey(grey));
            }
        }
        (SKY_DEPTH, Colour::rgb(0.02, 0.02, 0.05))
    }

    /// Returns the colour seen along a camera ray.
    ///
    /// * `ray` - The ray.
    /// * `rng` - Random source for jittering.
    pub fn shade(&self, ray: &Ray, rng: &mut dyn UniformSampler) -> Colour {
        let (depth, colour) = self.surface(ray);
        let colour = self.halos.apply(&self.scene, ray, depth, colour, false, rng);
        self.atmosphere.apply(&self.scene, ray, depth, colour, false, rng)
    }
}

fn spot_params(from: Point3f, to: Point3f, rgb: [Float; 3], falloff: Float) -> ParamSet {
    let mut params = ParamSet::new();
    params.add_point3f("from", &[from]);
    params.add_point3f("to", &[to]);
    params.add_rgb("colour", &rgb);
    params.add_float("falloff", &[falloff]);
    params
}

fn cylinder_params() -> ParamSet {
    let mut params = ParamSet::new();
    params.add_point3f("from", &[Point3f::new(0.0, 10.0, 30.0)]);
    params.add_point3f("to", &[Point3f::new(0.0, 0.0, 30.0)]);
    params.add_rgb("colour", &[0.4, 1.0, 0.5]);
    params.add_float("scale", &[0.5]);
    params.add_float("radius", &[1.5]);
    params
}

fn point_params() -> ParamSet {
    let mut params = ParamSet::new();
    params.add_point3f("from", &[Point3f::new(2.0, 3.0, 6.0)]);
    params.add_rgb("colour", &[0.3, 0.25, 0.2]);
    params.add_bool("atmospheric_attenuation", &[false]);
    params
}

fn atmosphere_params() -> ParamSet {
    let mut params = ParamSet::new();
    params.add_string("type", &[String::from("mie-hazy")]);
    params.add_int("samples", &[20]);
    params.add_float("distance", &[60.0]);
    params.add_float("scattering", &[0.3]);
    params.add_colour("colour", &[Colour::new(0.7, 0.7, 0.8, 0.0, 0.1)]);
    params.add_int("aa_level", &[2]);
    params.add_float("aa_threshold", &[0.1]);
    params.add_float("jitter", &[0.5]);
    params
}

fn glow_params() -> ParamSet {
    let mut params = ParamSet::new();
    params.add_string("mode", &[String::from("glowing")]);
    params.add_string("falloff", &[String::from("cubic")]);
    params.add_float("max_value", &[0.8]);
    params.add_int("samples", &[16]);
    params.add_int("aa_level", &[1]);
    params.add_float("jitter", &[0.3]);
    params.add_vector3f("container_translate", &[Vector3f::new(1.5, 2.5, 8.0)]);
    params.add_vector3f("container_scale", &[Vector3f::new(1.2, 1.2, 1.2)]);
    params.add_float("colour_map_values", &[0.0, 0.5, 1.0]);
    params.add_colour(
        "colour_map_colours",
        &[
            Colour::rgb(0.0, 0.0, 0.0),
            Colour::new(1.0, 0.5, 0.1, 0.0, 0.5),
            Colour::new(1.0, 0.9, 0.6, 0.0, 1.0),
        ],
    );
    params
}

fn wisp_params() -> ParamSet {
    let mut params = ParamSet::new();
    params.add_string("mode", &[String::from("emitting")]);
    params.add_string("mapping", &[String::from("cylindrical")]);
    params.add_string("falloff", &[String::from("polynomial")]);
    params.add_float("exponent", &[2.0]);
    params.add_float("max_value", &[0.4]);
    params.add_vector3f("turbulence", &[Vector3f::new(0.3, 0.6, 0.3)]);
    params.add_int("octaves", &[4]);
    params.add_vector3f("container_translate", &[Vector3f::new(1.5, 2.5, 8.0)]);
    params.add_vector3f("container_scale", &[Vector3f::new(1.2, 1.2, 1.2)]);
    params
}

#[cfg(test)]
mod tests {
    use super::*;
    use haze_core::rng::RNG;

    #[test]
    fn builds_from_params() {
        let demo = DemoScene::new(false).unwrap();
        assert_eq!(demo.scene.lights.len(), 4);
        assert_eq!(demo.halos.halos.len(), 2);
        assert_eq!(demo.atmosphere.aa_level, 2);

        let quick = DemoScene::new(true).unwrap();
        assert_eq!(quick.atmosphere.aa_level, 0);
        assert!(quick.halos.halos.iter().all(|h| h.aa_level == 0));
    }

    #[test]
    fn ground_and_sky() {
        let demo = DemoScene::new(true).unwrap();

        let down = Ray::new(Point3f::new(0.5, 2.0, 0.5), Vector3f::new(0.0, -1.0, 0.0), INFINITY);
        let (depth, _) = demo.surface(&down);
        assert_eq!(depth, 2.0);

        let up = Ray::new(Point3f::new(0.0, 2.0, 0.0), Vector3f::new(0.0, 1.0, 0.0), INFINITY);
        assert_eq!(demo.surface(&up).0, SKY_DEPTH);
    }

    #[test]
    fn centre_ray_looks_ahead() {
        let demo = DemoScene::new(true).unwrap();
        let r = demo.camera_ray(1, 1, 3, 3);
        assert!(r.d.x.abs() < 1e-6);
        assert!(r.d.y.abs() < 1e-6);
        assert!(r.d.z > 0.99);
    }

    #[test]
    fn shading_is_finite() {
        let demo = DemoScene::new(true).unwrap();
        let mut rng = RNG::new(3);
        for (x, y) in [(0, 0), (4, 2), (7, 7)] {
            let c = demo.shade(&demo.camera_ray(x, y, 8, 8), &mut rng);
            assert!(!c.has_nans());
        }
    }
}
