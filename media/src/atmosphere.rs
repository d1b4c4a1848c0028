//! Atmosphere

use haze_core::colour::*;
use haze_core::geometry::*;
use haze_core::math::*;
use haze_core::medium::*;
use haze_core::paramset::*;
use haze_core::rng::UniformSampler;
use haze_core::scene::Scene;
use haze_core::{
    stat_counter, stat_dist, stat_inc, stat_int_distribution, stat_percent, stat_register_fns,
};

stat_counter!("Atmosphere/Samples", ATMOSPHERE_SAMPLES, atmosphere_sample_stats);
stat_counter!(
    "Atmosphere/Refinement samples",
    REFINEMENT_SAMPLES,
    refinement_sample_stats
);
stat_percent!(
    "Atmosphere/Intervals ended at black level",
    BLACK_LEVEL_INTERVALS,
    TOTAL_INTERVALS,
    interval_stats
);

stat_int_distribution!(
    "Atmosphere/Lit intervals per ray",
    LIT_INTERVALS,
    lit_interval_stats
);

stat_register_fns!(
    atmosphere_sample_stats,
    refinement_sample_stats,
    interval_stats,
    lit_interval_stats,
);

/// Haze filling the whole scene. Light sources inside it scatter light
/// towards the viewer and everything behind it is attenuated with distance.
#[derive(Clone, Debug)]
pub struct Atmosphere {
    /// Scattering phase function.
    pub phase: PhaseFunction,

    /// Number of samples per lit interval.
    pub samples: usize,

    /// Distance at which the extinction factor falls to `1/e`.
    pub distance: Float,

    /// Scattering coefficient.
    pub scattering: Float,

    /// Colour of the haze. Its transmit component is the minimum
    /// transmittance regardless of distance.
    pub colour: Colour,

    /// Maximum refinement level; 0 disables refinement.
    pub aa_level: usize,

    /// Neighbouring samples at least this far apart are refined.
    pub aa_threshold: Float,

    /// Amount of random offset applied to sample positions in [0, 1].
    pub jitter: Float,

    /// Per-step weight `extinction·step` below which an interval ends.
    pub black_level: Float,

    /// Cap on the accumulated scattering per channel.
    pub saturation_level: Float,
}

impl Atmosphere {
    /// Create a new `Atmosphere` without refinement or jitter.
    ///
    /// * `phase`      - Scattering phase function.
    /// * `samples`    - Number of samples per lit interval.
    /// * `distance`   - Extinction distance.
    /// * `scattering` - Scattering coefficient.
    /// * `colour`     - Colour of the haze.
    pub fn new(
        phase: PhaseFunction,
        samples: usize,
        distance: Float,
        scattering: Float,
        colour: Colour,
    ) -> Self {
        register_stats();

        Self {
            phase,
            samples,
            distance,
            scattering,
            colour,
            aa_level: 0,
            aa_threshold: 0.3,
            jitter: 0.0,
            black_level: BLACK_LEVEL,
            saturation_level: SATURATION_LEVEL,
        }
    }

    /// Create an `Atmosphere` from a parameter set.
    ///
    /// * `params`       - Parameter set.
    /// * `quick_render` - Disables refinement.
    pub fn from_params(params: &ParamSet, quick_render: bool) -> Result<Self, String> {
        let eccentricity = params.find_one_float("eccentricity", 0.0);
        let phase = PhaseFunction::from_name(
            &params.find_one_string("type", String::from("isotropic")),
            eccentricity,
        )?;

        let samples = params.find_one_int("samples", 10);
        if samples < 1 {
            return Err(format!("atmosphere samples must be positive, got {}", samples));
        }

        let distance = params.find_one_float("distance", 100.0);
        if distance <= 0.0 {
            return Err(format!("atmosphere distance must be positive, got {}", distance));
        }

        let mut atmosphere = Self::new(
            phase,
            samples as usize,
            distance,
            params.find_one_float("scattering", 1.0),
            params.find_one_colour("colour", Colour::default()),
        );

        let aa_level = params.find_one_int("aa_level", 0);
        if aa_level < 0 {
            warn!("atmosphere aa_level {} clamped to 0", aa_level);
        }
        atmosphere.aa_level = if quick_render { 0 } else { max(aa_level, 0) as usize };
        atmosphere.aa_threshold = params.find_one_float("aa_threshold", 0.3);

        let jitter = params.find_one_float("jitter", 0.0);
        atmosphere.jitter = clamp(jitter, 0.0, 1.0);
        if atmosphere.jitter != jitter {
            warn!("atmosphere jitter {} clamped to {}", jitter, atmosphere.jitter);
        }

        let black_level = params.find_one_float("black_level", BLACK_LEVEL);
        if !(black_level > 0.0) {
            return Err(format!("atmosphere black_level must be positive, got {}", black_level));
        }
        atmosphere.black_level = black_level;

        let saturation_level = params.find_one_float("saturation_level", SATURATION_LEVEL);
        if !(saturation_level > 0.0) {
            return Err(format!(
                "atmosphere saturation_level must be positive, got {}",
                saturation_level
            ));
        }
        atmosphere.saturation_level = saturation_level;

        debug!("{:?}", atmosphere);
        Ok(atmosphere)
    }

    /// Returns the fraction of light surviving a distance `t`.
    ///
    /// * `t` - Distance through the haze.
    pub fn extinction(&self, t: Float) -> Float {
        (-t / self.distance).exp()
    }

    /// Returns the light scattered towards the ray origin at distance `t`.
    /// Only the lights of the interval reaching `t` are shadow tested. Only
    /// the RGB channels are set.
    ///
    /// * `scene`    - The scene.
    /// * `ray`      - The ray.
    /// * `t`        - Distance along the ray.
    /// * `interval` - The active interval containing `t`.
    pub fn sample(&self, scene: &Scene, ray: &Ray, t: Float, interval: &ActiveInterval) -> Colour {
        stat_inc!(ATMOSPHERE_SAMPLES, 1);

        let p = ray.at(t);
        let d = ray.d.normalize();

        let mut c = Colour::default();
        for span in interval.lights.iter().filter(|span| span.contains(t)) {
            if let Some(ls) = scene.shadow_test(span.light, &p, ray) {
                let w = self.phase.p(d.dot(&ls.wi)) * self.scattering;
                c.red += ls.colour.red * w;
                c.green += ls.colour.green * w;
                c.blue += ls.colour.blue * w;
            }
        }
        c
    }

    /// Returns the light scattered along a ray by all lit intervals, weighted
    /// by the extinction and step length. Only the RGB channels are set.
    ///
    /// * `scene` - The scene.
    /// * `ray`   - The ray.
    /// * `depth` - Distance to the intersection ending the ray.
    /// * `rng`   - Random source for jittering.
    fn scattered(
        &self,
        scene: &Scene,
        ray: &Ray,
        depth: Float,
        rng: &mut dyn UniformSampler,
    ) -> Colour {
        let lit = LightIntervals::new(&scene.lights, ray, depth, self.saturation_level);
        stat_dist!(LIT_INTERVALS, lit.intervals.len() as i64);

        // The weight underflows to 0 on unbounded intervals.
        let black_level = max(self.black_level, Float::MIN_POSITIVE);

        let mut sum = Colour::default();
        for interval in lit.intervals.iter() {
            stat_inc!(TOTAL_INTERVALS, 1);

            let t_end = min(interval.t2, depth);
            let step = min(interval.width(), self.distance) / self.samples as Float;

            let mut refiner = AdaptiveRefiner::new(
                self.aa_level,
                self.aa_threshold,
                self.jitter,
                |t: Float| self.sample(scene, ray, t, interval),
                |a: &Colour, b: &Colour| a.distance3(b),
            );

            let mut prev: Option<(Float, Colour)> = None;
            let mut saturated = false;
            let mut primary = 0_usize;
            loop {
                let t = interval.t1
                    + (primary as Float + 0.5) * step
                    + self.jitter * step * (rng.uniform_float() - 0.5);
                if t >= t_end {
                    break;
                }

                let mut c = refiner.sample_at(t);
                primary += 1;

                if let Some((t_prev, mut c_prev)) = prev {
                    if refiner.needs_refinement(&c_prev, &c) {
                        (c_prev, c) = refiner.supersample(rng, 1, t_prev, c_prev, t, c);
                    }
                    sum += c_prev * (self.extinction(t_prev) * step);
                }
                prev = Some((t, c));

                if self.extinction(t) * step < black_level {
                    stat_inc!(BLACK_LEVEL_INTERVALS, 1);
                    break;
                }
                if lit.is_saturated(&sum) {
                    saturated = true;
                    break;
                }
            }

            if let Some((t_prev, c_prev)) = prev {
                sum += c_prev * (self.extinction(t_prev) * step);
            }
            stat_inc!(REFINEMENT_SAMPLES, (refiner.samples_taken() - primary) as i64);

            if saturated || lit.is_saturated(&sum) {
                break;
            }
        }
        sum
    }
}

impl Medium for Atmosphere {
    /// Composites the scattered light and the attenuated background. Light
    /// rays only receive the attenuation.
    ///
    /// * `scene`        - The scene.
    /// * `ray`          - The ray.
    /// * `depth`        - Distance to the intersection ending the ray.
    /// * `colour`       - Colour at the intersection.
    /// * `is_light_ray` - True for shadow rays.
    /// * `rng`          - Random source for jittering.
    fn apply(
        &self,
        scene: &Scene,
        ray: &Ray,
        depth: Float,
        colour: Colour,
        is_light_ray: bool,
        rng: &mut dyn UniformSampler,
    ) -> Colour {
        let sum = if is_light_ray || self.scattering == 0.0 {
            Colour::default()
        } else {
            self.scattered(scene, ray, depth, rng)
        };

        let k = max(self.extinction(depth), self.colour.transmit);
        let tint = (1.0 - k) * self.colour.filter;

        let mut out = colour * k;
        out.red += tint * self.colour.red * colour.red + sum.red * self.colour.red;
        out.green += tint * self.colour.green * colour.green + sum.green * self.colour.green;
        out.blue += tint * self.colour.blue * colour.blue + sum.blue * self.colour.blue;
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;
    use haze_core::light::*;
    use haze_core::rng::RNG;
    use haze_lights::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Unoccluded visibility that counts the shadow tests made.
    #[derive(Default)]
    struct CountingTester {
        tests: AtomicUsize,
    }

    impl CountingTester {
        fn count(&self) -> usize {
            self.tests.load(Ordering::Relaxed)
        }
    }

    impl VisibilityTester for CountingTester {
        fn test(&self, light: &dyn Light, p: &Point3f, ray: &Ray) -> Option<LightSample> {
            self.tests.fetch_add(1, Ordering::Relaxed);
            Unoccluded.test(light, p, ray)
        }
    }

    /// Returns the number of shadow tests made rendering one camera ray
    /// through a point light of the given brightness.
    ///
    /// * `atmosphere` - The haze.
    /// * `brightness` - Light intensity.
    /// * `depth`      - Distance to the intersection.
    fn count_shadow_tests(atmosphere: &Atmosphere, brightness: Float, depth: Float) -> (usize, Colour) {
        let tester = Arc::new(CountingTester::default());
        let light: ArcLight = Arc::new(PointLight::new(
            Point3f::new(0.0, 2.0, 5.0),
            Colour::grey(brightness),
            LightFlags::default(),
        ));
        let scene = Scene::new(vec![light], tester.clone());

        let mut rng = RNG::new(0);
        let out = atmosphere.apply(&scene, &camera_ray(), depth, background(), false, &mut rng);
        (tester.count(), out)
    }

    fn background() -> Colour {
        Colour::new(0.2, 0.4, 0.6, 0.1, 0.3)
    }

    fn haze() -> Atmosphere {
        Atmosphere::new(PhaseFunction::Isotropic, 10, 10.0, 0.5, Colour::grey(1.0))
    }

    fn lit_scene(visibility: ArcVisibilityTester) -> Scene {
        let light: ArcLight = Arc::new(PointLight::new(
            Point3f::new(0.0, 2.0, 5.0),
            Colour::grey(1.0),
            LightFlags::default(),
        ));
        Scene::new(vec![light], visibility)
    }

    fn camera_ray() -> Ray {
        Ray::new(Point3f::zero(), Vector3f::new(0.0, 0.0, 1.0), INFINITY)
    }

    #[test]
    fn no_lights_attenuates_background() {
        let scene = Scene::unoccluded(vec![]);
        let atmosphere = Atmosphere::new(PhaseFunction::Isotropic, 10, 10.0, 1.0, Colour::default());
        let mut rng = RNG::new(0);

        let bg = background();
        let out = atmosphere.apply(&scene, &camera_ray(), 5.0, bg, false, &mut rng);

        let k = (-0.5 as Float).exp();
        for ch in 0..COLOUR_CHANNELS {
            assert!(approx_eq!(Float, out[ch], bg[ch] * k, epsilon = 1e-6));
        }
    }

    #[test]
    fn minimum_transmittance_limits_attenuation() {
        let scene = Scene::unoccluded(vec![]);
        let colour = Colour::new(0.0, 0.0, 0.0, 0.0, 0.8);
        let atmosphere = Atmosphere::new(PhaseFunction::Isotropic, 10, 1.0, 1.0, colour);
        let mut rng = RNG::new(0);

        let out = atmosphere.apply(&scene, &camera_ray(), 100.0, Colour::grey(1.0), false, &mut rng);
        assert!(approx_eq!(Float, out.red, 0.8, epsilon = 1e-6));
    }

    #[test]
    fn filter_tints_background() {
        let scene = Scene::unoccluded(vec![]);
        let colour = Colour::new(1.0, 0.0, 0.0, 1.0, 0.0);
        let atmosphere = Atmosphere::new(PhaseFunction::Isotropic, 10, 10.0, 1.0, colour);
        let mut rng = RNG::new(0);

        let out = atmosphere.apply(&scene, &camera_ray(), 10.0, Colour::grey(1.0), false, &mut rng);
        // Red passes through the filter, green and blue are extinguished.
        assert!(approx_eq!(Float, out.red, 1.0, epsilon = 1e-6));
        assert!(approx_eq!(Float, out.green, (-1.0 as Float).exp(), epsilon = 1e-6));
    }

    #[test]
    fn lit_haze_scatters_light() {
        let scene = lit_scene(Arc::new(Unoccluded));
        let mut rng = RNG::new(0);

        let bg = background();
        let out = haze().apply(&scene, &camera_ray(), 10.0, bg, false, &mut rng);
        let attenuated = bg * (-1.0 as Float).exp();

        assert!(out.red > attenuated.red);
        assert!(out.green > attenuated.green);
        assert!(out.blue > attenuated.blue);
        assert!(approx_eq!(Float, out.filter, attenuated.filter, epsilon = 1e-6));
        assert!(approx_eq!(Float, out.transmit, attenuated.transmit, epsilon = 1e-6));
    }

    #[test]
    fn occluded_light_does_not_scatter() {
        let occluder = SphereOccluders::new(vec![Sphere {
            centre: Point3f::new(0.0, 2.0, 5.0),
            radius: 1.5,
        }]);
        let scene = lit_scene(Arc::new(occluder));
        let mut rng = RNG::new(0);

        let bg = background();
        let out = haze().apply(&scene, &camera_ray(), 10.0, bg, false, &mut rng);
        let attenuated = bg * (-1.0 as Float).exp();
        for ch in 0..COLOUR_CHANNELS {
            assert!(approx_eq!(Float, out[ch], attenuated[ch], epsilon = 1e-6));
        }
    }

    #[test]
    fn light_rays_only_attenuated() {
        let scene = lit_scene(Arc::new(Unoccluded));
        let mut rng = RNG::new(0);

        let bg = background();
        let out = haze().apply(&scene, &camera_ray(), 10.0, bg, true, &mut rng);
        let attenuated = bg * (-1.0 as Float).exp();
        for ch in 0..COLOUR_CHANNELS {
            assert!(approx_eq!(Float, out[ch], attenuated[ch], epsilon = 1e-6));
        }
    }

    #[test]
    fn light_without_atmosphere_flag_ignored() {
        let light: ArcLight = Arc::new(PointLight::new(
            Point3f::new(0.0, 2.0, 5.0),
            Colour::grey(1.0),
            LightFlags::empty(),
        ));
        let scene = Scene::unoccluded(vec![light]);
        let mut rng = RNG::new(0);

        let bg = background();
        let out = haze().apply(&scene, &camera_ray(), 10.0, bg, false, &mut rng);
        let attenuated = bg * (-1.0 as Float).exp();
        assert!(approx_eq!(Float, out.red, attenuated.red, epsilon = 1e-6));
    }

    #[test]
    fn equal_seeds_give_identical_results() {
        let scene = lit_scene(Arc::new(Unoccluded));
        let mut atmosphere = haze();
        atmosphere.jitter = 1.0;
        atmosphere.aa_level = 3;
        atmosphere.aa_threshold = 0.01;

        let render = |seed: u64| {
            let mut rng = RNG::new(seed);
            atmosphere.apply(&scene, &camera_ray(), 10.0, background(), false, &mut rng)
        };
        assert_eq!(render(42), render(42));
    }

    #[test]
    fn from_params_reads_settings() {
        let mut params = ParamSet::new();
        params.add_string("type", &[String::from("henyey-greenstein")]);
        params.add_float("eccentricity", &[0.25]);
        params.add_int("samples", &[20]);
        params.add_float("distance", &[50.0]);
        params.add_int("aa_level", &[3]);
        params.add_float("jitter", &[2.0]);

        let atmosphere = Atmosphere::from_params(&params, false).unwrap();
        assert_eq!(atmosphere.phase, PhaseFunction::HenyeyGreenstein(0.25));
        assert_eq!(atmosphere.samples, 20);
        assert_eq!(atmosphere.distance, 50.0);
        assert_eq!(atmosphere.aa_level, 3);
        assert_eq!(atmosphere.jitter, 1.0);

        let quick = Atmosphere::from_params(&params, true).unwrap();
        assert_eq!(quick.aa_level, 0);
    }

    #[test]
    fn from_params_rejects_invalid_values() {
        let mut params = ParamSet::new();
        params.add_int("samples", &[0]);
        assert!(Atmosphere::from_params(&params, false).is_err());

        let mut params = ParamSet::new();
        params.add_float("distance", &[-1.0]);
        assert!(Atmosphere::from_params(&params, false).is_err());

        let mut params = ParamSet::new();
        params.add_string("type", &[String::from("fog")]);
        assert!(Atmosphere::from_params(&params, false).is_err());
    }

    #[test]
    fn interval_ends_when_step_weight_below_black_level() {
        // step = 0.1, so exp(-t/10)·0.1 < 0.003 once t > 35.07. The sample
        // at t = 35.15 is the last one taken.
        let atmosphere = Atmosphere::new(PhaseFunction::Isotropic, 100, 10.0, 0.001, Colour::grey(1.0));
        let (tests, _) = count_shadow_tests(&atmosphere, 1.0, 100.0);
        assert_eq!(tests, 352);

        let mut darker = atmosphere.clone();
        darker.black_level = 1e-6;
        let (more_tests, _) = count_shadow_tests(&darker, 1.0, 100.0);
        assert!(more_tests > tests);
    }

    #[test]
    fn loop_ends_at_saturation_cap() {
        // Each step adds about 1.0 of a light of brightness 10; the running
        // sum passes the cap of 1 after the third sample.
        let atmosphere = Atmosphere::new(PhaseFunction::Isotropic, 100, 10.0, 1.0, Colour::grey(1.0));
        let (tests, out) = count_shadow_tests(&atmosphere, 10.0, 100.0);
        assert_eq!(tests, 3);
        assert!(!out.has_nans());

        let mut uncapped = atmosphere.clone();
        uncapped.saturation_level = 1e6;
        let (all_tests, _) = count_shadow_tests(&uncapped, 10.0, 100.0);
        assert_eq!(all_tests, 352);
    }

    #[test]
    fn zero_black_level_terminates_on_infinite_ray() {
        let mut atmosphere = Atmosphere::new(PhaseFunction::Isotropic, 10, 1.0, 0.001, Colour::grey(1.0));
        atmosphere.black_level = 0.0;
        let (tests, out) = count_shadow_tests(&atmosphere, 1.0, INFINITY);
        assert!(tests > 0 && tests < 2000);
        assert!(!out.has_nans());
    }

    #[test]
    fn from_params_rejects_non_positive_tunables() {
        for name in ["black_level", "saturation_level"] {
            for v in [0.0, -1.0] {
                let mut params = ParamSet::new();
                params.add_float(name, &[v]);
                assert!(Atmosphere::from_params(&params, false).is_err(), "{} = {}", name, v);
            }
        }

        let mut params = ParamSet::new();
        params.add_float("black_level", &[0.01]);
        params.add_float("saturation_level", &[2.0]);
        let atmosphere = Atmosphere::from_params(&params, false).unwrap();
        assert_eq!(atmosphere.black_level, 0.01);
        assert_eq!(atmosphere.saturation_level, 2.0);
    }
}
