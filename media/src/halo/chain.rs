//! Halo Chains

use super::{Halo, HaloMode};
use haze_core::colour::*;
use haze_core::geometry::*;
use haze_core::math::*;
use haze_core::medium::*;
use haze_core::rng::UniformSampler;
use haze_core::scene::Scene;
use haze_core::{stat_counter, stat_inc, stat_percent, stat_register_fns};
use std::ops::{Add, Mul};

stat_counter!("Halo/Samples", HALO_SAMPLES, halo_sample_stats);
stat_percent!(
    "Halo/Rays crossing a container",
    CONTAINER_HITS,
    CONTAINER_TESTS,
    container_stats
);

stat_register_fns!(halo_sample_stats, container_stats);

/// Colour and density of a stack of halos at a point.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct HaloSample {
    /// Colour looked up from the colour maps.
    pub colour: Colour,

    /// Density in [0, 1].
    pub density: Float,
}

impl HaloSample {
    /// Stacks two samples with the union rule `a + b - a·b`.
    ///
    /// * `other` - The other sample.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            colour: self.colour.union(&other.colour),
            density: self.density + other.density - self.density * other.density,
        }
    }

    /// Convergence metric between samples.
    ///
    /// * `other` - The other sample.
    pub fn distance(&self, other: &Self) -> Float {
        self.colour.distance3(&other.colour) + abs(self.density - other.density)
    }
}

impl Add for HaloSample {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        Self {
            colour: self.colour + other.colour,
            density: self.density + other.density,
        }
    }
}

impl Mul<Float> for HaloSample {
    type Output = Self;

    fn mul(self, f: Float) -> Self::Output {
        Self {
            colour: self.colour * f,
            density: self.density * f,
        }
    }
}

/// Running totals along the part of a ray inside a halo container.
#[derive(Copy, Clone, Debug, Default)]
struct Accumulated {
    /// Emitted light. Only the RGB channels are used.
    emission: Colour,

    /// Accumulated density, at most 1.
    density: Float,
}

impl Accumulated {
    /// Adds one step. Emitted colour is weighted by the sample's transmit
    /// component.
    ///
    /// * `mode`   - Mode of the chain head.
    /// * `s`      - The sample.
    /// * `weight` - Step weight.
    fn add(&mut self, mode: HaloMode, s: &HaloSample, weight: Float) {
        let a = s.density * weight;
        let transmit = s.colour.transmit;

        let w = match mode {
            HaloMode::Emitting | HaloMode::Dust => transmit * a,
            HaloMode::Glowing => transmit * a * (1.0 - self.density),
            HaloMode::Attenuating => 0.0,
        };
        if w != 0.0 {
            self.emission.red += s.colour.red * w;
            self.emission.green += s.colour.green * w;
            self.emission.blue += s.colour.blue * w;
        }

        self.density = min(self.density + a, 1.0);
    }
}

/// An ordered stack of halos sharing the container of the first one.
#[derive(Clone, Default)]
pub struct HaloChain {
    /// The halos. The first one supplies the container and the sampling
    /// settings.
    pub halos: Vec<Halo>,
}

impl HaloChain {
    /// Create a new `HaloChain`.
    ///
    /// * `halos` - The halos in order.
    pub fn new(halos: Vec<Halo>) -> Self {
        register_stats();

        debug!("Halo chain with {} halos", halos.len());
        Self { halos }
    }

    /// Returns the combined colour and density of all halos at distance `t`
    /// along the ray.
    ///
    /// * `scene` - The scene.
    /// * `ray`   - The ray.
    /// * `t`     - Distance along the ray.
    /// * `lit`   - Lit intervals of the ray; used by dust halos.
    pub fn sample(&self, scene: &Scene, ray: &Ray, t: Float, lit: &LightIntervals) -> HaloSample {
        stat_inc!(HALO_SAMPLES, 1);

        let p = ray.at(t);
        self.halos.iter().fold(HaloSample::default(), |acc, halo| {
            let density = halo.density.evaluate(&halo.to_local(&p));
            let mut colour = halo.colour_map.evaluate(density);
            if halo.mode == HaloMode::Dust {
                let light = dust_light(halo, scene, ray, t, &p, lit) * density;
                colour = colour.with_rgb(&light);
            }
            acc.union(&HaloSample { colour, density })
        })
    }

    /// Steps through the segment of the ray inside the head's container.
    ///
    /// * `head`   - The first halo.
    /// * `scene`  - The scene.
    /// * `ray`    - The ray.
    /// * `t_near` - Start of the segment.
    /// * `t_far`  - End of the segment.
    /// * `lit`    - Lit intervals of the ray.
    /// * `rng`    - Random source for jittering.
    #[allow(clippy::too_many_arguments)]
    fn integrate(
        &self,
        head: &Halo,
        scene: &Scene,
        ray: &Ray,
        t_near: Float,
        t_far: Float,
        lit: &LightIntervals,
        rng: &mut dyn UniformSampler,
    ) -> Accumulated {
        let step = (t_far - t_near) / head.samples as Float;
        let weight = head.thickness(ray, t_near, t_far) / head.samples as Float;

        let mut refiner = AdaptiveRefiner::new(
            head.aa_level,
            head.aa_threshold,
            head.jitter,
            |t: Float| self.sample(scene, ray, t, lit),
            |a: &HaloSample, b: &HaloSample| a.distance(b),
        );

        let mut acc = Accumulated::default();
        let mut prev: Option<(Float, HaloSample)> = None;
        for i in 0..head.samples {
            let t = t_near
                + (i as Float + 0.5) * step
                + head.jitter * step * (rng.uniform_float() - 0.5);
            let mut s = refiner.sample_at(t);

            if let Some((t_prev, mut s_prev)) = prev {
                if refiner.needs_refinement(&s_prev, &s) {
                    (s_prev, s) = refiner.supersample(rng, 1, t_prev, s_prev, t, s);
                }
                acc.add(head.mode, &s_prev, weight);

                if head.mode.saturates() && acc.density >= 1.0 {
                    return acc;
                }
            }
            prev = Some((t, s));
        }

        if let Some((_, s)) = prev {
            acc.add(head.mode, &s, weight);
        }
        acc
    }
}

/// Returns the light from all sources reaching a point of a dust halo,
/// weighted by its phase function. Only the RGB channels are set.
///
/// * `halo`  - The dust halo.
/// * `scene` - The scene.
/// * `ray`   - The ray.
/// * `t`     - Distance along the ray.
/// * `p`     - The point at `t`.
/// * `lit`   - Lit intervals of the ray.
fn dust_light(
    halo: &Halo,
    scene: &Scene,
    ray: &Ray,
    t: Float,
    p: &Point3f,
    lit: &LightIntervals,
) -> Colour {
    let d = ray.d.normalize();

    let mut c = Colour::default();
    for interval in lit.intervals.iter().filter(|iv| t >= iv.t1 && t <= iv.t2) {
        for span in interval.lights.iter().filter(|span| span.contains(t)) {
            if let Some(ls) = scene.shadow_test(span.light, p, ray) {
                let w = halo.dust_phase.p(d.dot(&ls.wi));
                c.red += ls.colour.red * w;
                c.green += ls.colour.green * w;
                c.blue += ls.colour.blue * w;
            }
        }
    }
    c
}

impl Medium for HaloChain {
    /// Composites the halos in front of the intersection with the colour
    /// carried by the ray.
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
        let head = match self.halos.first() {
            Some(head) => head,
            None => return colour,
        };
        if is_light_ray && head.mode.ignores_light_rays() {
            return colour;
        }

        stat_inc!(CONTAINER_TESTS, 1);
        let (t_near, t_far) = match head.segment(ray, depth) {
            Some(segment) => segment,
            None => return colour,
        };
        stat_inc!(CONTAINER_HITS, 1);

        let has_dust = self.halos.iter().any(|h| h.mode == HaloMode::Dust);
        let lit = if has_dust && !is_light_ray {
            LightIntervals::new(&scene.lights, ray, depth, SATURATION_LEVEL)
        } else {
            LightIntervals::default()
        };

        let acc = self.integrate(head, scene, ray, t_near, t_far, &lit, rng);

        if is_light_ray {
            return colour * (1.0 - acc.density);
        }

        match head.mode {
            HaloMode::Attenuating => {
                let c = head.colour_map.evaluate(acc.density);
                Colour::linear_combination(1.0 - acc.density, &colour, acc.density, &c)
            }
            _ => colour + acc.emission,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ContainerShape, DensityFalloff, DensityField, HaloMapping};
    use float_cmp::approx_eq;
    use haze_core::light::*;
    use haze_core::rng::RNG;
    use haze_lights::*;
    use std::sync::Arc;

    fn background() -> Colour {
        Colour::new(0.2, 0.4, 0.6, 0.1, 0.3)
    }

    /// Fully transmitting red.
    fn red() -> Colour {
        Colour::new(1.0, 0.0, 0.0, 0.0, 1.0)
    }

    fn red_map() -> ColourMap {
        ColourMap::new(&[(0.0, red()), (1.0, red())])
    }

    fn constant_halo(mode: HaloMode, density: Float, samples: usize) -> Halo {
        let field = DensityField::new(HaloMapping::Spherical, DensityFalloff::Constant, density);
        let mut halo = Halo::new(mode, field, red_map());
        halo.samples = samples;
        halo
    }

    /// Ray along the Z axis through the unit sphere, inside for t in [4, 6].
    fn diameter_ray() -> Ray {
        Ray::new(Point3f::new(0.0, 0.0, -5.0), Vector3f::new(0.0, 0.0, 1.0), INFINITY)
    }

    fn apply(chain: &HaloChain, scene: &Scene, ray: &Ray, is_light_ray: bool) -> Colour {
        let mut rng = RNG::new(0);
        chain.apply(scene, ray, 100.0, background(), is_light_ray, &mut rng)
    }

    fn assert_colour_eq(a: Colour, b: Colour) {
        for ch in 0..COLOUR_CHANNELS {
            assert!(approx_eq!(Float, a[ch], b[ch], epsilon = 1e-5), "{:?} != {:?}", a, b);
        }
    }

    #[test]
    fn empty_chain_leaves_colour() {
        let scene = Scene::unoccluded(vec![]);
        let chain = HaloChain::new(vec![]);
        assert_eq!(apply(&chain, &scene, &diameter_ray(), false), background());
    }

    #[test]
    fn attenuating_sample_on_container_boundary() {
        let scene = Scene::unoccluded(vec![]);
        let field = DensityField::new(HaloMapping::Planar, DensityFalloff::Linear, 1.0);
        let mut halo = Halo::new(HaloMode::Attenuating, field, red_map());
        halo.samples = 1;
        halo.container_shape = ContainerShape::Box;
        let chain = HaloChain::new(vec![halo]);

        let ray = Ray::new(Point3f::new(-2.0, 1.0, 0.0), Vector3f::new(1.0, 0.0, 0.0), INFINITY);
        assert_colour_eq(apply(&chain, &scene, &ray, false), background());
    }

    #[test]
    fn ray_missing_container_unchanged() {
        let scene = Scene::unoccluded(vec![]);
        let chain = HaloChain::new(vec![constant_halo(HaloMode::Emitting, 1.0, 4)]);

        let ray = Ray::new(Point3f::new(0.0, 3.0, -5.0), Vector3f::new(0.0, 0.0, 1.0), INFINITY);
        assert_eq!(apply(&chain, &scene, &ray, false), background());
    }

    #[test]
    fn intersection_in_front_of_container_unchanged() {
        let scene = Scene::unoccluded(vec![]);
        let chain = HaloChain::new(vec![constant_halo(HaloMode::Emitting, 1.0, 4)]);

        let mut rng = RNG::new(0);
        let out = chain.apply(&scene, &diameter_ray(), 3.0, background(), false, &mut rng);
        assert_eq!(out, background());
    }

    #[test]
    fn emitting_adds_colour() {
        let scene = Scene::unoccluded(vec![]);
        let chain = HaloChain::new(vec![constant_halo(HaloMode::Emitting, 0.5, 4)]);

        let out = apply(&chain, &scene, &diameter_ray(), false);
        let mut expected = background();
        expected.red += 0.5;
        assert_colour_eq(out, expected);
    }

    #[test]
    fn emission_weighted_by_transmit() {
        let scene = Scene::unoccluded(vec![]);
        let bg = Colour::rgb(0.2, 0.0, 0.0);
        let mut rng = RNG::new(0);

        // Density 1 over 4 steps adds the full transmitting red.
        let chain = HaloChain::new(vec![constant_halo(HaloMode::Emitting, 1.0, 4)]);
        let out = chain.apply(&scene, &diameter_ray(), 100.0, bg, false, &mut rng);
        assert!(approx_eq!(Float, out.red, 1.2, epsilon = 1e-5));

        // Half transmitting halves it; opaque adds nothing.
        for (transmit, expected) in [(0.5, 0.7), (0.0, 0.2)] {
            let c = Colour::new(1.0, 0.0, 0.0, 0.0, transmit);
            let mut halo = constant_halo(HaloMode::Emitting, 1.0, 4);
            halo.colour_map = ColourMap::new(&[(0.0, c), (1.0, c)]);
            let chain = HaloChain::new(vec![halo]);
            let out = chain.apply(&scene, &diameter_ray(), 100.0, bg, false, &mut rng);
            assert!(approx_eq!(Float, out.red, expected, epsilon = 1e-5), "transmit {}", transmit);
        }
    }

    #[test]
    fn glowing_occludes_itself() {
        let scene = Scene::unoccluded(vec![]);
        let chain = HaloChain::new(vec![constant_halo(HaloMode::Glowing, 1.0, 4)]);

        // Steps of 0.25 seen through 0, 0.25, 0.5 and 0.75 of prior density.
        let out = apply(&chain, &scene, &diameter_ray(), false);
        let mut expected = background();
        expected.red += 0.625;
        assert_colour_eq(out, expected);
    }

    #[test]
    fn attenuating_blends_towards_colour_map() {
        let scene = Scene::unoccluded(vec![]);
        let chain = HaloChain::new(vec![constant_halo(HaloMode::Attenuating, 1.0, 4)]);

        let out = apply(&chain, &scene, &diameter_ray(), false);
        assert_colour_eq(out, red());
    }

    #[test]
    fn chained_halos_use_union_of_densities() {
        let scene = Scene::unoccluded(vec![]);
        let chain = HaloChain::new(vec![
            constant_halo(HaloMode::Attenuating, 0.5, 4),
            constant_halo(HaloMode::Emitting, 0.5, 4),
        ]);

        let out = apply(&chain, &scene, &diameter_ray(), false);
        let expected = Colour::linear_combination(0.25, &background(), 0.75, &red());
        assert_colour_eq(out, expected);
    }

    #[test]
    fn saturating_modes_stop_at_full_density() {
        let scene = Scene::unoccluded(vec![]);

        // Along the box diagonal each of the 8 steps adds √3/8 of density,
        // which reaches 1 when the fifth step is added at the sixth sample.
        let d = Vector3f::new(1.0, 1.0, 1.0).normalize();
        let ray = Ray::new(Point3f::new(-2.0, -2.0, -2.0), d, INFINITY);

        let samples_taken = |mode: HaloMode| {
            let mut halo = constant_halo(mode, 1.0, 8);
            halo.container_shape = ContainerShape::Box;
            let chain = HaloChain::new(vec![halo]);

            let before = HALO_SAMPLES.with(|c| *c.borrow());
            apply(&chain, &scene, &ray, false);
            HALO_SAMPLES.with(|c| *c.borrow()) - before
        };

        assert_eq!(samples_taken(HaloMode::Emitting), 8);
        assert_eq!(samples_taken(HaloMode::Glowing), 6);
        assert_eq!(samples_taken(HaloMode::Attenuating), 6);
    }

    #[test]
    fn attenuating_box_diagonal_becomes_opaque() {
        let scene = Scene::unoccluded(vec![]);
        let mut halo = constant_halo(HaloMode::Attenuating, 1.0, 8);
        halo.container_shape = ContainerShape::Box;
        let chain = HaloChain::new(vec![halo]);

        let d = Vector3f::new(1.0, 1.0, 1.0).normalize();
        let ray = Ray::new(Point3f::new(-2.0, -2.0, -2.0), d, INFINITY);
        assert_colour_eq(apply(&chain, &scene, &ray, false), red());
    }

    #[test]
    fn light_rays() {
        let scene = Scene::unoccluded(vec![]);

        let chain = HaloChain::new(vec![constant_halo(HaloMode::Emitting, 1.0, 4)]);
        assert_eq!(apply(&chain, &scene, &diameter_ray(), true), background());

        let chain = HaloChain::new(vec![constant_halo(HaloMode::Glowing, 1.0, 4)]);
        assert_eq!(apply(&chain, &scene, &diameter_ray(), true), background());

        let chain = HaloChain::new(vec![constant_halo(HaloMode::Attenuating, 0.5, 4)]);
        assert_colour_eq(apply(&chain, &scene, &diameter_ray(), true), background() * 0.5);

        let chain = HaloChain::new(vec![constant_halo(HaloMode::Dust, 0.5, 4)]);
        assert_colour_eq(apply(&chain, &scene, &diameter_ray(), true), background() * 0.5);
    }

    #[test]
    fn dust_scatters_light() {
        let chain = HaloChain::new(vec![constant_halo(HaloMode::Dust, 0.5, 4)]);

        let dark = Scene::unoccluded(vec![]);
        assert_colour_eq(apply(&chain, &dark, &diameter_ray(), false), background());

        let light: ArcLight = Arc::new(PointLight::new(
            Point3f::new(0.0, 2.0, 0.0),
            Colour::rgb(0.0, 1.0, 0.0),
            LightFlags::default(),
        ));
        let lit = Scene::unoccluded(vec![light]);
        let out = apply(&chain, &lit, &diameter_ray(), false);

        // Each of the 4 steps adds density·w = 0.125 of the green light.
        assert!(approx_eq!(Float, out.green, background().green + 0.5 * 0.5, epsilon = 1e-5));
        assert!(approx_eq!(Float, out.red, background().red, epsilon = 1e-5));
    }

    #[test]
    fn equal_seeds_give_identical_results() {
        let scene = Scene::unoccluded(vec![]);
        let field = DensityField::new(HaloMapping::Spherical, DensityFalloff::Cubic, 1.0);
        let mut halo = Halo::new(HaloMode::Emitting, field, ColourMap::default());
        halo.jitter = 1.0;
        halo.aa_level = 3;
        halo.aa_threshold = 0.01;
        let chain = HaloChain::new(vec![halo]);

        let render = |seed: u64| {
            let mut rng = RNG::new(seed);
            chain.apply(&scene, &diameter_ray(), 100.0, background(), false, &mut rng)
        };
        assert_eq!(render(9), render(9));
        assert!(render(9).red > background().red);
    }
}
