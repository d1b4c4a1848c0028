//! Adaptive Refiner

use crate::math::*;
use crate::rng::UniformSampler;
use std::marker::PhantomData;
use std::ops::{Add, Mul};

/// Recursively bisects the gap between two samples along a ray while they
/// differ by more than a threshold, then smooths the pair towards the
/// midpoint sample.
///
/// `T` is the sample value, `S` evaluates a sample at a distance along the
/// ray and `M` measures the difference between two samples.
pub struct AdaptiveRefiner<T, S, M>
where
    S: FnMut(Float) -> T,
    M: Fn(&T, &T) -> Float,
{
    /// Maximum recursion level. The top level call is level 1.
    pub aa_level: usize,

    /// Samples at least this far apart are refined.
    pub aa_threshold: Float,

    /// Amount of random offset applied to the bisection point in [0, 1].
    pub jitter: Float,

    /// Evaluates a sample at a distance.
    sample: S,

    /// Distance metric between samples.
    distance: M,

    /// Number of samples evaluated so far.
    samples_taken: usize,

    _value: PhantomData<fn() -> T>,
}

impl<T, S, M> AdaptiveRefiner<T, S, M>
where
    T: Copy + Add<Output = T> + Mul<Float, Output = T>,
    S: FnMut(Float) -> T,
    M: Fn(&T, &T) -> Float,
{
    /// Create a new `AdaptiveRefiner`.
    ///
    /// * `aa_level`     - Maximum recursion level.
    /// * `aa_threshold` - Refinement threshold.
    /// * `jitter`       - Bisection jitter amount.
    /// * `sample`       - Evaluates a sample at a distance.
    /// * `distance`     - Distance metric between samples.
    pub fn new(aa_level: usize, aa_threshold: Float, jitter: Float, sample: S, distance: M) -> Self {
        Self {
            aa_level,
            aa_threshold,
            jitter,
            sample,
            distance,
            samples_taken: 0,
            _value: PhantomData,
        }
    }

    /// Evaluates a sample at a distance.
    ///
    /// * `d` - Distance along the ray.
    pub fn sample_at(&mut self, d: Float) -> T {
        self.samples_taken += 1;
        (self.sample)(d)
    }

    /// Returns the difference between two samples.
    ///
    /// * `a` - First sample.
    /// * `b` - Second sample.
    pub fn distance(&self, a: &T, b: &T) -> Float {
        (self.distance)(a, b)
    }

    /// Returns true if two neighbouring samples differ enough to refine.
    ///
    /// * `a` - First sample.
    /// * `b` - Second sample.
    pub fn needs_refinement(&self, a: &T, b: &T) -> bool {
        self.aa_level > 0 && self.distance(a, b) >= self.aa_threshold
    }

    /// Returns the number of samples evaluated so far.
    pub fn samples_taken(&self) -> usize {
        self.samples_taken
    }

    /// Refines the samples `c1` at `d1` and `c3` at `d3` and returns their
    /// smoothed replacements. A sample `c2` is taken near the midpoint; while
    /// `level < aa_level` either half whose end samples still differ by at
    /// least the threshold is refined recursively. The results are
    /// `0.75·c1 + 0.25·c2` and `0.25·c2 + 0.75·c3`.
    ///
    /// * `rng`   - Random source for jittering the midpoint.
    /// * `level` - Current recursion level; callers start at 1.
    /// * `d1`    - Distance of the first sample.
    /// * `c1`    - First sample.
    /// * `d3`    - Distance of the second sample.
    /// * `c3`    - Second sample.
    pub fn supersample(
        &mut self,
        rng: &mut dyn UniformSampler,
        level: usize,
        d1: Float,
        c1: T,
        d3: Float,
        c3: T,
    ) -> (T, T) {
        let d2 = 0.5 * (d1 + d3) + self.jitter * (d3 - d1) * 0.5 * (rng.uniform_float() - 0.5);
        let mut c1 = c1;
        let mut c2 = self.sample_at(d2);
        let mut c3 = c3;

        if level < self.aa_level {
            if self.distance(&c1, &c2) >= self.aa_threshold {
                (c1, c2) = self.supersample(rng, level + 1, d1, c1, d2, c2);
            }
            if self.distance(&c2, &c3) >= self.aa_threshold {
                (c2, c3) = self.supersample(rng, level + 1, d2, c2, d3, c3);
            }
        }

        (c1 * 0.75 + c2 * 0.25, c2 * 0.25 + c3 * 0.75)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colour::Colour;
    use crate::rng::RNG;

    fn step(d: Float) -> Float {
        if d < 0.5 {
            0.0
        } else {
            1.0
        }
    }

    fn samples_for_level(aa_level: usize) -> usize {
        let mut rng = RNG::new(7);
        let mut refiner =
            AdaptiveRefiner::new(aa_level, 0.1, 0.0, step, |a: &Float, b: &Float| (a - b).abs());
        let _ = refiner.supersample(&mut rng, 1, 0.0, 0.0, 1.0, 1.0);
        refiner.samples_taken()
    }

    #[test]
    fn constant_samples_unchanged() {
        let c = Colour::new(0.5, 0.25, 1.0, 0.5, 0.0);
        let mut rng = RNG::new(1);
        for aa_level in 1..4 {
            let mut refiner =
                AdaptiveRefiner::new(aa_level, 0.0, 1.0, |_d: Float| c, |a: &Colour, b: &Colour| {
                    a.distance3(b)
                });
            let (c1, c3) = refiner.supersample(&mut rng, 1, 0.0, c, 10.0, c);
            assert_eq!(c1, c);
            assert_eq!(c3, c);
        }
    }

    #[test]
    fn discontinuity_takes_more_samples_at_higher_levels() {
        let counts: Vec<usize> = (1..5).map(samples_for_level).collect();
        assert_eq!(counts[0], 1);
        for pair in counts.windows(2) {
            assert!(pair[1] > pair[0], "{:?}", counts);
        }
    }

    #[test]
    fn blend_weights() {
        let mut rng = RNG::new(3);
        let mut refiner = AdaptiveRefiner::new(1, 0.1, 0.0, |_d: Float| 1.0, |a: &Float, b: &Float| {
            (a - b).abs()
        });
        let (c1, c3) = refiner.supersample(&mut rng, 1, 0.0, 0.0, 1.0, 0.0);
        assert_eq!(c1, 0.25);
        assert_eq!(c3, 0.25);
    }

    #[test]
    fn refinement_disabled_at_level_zero() {
        let refiner = AdaptiveRefiner::new(0, 0.0, 0.0, |_d: Float| 0.0, |a: &Float, b: &Float| {
            (a - b).abs()
        });
        assert!(!refiner.needs_refinement(&0.0, &1.0));
    }
}
