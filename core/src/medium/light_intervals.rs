//! Light Intervals

use crate::colour::*;
use crate::geometry::*;
use crate::light::*;
use crate::math::*;

/// The part of a ray lit by a single light.
#[derive(Clone)]
pub struct LitSpan<'a> {
    /// The light.
    pub light: &'a ArcLight,

    /// Start of the lit part of the ray.
    pub t1: Float,

    /// End of the lit part of the ray.
    pub t2: Float,
}

impl<'a> LitSpan<'a> {
    /// Returns true if the light reaches the ray at distance `t`.
    ///
    /// * `t` - Distance along the ray.
    pub fn contains(&self, t: Float) -> bool {
        t >= self.t1 && t <= self.t2
    }
}

/// A maximal stretch of a ray lit by at least one light, along with the
/// lights responsible.
#[derive(Clone)]
pub struct ActiveInterval<'a> {
    /// Start of the interval.
    pub t1: Float,

    /// End of the interval.
    pub t2: Float,

    /// The lights lit within the interval, each with its own span.
    pub lights: Vec<LitSpan<'a>>,
}

impl<'a> ActiveInterval<'a> {
    /// Returns the length of the interval.
    pub fn width(&self) -> Float {
        self.t2 - self.t1
    }

    /// Returns true if the interval overlaps `[t1, t2]`.
    ///
    /// * `t1` - Start of the other interval.
    /// * `t2` - End of the other interval.
    fn overlaps(&self, t1: Float, t2: Float) -> bool {
        t1 <= self.t2 && t2 >= self.t1
    }
}

/// Disjoint intervals along a ray, sorted by increasing distance, where
/// lights interact with a medium.
#[derive(Clone, Default)]
pub struct LightIntervals<'a> {
    /// The intervals.
    pub intervals: Vec<ActiveInterval<'a>>,

    /// Per-channel cap for the accumulated scattering; channels no light
    /// feeds are capped at 0.
    pub saturation: [Float; 3],
}

impl<'a> LightIntervals<'a> {
    /// Builds the intervals for the lights that scatter in the atmosphere
    /// and whose lit span overlaps `(0, depth)`.
    ///
    /// * `lights`           - The lights.
    /// * `ray`              - The ray.
    /// * `depth`            - Distance to the intersection ending the ray.
    /// * `saturation_level` - Cap for channels fed by at least one light.
    pub fn new(
        lights: &'a [ArcLight],
        ray: &Ray,
        depth: Float,
        saturation_level: Float,
    ) -> Self {
        let mut merged = Self::default();

        for light in lights.iter().filter(|l| l.interacts_with_atmosphere()) {
            if let Some((t1, t2)) = light.intersect_ray(ray, depth) {
                if t2 > 0.0 && t1 < depth {
                    merged.add(light, t1, t2, saturation_level);
                }
            }
        }

        merged.sort();
        merged
    }

    /// Returns true if no light reaches the ray.
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Adds the span of a light. It is unioned into the first interval it
    /// overlaps, or starts a new interval. Intervals the union grows into
    /// are coalesced so the list stays disjoint. Call `sort()` once all
    /// lights are added.
    ///
    /// * `light`            - The light.
    /// * `t1`               - Start of the lit span.
    /// * `t2`               - End of the lit span.
    /// * `saturation_level` - Cap for channels the light feeds.
    pub fn add(&mut self, light: &'a ArcLight, t1: Float, t2: Float, saturation_level: Float) {
        let colour = light.colour();
        for (ch, cap) in self.saturation.iter_mut().enumerate() {
            if abs(colour[ch]) > BLACK_EPSILON {
                *cap = saturation_level;
            }
        }

        let span = LitSpan { light, t1, t2 };
        let i = match self.intervals.iter().position(|iv| iv.overlaps(t1, t2)) {
            Some(i) => i,
            None => {
                self.intervals.push(ActiveInterval {
                    t1,
                    t2,
                    lights: vec![span],
                });
                return;
            }
        };

        let iv = &mut self.intervals[i];
        iv.t1 = min(iv.t1, t1);
        iv.t2 = max(iv.t2, t2);
        iv.lights.push(span);

        // The grown interval may now overlap others.
        self.coalesce(i);
    }

    /// Merges every interval overlapping the one at index `i` into it.
    ///
    /// * `i` - Index of the interval that grew.
    fn coalesce(&mut self, mut i: usize) {
        let mut j = 0;
        while j < self.intervals.len() {
            if j != i && self.intervals[j].overlaps(self.intervals[i].t1, self.intervals[i].t2) {
                let other = self.intervals.remove(j);
                if j < i {
                    i -= 1;
                }
                let iv = &mut self.intervals[i];
                iv.t1 = min(iv.t1, other.t1);
                iv.t2 = max(iv.t2, other.t2);
                iv.lights.extend(other.lights);
                j = 0;
            } else {
                j += 1;
            }
        }
    }

    /// Sorts the intervals by increasing start.
    pub fn sort(&mut self) {
        self.intervals.sort_by(|a, b| a.t1.total_cmp(&b.t1));
    }

    /// Returns true once the accumulated colour reaches the cap in every
    /// RGB channel.
    ///
    /// * `sum` - Accumulated colour.
    pub fn is_saturated(&self, sum: &Colour) -> bool {
        (0..3).all(|ch| sum[ch] >= self.saturation[ch])
    }
}
