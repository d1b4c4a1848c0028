//! RGBFT Colour.

use crate::math::*;
use std::ops::{Add, AddAssign, Index, IndexMut, Mul, Sub};

/// Number of channels in a `Colour`.
pub const COLOUR_CHANNELS: usize = 5;

/// Channel indices for use with `Index<usize>`.
pub const RED: usize = 0;
pub const GREEN: usize = 1;
pub const BLUE: usize = 2;
pub const FILTER: usize = 3;
pub const TRANSMIT: usize = 4;

/// Components below this are considered black.
pub const BLACK_EPSILON: Float = 1.0e-5;

/// An RGB colour extended with two transmittance channels. `filter` is light
/// passing through tinted by the RGB value; `transmit` is light passing
/// through unchanged. Values are nominally in [0, 1] but intermediate
/// results may leave that range.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Colour {
    /// Red component.
    pub red: Float,

    /// Green component.
    pub green: Float,

    /// Blue component.
    pub blue: Float,

    /// Filtered (tinted) transmittance.
    pub filter: Float,

    /// Unfiltered transmittance.
    pub transmit: Float,
}

impl Colour {
    /// Create a new `Colour`.
    ///
    /// * `red`      - Red component.
    /// * `green`    - Green component.
    /// * `blue`     - Blue component.
    /// * `filter`   - Filtered transmittance.
    /// * `transmit` - Unfiltered transmittance.
    pub fn new(red: Float, green: Float, blue: Float, filter: Float, transmit: Float) -> Self {
        Self {
            red,
            green,
            blue,
            filter,
            transmit,
        }
    }

    /// Create an opaque colour from RGB components.
    ///
    /// * `red`   - Red component.
    /// * `green` - Green component.
    /// * `blue`  - Blue component.
    pub fn rgb(red: Float, green: Float, blue: Float) -> Self {
        Self::new(red, green, blue, 0.0, 0.0)
    }

    /// Create an opaque grey.
    ///
    /// * `v` - Value for all RGB components.
    pub fn grey(v: Float) -> Self {
        Self::rgb(v, v, v)
    }

    /// Returns a copy with the RGB components replaced.
    ///
    /// * `other` - Colour supplying the RGB components.
    pub fn with_rgb(&self, other: &Self) -> Self {
        Self::new(other.red, other.green, other.blue, self.filter, self.transmit)
    }

    /// Returns `w1·c1 + w2·c2` on all five channels.
    ///
    /// * `w1` - Weight of the first colour.
    /// * `c1` - First colour.
    /// * `w2` - Weight of the second colour.
    /// * `c2` - Second colour.
    pub fn linear_combination(w1: Float, c1: &Self, w2: Float, c2: &Self) -> Self {
        Self::new(
            w1 * c1.red + w2 * c2.red,
            w1 * c1.green + w2 * c2.green,
            w1 * c1.blue + w2 * c2.blue,
            w1 * c1.filter + w2 * c2.filter,
            w1 * c1.transmit + w2 * c2.transmit,
        )
    }

    /// Sum of the absolute differences of the RGB channels. Used as the
    /// convergence metric by the samplers.
    ///
    /// * `other` - The other colour.
    pub fn distance3(&self, other: &Self) -> Float {
        abs(self.red - other.red) + abs(self.green - other.green) + abs(self.blue - other.blue)
    }

    /// Sum of the absolute differences of all five channels.
    ///
    /// * `other` - The other colour.
    pub fn distance5(&self, other: &Self) -> Float {
        self.distance3(other)
            + abs(self.filter - other.filter)
            + abs(self.transmit - other.transmit)
    }

    /// Per-channel `a + b - a·b`. Stacks two partially opaque
    /// contributions without exceeding 1 when both inputs are in [0, 1].
    ///
    /// * `other` - The other colour.
    pub fn union(&self, other: &Self) -> Self {
        let mut c = Self::default();
        for i in 0..COLOUR_CHANNELS {
            c[i] = self[i] + other[i] - self[i] * other[i];
        }
        c
    }

    /// Returns true if the RGB components are all (nearly) zero.
    pub fn is_black(&self) -> bool {
        abs(self.red) < BLACK_EPSILON
            && abs(self.green) < BLACK_EPSILON
            && abs(self.blue) < BLACK_EPSILON
    }

    /// Returns true if any channel is NaN.
    pub fn has_nans(&self) -> bool {
        (0..COLOUR_CHANNELS).any(|i| self[i].is_nan())
    }

    /// Clamps all channels.
    ///
    /// * `low`  - Low value.
    /// * `high` - High value.
    pub fn clamp(&self, low: Float, high: Float) -> Self {
        let mut c = *self;
        for i in 0..COLOUR_CHANNELS {
            c[i] = clamp(c[i], low, high);
        }
        c
    }
}

impl Add for Colour {
    type Output = Self;

    /// Adds the given colour channel by channel.
    ///
    /// * `other` - The colour to add.
    fn add(self, other: Self) -> Self::Output {
        Self::linear_combination(1.0, &self, 1.0, &other)
    }
}

impl AddAssign for Colour {
    /// Performs the `+=` operation.
    ///
    /// * `other` - The colour to add.
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Colour {
    type Output = Self;

    /// Subtracts the given colour channel by channel.
    ///
    /// * `other` - The colour to subtract.
    fn sub(self, other: Self) -> Self::Output {
        Self::linear_combination(1.0, &self, -1.0, &other)
    }
}

impl Mul for Colour {
    type Output = Self;

    /// Multiplies channel by channel.
    ///
    /// * `other` - The other colour.
    fn mul(self, other: Self) -> Self::Output {
        let mut c = self;
        for i in 0..COLOUR_CHANNELS {
            c[i] *= other[i];
        }
        c
    }
}

impl Mul<Float> for Colour {
    type Output = Self;

    /// Scales all five channels.
    ///
    /// * `f` - The scaling factor.
    fn mul(self, f: Float) -> Self::Output {
        Self::linear_combination(f, &self, 0.0, &Self::default())
    }
}

impl Mul<Colour> for Float {
    type Output = Colour;

    /// Scales all five channels.
    ///
    /// * `c` - The colour.
    fn mul(self, c: Colour) -> Self::Output {
        c * self
    }
}

impl Index<usize> for Colour {
    type Output = Float;

    /// Index a channel; see `RED`, `GREEN`, `BLUE`, `FILTER`, `TRANSMIT`.
    ///
    /// * `i` - The channel.
    fn index(&self, i: usize) -> &Self::Output {
        match i {
            RED => &self.red,
            GREEN => &self.green,
            BLUE => &self.blue,
            FILTER => &self.filter,
            TRANSMIT => &self.transmit,
            _ => panic!("Invalid channel {} for Colour", i),
        }
    }
}

impl IndexMut<usize> for Colour {
    /// Index a channel to get a mutable value.
    ///
    /// * `i` - The channel.
    fn index_mut(&mut self, i: usize) -> &mut Self::Output {
        match i {
            RED => &mut self.red,
            GREEN => &mut self.green,
            BLUE => &mut self.blue,
            FILTER => &mut self.filter,
            TRANSMIT => &mut self.transmit,
            _ => panic!("Invalid channel {} for Colour", i),
        }
    }
}

impl From<[Float; 3]> for Colour {
    /// Create an opaque colour from an RGB triple.
    ///
    /// * `rgb` - RGB components.
    fn from(rgb: [Float; 3]) -> Self {
        Self::rgb(rgb[0], rgb[1], rgb[2])
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;
    use proptest::prelude::*;

    prop_compose! {
        fn colour()(
            red in -2.0..2.0f32,
            green in -2.0..2.0f32,
            blue in -2.0..2.0f32,
            filter in 0.0..1.0f32,
            transmit in 0.0..1.0f32,
        ) -> Colour {
            Colour::new(red, green, blue, filter, transmit)
        }
    }

    #[test]
    fn black_and_white() {
        assert!(Colour::default().is_black());
        assert!(!Colour::grey(1.0).is_black());
        assert!(Colour::new(0.0, 0.0, 0.0, 1.0, 1.0).is_black());
    }

    #[test]
    fn union_of_halves() {
        let c = Colour::grey(0.5).union(&Colour::grey(0.5));
        assert_eq!(c.red, 0.75);
        assert_eq!(c.filter, 0.0);
    }

    #[test]
    fn distance5_includes_transmittance() {
        let a = Colour::new(1.0, 0.0, 0.0, 0.5, 0.0);
        let b = Colour::new(0.0, 0.0, 0.0, 0.0, 0.25);
        assert_eq!(a.distance3(&b), 1.0);
        assert_eq!(a.distance5(&b), 1.75);
    }

    #[test]
    fn index_channels() {
        let mut c = Colour::new(0.1, 0.2, 0.3, 0.4, 0.5);
        assert_eq!(c[BLUE], 0.3);
        c[TRANSMIT] = 0.0;
        assert_eq!(c.transmit, 0.0);
    }

    #[test]
    fn has_nans() {
        assert!(!Colour::grey(1.0).has_nans());
        assert!(Colour::new(0.0, 0.0, 0.0, Float::NAN, 0.0).has_nans());
    }

    proptest! {
        #[test]
        fn distance3_to_self_is_zero(c in colour()) {
            prop_assert_eq!(c.distance3(&c), 0.0);
        }

        #[test]
        fn distance3_is_symmetric(a in colour(), b in colour()) {
            prop_assert_eq!(a.distance3(&b), b.distance3(&a));
        }

        #[test]
        fn distance3_triangle_inequality(a in colour(), b in colour(), c in colour()) {
            let direct = a.distance3(&c);
            let via = a.distance3(&b) + b.distance3(&c);
            prop_assert!(direct <= via + 1e-5);
        }

        #[test]
        fn linear_combination_identity(a in colour(), b in colour()) {
            prop_assert_eq!(Colour::linear_combination(1.0, &a, 0.0, &b), a);
        }

        #[test]
        fn scale_matches_linear_combination(a in colour(), f in -4.0..4.0f32) {
            let s = a * f;
            prop_assert!(approx_eq!(f32, s.red, a.red * f, ulps = 2));
            prop_assert!(approx_eq!(f32, s.transmit, a.transmit * f, ulps = 2));
        }
    }
}
