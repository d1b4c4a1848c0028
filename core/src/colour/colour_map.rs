//! Colour Maps

use super::Colour;
use crate::math::*;

/// A stop in a colour map.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ColourStop {
    /// Position of the stop in [0, 1].
    pub value: Float,

    /// Colour at the stop.
    pub colour: Colour,
}

/// Maps a scalar in [0, 1] to a colour by linear interpolation between
/// sorted stops.
#[derive(Clone, Debug, PartialEq)]
pub struct ColourMap {
    /// Stops sorted by value.
    stops: Vec<ColourStop>,
}

impl ColourMap {
    /// Create a new colour map. Stops are sorted by value; an empty list
    /// yields the default ramp.
    ///
    /// * `stops` - List of (value, colour) stops.
    pub fn new(stops: &[(Float, Colour)]) -> Self {
        if stops.is_empty() {
            return Self::default();
        }

        let mut stops: Vec<ColourStop> = stops
            .iter()
            .map(|&(value, colour)| ColourStop { value, colour })
            .collect();
        stops.sort_by(|a, b| a.value.total_cmp(&b.value));

        Self { stops }
    }

    /// Returns the stops.
    pub fn stops(&self) -> &[ColourStop] {
        &self.stops
    }

    /// Evaluate the map. Values outside the first and last stop get the
    /// colour of that stop.
    ///
    /// * `value` - The value to look up.
    pub fn evaluate(&self, value: Float) -> Colour {
        let n = self.stops.len();
        let first = &self.stops[0];
        let last = &self.stops[n - 1];

        if value <= first.value {
            return first.colour;
        }
        if value >= last.value {
            return last.colour;
        }

        // Find the first stop at or beyond the value; it has a predecessor
        // since value > first.value.
        let i = self.stops.partition_point(|s| s.value < value);
        let lo = &self.stops[i - 1];
        let hi = &self.stops[i];

        let width = hi.value - lo.value;
        if width <= 0.0 {
            return hi.colour;
        }

        let t = (value - lo.value) / width;
        Colour::linear_combination(1.0 - t, &lo.colour, t, &hi.colour)
    }
}

impl Default for ColourMap {
    /// Returns a ramp from black to white whose transmit component rises
    /// from 0 to 1 with the value.
    fn default() -> Self {
        Self {
            stops: vec![
                ColourStop {
                    value: 0.0,
                    colour: Colour::new(0.0, 0.0, 0.0, 0.0, 0.0),
                },
                ColourStop {
                    value: 1.0,
                    colour: Colour::new(1.0, 1.0, 1.0, 0.0, 1.0),
                },
            ],
        }
    }
}
