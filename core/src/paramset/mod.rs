//! Parameter Sets

use crate::colour::*;
use crate::geometry::*;
use crate::math::*;
use std::collections::HashMap;

mod paramset_item;

// Re-export
pub use paramset_item::*;

/// A hashmap of parameter sets stored by name.
pub type ParamSetMap<T> = HashMap<String, ParamSetItem<T>>;

/// Stores parameter set items of different types in hashmaps. Lights, media
/// and halos are configured through these.
#[derive(Clone, Debug, Default)]
pub struct ParamSet {
    pub bools: ParamSetMap<bool>,
    pub ints: ParamSetMap<Int>,
    pub floats: ParamSetMap<Float>,
    pub point3fs: ParamSetMap<Point3f>,
    pub vector3fs: ParamSetMap<Vector3f>,
    pub colours: ParamSetMap<Colour>,
    pub strings: ParamSetMap<String>,
}

/// Define a macro that can be used to generate a function for adding/replacing
/// parameter set item.
macro_rules! paramset_add {
    ($func: ident, $t: ty, $paramset: ident) => {
        pub fn $func(&mut self, name: &str, values: &[$t]) {
            self.$paramset
                .insert(String::from(name), ParamSetItem::new(values.to_vec()));
        }
    };
}

/// Define a macro that can be used to generate a function for removing
/// parameter set item.
macro_rules! paramset_erase {
    ($func: ident, $paramset: ident) => {
        pub fn $func(&mut self, name: &str) -> bool {
            self.$paramset.remove(name).is_some()
        }
    };
}

/// Define a macro that can be used to generate a function for finding
/// parameter set item that is stored as a single item.
macro_rules! paramset_find_one {
    ($func: ident, $t: ty, $paramset: ident) => {
        pub fn $func(&self, name: &str, default: $t) -> $t {
            match self.$paramset.get(name) {
                Some(param) if param.values.len() == 1 => param.values[0].clone(),
                _ => default,
            }
        }
    };
}

/// Define a macro that can be used to generate a function for finding
/// parameter set item that is stored as a list.
macro_rules! paramset_find {
    ($func: ident, $t: ty, $paramset: ident) => {
        pub fn $func(&self, name: &str) -> Vec<$t> {
            match self.$paramset.get(name) {
                Some(param) => param.values.clone(),
                None => vec![],
            }
        }
    };
}

impl ParamSet {
    /// Returns a new `ParamSet`.
    pub fn new() -> Self {
        Self::default()
    }

    paramset_erase!(erase_int, ints);
    paramset_find_one!(find_one_int, Int, ints);
    paramset_find!(find_int, Int, ints);
    paramset_add!(add_int, Int, ints);

    paramset_erase!(erase_bool, bools);
    paramset_find_one!(find_one_bool, bool, bools);
    paramset_find!(find_bool, bool, bools);
    paramset_add!(add_bool, bool, bools);

    paramset_erase!(erase_float, floats);
    paramset_find_one!(find_one_float, Float, floats);
    paramset_find!(find_float, Float, floats);
    paramset_add!(add_float, Float, floats);

    paramset_erase!(erase_point3f, point3fs);
    paramset_find_one!(find_one_point3f, Point3f, point3fs);
    paramset_find!(find_point3f, Point3f, point3fs);
    paramset_add!(add_point3f, Point3f, point3fs);

    paramset_erase!(erase_vector3f, vector3fs);
    paramset_find_one!(find_one_vector3f, Vector3f, vector3fs);
    paramset_find!(find_vector3f, Vector3f, vector3fs);
    paramset_add!(add_vector3f, Vector3f, vector3fs);

    paramset_erase!(erase_colour, colours);
    paramset_find_one!(find_one_colour, Colour, colours);
    paramset_find!(find_colour, Colour, colours);
    paramset_add!(add_colour, Colour, colours);

    paramset_erase!(erase_string, strings);
    paramset_find_one!(find_one_string, String, strings);
    paramset_find!(find_string, String, strings);
    paramset_add!(add_string, String, strings);

    /// Add/replace a list of opaque colours given as RGB triples.
    ///
    /// * `name`   - Parameter name.
    /// * `values` - RGB values in a linear slice.
    pub fn add_rgb(&mut self, name: &str, values: &[Float]) {
        let n = values.len();
        assert!(n % 3 == 0, "RGB values % 3 != 0");

        self.colours.insert(
            String::from(name),
            ParamSetItem::new(
                (0..n)
                    .step_by(3)
                    .map(|i| Colour::rgb(values[i], values[i + 1], values[i + 2]))
                    .collect(),
            ),
        );
    }

    /// Builds a colour map from parallel lists `{prefix}_values` (floats) and
    /// `{prefix}_colours` (colours). Returns the default ramp if
    /// neither is present.
    ///
    /// * `prefix` - Parameter name prefix.
    pub fn find_colour_map(&self, prefix: &str) -> Result<ColourMap, String> {
        let values = self.find_float(&format!("{}_values", prefix));
        let colours = self.find_colour(&format!("{}_colours", prefix));
        if values.len() != colours.len() {
            return Err(format!(
                "colour map '{}' has {} values but {} colours",
                prefix,
                values.len(),
                colours.len()
            ));
        }

        let stops: Vec<(Float, Colour)> = values.into_iter().zip(colours).collect();
        Ok(ColourMap::new(&stops))
    }

    /// Clear all parameter set items.
    pub fn clear(&mut self) {
        self.bools.clear();
        self.ints.clear();
        self.floats.clear();
        self.point3fs.clear();
        self.vector3fs.clear();
        self.colours.clear();
        self.strings.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_one_with_default() {
        let mut params = ParamSet::new();
        params.add_float("distance", &[10.0]);
        params.add_float("pair", &[1.0, 2.0]);
        assert_eq!(params.find_one_float("distance", 1.0), 10.0);
        assert_eq!(params.find_one_float("missing", 1.0), 1.0);
        assert_eq!(params.find_one_float("pair", 3.0), 3.0);
        assert_eq!(params.find_float("pair"), vec![1.0, 2.0]);
    }

    #[test]
    fn erase_and_replace() {
        let mut params = ParamSet::new();
        params.add_string("type", &[String::from("spot")]);
        params.add_string("type", &[String::from("point")]);
        assert_eq!(params.find_one_string("type", String::new()), "point");
        assert!(params.erase_string("type"));
        assert!(!params.erase_string("type"));
    }

    #[test]
    fn rgb_triples() {
        let mut params = ParamSet::new();
        params.add_rgb("colour", &[1.0, 0.5, 0.25]);
        assert_eq!(
            params.find_one_colour("colour", Colour::default()),
            Colour::rgb(1.0, 0.5, 0.25)
        );
    }

    #[test]
    fn colour_map_lists() {
        let mut params = ParamSet::new();
        params.add_float("map_values", &[0.0, 1.0]);
        params.add_rgb("map_colours", &[0.0, 0.0, 0.0, 1.0, 0.0, 0.0]);
        let map = params.find_colour_map("map").unwrap();
        assert_eq!(map.evaluate(1.0), Colour::rgb(1.0, 0.0, 0.0));

        params.add_float("map_values", &[0.0]);
        assert!(params.find_colour_map("map").is_err());
    }
}
