//! Parameter Set Items

/// Stores a parameter set item consisting of a list of values of type `T`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParamSetItem<T> {
    /// The values.
    pub values: Vec<T>,
}

impl<T> ParamSetItem<T> {
    /// Create new `ParamSetItem<T>`.
    ///
    /// * `values` - The values.
    pub fn new(values: Vec<T>) -> Self {
        Self { values }
    }
}
