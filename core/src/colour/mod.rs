//! Colours

mod colour_map;
mod rgbft;

// Re-export
pub use colour_map::*;
pub use rgbft::*;
