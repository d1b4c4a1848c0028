//! Noise and turbulence

mod noise;
mod turbulence;

// Re-export
pub use noise::*;
pub use turbulence::*;
