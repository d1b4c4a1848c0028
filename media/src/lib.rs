//! Participating Media

#[macro_use]
extern crate log;

mod atmosphere;
mod halo;

// Re-export
pub use atmosphere::*;
pub use halo::*;
