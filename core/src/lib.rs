//! Core

extern crate bitflags;
#[macro_use]
extern crate hexf;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;

// Re-export.
pub mod app;
pub mod colour;
pub mod geometry;
pub mod light;
pub mod math;
pub mod medium;
pub mod paramset;
pub mod rng;
pub mod scene;
pub mod stats;
pub mod texture;
