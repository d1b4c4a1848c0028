//! Math helpers shared by all crates

mod common;
mod quadratic;

// Re-export
pub use common::*;
pub use quadratic::*;
