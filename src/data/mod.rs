//! Data acquisition and built-in sample data.
//!
//! - `agency`: fetch per-well records from a state agency web service
//! - `sample`: bundled demonstration scenario + seeded random generator

pub mod agency;
pub mod sample;

pub use agency::*;
pub use sample::*;
