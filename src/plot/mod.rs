//! Plotting: terminal ASCII timeline and SVG chart output.

pub mod ascii;
pub mod chart;

pub use ascii::*;
pub use chart::*;
