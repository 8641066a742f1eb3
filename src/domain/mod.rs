//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - raw monthly records (`WellMonthRecord`)
//! - derived per-well and combined month states
//! - gap intervals and per-analysis results (`Interval`, `GapAnalysis`)
//! - jurisdiction presets and run configuration

pub mod types;

pub use types::*;
