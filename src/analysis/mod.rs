//! The production-timeline classification and gap-extraction engine.
//!
//! Two independent, pure stages:
//!
//! 1. per-well classification onto a shared calendar grid (`classify`,
//!    `timeline`)
//! 2. month-wise reduction and interval extraction (`combine`, `gaps`)
//!
//! Nothing here performs I/O; inputs are already-materialized records and
//! outputs are in-memory structures.

pub mod classify;
pub mod combine;
pub mod gaps;
pub mod timeline;

pub use classify::*;
pub use combine::*;
pub use gaps::*;
pub use timeline::*;
