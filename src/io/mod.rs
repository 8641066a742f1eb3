//! Input/output helpers.
//!
//! - CSV ingest + validation (`ingest`)
//! - interval exports (`export`)
//! - analysis summary JSON read/write (`summary`)

pub mod export;
pub mod ingest;
pub mod summary;

pub use export::*;
pub use ingest::*;
pub use summary::*;
