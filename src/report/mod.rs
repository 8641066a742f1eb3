//! Plaintext report assembly.

pub mod format;

pub use format::*;
