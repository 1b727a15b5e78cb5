//! # Formats Module
//!
//! On-disk encodings for knowledge graphs.
//!
//! Bytes only; the app layer owns files.

mod persistence;

pub use persistence::*;
