//! Input/output helpers.
//!
//! - data table export to CSV (`export`)

pub mod export;

pub use export::*;
