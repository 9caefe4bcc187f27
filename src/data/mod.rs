//! Synthetic data generation.

pub mod generator;

pub use generator::*;
