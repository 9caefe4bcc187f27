//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the daily record and series types (`DailyObservation`, `WeatherSeries`)
//! - the season classification (`Season`)
//! - enums shared by CLI, tables and charts (`Variable`, `SortColumn`, `SortOrder`)

pub mod types;

pub use types::*;
