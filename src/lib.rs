//! `weather-dashboard` library crate.
//!
//! The binary (`wxdash`) is a thin wrapper around this library so that:
//!
//! - the generation and aggregation core is testable without a terminal
//! - the CLI and the TUI share one pipeline
//! - presentation code stays separate from the statistics

pub mod aggregate;
pub mod app;
pub mod cli;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod math;
pub mod plot;
pub mod report;
pub mod tui;
