//! Command-line parsing for the synthetic weather dashboard.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the generation/aggregation code.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::domain::{SortColumn, SortOrder};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "wxdash", version, about = "Synthetic weather dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print metric cards, seasonal tables and the text reports.
    Summary(SummaryArgs),
    /// Print one page of the daily data table.
    Table(TableArgs),
    /// Write the daily data table to CSV.
    Export(ExportArgs),
    /// Launch the interactive TUI.
    Tui(RangeArgs),
}

/// City and date range of the generated series.
#[derive(Debug, Args, Clone, Default)]
pub struct RangeArgs {
    /// City label (defaults to the first configured city).
    #[arg(short = 'c', long)]
    pub city: Option<String>,

    /// First day (YYYY-MM-DD).
    #[arg(short = 's', long)]
    pub start: Option<NaiveDate>,

    /// Last day, inclusive (YYYY-MM-DD).
    #[arg(short = 'e', long)]
    pub end: Option<NaiveDate>,

    /// Seed the generator for a reproducible series.
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Debug, Args, Clone)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub range: RangeArgs,

    /// Render an ASCII temperature plot.
    #[arg(long)]
    pub plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,
}

#[derive(Debug, Args, Clone)]
pub struct TableArgs {
    #[command(flatten)]
    pub range: RangeArgs,

    /// Column to sort by.
    #[arg(long, value_enum, default_value_t = SortColumn::Date)]
    pub sort: SortColumn,

    /// Sort direction.
    #[arg(long, value_enum, default_value_t = SortOrder::Asc)]
    pub order: SortOrder,

    /// Page to show (1-based).
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Rows per page (defaults to the configured page size).
    #[arg(long)]
    pub page_size: Option<usize>,
}

#[derive(Debug, Args, Clone)]
pub struct ExportArgs {
    #[command(flatten)]
    pub range: RangeArgs,

    /// Output CSV path.
    #[arg(short = 'o', long, value_name = "CSV")]
    pub out: PathBuf,
}
