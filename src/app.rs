//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads configuration
//! - generates and summarizes the series
//! - prints reports/plots or launches the TUI
//! - writes optional exports

use clap::Parser;

use crate::cli::{Command, ExportArgs, RangeArgs, SummaryArgs, TableArgs};
use crate::config::DashboardConfig;
use crate::error::AppError;
use crate::report::{format_summary_report, format_table_page, paginate, sorted_rows};

pub mod pipeline;

/// Entry point for the `wxdash` binary.
pub fn run() -> Result<(), AppError> {
    init_logging();

    // We want `wxdash` and `wxdash -c Paris` to behave like `wxdash tui ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);
    let config = DashboardConfig::from_env()?;

    match cli.command {
        Command::Summary(args) => handle_summary(config, args),
        Command::Table(args) => handle_table(config, args),
        Command::Export(args) => handle_export(config, args),
        Command::Tui(args) => handle_tui(config, args),
    }
}

/// Log to stderr; `RUST_LOG` overrides the default `warn` level.
fn init_logging() {
    let env = env_logger::Env::default().default_filter_or("warn");
    // A second init (e.g. from tests) is harmless.
    let _ = env_logger::Builder::from_env(env).try_init();
}

fn handle_summary(config: DashboardConfig, args: SummaryArgs) -> Result<(), AppError> {
    let config = config.with_args(&args.range);
    let run = pipeline::run_dashboard(&config.request())?;

    println!("{}", format_summary_report(&run.series, &run.summary));

    if args.plot {
        let plot = crate::plot::render_ascii_plot(&run.series, run.trend.as_deref(), args.width, args.height);
        println!("{plot}");
    }

    Ok(())
}

fn handle_table(config: DashboardConfig, args: TableArgs) -> Result<(), AppError> {
    let config = config.with_args(&args.range);
    let run = pipeline::run_dashboard(&config.request())?;

    let rows = sorted_rows(&run.series, args.sort, args.order);
    let page_size = args.page_size.unwrap_or(config.page_size);
    let page = paginate(&rows, args.page.saturating_sub(1), page_size);

    print!("{}", format_table_page(&page, args.sort, args.order));
    Ok(())
}

fn handle_export(config: DashboardConfig, args: ExportArgs) -> Result<(), AppError> {
    let config = config.with_args(&args.range);
    let run = pipeline::run_dashboard(&config.request())?;

    crate::io::export::write_series_csv(&args.out, &run.series)?;
    println!("Wrote {} rows to {}", run.series.len(), args.out.display());
    Ok(())
}

fn handle_tui(config: DashboardConfig, args: RangeArgs) -> Result<(), AppError> {
    crate::tui::run(config.with_args(&args))
}

/// Rewrite argv so `wxdash` defaults to `wxdash tui`.
///
/// Rules:
/// - `wxdash`                      -> `wxdash tui`
/// - `wxdash -c Paris ...`         -> `wxdash tui -c Paris ...`
/// - `wxdash --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "summary" | "table" | "export" | "tui");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}
