//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and resolves settings
//! - installs logging
//! - runs ingest, or loads the combined dataset
//! - prints reports/plots or launches the dashboard
//! - writes optional exports

use clap::Parser;
use tracing::debug;

use crate::cli::{ChartArgs, Command, DatasetArgs, IngestArgs, PlotArgs, SummaryArgs, TuiArgs};
use crate::config::Settings;
use crate::domain::IngestConfig;
use crate::error::AppError;
use crate::logging::LogTarget;

pub mod pipeline;

/// Entry point for the `sales` binary.
pub fn run() -> Result<(), AppError> {
    // We want `sales` and `sales -r north` to behave like `sales tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);
    let settings = Settings::from_env();

    let target = match cli.command {
        Command::Tui(_) => LogTarget::File(settings.log_dir.clone()),
        _ => LogTarget::Stderr,
    };
    crate::logging::init(&target, &settings.log_filter)?;
    debug!(?settings, "settings resolved");

    match cli.command {
        Command::Ingest(args) => handle_ingest(args, &settings),
        Command::Chart(args) => handle_chart(args, &settings),
        Command::Summary(args) => handle_summary(args, &settings),
        Command::Plot(args) => handle_plot(args),
        Command::Tui(args) => handle_tui(args, &settings),
    }
}

fn handle_ingest(args: IngestArgs, settings: &Settings) -> Result<(), AppError> {
    let config = ingest_config_from_args(&args, settings);
    let report = crate::io::ingest::run_ingest(&config)?;
    print!("{}", crate::report::format_ingest_report(&report));
    Ok(())
}

fn handle_chart(args: ChartArgs, settings: &Settings) -> Result<(), AppError> {
    let dataset = pipeline::load(&data_path(&args.dataset, settings))?;
    let view = pipeline::build_view(&dataset, args.dataset.region);

    print!(
        "{}",
        crate::plot::render_ascii_chart(&view.dashboard.chart, args.width, args.height)
    );
    if args.table {
        println!();
        print!("{}", crate::report::format_daily_table(&view.dashboard.chart.series));
    }

    // Optional exports.
    if let Some(path) = &args.export_json {
        crate::io::chart::write_chart_json(path, &view.dashboard.chart)?;
    }
    if let Some(path) = &args.export_dashboard {
        crate::io::chart::write_dashboard_json(path, &view.dashboard)?;
    }

    Ok(())
}

fn handle_summary(args: SummaryArgs, settings: &Settings) -> Result<(), AppError> {
    let dataset = pipeline::load(&data_path(&args.dataset, settings))?;
    let view = pipeline::build_view(&dataset, args.dataset.region);
    print!(
        "{}",
        crate::report::format_summary(args.dataset.region, &view.stats, &view.dashboard.findings)
    );
    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let chart = crate::io::chart::read_chart_json(&args.chart)?;
    print!("{}", crate::plot::render_ascii_chart(&chart, args.width, args.height));
    Ok(())
}

fn handle_tui(args: TuiArgs, settings: &Settings) -> Result<(), AppError> {
    let dataset = pipeline::load(&data_path(&args.dataset, settings))?;
    crate::tui::run(dataset, args.dataset.region)
}

pub fn ingest_config_from_args(args: &IngestArgs, settings: &Settings) -> IngestConfig {
    IngestConfig {
        sources: if args.sources.is_empty() {
            settings.sources.clone()
        } else {
            args.sources.clone()
        },
        output: args.output.clone().unwrap_or_else(|| settings.combined_csv.clone()),
        product: args.product.clone().unwrap_or_else(|| settings.product.clone()),
    }
}

fn data_path(args: &DatasetArgs, settings: &Settings) -> std::path::PathBuf {
    args.data.clone().unwrap_or_else(|| settings.combined_csv.clone())
}

/// Rewrite argv so `sales` defaults to `sales tui`.
///
/// Rules:
/// - `sales`                      -> `sales tui`
/// - `sales -r north ...`         -> `sales tui -r north ...`
/// - `sales --help/--version/-h`  -> unchanged (show top-level help/version)
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

    let is_subcommand = matches!(arg1.as_str(), "ingest" | "chart" | "summary" | "plot" | "tui");
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

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_opens_dashboard() {
        assert_eq!(rewrite_args(argv(&["sales"])), argv(&["sales", "tui"]));
        assert_eq!(
            rewrite_args(argv(&["sales", "-r", "north"])),
            argv(&["sales", "tui", "-r", "north"])
        );
    }

    #[test]
    fn subcommands_and_help_are_untouched() {
        assert_eq!(rewrite_args(argv(&["sales", "ingest"])), argv(&["sales", "ingest"]));
        assert_eq!(rewrite_args(argv(&["sales", "--help"])), argv(&["sales", "--help"]));
    }

    #[test]
    fn ingest_flags_override_settings() {
        let settings = Settings::from_lookup(|_| None);
        let args = IngestArgs {
            sources: vec![],
            output: Some(PathBuf::from("combined.csv")),
            product: None,
        };
        let config = ingest_config_from_args(&args, &settings);
        assert_eq!(config.sources, settings.sources);
        assert_eq!(config.output, PathBuf::from("combined.csv"));
        assert_eq!(config.product, "pink morsel");
    }
}
