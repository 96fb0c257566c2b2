//! Command-line parsing for the Pink Morsel sales dashboard.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from ingest/aggregation code.
//!
//! Path flags are optional: when absent, `config::Settings` supplies the value
//! from the environment (`.env`) or the built-in default.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::RegionFilter;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "sales", version, about = "Pink Morsel sales ingest and dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Combine the raw per-region extracts into one sales CSV.
    Ingest(IngestArgs),
    /// Print the daily sales chart for a region as an ASCII plot.
    Chart(ChartArgs),
    /// Print dataset stats and the before/after price-increase findings.
    Summary(SummaryArgs),
    /// Plot a previously exported chart JSON.
    Plot(PlotArgs),
    /// Launch the interactive dashboard.
    Tui(TuiArgs),
}

#[derive(Debug, Parser, Clone)]
pub struct IngestArgs {
    /// Raw extract to read (repeatable; order is preserved in the output).
    #[arg(short = 's', long = "source", value_name = "CSV")]
    pub sources: Vec<PathBuf>,

    /// Combined CSV to (over)write.
    #[arg(short = 'o', long, value_name = "CSV")]
    pub output: Option<PathBuf>,

    /// Product to keep (case-insensitive).
    #[arg(long)]
    pub product: Option<String>,
}

/// Options shared by every command that reads the combined dataset.
#[derive(Debug, Parser, Clone)]
pub struct DatasetArgs {
    /// Combined CSV produced by `sales ingest`.
    #[arg(short = 'd', long, value_name = "CSV")]
    pub data: Option<PathBuf>,

    /// Region to show.
    #[arg(short = 'r', long, value_enum, ignore_case = true, default_value_t = RegionFilter::All)]
    pub region: RegionFilter,
}

#[derive(Debug, Parser, Clone)]
pub struct ChartArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    /// Also print the per-day table.
    #[arg(long)]
    pub table: bool,

    /// Export the chart specification to JSON.
    #[arg(long = "export-json", value_name = "JSON")]
    pub export_json: Option<PathBuf>,

    /// Export the whole dashboard description (page, chart, findings) to JSON.
    #[arg(long = "export-dashboard", value_name = "JSON")]
    pub export_dashboard: Option<PathBuf>,
}

#[derive(Debug, Parser, Clone)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,
}

/// Options for plotting a saved chart.
#[derive(Debug, Parser)]
pub struct PlotArgs {
    /// Chart JSON file produced by `sales chart --export-json`.
    #[arg(long, value_name = "JSON")]
    pub chart: PathBuf,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,
}

#[derive(Debug, Parser, Clone)]
pub struct TuiArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,
}
