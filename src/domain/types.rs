//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - produced by ingest and persisted to the combined CSV
//! - aggregated in-memory for the dashboard
//! - exported to JSON as part of a chart specification

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Product retained by ingest (compared case-insensitively).
pub const TARGET_PRODUCT: &str = "pink morsel";

/// Raw per-region extracts read by `sales ingest` when no sources are given.
pub const DEFAULT_SOURCES: [&str; 3] = [
    "data/daily_sales_data_0.csv",
    "data/daily_sales_data_1.csv",
    "data/daily_sales_data_2.csv",
];

/// Combined dataset written by ingest and read by the dashboard.
pub const DEFAULT_COMBINED_CSV: &str = "output.csv";

/// The Pink Morsel price increase: the static chart marker.
pub fn price_increase_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2021, 1, 15).unwrap_or(NaiveDate::MIN)
}

/// A sales region as it appears in the source extracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    North,
    East,
    South,
    West,
}

impl Region {
    pub const ALL: [Region; 4] = [Region::North, Region::East, Region::South, Region::West];

    /// Lowercase code used in CSV files.
    pub fn code(self) -> &'static str {
        match self {
            Region::North => "north",
            Region::East => "east",
            Region::South => "south",
            Region::West => "west",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Region::North => "North",
            Region::East => "East",
            Region::South => "South",
            Region::West => "West",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Region {
    type Err = String;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Region::ALL
            .into_iter()
            .find(|r| r.code().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown region '{s}'. Expected one of: north, east, south, west."))
    }
}

/// Region selector driving the dashboard.
///
/// This is a closed set of five choices; the UI always exposes all of them,
/// independent of which regions actually occur in the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RegionFilter {
    #[default]
    All,
    North,
    East,
    South,
    West,
}

impl RegionFilter {
    /// UI order of the radio options.
    pub const ALL: [RegionFilter; 5] = [
        RegionFilter::All,
        RegionFilter::North,
        RegionFilter::East,
        RegionFilter::South,
        RegionFilter::West,
    ];

    pub fn code(self) -> &'static str {
        match self {
            RegionFilter::All => "all",
            RegionFilter::North => "north",
            RegionFilter::East => "east",
            RegionFilter::South => "south",
            RegionFilter::West => "west",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            RegionFilter::All => "All Regions",
            RegionFilter::North => "North",
            RegionFilter::East => "East",
            RegionFilter::South => "South",
            RegionFilter::West => "West",
        }
    }

    /// The single region this filter restricts to, if any.
    pub fn region(self) -> Option<Region> {
        match self {
            RegionFilter::All => None,
            RegionFilter::North => Some(Region::North),
            RegionFilter::East => Some(Region::East),
            RegionFilter::South => Some(Region::South),
            RegionFilter::West => Some(Region::West),
        }
    }

    pub fn matches(self, region: Region) -> bool {
        self.region().is_none_or(|r| r == region)
    }

    /// Parse a selector value coming from an untyped host.
    ///
    /// Anything outside the five codes falls back to `All` with a warning.
    pub fn parse_lenient(value: &str) -> RegionFilter {
        let trimmed = value.trim();
        match RegionFilter::ALL
            .into_iter()
            .find(|f| f.code().eq_ignore_ascii_case(trimmed))
        {
            Some(filter) => filter,
            None => {
                tracing::warn!(value = trimmed, "unknown region selector; showing all regions");
                RegionFilter::All
            }
        }
    }

    pub fn next(self) -> RegionFilter {
        let idx = self.index();
        RegionFilter::ALL[(idx + 1) % RegionFilter::ALL.len()]
    }

    pub fn prev(self) -> RegionFilter {
        let idx = self.index();
        RegionFilter::ALL[(idx + RegionFilter::ALL.len() - 1) % RegionFilter::ALL.len()]
    }

    /// Position within [`RegionFilter::ALL`].
    pub fn index(self) -> usize {
        match self {
            RegionFilter::All => 0,
            RegionFilter::North => 1,
            RegionFilter::East => 2,
            RegionFilter::South => 3,
            RegionFilter::West => 4,
        }
    }
}

impl From<Region> for RegionFilter {
    fn from(value: Region) -> Self {
        match value {
            Region::North => RegionFilter::North,
            Region::East => RegionFilter::East,
            Region::South => RegionFilter::South,
            Region::West => RegionFilter::West,
        }
    }
}

/// One row of a raw per-region extract, after column lookup.
///
/// `price` is still the currency-formatted text (e.g. `"$3.50"`); it is only
/// parsed for rows that survive the product filter.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSalesRecord {
    pub product: String,
    pub quantity: String,
    pub price: String,
    pub date: String,
    pub region: String,
}

/// A derived sales record: the unit persisted in the combined CSV.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SalesRecord {
    /// `quantity * price`; always finite and non-negative.
    pub sales: f64,
    pub date: NaiveDate,
    pub region: Region,
}

/// One point of a daily aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub sales: f64,
}

/// Resolved ingest parameters.
#[derive(Debug, Clone)]
pub struct IngestConfig {
    pub sources: Vec<PathBuf>,
    pub output: PathBuf,
    pub product: String,
}
