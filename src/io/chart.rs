//! Read/write chart JSON files.
//!
//! Chart JSON is the "portable" representation of one dashboard view:
//! - title, axis labels and the selected region
//! - the daily aggregate series
//! - the static price-increase marker
//!
//! The schema is defined by `chart::ChartSpec`.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::chart::{ChartSpec, DashboardSpec};
use crate::error::AppError;

/// Write a chart JSON file.
pub fn write_chart_json(path: &Path, chart: &ChartSpec) -> Result<(), AppError> {
    write_json(path, chart, "chart")
}

/// Write the full dashboard description (page + chart + findings).
pub fn write_dashboard_json(path: &Path, dashboard: &DashboardSpec) -> Result<(), AppError> {
    write_json(path, dashboard, "dashboard")
}

/// Read a chart JSON file.
pub fn read_chart_json(path: &Path) -> Result<ChartSpec, AppError> {
    read_json(path, "chart")
}

fn write_json<T: Serialize>(path: &Path, value: &T, what: &str) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::input(format!("Failed to create {what} JSON '{}': {e}", path.display())))?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, value)
        .map_err(|e| AppError::input(format!("Failed to write {what} JSON: {e}")))?;
    writeln!(writer).map_err(|e| AppError::input(format!("Failed to write {what} JSON: {e}")))?;
    writer
        .flush()
        .map_err(|e| AppError::input(format!("Failed to write {what} JSON: {e}")))?;

    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::input(format!("Failed to open {what} JSON '{}': {e}", path.display())))?;
    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| AppError::input(format!("Invalid {what} JSON '{}': {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::chart::compute_chart;
    use crate::domain::{Region, RegionFilter, SalesRecord};
    use crate::io::dataset::Dataset;

    #[test]
    fn chart_survives_a_file_round_trip() {
        let ds = Dataset::from_records(vec![SalesRecord {
            sales: 6.0,
            date: NaiveDate::from_ymd_opt(2021, 1, 10).unwrap(),
            region: Region::North,
        }]);
        let chart = compute_chart(&ds, RegionFilter::North);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.json");
        write_chart_json(&path, &chart).unwrap();

        assert_eq!(read_chart_json(&path).unwrap(), chart);
    }

    #[test]
    fn invalid_json_is_input_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.json");
        std::fs::write(&path, "{\"title\": 1}").unwrap();
        assert_eq!(read_chart_json(&path).unwrap_err().exit_code(), 2);
    }
}
