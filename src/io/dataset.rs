//! Load the combined dataset for the dashboard.
//!
//! The file is read once at start-up into an immutable, date-sorted
//! [`Dataset`] which is then shared by reference with every chart update.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::domain::{Region, SalesRecord};
use crate::error::AppError;
use crate::io::ingest::parse_date;

/// The in-memory combined table, sorted by date (ties keep file order).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<SalesRecord>,
}

impl Dataset {
    pub fn from_records(mut records: Vec<SalesRecord>) -> Self {
        // `sort_by_key` is stable, which keeps same-day rows in input order.
        records.sort_by_key(|r| r.date);
        Self { records }
    }

    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[derive(Debug, Deserialize)]
struct CombinedRow {
    sales: String,
    date: String,
    region: String,
}

/// Read the combined CSV written by `sales ingest`.
pub fn load_dataset(path: &Path) -> Result<Dataset, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::input(format!(
            "Failed to open combined CSV '{}': {e} (run `sales ingest` first?)",
            path.display()
        ))
    })?;

    let dataset = read_dataset(file, &path.display().to_string())?;
    info!(path = %path.display(), rows = dataset.len(), "dataset loaded");
    Ok(dataset)
}

pub fn read_dataset<R: Read>(reader: R, label: &str) -> Result<Dataset, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for (idx, result) in reader.deserialize::<CombinedRow>().enumerate() {
        let line = idx + 2;
        let row = result.map_err(|e| AppError::input(format!("{label}:{line}: {e}")))?;
        let record = parse_combined_row(&row).map_err(|e| AppError::data(format!("{label}:{line}: {e}")))?;
        records.push(record);
    }

    Ok(Dataset::from_records(records))
}

fn parse_combined_row(row: &CombinedRow) -> Result<SalesRecord, String> {
    let sales = row
        .sales
        .parse::<f64>()
        .map_err(|_| format!("Invalid sales value '{}'.", row.sales))?;
    if !sales.is_finite() || sales < 0.0 {
        return Err(format!("Invalid sales value '{}'. Must be finite and non-negative.", row.sales));
    }
    let date = parse_date(&row.date)?;
    let region: Region = row.region.parse()?;
    Ok(SalesRecord { sales, date, region })
}
