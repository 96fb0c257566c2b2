//! Write the combined dataset to CSV.
//!
//! The file is the hand-off between ingest and the dashboard, so it is kept
//! byte-stable: fixed header, `\n` terminators, no timestamps.

use std::path::Path;

use tempfile::NamedTempFile;

use crate::domain::SalesRecord;
use crate::error::AppError;

pub const COMBINED_HEADER: [&str; 3] = ["sales", "date", "region"];

/// Overwrite `path` with `records`.
///
/// Rows go to a temporary file next to the target which is then renamed over
/// it, so readers never observe a half-written file.
pub fn write_combined_csv(path: &Path, records: &[SalesRecord]) -> Result<(), AppError> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| {
        AppError::input(format!("Failed to create temporary file in '{}': {e}", dir.display()))
    })?;

    {
        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(tmp.as_file_mut());

        writer
            .write_record(COMBINED_HEADER)
            .map_err(|e| AppError::input(format!("Failed to write combined CSV header: {e}")))?;

        for r in records {
            writer
                .write_record([format_sales(r.sales), r.date.format("%Y-%m-%d").to_string(), r.region.code().to_string()])
                .map_err(|e| AppError::input(format!("Failed to write combined CSV row: {e}")))?;
        }

        writer
            .flush()
            .map_err(|e| AppError::input(format!("Failed to flush combined CSV: {e}")))?;
    }

    tmp.persist(path)
        .map_err(|e| AppError::input(format!("Failed to replace '{}': {e}", path.display())))?;

    Ok(())
}

/// Two decimals when that is exact, otherwise the shortest round-trip form.
pub fn format_sales(v: f64) -> String {
    let fixed = format!("{v:.2}");
    if fixed.parse::<f64>() == Ok(v) {
        fixed
    } else {
        v.to_string()
    }
}
