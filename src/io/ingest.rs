//! Raw extract ingest: filter, clean, derive and combine.
//!
//! This module turns the per-region daily sales extracts into one list of
//! `SalesRecord`s, ready to be persisted by `io::export`.
//!
//! Design goals:
//! - **Strict schema** for required columns (clear errors + exit code 2)
//! - **Fail fast** on bad values in kept rows (exit code 3, never coerce to zero)
//! - **Deterministic behavior**: source order and row order are preserved
//! - **Separation of concerns**: no aggregation or presentation logic here

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use csv::StringRecord;
use tracing::{debug, info};

use crate::domain::{IngestConfig, RawSalesRecord, Region, SalesRecord};
use crate::error::AppError;

const REQUIRED_COLUMNS: [&str; 5] = ["product", "quantity", "price", "date", "region"];

/// Currency prefixes stripped from `price` before parsing.
const CURRENCY_SYMBOLS: [char; 4] = ['$', '€', '£', '¥'];

/// Per-source counters, reported after a run.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceReport {
    pub path: PathBuf,
    pub rows_read: usize,
    pub rows_kept: usize,
}

/// Outcome of a full ingest run.
#[derive(Debug, Clone, PartialEq)]
pub struct IngestReport {
    pub sources: Vec<SourceReport>,
    pub rows_written: usize,
    pub output: PathBuf,
}

/// Read every source, combine the kept rows and overwrite the output file.
///
/// Nothing is written unless every source was read successfully.
pub fn run_ingest(config: &IngestConfig) -> Result<IngestReport, AppError> {
    let mut records = Vec::new();
    let mut sources = Vec::with_capacity(config.sources.len());

    for path in &config.sources {
        let (mut rows, report) = read_source(path, &config.product)?;
        info!(
            source = %path.display(),
            rows_read = report.rows_read,
            rows_kept = report.rows_kept,
            "source ingested"
        );
        records.append(&mut rows);
        sources.push(report);
    }

    crate::io::export::write_combined_csv(&config.output, &records)?;
    info!(rows = records.len(), output = %config.output.display(), "combined dataset written");

    Ok(IngestReport {
        sources,
        rows_written: records.len(),
        output: config.output.clone(),
    })
}

/// Read one raw extract from disk.
pub fn read_source(path: &Path, product: &str) -> Result<(Vec<SalesRecord>, SourceReport), AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::input(format!("Failed to open CSV '{}': {e}", path.display())))?;

    let label = path.display().to_string();
    let (records, rows_read) = read_sales_records(file, &label, product)?;

    let report = SourceReport {
        path: path.to_path_buf(),
        rows_read,
        rows_kept: records.len(),
    };
    Ok((records, report))
}

/// Parse one extract from any reader. Returns the kept records and the
/// number of data rows read.
///
/// `label` only appears in error messages.
pub fn read_sales_records<R: Read>(reader: R, label: &str, product: &str) -> Result<(Vec<SalesRecord>, usize), AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| AppError::input(format!("Failed to read CSV headers of '{label}': {e}")))?
        .clone();

    let header_map = build_header_map(&headers);
    ensure_required_columns_exist(&header_map, label)?;

    let target = product.trim().to_lowercase();
    let mut records = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // +2 because:
        // - records() starts at line 1 after headers
        // - CSV is 1-based line numbers
        let line = idx + 2;
        rows_read += 1;

        let record = result.map_err(|e| AppError::input(format!("{label}:{line}: CSV parse error: {e}")))?;
        let raw = raw_row(&record, &header_map);

        if raw.product.to_lowercase() != target {
            continue;
        }

        let derived = derive_record(&raw).map_err(|e| AppError::data(format!("{label}:{line}: {e}")))?;
        records.push(derived);
    }

    debug!(source = label, rows_read, rows_kept = records.len(), "extract parsed");
    Ok((records, rows_read))
}

/// Compute `sales = quantity * price` and project to the derived fields.
pub fn derive_record(raw: &RawSalesRecord) -> Result<SalesRecord, String> {
    let quantity = parse_quantity(&raw.quantity)?;
    let price = parse_price(&raw.price)?;
    let date = parse_date(&raw.date)?;
    let region: Region = raw.region.parse()?;

    let sales = quantity as f64 * price;
    if !sales.is_finite() {
        return Err(format!(
            "Sales amount overflows for quantity {quantity} at price '{}'.",
            raw.price
        ));
    }

    Ok(SalesRecord { sales, date, region })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports sometimes prefix the first header with a UTF-8 BOM.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn ensure_required_columns_exist(header_map: &HashMap<String, usize>, label: &str) -> Result<(), AppError> {
    for column in REQUIRED_COLUMNS {
        if !header_map.contains_key(column) {
            return Err(AppError::input(format!("Missing required column `{column}` in '{label}'.")));
        }
    }
    Ok(())
}

fn raw_row(record: &StringRecord, header_map: &HashMap<String, usize>) -> RawSalesRecord {
    let field = |name: &str| {
        header_map
            .get(name)
            .and_then(|idx| record.get(*idx))
            .map(str::trim)
            .unwrap_or_default()
            .to_string()
    };

    RawSalesRecord {
        product: field("product"),
        quantity: field("quantity"),
        price: field("price"),
        date: field("date"),
        region: field("region"),
    }
}

fn parse_quantity(s: &str) -> Result<u64, String> {
    s.parse::<u64>()
        .map_err(|_| format!("Invalid quantity '{s}'. Expected a non-negative integer."))
}

/// Parse a currency-formatted price such as `$3.50`.
pub fn parse_price(s: &str) -> Result<f64, String> {
    let cleaned = s.trim().trim_start_matches(CURRENCY_SYMBOLS).trim_start();
    let v = cleaned
        .parse::<f64>()
        .map_err(|_| format!("Invalid price '{s}'. Expected a currency amount like $3.50."))?;
    if !v.is_finite() || v < 0.0 {
        return Err(format!("Invalid price '{s}'. Must be finite and non-negative."));
    }
    Ok(v)
}

pub(crate) fn parse_date(s: &str) -> Result<NaiveDate, String> {
    // ISO dates are the norm in the extracts, but hand-edited files tend to
    // end up with `DD/MM/YYYY` or `DD-MM-YYYY`. Accept a small fixed set.
    const FMTS: [&str; 4] = ["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%Y/%m/%d"];
    for fmt in FMTS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(d);
        }
    }
    Err(format!(
        "Invalid date '{s}'. Expected one of: YYYY-MM-DD, DD/MM/YYYY, DD-MM-YYYY, YYYY/MM/DD."
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const HEADER: &str = "product,price,quantity,date,region\n";

    fn ingest_str(csv: &str) -> Result<(Vec<SalesRecord>, usize), AppError> {
        read_sales_records(csv.as_bytes(), "test.csv", "pink morsel")
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn keeps_target_product_case_insensitively() {
        let csv = format!(
            "{HEADER}Pink Morsel,$3.00,2,2021-01-10,north\n\
             Red Morsel,$1.00,5,2021-01-10,east\n\
             PINK MORSEL,$3.00,1,2021-01-11,west\n"
        );
        let (records, rows_read) = ingest_str(&csv).unwrap();
        assert_eq!(rows_read, 3);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].region, Region::North);
        assert_eq!(records[1].region, Region::West);
    }

    #[test]
    fn sales_is_quantity_times_cleaned_price() {
        let csv = format!("{HEADER}pink morsel,$3.50,7,2021-02-01,south\n");
        let (records, _) = ingest_str(&csv).unwrap();
        assert!((records[0].sales - 24.5).abs() < 1e-12);
        assert_eq!(records[0].date, ymd(2021, 2, 1));
    }

    #[test]
    fn unparsable_price_is_fatal() {
        let csv = format!("{HEADER}pink morsel,$three,1,2021-02-01,south\n");
        let err = ingest_str(&csv).unwrap_err();
        assert_eq!(err.exit_code(), 3);
        assert!(err.message().contains("test.csv:2"));
        assert!(err.message().contains("$three"));
    }

    #[test]
    fn bad_values_in_dropped_rows_are_ignored() {
        let csv = format!("{HEADER}gold morsel,n/a,-4,yesterday,mars\n");
        let (records, rows_read) = ingest_str(&csv).unwrap();
        assert!(records.is_empty());
        assert_eq!(rows_read, 1);
    }

    #[test]
    fn negative_quantity_is_fatal() {
        let csv = format!("{HEADER}pink morsel,$1.00,-1,2021-02-01,south\n");
        assert_eq!(ingest_str(&csv).unwrap_err().exit_code(), 3);
    }

    #[test]
    fn missing_column_is_fatal() {
        let err = ingest_str("product,quantity,date,region\npink morsel,1,2021-01-01,north\n").unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.message().contains("`price`"));
    }

    #[test]
    fn header_bom_and_case_are_normalized() {
        let csv = "\u{feff}Product,Quantity,Price,Date,Region\npink morsel,2,$1.25,2021-03-01,East\n";
        let (records, _) = ingest_str(csv).unwrap();
        assert_eq!(records.len(), 1);
        assert!((records[0].sales - 2.5).abs() < 1e-12);
    }

    #[test]
    fn price_parsing() {
        assert_eq!(parse_price("$3.00").unwrap(), 3.0);
        assert_eq!(parse_price(" £ 0.5").unwrap(), 0.5);
        assert_eq!(parse_price("4").unwrap(), 4.0);
        assert!(parse_price("").is_err());
        assert!(parse_price("$-1.00").is_err());
        assert!(parse_price("$1,000.00").is_err());
    }

    #[test]
    fn accepts_common_date_formats() {
        assert_eq!(parse_date("2021-01-15").unwrap(), ymd(2021, 1, 15));
        assert_eq!(parse_date("15/01/2021").unwrap(), ymd(2021, 1, 15));
        assert!(parse_date("Jan 15").is_err());
    }

    #[test]
    fn run_ingest_combines_sources_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let rows = [
            "Pink Morsel,$3.00,2,2021-01-10,north\n",
            "Red Morsel,$1.00,5,2021-01-10,east\n",
            "pink morsel,$3.00,1,2021-01-11,west\n",
        ];
        let mut sources = Vec::new();
        for (i, row) in rows.iter().enumerate() {
            let path = dir.path().join(format!("daily_sales_data_{i}.csv"));
            fs::write(&path, format!("{HEADER}{row}")).unwrap();
            sources.push(path);
        }
        let output = dir.path().join("output.csv");
        let config = IngestConfig {
            sources,
            output: output.clone(),
            product: "pink morsel".to_string(),
        };

        let report = run_ingest(&config).unwrap();
        assert_eq!(report.rows_written, 2);
        let kept: Vec<_> = report.sources.iter().map(|s| s.rows_kept).collect();
        assert_eq!(kept, [1, 0, 1]);

        let text = fs::read_to_string(&output).unwrap();
        assert_eq!(text, "sales,date,region\n6.00,2021-01-10,north\n3.00,2021-01-11,west\n");

        // Same inputs, same bytes.
        run_ingest(&config).unwrap();
        assert_eq!(fs::read_to_string(&output).unwrap(), text);
    }

    #[test]
    fn failed_run_leaves_previous_output_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("output.csv");
        fs::write(&output, "previous").unwrap();

        let good = dir.path().join("good.csv");
        fs::write(&good, format!("{HEADER}pink morsel,$1.00,1,2021-01-01,north\n")).unwrap();
        let config = IngestConfig {
            sources: vec![good, dir.path().join("missing.csv")],
            output: output.clone(),
            product: "pink morsel".to_string(),
        };

        let err = run_ingest(&config).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert_eq!(fs::read_to_string(&output).unwrap(), "previous");
    }
}
