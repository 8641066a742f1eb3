//! CSV ingest and normalization.
//!
//! This module turns heterogeneous per-well monthly CSVs into clean
//! `WellMonthRecord`s that are safe to classify.
//!
//! Design goals:
//! - **Strict schema** against the configured columns (clear errors +
//!   exit code 2, surfaced before any analysis -- no partial results)
//! - **No silent coercion**: unparseable dates and negative or malformed
//!   volumes are configuration-class errors, not skipped rows
//! - **Deterministic behavior**: duplicate (well, month) rows are merged
//!   by a fixed rule so the timeline invariant holds
//! - **Separation of concerns**: no classification logic here

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use chrono::NaiveDate;

use crate::calendar;
use crate::config::ColumnConfig;
use crate::domain::WellMonthRecord;
use crate::error::AppError;

/// Ingest output: normalized records + the well set + counts.
#[derive(Debug, Clone, Default)]
pub struct IngestedRecords {
    pub records: Vec<WellMonthRecord>,
    pub wells: BTreeSet<String>,
    pub rows_read: usize,
    /// Records after duplicate-month merging.
    pub rows_used: usize,
}

impl IngestedRecords {
    /// Fold another well's records into this set.
    pub fn absorb(&mut self, other: IngestedRecords) {
        self.records.extend(other.records);
        self.wells.extend(other.wells);
        self.rows_read += other.rows_read;
        self.rows_used += other.rows_used;
    }
}

/// Load one well's records from a CSV file.
///
/// One file holds one well's history. The well id is `well_id` when
/// given, otherwise the file stem (the agency fetcher names files by
/// API number for exactly this reason).
pub fn load_csv_file(
    path: &Path,
    config: &ColumnConfig,
    well_id: Option<&str>,
) -> Result<IngestedRecords, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open CSV '{}': {e}", path.display())))?;

    let well_id = match well_id {
        Some(id) => id.to_string(),
        None => path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string()),
    };

    read_records(file, config, &well_id)
        .map_err(|e| AppError::new(e.exit_code(), format!("{}: {e}", path.display())))
}

/// Load several single-well CSV files into one record set.
///
/// `well_ids` pairs positionally with `paths`; missing entries fall back
/// to the file stem.
pub fn load_csv_files(
    paths: &[std::path::PathBuf],
    well_ids: &[String],
    config: &ColumnConfig,
) -> Result<IngestedRecords, AppError> {
    let mut out = IngestedRecords::default();
    for (i, path) in paths.iter().enumerate() {
        let well_id = well_ids.get(i).map(|s| s.as_str());
        out.absorb(load_csv_file(path, config, well_id)?);
    }
    Ok(out)
}

/// Parse one well's records from any reader.
pub fn read_records<R: Read>(
    reader: R,
    config: &ColumnConfig,
    well_id: &str,
) -> Result<IngestedRecords, AppError> {
    let mut buffered = BufReader::new(reader);

    // Agency exports sometimes carry preamble rows above the headers.
    for _ in 0..config.header_row {
        let mut skipped = String::new();
        buffered
            .read_line(&mut skipped)
            .map_err(|e| AppError::new(2, format!("Failed to read input: {e}")))?;
    }

    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(buffered);

    let headers: Vec<String> = csv_reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers: {e}")))?
        .iter()
        .map(String::from)
        .collect();

    config.ensure_columns(&headers)?;

    let index_of = |col: &Option<String>| -> Option<usize> {
        col.as_deref()
            .and_then(|name| headers.iter().position(|h| h == name))
    };
    let date_idx = headers
        .iter()
        .position(|h| *h == config.date_col)
        .ok_or_else(|| AppError::new(2, format!("Missing date column '{}'.", config.date_col)))?;
    let oil_idx = index_of(&config.oil_prod_col);
    let gas_idx = index_of(&config.gas_prod_col);
    let days_idx = index_of(&config.days_produced_col);
    let status_idx = index_of(&config.status_col);

    let mut records = Vec::new();
    let mut rows_read = 0;

    for (row_number, result) in csv_reader.records().enumerate() {
        let row = result
            .map_err(|e| AppError::new(2, format!("Bad CSV row {}: {e}", row_number + 2)))?;
        if row.iter().all(|field| field.is_empty()) {
            continue;
        }
        rows_read += 1;
        let line = row_number + 2 + config.header_row;

        let raw_date = row.get(date_idx).unwrap_or("");
        let month = parse_month(raw_date)
            .ok_or_else(|| AppError::new(2, format!("Unparseable date '{raw_date}' on line {line}.")))?;

        let field = |idx: Option<usize>| idx.and_then(|i| row.get(i)).unwrap_or("");
        let oil = parse_volume(field(oil_idx), "oil", line)?;
        let gas = parse_volume(field(gas_idx), "gas", line)?;
        let days_produced = parse_days(field(days_idx), line)?;
        let status = {
            let s = field(status_idx);
            if s.is_empty() {
                None
            } else {
                Some(s.to_string())
            }
        };

        records.push(WellMonthRecord {
            well_id: well_id.to_string(),
            month,
            oil,
            gas,
            days_produced,
            status,
        });
    }

    let records = merge_duplicate_months(records);
    let rows_used = records.len();
    let mut wells = BTreeSet::new();
    wells.insert(well_id.to_string());

    Ok(IngestedRecords {
        records,
        wells,
        rows_read,
        rows_used,
    })
}

/// Parse a record date into its normalized month.
///
/// Accepts full dates (`2021-03-01`, `3/1/2021`, `2021/03/01`) and
/// month-only forms (`2021-03`, `03/2021`).
fn parse_month(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    for format in ["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d", "%m/%d/%y"] {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(calendar::month_floor(date));
        }
    }
    for format in ["%Y-%m-%d", "%d/%m/%Y"] {
        let with_day = match format {
            "%Y-%m-%d" => format!("{trimmed}-01"),
            _ => format!("01/{trimmed}"),
        };
        if let Ok(date) = NaiveDate::parse_from_str(&with_day, format) {
            return Some(calendar::month_floor(date));
        }
    }
    None
}

fn parse_volume(raw: &str, what: &str, line: usize) -> Result<Option<f64>, AppError> {
    let trimmed = raw.trim().replace(',', "");
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("na") || trimmed == "." {
        return Ok(None);
    }
    let value: f64 = trimmed
        .parse()
        .map_err(|_| AppError::new(2, format!("Malformed {what} volume '{raw}' on line {line}.")))?;
    if !value.is_finite() || value < 0.0 {
        return Err(AppError::new(
            2,
            format!("Negative or non-finite {what} volume '{raw}' on line {line}."),
        ));
    }
    Ok(Some(value))
}

fn parse_days(raw: &str, line: usize) -> Result<Option<u32>, AppError> {
    let trimmed = raw.trim().replace(',', "");
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("na") || trimmed == "." {
        return Ok(None);
    }
    let value: f64 = trimmed
        .parse()
        .map_err(|_| AppError::new(2, format!("Malformed days-produced '{raw}' on line {line}.")))?;
    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 || value > 31.0 {
        return Err(AppError::new(
            2,
            format!("Invalid days-produced '{raw}' on line {line} (expected 0..=31)."),
        ));
    }
    Ok(Some(value as u32))
}

/// Collapse duplicate (well, month) rows into one record.
///
/// Agency exports occasionally repeat a month (amended filings).
/// Volumes are summed, days-produced takes the maximum, and the first
/// non-empty status code wins.
fn merge_duplicate_months(records: Vec<WellMonthRecord>) -> Vec<WellMonthRecord> {
    let mut merged: Vec<WellMonthRecord> = Vec::with_capacity(records.len());
    for record in records {
        match merged
            .iter_mut()
            .find(|r| r.well_id == record.well_id && r.month == record.month)
        {
            None => merged.push(record),
            Some(existing) => {
                existing.oil = sum_opt(existing.oil, record.oil);
                existing.gas = sum_opt(existing.gas, record.gas);
                existing.days_produced = match (existing.days_produced, record.days_produced) {
                    (Some(a), Some(b)) => Some(a.max(b)),
                    (a, b) => a.or(b),
                };
                if existing.status.is_none() {
                    existing.status = record.status;
                }
            }
        }
    }
    merged.sort_by(|a, b| a.month.cmp(&b.month));
    merged
}

fn sum_opt(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a + b),
        (a, b) => a.or(b),
    }
}
