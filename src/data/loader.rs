use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;

use super::model::{Dataset, Record, Season, Weather};
use crate::error::DashboardError;

/// Columns that must be present in the header row. Others are ignored.
pub const REQUIRED_COLUMNS: [&str; 5] = ["instant", "dteday", "season", "weathersit", "cnt"];

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the rental table from a CSV file.
///
/// Any I/O or parse failure is reported as [`DashboardError::DataUnavailable`].
pub fn load(path: &Path) -> Result<Dataset, DashboardError> {
    let result = std::fs::File::open(path)
        .with_context(|| format!("opening {}", path.display()))
        .and_then(load_reader);

    match result {
        Ok(dataset) => {
            log::info!(
                "Loaded {} records from {} ({:?})",
                dataset.len(),
                path.display(),
                dataset.date_bounds()
            );
            Ok(dataset)
        }
        Err(source) => Err(DashboardError::DataUnavailable {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// CSV layout: header row, then one row per record. Required columns:
/// `instant` (row id), `dteday` (date), `season` (1–4), `weathersit` (1–4),
/// `cnt` (rental count).
pub fn load_reader<R: Read>(reader: R) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers().context("reading CSV headers")?.clone();
    for col in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == col) {
            bail!("CSV missing '{col}' column");
        }
    }

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<RawRow>().enumerate() {
        let raw = result.with_context(|| format!("CSV row {row_no}"))?;
        let record = raw
            .into_record()
            .with_context(|| format!("CSV row {row_no}"))?;
        records.push(record);
    }

    Ok(Dataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Row parsing
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawRow {
    instant: i64,
    dteday: String,
    season: String,
    weathersit: String,
    cnt: u64,
}

impl RawRow {
    fn into_record(self) -> Result<Record> {
        Ok(Record {
            row_id: 0,
            instant: self.instant,
            date: parse_date(&self.dteday)?,
            season: self.season.parse::<Season>()?,
            weather: self.weathersit.parse::<Weather>()?,
            rental_count: self.cnt,
        })
    }
}

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Parse an ISO-like date. A trailing time of day is accepted and dropped.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(d);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt.date());
        }
    }
    bail!("'{s}' is not a date")
}
