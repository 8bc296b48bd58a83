//! CSV loading with header normalization and minimum schema checks

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::path::Path;

use crate::feedback::FeedbackRecord;
use crate::{InsightsError, Result};

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"];

/// Column names used to pick fields out of the CSV header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    pub text: String,
    pub rating: String,
    pub date: String,
    pub id: String,
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            text: "feedback".to_string(),
            rating: "rating".to_string(),
            date: "date".to_string(),
            id: "id".to_string(),
        }
    }
}

/// Resolved header positions for one file
struct ColumnIndex {
    text: usize,
    rating: Option<usize>,
    date: Option<usize>,
    id: Option<usize>,
}

impl ColumnIndex {
    fn resolve(headers: &StringRecord, columns: &ColumnMap) -> Result<Self> {
        let normalized: Vec<String> = headers.iter().map(normalize_header).collect();
        let find = |name: &str| {
            let wanted = normalize_header(name);
            normalized.iter().position(|h| *h == wanted)
        };

        let text = find(&columns.text).ok_or_else(|| {
            InsightsError::Config(format!(
                "CSV is missing required column '{}' (found: {})",
                columns.text,
                normalized.join(", ")
            ))
        })?;

        Ok(Self {
            text,
            rating: find(&columns.rating),
            date: find(&columns.date),
            id: find(&columns.id),
        })
    }
}

/// Load feedback records from a CSV file, preserving file order.
///
/// Rows with an empty text cell are skipped. Unparsable ratings and dates
/// become `None` without rejecting the row.
pub fn load_feedback(path: &Path, columns: &ColumnMap) -> Result<Vec<FeedbackRecord>> {
    if !path.is_file() {
        return Err(InsightsError::Config(format!(
            "Input file not found: {}",
            path.display()
        )));
    }

    let file = File::open(path)?;
    let mut rdr = ReaderBuilder::new().flexible(true).from_reader(file);

    let headers = rdr.headers()?.clone();
    let index = ColumnIndex::resolve(&headers, columns)?;

    if index.rating.is_none() {
        tracing::debug!("Rating column '{}' not present", columns.rating);
    }
    if index.date.is_none() {
        tracing::debug!("Date column '{}' not present", columns.date);
    }

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for result in rdr.records() {
        let row = result?;
        match parse_row(&row, &index) {
            Some(record) => {
                if !record.rating_in_range() {
                    tracing::debug!(
                        "Rating {:?} outside 1-5 kept as-is (line {})",
                        record.rating,
                        row.position().map(|p| p.line()).unwrap_or(0)
                    );
                }
                records.push(record);
            }
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        tracing::warn!("Skipped {} row(s) with empty feedback text", skipped);
    }

    tracing::info!("Loaded {} feedback records from {}", records.len(), path.display());

    Ok(records)
}

fn parse_row(row: &StringRecord, index: &ColumnIndex) -> Option<FeedbackRecord> {
    let text = cell(row, Some(index.text))?.to_string();

    Some(FeedbackRecord {
        id: cell(row, index.id).map(str::to_string),
        date: cell(row, index.date).and_then(parse_date),
        rating: cell(row, index.rating).and_then(parse_rating),
        text,
    })
}

/// Trimmed, non-empty cell value; short rows yield `None`.
fn cell(row: &StringRecord, idx: Option<usize>) -> Option<&str> {
    idx.and_then(|i| row.get(i))
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn normalize_header(name: &str) -> String {
    name.trim_start_matches('\u{feff}').trim().to_lowercase()
}

/// Parse an integer rating; integral decimals like `4.0` are accepted.
fn parse_rating(raw: &str) -> Option<i64> {
    if let Ok(value) = raw.parse::<i64>() {
        return Some(value);
    }

    let value = raw.parse::<f64>().ok()?;
    if value.is_finite() && value.fract() == 0.0 {
        Some(value as i64)
    } else {
        None
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Some(date);
        }
    }

    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(datetime.date());
        }
    }

    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.date_naive())
}
