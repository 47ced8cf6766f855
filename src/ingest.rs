//! CSV ingest and normalization
//!
//! Turns a spreadsheet export into a [`Dataset`]: one numeric column per
//! header, with unparseable or empty cells degraded to missing values.
//! Structural problems with individual rows (ragged records, parse
//! errors) are collected with 1-based line numbers and reported, not
//! fatal - real-world pre/post files come out of spreadsheet tools and
//! are rarely pristine.
//!
//! Design goals:
//! - tolerate messy input (BOM headers, stray whitespace, odd encodings)
//! - row-level validation: skip bad rows, but report what happened
//! - no analysis logic here; this module only builds the dataset

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::dataset::{Dataset, DatasetError};

/// Errors that make a file unusable as a whole
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read CSV headers: {0}")]
    Header(#[from] csv::Error),

    #[error("CSV has no columns")]
    NoColumns,

    #[error("CSV has no data rows")]
    NoRows,

    #[error(transparent)]
    Dataset(#[from] DatasetError),
}

/// A row-level problem encountered during ingest
#[derive(Debug, Clone)]
pub struct RowError {
    /// 1-based line number in the source file (header is line 1)
    pub line: usize,
    pub message: String,
}

/// Ingest output: the dataset plus bookkeeping about what was read
#[derive(Debug, Clone)]
pub struct IngestedData {
    pub dataset: Dataset,
    /// Data rows seen in the file (excluding the header)
    pub rows_read: usize,
    /// Data rows that made it into the dataset
    pub rows_used: usize,
    pub row_errors: Vec<RowError>,
}

/// Load a CSV file into a dataset
///
/// Every column becomes numeric-or-missing: empty, non-numeric, and
/// non-finite cells are missing values, which the comparison pipeline
/// later drops row-wise per pair. The file is decoded as UTF-8 with
/// lossy replacement so exports in legacy encodings still ingest.
///
/// # Errors
/// Fails when the file cannot be read, has no header columns, has a
/// duplicate header, or contains no data rows at all.
pub fn load_dataset(path: &Path) -> Result<IngestedData, IngestError> {
    let bytes = fs::read(path).map_err(|source| IngestError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let text = String::from_utf8_lossy(&bytes);

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let header_record = reader.headers()?.clone();

    // Unnamed columns (empty headers) are ignored but keep their
    // position, so the remaining fields still line up per row.
    let mut headers = Vec::new();
    let mut field_positions = Vec::new();
    for (i, name) in header_record.iter().enumerate() {
        let name = normalize_header_name(name);
        if !name.is_empty() {
            field_positions.push(i);
            headers.push(name);
        }
    }

    if headers.is_empty() {
        return Err(IngestError::NoColumns);
    }

    let mut columns: Vec<Vec<Option<f64>>> = vec![Vec::new(); headers.len()];
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // +2: records() starts after the header, and line numbers are
        // 1-based.
        let line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        if record.len() != header_record.len() {
            row_errors.push(RowError {
                line,
                message: format!(
                    "expected {} fields, found {}",
                    header_record.len(),
                    record.len()
                ),
            });
            continue;
        }

        for (col, &pos) in columns.iter_mut().zip(field_positions.iter()) {
            col.push(parse_cell(record.get(pos).unwrap_or("")));
        }
    }

    if columns[0].is_empty() {
        return Err(IngestError::NoRows);
    }

    let rows_used = columns[0].len();
    let dataset = Dataset::from_columns(headers.into_iter().zip(columns))?;

    tracing::debug!(
        rows_read,
        rows_used,
        columns = dataset.n_columns(),
        errors = row_errors.len(),
        "ingested CSV"
    );

    Ok(IngestedData {
        dataset,
        rows_read,
        rows_used,
        row_errors,
    })
}

fn normalize_header_name(name: &str) -> String {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix
    // on the first header (e.g. "\u{feff}subject"). If we don't strip
    // it, column lookups against the visible name will miss.
    name.trim().trim_start_matches('\u{feff}').to_string()
}

fn parse_cell(cell: &str) -> Option<f64> {
    if cell.is_empty() {
        return None;
    }
    let v = cell.parse::<f64>().ok()?;
    v.is_finite().then_some(v)
}
