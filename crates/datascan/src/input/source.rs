//! Canonical dataset and source metadata.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::cell::Cell;

/// File format a dataset was parsed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SourceFormat {
    Csv,
    Json,
    Txt,
    Tsv,
}

impl SourceFormat {
    /// Extensions accepted by the importer, lower-cased.
    pub const SUPPORTED_EXTENSIONS: [&'static str; 4] = ["csv", "json", "txt", "tsv"];

    /// Resolve a format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(SourceFormat::Csv),
            "json" => Some(SourceFormat::Json),
            "txt" => Some(SourceFormat::Txt),
            "tsv" => Some(SourceFormat::Tsv),
            _ => None,
        }
    }

    /// Resolve a format from the text after the last `.` of a file name.
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        Self::from_extension(file_extension(file_name))
    }

    pub fn label(&self) -> &'static str {
        match self {
            SourceFormat::Csv => "CSV",
            SourceFormat::Json => "JSON",
            SourceFormat::Txt => "TXT",
            SourceFormat::Tsv => "TSV",
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Text after the last `.`, or the whole name when there is none.
pub(crate) fn file_extension(file_name: &str) -> &str {
    file_name.rsplit('.').next().unwrap_or_default()
}

/// Parsed tabular data.
///
/// Every row has exactly `headers.len()` cells; [`Dataset::new`] pads short
/// rows with [`Cell::Null`] and truncates long ones.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    headers: Vec<String>,
    rows: Vec<Vec<Cell>>,
    file_name: String,
    source_format: SourceFormat,
}

impl Dataset {
    /// Create a dataset, normalizing every row to the header length.
    pub fn new(
        headers: Vec<String>,
        rows: Vec<Vec<Cell>>,
        file_name: impl Into<String>,
        source_format: SourceFormat,
    ) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, Cell::Null);
                row
            })
            .collect();

        Self {
            headers,
            rows,
            file_name: file_name.into(),
            source_format,
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn source_format(&self) -> SourceFormat {
        self.source_format
    }

    /// Get the number of rows (excluding header).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Get all values for a column by index.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &Cell> {
        self.rows.iter().filter_map(move |row| row.get(index))
    }

    /// Get a specific cell value (0-based row and column).
    pub fn get(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// First `n` rows for display.
    pub fn preview(&self, n: usize) -> &[Vec<Cell>] {
        &self.rows[..n.min(self.rows.len())]
    }
}

/// Metadata about an imported file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceMetadata {
    pub file_name: String,
    /// SHA-256 hash of the raw file contents.
    pub hash: String,
    pub size_bytes: u64,
    pub format: SourceFormat,
    pub row_count: usize,
    pub column_count: usize,
    pub imported_at: DateTime<Utc>,
}

impl SourceMetadata {
    pub fn new(dataset: &Dataset, hash: String, size_bytes: u64) -> Self {
        Self {
            file_name: dataset.file_name().to_string(),
            hash,
            size_bytes,
            format: dataset.source_format(),
            row_count: dataset.row_count(),
            column_count: dataset.column_count(),
            imported_at: Utc::now(),
        }
    }
}
