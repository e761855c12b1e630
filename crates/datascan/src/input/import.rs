//! Import orchestration: size and format checks, parser dispatch, structural checks.

use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{info, warn};

use crate::error::{DatascanError, Result};
use crate::progress::{ProgressReporter, ResetOnDrop};
use super::json::JsonParser;
use super::parser::{DelimitedParser, FormatParser};
use super::source::{file_extension, Dataset, SourceFormat, SourceMetadata};

/// Default maximum input size: 10 MB.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Importer configuration.
#[derive(Debug, Clone)]
pub struct ImportConfig {
    /// Inputs larger than this many bytes are rejected.
    pub max_file_size: u64,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

/// Whether an import problem blocks success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportErrorKind {
    Error,
    Warning,
}

/// One problem found while importing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportError {
    pub kind: ImportErrorKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
}

impl ImportError {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: ImportErrorKind::Error,
            message: message.into(),
            row: None,
            column: None,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: ImportErrorKind::Warning,
            message: message.into(),
            row: None,
            column: None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == ImportErrorKind::Error
    }
}

/// Outcome of an import.
///
/// `dataset` is only present when `success` is true. Warnings may accompany
/// a successful import.
#[derive(Debug, Clone)]
pub struct ImportResult {
    pub success: bool,
    pub dataset: Option<Dataset>,
    pub metadata: Option<SourceMetadata>,
    pub errors: Vec<ImportError>,
}

impl ImportResult {
    fn failed(errors: Vec<ImportError>) -> Self {
        Self {
            success: false,
            dataset: None,
            metadata: None,
            errors,
        }
    }

    /// Warnings attached to the import, if any.
    pub fn warnings(&self) -> impl Iterator<Item = &ImportError> {
        self.errors.iter().filter(|e| !e.is_error())
    }

    /// Collapse into the dataset or the accumulated problems.
    pub fn into_result(self) -> std::result::Result<Dataset, Vec<ImportError>> {
        match self.dataset {
            Some(dataset) if self.success => Ok(dataset),
            _ => Err(self.errors),
        }
    }
}

/// Reads report files into datasets.
#[derive(Debug, Clone, Default)]
pub struct Importer {
    config: ImportConfig,
    progress: Option<ProgressReporter>,
}

impl Importer {
    /// Create an importer with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an importer with custom configuration.
    pub fn with_config(config: ImportConfig) -> Self {
        Self {
            config,
            progress: None,
        }
    }

    /// Report progress of every import to `progress`.
    pub fn with_progress(mut self, progress: ProgressReporter) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    /// Read a file from disk and import it.
    ///
    /// An unreadable file is reported as an import error, like any other
    /// failure.
    pub async fn import_file(&self, path: impl AsRef<Path>) -> ImportResult {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        match read_file(path).await {
            Ok(bytes) => self.import(&bytes, &file_name),
            Err(e) => {
                warn!(file = %file_name, error = %e, "could not read file");
                ImportResult::failed(vec![ImportError::error(format!(
                    "Failed to parse file: {}",
                    e
                ))])
            }
        }
    }

    /// Import raw file contents.
    pub fn import(&self, bytes: &[u8], file_name: &str) -> ImportResult {
        let progress = self.progress.as_ref();
        let _reset = ResetOnDrop(progress);
        let report = |p: f64| {
            if let Some(progress) = progress {
                progress.report(p);
            }
        };

        report(10.0);

        let size = bytes.len() as u64;
        if size > self.config.max_file_size {
            let err = DatascanError::FileTooLarge {
                size,
                limit: self.config.max_file_size,
            };
            warn!(file = file_name, size, "file exceeds size limit");
            return ImportResult::failed(vec![ImportError::error(err.to_string())]);
        }

        report(30.0);

        let Some(format) = SourceFormat::from_file_name(file_name) else {
            let err = DatascanError::UnsupportedFormat(
                file_extension(file_name).to_ascii_lowercase(),
            );
            warn!(file = file_name, "unsupported file format");
            return ImportResult::failed(vec![ImportError::error(err.to_string())]);
        };

        let dataset = match parse_bytes(bytes, file_name, format) {
            Ok(dataset) => dataset,
            Err(e) => {
                warn!(file = file_name, error = %e, "parse failed");
                return ImportResult::failed(vec![ImportError::error(format!(
                    "Failed to parse file: {}",
                    e
                ))]);
            }
        };

        report(80.0);

        let mut errors = Vec::new();
        if dataset.headers().is_empty() {
            warn!(file = file_name, "no headers detected");
            errors.push(ImportError::warning("No headers detected in the file"));
        }

        if dataset.rows().is_empty() {
            warn!(file = file_name, "no data rows");
            errors.push(ImportError::error("No data rows found in the file"));
            return ImportResult::failed(errors);
        }

        report(100.0);

        let metadata = SourceMetadata::new(&dataset, content_hash(bytes), size);
        info!(
            file = file_name,
            format = %format,
            rows = dataset.row_count(),
            columns = dataset.column_count(),
            "import complete"
        );

        ImportResult {
            success: true,
            dataset: Some(dataset),
            metadata: Some(metadata),
            errors,
        }
    }
}

/// Import raw file contents with the default configuration.
pub fn import(bytes: &[u8], file_name: &str) -> ImportResult {
    Importer::new().import(bytes, file_name)
}

/// Decode bytes and run the parser for `format`.
pub fn parse_bytes(bytes: &[u8], file_name: &str, format: SourceFormat) -> Result<Dataset> {
    let text = decode_text(bytes);
    match format {
        SourceFormat::Csv => DelimitedParser::csv().parse(&text, file_name),
        SourceFormat::Txt => DelimitedParser::txt().parse(&text, file_name),
        SourceFormat::Tsv => DelimitedParser::tsv().parse(&text, file_name),
        SourceFormat::Json => JsonParser::new().parse(&text, file_name),
    }
}

/// UTF-8 decode with replacement, dropping a leading byte-order mark.
fn decode_text(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    text.strip_prefix('\u{feff}').unwrap_or(&text).to_string()
}

fn content_hash(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("sha256:{:x}", hasher.finalize())
}

async fn read_file(path: &Path) -> Result<Vec<u8>> {
    tokio::fs::read(path).await.map_err(|e| DatascanError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Cell;
    use crate::progress::recording_reporter;

    #[test]
    fn test_import_csv_success() {
        let result = import(b"name,amount\nAlice,10\nBob,20\n", "sales.csv");

        assert!(result.success);
        assert!(result.errors.is_empty());
        let metadata = result.metadata.clone().unwrap();
        assert!(metadata.hash.starts_with("sha256:"));
        assert_eq!(metadata.row_count, 2);

        let dataset = result.into_result().unwrap();
        assert_eq!(dataset.headers(), &["name", "amount"]);
        assert_eq!(dataset.get(1, 1), Some(&Cell::Number(20.0)));
    }

    #[test]
    fn test_rejects_oversized_input() {
        let importer = Importer::with_config(ImportConfig { max_file_size: 4 });
        let result = importer.import(b"a,b\n1,2\n", "t.csv");

        assert!(!result.success);
        assert!(result.dataset.is_none());
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].message.contains("File size exceeds"));
    }

    #[test]
    fn test_rejects_unsupported_extension() {
        let result = import(b"a,b\n1,2\n", "report.xlsx");

        assert!(!result.success);
        assert_eq!(
            result.errors[0].message,
            "Unsupported file format: xlsx. Supported formats: CSV, JSON, TXT, TSV"
        );
    }

    #[test]
    fn test_extension_match_is_case_insensitive() {
        assert!(import(b"a\tb\n1\t2\n", "DATA.TSV").success);
    }

    #[test]
    fn test_blank_csv_fails_with_single_error() {
        let result = import(b"\n  \n\n", "blank.csv");

        assert!(!result.success);
        assert!(result.dataset.is_none());
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].is_error());
        assert_eq!(result.errors[0].message, "Failed to parse file: File is empty");
    }

    #[test]
    fn test_header_only_fails_with_no_rows() {
        let result = import(b"a,b\n", "t.csv");

        assert!(!result.success);
        assert_eq!(result.errors[0].message, "No data rows found in the file");
    }

    #[test]
    fn test_empty_headers_is_warning() {
        let result = import(b"[{}, {}]", "t.json");

        assert!(result.success);
        assert_eq!(result.warnings().count(), 1);
        assert_eq!(result.errors[0].message, "No headers detected in the file");
    }

    #[test]
    fn test_invalid_json_structure() {
        let result = import(b"123", "t.json");

        assert!(!result.success);
        assert_eq!(
            result.errors[0].message,
            "Failed to parse file: Invalid JSON structure for report data"
        );
    }

    #[test]
    fn test_bom_is_stripped() {
        let dataset = import("\u{feff}id,name\n1,x\n".as_bytes(), "t.csv")
            .into_result()
            .unwrap();
        assert_eq!(dataset.headers()[0], "id");
    }

    #[test]
    fn test_progress_sequence_on_success() {
        let (reporter, seen) = recording_reporter();
        let importer = Importer::new().with_progress(reporter);
        importer.import(b"a\n1\n", "t.csv");

        assert_eq!(*seen.lock().unwrap(), vec![10.0, 30.0, 80.0, 100.0, 0.0]);
    }

    #[test]
    fn test_progress_resets_on_failure() {
        let (reporter, seen) = recording_reporter();
        let importer = Importer::new().with_progress(reporter);
        importer.import(b"a\n1\n", "t.pdf");

        assert_eq!(*seen.lock().unwrap(), vec![10.0, 30.0, 0.0]);
    }
}
