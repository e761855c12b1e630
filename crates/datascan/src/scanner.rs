//! Main Scanner struct: import followed by validation.

use std::fmt;
use std::path::Path;

use crate::input::{Dataset, ImportConfig, ImportError, ImportResult, Importer, SourceMetadata};
use crate::progress::ProgressReporter;
use crate::report::ValidationReport;
use crate::validation::{ValidationEngine, ValidationResult, ValidationRule};

/// Configuration for a scan.
#[derive(Debug, Clone, Default)]
pub struct ScannerConfig {
    /// Import limits.
    pub import: ImportConfig,
    /// Rules to run (None = built-in rule set).
    pub rules: Option<Vec<ValidationRule>>,
}

/// Result of scanning one file.
#[derive(Debug, Clone)]
pub struct ScanResult {
    pub dataset: Dataset,
    pub metadata: SourceMetadata,
    /// Non-blocking import warnings.
    pub warnings: Vec<ImportError>,
    pub validation: ValidationResult,
}

impl ScanResult {
    pub fn report(&self) -> ValidationReport {
        ValidationReport::from_result(self.dataset.file_name(), &self.validation)
    }
}

/// Import failed; validation never ran.
#[derive(Debug, Clone)]
pub struct ScanError {
    pub errors: Vec<ImportError>,
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self
            .errors
            .iter()
            .filter(|e| e.is_error())
            .map(|e| e.message.as_str())
            .collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for ScanError {}

/// The main scan pipeline.
#[derive(Debug, Clone, Default)]
pub struct Scanner {
    importer: Importer,
    engine: ValidationEngine,
}

impl Scanner {
    /// Create a scanner with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scanner with custom configuration.
    pub fn with_config(config: ScannerConfig) -> Self {
        let engine = match config.rules {
            Some(rules) => ValidationEngine::with_rules(rules),
            None => ValidationEngine::new(),
        };
        Self {
            importer: Importer::with_config(config.import),
            engine,
        }
    }

    /// Report import and validation progress to `progress`.
    pub fn with_progress(self, progress: ProgressReporter) -> Self {
        Self {
            importer: self.importer.with_progress(progress.clone()),
            engine: self.engine.with_progress(progress),
        }
    }

    pub fn rules(&self) -> &[ValidationRule] {
        self.engine.rules()
    }

    /// Import raw bytes and validate the dataset.
    pub fn scan(&self, bytes: &[u8], file_name: &str) -> Result<ScanResult, ScanError> {
        self.finish(self.importer.import(bytes, file_name))
    }

    /// Read a file from disk, import and validate it.
    pub async fn scan_file(&self, path: impl AsRef<Path>) -> Result<ScanResult, ScanError> {
        let imported = self.importer.import_file(path).await;
        self.finish(imported)
    }

    /// Import only, for callers that just need the dataset.
    pub async fn import_file(&self, path: impl AsRef<Path>) -> ImportResult {
        self.importer.import_file(path).await
    }

    pub fn validate(&self, dataset: &Dataset) -> ValidationResult {
        self.engine.validate(dataset)
    }

    fn finish(&self, imported: ImportResult) -> Result<ScanResult, ScanError> {
        let warnings: Vec<ImportError> = imported.warnings().cloned().collect();
        let metadata = imported.metadata.clone();

        let dataset = imported
            .into_result()
            .map_err(|errors| ScanError { errors })?;
        let metadata = metadata.ok_or_else(|| ScanError { errors: Vec::new() })?;
        let validation = self.engine.validate(&dataset);

        Ok(ScanResult {
            dataset,
            metadata,
            warnings,
            validation,
        })
    }
}
