//! Export of validation results as JSON or CSV.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DatascanError, Result};
use crate::validation::{ValidationIssue, ValidationResult, ValidationSummary};

/// Column order of the CSV issue export.
const CSV_HEADER: [&str; 7] = [
    "severity",
    "ruleId",
    "row",
    "column",
    "message",
    "currentValue",
    "suggestedValue",
];

/// Exportable snapshot of a validation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub file_name: String,
    pub summary: ValidationSummary,
    pub issues: Vec<ValidationIssue>,
    pub processed_at: DateTime<Utc>,
}

impl ValidationReport {
    pub fn from_result(file_name: impl Into<String>, result: &ValidationResult) -> Self {
        Self {
            file_name: file_name.into(),
            summary: result.summary.clone(),
            issues: result.issues.clone(),
            processed_at: result.processed_at,
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// `validation-report-<fileName>-<unix millis>.json`
    pub fn default_file_name(&self) -> String {
        format!(
            "validation-report-{}-{}.json",
            self.file_name,
            Utc::now().timestamp_millis()
        )
    }

    /// Write one CSV record per issue, with a header line.
    pub fn write_issues_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(CSV_HEADER)?;

        for issue in &self.issues {
            let row = issue.row.to_string();
            let current = json_cell(&issue.current_value);
            let suggested = issue.suggested_value.as_ref().map(json_cell).unwrap_or_default();
            csv.write_record([
                issue.severity.to_string().as_str(),
                issue.rule_id.as_str(),
                row.as_str(),
                issue.column.as_str(),
                issue.message.as_str(),
                current.as_str(),
                suggested.as_str(),
            ])?;
        }

        csv.flush().map_err(|e| DatascanError::Csv(e.into()))?;
        Ok(())
    }

    /// Save the report as pretty JSON, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let io_error = |source: std::io::Error| DatascanError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_error)?;
        }

        let file = File::create(path).map_err(io_error)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush().map_err(io_error)?;
        Ok(())
    }
}

/// Plain text for a JSON value: strings unquoted, null empty.
fn json_cell(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
