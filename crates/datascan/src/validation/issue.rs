//! Severity levels and validation issues.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::rule::ValidationRule;

/// Column label for issues that span a whole row.
pub const ALL_COLUMNS: &str = "All Columns";

/// Column index for issues not tied to a single column.
pub const NO_COLUMN: i64 = -1;

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational only, may not require action.
    Info,
    /// Potential issue that should be reviewed.
    Warning,
    /// Definite issue that blocks a valid result.
    Error,
}

impl Severity {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Info => "Info",
            Severity::Warning => "Warning",
            Severity::Error => "Error",
        }
    }

    /// Sort rank: errors first.
    pub fn rank(&self) -> u8 {
        match self {
            Severity::Error => 0,
            Severity::Warning => 1,
            Severity::Info => 2,
        }
    }

    /// Score penalty for one issue of this severity.
    pub fn penalty(&self) -> f64 {
        match self {
            Severity::Error => 5.0,
            Severity::Warning => 2.0,
            Severity::Info => 0.5,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        })
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "error" => Ok(Severity::Error),
            "warning" | "warn" => Ok(Severity::Warning),
            "info" => Ok(Severity::Info),
            _ => Err(format!("Unknown severity: {}. Use error, warning, or info.", s)),
        }
    }
}

/// One reported defect.
///
/// `row` is 1-based; `0` marks a column-level issue. `column_index` is
/// 0-based, or [`NO_COLUMN`] for whole-row issues. Ids are derived from the
/// rule id and location, so re-running a rule reproduces them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
    pub id: String,
    pub rule_id: String,
    pub severity: Severity,
    pub message: String,
    pub row: usize,
    pub column: String,
    pub column_index: i64,
    pub current_value: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ValidationIssue {
    /// Create an issue raised by `rule`.
    pub fn new(
        id: impl Into<String>,
        rule: &ValidationRule,
        row: usize,
        column: impl Into<String>,
        column_index: i64,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            rule_id: rule.id().to_string(),
            severity: rule.severity,
            message: message.into(),
            row,
            column: column.into(),
            column_index,
            current_value: Value::Null,
            suggested_value: None,
            description: None,
        }
    }

    /// Set the offending value.
    pub fn with_current_value(mut self, value: impl Into<Value>) -> Self {
        self.current_value = value.into();
        self
    }

    /// Set a suggested replacement.
    pub fn with_suggested_value(mut self, value: impl Into<Value>) -> Self {
        self.suggested_value = Some(value.into());
        self
    }

    /// Set the longer explanation.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Whether the issue describes a whole column rather than one row.
    pub fn is_column_level(&self) -> bool {
        self.row == 0
    }
}
