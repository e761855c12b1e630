//! Validation rule configuration and the built-in rule set.

use std::fs;
use std::path::Path;

use chrono::Utc;
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{DatascanError, Result};
use super::issue::Severity;

pub const EMPTY_CELLS: &str = "empty-cells";
pub const NUMERIC_FORMAT: &str = "numeric-format";
pub const EMAIL_FORMAT: &str = "email-format";
pub const DATE_FORMAT: &str = "date-format";
pub const DUPLICATE_ROWS: &str = "duplicate-rows";
pub const DATA_CONSISTENCY: &str = "data-consistency";
pub const LENGTH_VALIDATION: &str = "length-validation";

/// Category of a rule as written in rule files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleKind {
    Required,
    DataType,
    Format,
    Range,
    Custom,
}

/// The check a rule runs, resolved once when the rule is built.
///
/// Custom rules map to a dedicated variant by id; a custom id with no
/// built-in check resolves to [`Check::Unrecognized`] and reports nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Check {
    Required,
    DataType,
    Format,
    Range,
    DuplicateRows,
    DataConsistency,
    #[default]
    Unrecognized,
}

impl Check {
    fn resolve(kind: RuleKind, id: &str) -> Self {
        match kind {
            RuleKind::Required => Check::Required,
            RuleKind::DataType => Check::DataType,
            RuleKind::Format => Check::Format,
            RuleKind::Range => Check::Range,
            RuleKind::Custom => match id {
                DUPLICATE_ROWS => Check::DuplicateRows,
                DATA_CONSISTENCY => Check::DataConsistency,
                _ => Check::Unrecognized,
            },
        }
    }
}

/// A named, configurable check applied to a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "PartialRule")]
pub struct ValidationRule {
    id: String,
    pub name: String,
    pub description: String,
    kind: RuleKind,
    /// Restrict the rule to the column with exactly this header.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_column: Option<String>,
    pub severity: Severity,
    pub enabled: bool,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub parameters: IndexMap<String, Value>,
    #[serde(skip)]
    check: Check,
}

impl ValidationRule {
    /// Create an enabled rule with no description or parameters.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: RuleKind,
        severity: Severity,
    ) -> Self {
        let id = id.into();
        Self {
            check: Check::resolve(kind, &id),
            id,
            name: name.into(),
            description: String::new(),
            kind,
            target_column: None,
            severity,
            enabled: true,
            parameters: IndexMap::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_target_column(mut self, column: impl Into<String>) -> Self {
        self.target_column = Some(column.into());
        self
    }

    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> RuleKind {
        self.kind
    }

    pub fn check(&self) -> Check {
        self.check
    }

    /// Numeric parameter, if present and numeric.
    pub fn number_parameter(&self, key: &str) -> Option<f64> {
        self.parameters.get(key).and_then(Value::as_f64)
    }

    /// Whether the rule applies to the column with this header.
    pub fn applies_to(&self, header: &str) -> bool {
        self.target_column.as_deref().is_none_or(|target| target == header)
    }
}

/// A rule with any field left unset, as accepted by [`create_rule`] and
/// rule files.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialRule {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(alias = "type")]
    pub kind: Option<RuleKind>,
    #[serde(alias = "column")]
    pub target_column: Option<String>,
    pub severity: Option<Severity>,
    pub enabled: Option<bool>,
    pub parameters: Option<IndexMap<String, Value>>,
}

impl From<PartialRule> for ValidationRule {
    fn from(partial: PartialRule) -> Self {
        create_rule(partial)
    }
}

/// Build a rule, filling unset fields with defaults.
///
/// Defaults: id `custom-<unix millis>`, name "Custom Rule", kind custom,
/// severity warning, enabled, no parameters.
pub fn create_rule(partial: PartialRule) -> ValidationRule {
    let id = partial
        .id
        .unwrap_or_else(|| format!("custom-{}", Utc::now().timestamp_millis()));
    let kind = partial.kind.unwrap_or(RuleKind::Custom);

    let mut rule = ValidationRule::new(
        id,
        partial.name.unwrap_or_else(|| "Custom Rule".to_string()),
        kind,
        partial.severity.unwrap_or(Severity::Warning),
    );
    rule.description = partial.description.unwrap_or_default();
    rule.target_column = partial.target_column;
    rule.enabled = partial.enabled.unwrap_or(true);
    rule.parameters = partial.parameters.unwrap_or_default();
    rule
}

static DEFAULT_RULES: Lazy<Vec<ValidationRule>> = Lazy::new(|| {
    vec![
        ValidationRule::new(EMPTY_CELLS, "Empty Cells Check", RuleKind::Required, Severity::Warning)
            .with_description("Identifies empty or null cells that should contain data"),
        ValidationRule::new(
            NUMERIC_FORMAT,
            "Numeric Format Validation",
            RuleKind::DataType,
            Severity::Error,
        )
        .with_description("Ensures numeric columns contain valid numbers"),
        ValidationRule::new(EMAIL_FORMAT, "Email Format Validation", RuleKind::Format, Severity::Error)
            .with_description("Validates email address format"),
        ValidationRule::new(DATE_FORMAT, "Date Format Validation", RuleKind::Format, Severity::Error)
            .with_description("Validates date format and values"),
        ValidationRule::new(DUPLICATE_ROWS, "Duplicate Rows Check", RuleKind::Custom, Severity::Warning)
            .with_description("Identifies duplicate rows in the dataset"),
        ValidationRule::new(
            DATA_CONSISTENCY,
            "Data Consistency Check",
            RuleKind::Custom,
            Severity::Info,
        )
        .with_description("Checks for inconsistent data patterns"),
        ValidationRule::new(
            LENGTH_VALIDATION,
            "Text Length Validation",
            RuleKind::Range,
            Severity::Warning,
        )
        .with_description("Validates text field lengths")
        .with_parameter("minLength", 1)
        .with_parameter("maxLength", 255),
    ]
});

/// A fresh copy of the seven built-in rules.
pub fn default_rules() -> Vec<ValidationRule> {
    DEFAULT_RULES.clone()
}

/// Load a JSON array of rules from disk.
pub fn load_rules(path: impl AsRef<Path>) -> Result<Vec<ValidationRule>> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|e| DatascanError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_rules(&contents)
}

/// Parse a JSON array of rules.
pub fn parse_rules(json: &str) -> Result<Vec<ValidationRule>> {
    let rules: Vec<ValidationRule> = serde_json::from_str(json)?;
    if rules.is_empty() {
        return Err(DatascanError::Config("rule file contains no rules".to_string()));
    }
    Ok(rules)
}
