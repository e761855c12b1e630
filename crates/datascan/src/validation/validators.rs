//! Validators implementing each rule check.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::input::{format_number, parse_number, Cell, Dataset};

use super::columns::{
    is_boolean_column, is_date_column, is_email_column, is_numeric_column, is_phone_column,
};
use super::issue::{ValidationIssue, ALL_COLUMNS, NO_COLUMN};
use super::rule::ValidationRule;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

static PHONE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?[1-9][0-9]{0,15}$").unwrap());

static PHONE_SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s\-()]").unwrap());

/// Tokens accepted in boolean-flagged columns, lower-cased.
const BOOLEAN_TOKENS: &[&str] = &["true", "false", "1", "0", "yes", "no"];

/// Row numbers listed in a casing issue before truncating with `...`.
const MAX_LISTED_ROWS: usize = 10;

/// Trait for validators.
pub trait Validator {
    /// Run the check for `rule` and return its issues.
    fn validate(&self, rule: &ValidationRule, dataset: &Dataset) -> Vec<ValidationIssue>;
}

/// A cell together with its 0-based position and column header.
struct CellRef<'a> {
    row: usize,
    col: usize,
    header: &'a str,
    cell: &'a Cell,
}

/// Cells in row-major order, limited to the columns `rule` applies to.
fn scoped_cells<'a>(
    rule: &'a ValidationRule,
    dataset: &'a Dataset,
) -> impl Iterator<Item = CellRef<'a>> + 'a {
    dataset.rows().iter().enumerate().flat_map(move |(row, cells)| {
        cells
            .iter()
            .zip(dataset.headers())
            .enumerate()
            .filter(move |(_, (_, header))| rule.applies_to(header))
            .map(move |(col, (cell, header))| CellRef {
                row,
                col,
                header: header.as_str(),
                cell,
            })
    })
}

/// Issue anchored to one cell, with the cell as its current value.
fn cell_issue(
    rule: &ValidationRule,
    id: String,
    at: &CellRef<'_>,
    message: String,
) -> ValidationIssue {
    ValidationIssue::new(id, rule, at.row + 1, at.header, at.col as i64, message)
        .with_current_value(at.cell.to_json())
}

/// Flags null and blank cells.
pub struct RequiredValidator;

impl Validator for RequiredValidator {
    fn validate(&self, rule: &ValidationRule, dataset: &Dataset) -> Vec<ValidationIssue> {
        scoped_cells(rule, dataset)
            .filter(|at| at.cell.is_blank())
            .map(|at| {
                cell_issue(
                    rule,
                    format!("{}-{}-{}", rule.id(), at.row, at.col),
                    &at,
                    format!("Empty cell found in column \"{}\"", at.header),
                )
                .with_description("This cell appears to be empty but may require data")
            })
            .collect()
    }
}

/// Checks cell types against the role implied by the column header.
pub struct DataTypeValidator;

impl DataTypeValidator {
    fn is_numeric_value(cell: &Cell) -> bool {
        match cell {
            Cell::Number(_) => true,
            Cell::Text(s) => parse_number(s.trim()).is_some(),
            _ => false,
        }
    }

    fn is_boolean_value(cell: &Cell) -> bool {
        match cell {
            Cell::Boolean(_) => true,
            other => {
                let token = other.to_string().to_lowercase();
                BOOLEAN_TOKENS.contains(&token.as_str())
            }
        }
    }
}

impl Validator for DataTypeValidator {
    fn validate(&self, rule: &ValidationRule, dataset: &Dataset) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        for at in scoped_cells(rule, dataset) {
            if at.cell.is_blank() {
                continue;
            }

            if is_numeric_column(at.header) && !Self::is_numeric_value(at.cell) {
                issues.push(
                    cell_issue(
                        rule,
                        format!("{}-numeric-{}-{}", rule.id(), at.row, at.col),
                        &at,
                        format!("Invalid numeric value in column \"{}\"", at.header),
                    )
                    .with_description("Expected a numeric value but found text or invalid format"),
                );
            }

            if is_boolean_column(at.header) && !Self::is_boolean_value(at.cell) {
                issues.push(
                    cell_issue(
                        rule,
                        format!("{}-boolean-{}-{}", rule.id(), at.row, at.col),
                        &at,
                        format!("Invalid boolean value in column \"{}\"", at.header),
                    )
                    .with_suggested_value("true/false, yes/no, or 1/0")
                    .with_description("Expected a boolean value"),
                );
            }
        }

        issues
    }
}

/// Checks email, date and phone columns against their expected shape.
pub struct FormatValidator;

impl FormatValidator {
    fn is_valid_email(value: &str) -> bool {
        EMAIL_PATTERN.is_match(value)
    }

    fn is_valid_phone(value: &str) -> bool {
        let cleaned = PHONE_SEPARATORS.replace_all(value, "");
        PHONE_PATTERN.is_match(&cleaned)
    }

    fn is_valid_date(cell: &Cell) -> bool {
        match cell {
            // Numbers read as epoch timestamps.
            Cell::Number(_) => true,
            Cell::Text(s) => parse_date(s).is_some(),
            _ => false,
        }
    }
}

impl Validator for FormatValidator {
    fn validate(&self, rule: &ValidationRule, dataset: &Dataset) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        for at in scoped_cells(rule, dataset) {
            if at.cell.is_blank() {
                continue;
            }
            let value = at.cell.to_string();

            if is_email_column(at.header) && !Self::is_valid_email(&value) {
                issues.push(
                    cell_issue(
                        rule,
                        format!("{}-email-{}-{}", rule.id(), at.row, at.col),
                        &at,
                        format!("Invalid email format in column \"{}\"", at.header),
                    )
                    .with_description("Email format should be: user@domain.com"),
                );
            }

            if is_date_column(at.header) && !Self::is_valid_date(at.cell) {
                issues.push(
                    cell_issue(
                        rule,
                        format!("{}-date-{}-{}", rule.id(), at.row, at.col),
                        &at,
                        format!("Invalid date format in column \"{}\"", at.header),
                    )
                    .with_description(
                        "Date should be in a valid format (YYYY-MM-DD, MM/DD/YYYY, etc.)",
                    ),
                );
            }

            if is_phone_column(at.header) && !Self::is_valid_phone(&value) {
                issues.push(
                    cell_issue(
                        rule,
                        format!("{}-phone-{}-{}", rule.id(), at.row, at.col),
                        &at,
                        format!("Invalid phone format in column \"{}\"", at.header),
                    )
                    .with_description(
                        "Phone number should contain only digits and common separators",
                    ),
                );
            }
        }

        issues
    }
}

/// Checks text length and numeric bounds from rule parameters.
///
/// Recognized parameters: `minLength`, `maxLength`, `minValue`, `maxValue`.
/// An absent or non-numeric parameter leaves that bound unchecked.
pub struct RangeValidator;

impl Validator for RangeValidator {
    fn validate(&self, rule: &ValidationRule, dataset: &Dataset) -> Vec<ValidationIssue> {
        let min_length = rule.number_parameter("minLength");
        let max_length = rule.number_parameter("maxLength");
        let min_value = rule.number_parameter("minValue");
        let max_value = rule.number_parameter("maxValue");

        let mut issues = Vec::new();

        for at in scoped_cells(rule, dataset) {
            if at.cell.is_blank() {
                continue;
            }
            let length = at.cell.to_string().chars().count();

            if let Some(min) = min_length.filter(|m| (length as f64) < *m) {
                let min = format_number(min);
                issues.push(
                    cell_issue(
                        rule,
                        format!("{}-minlength-{}-{}", rule.id(), at.row, at.col),
                        &at,
                        format!(
                            "Text too short in column \"{}\" (minimum {} characters)",
                            at.header, min
                        ),
                    )
                    .with_description(format!(
                        "Current length: {}, required minimum: {}",
                        length, min
                    )),
                );
            }

            if let Some(max) = max_length.filter(|m| (length as f64) > *m) {
                let max = format_number(max);
                issues.push(
                    cell_issue(
                        rule,
                        format!("{}-maxlength-{}-{}", rule.id(), at.row, at.col),
                        &at,
                        format!(
                            "Text too long in column \"{}\" (maximum {} characters)",
                            at.header, max
                        ),
                    )
                    .with_description(format!(
                        "Current length: {}, maximum allowed: {}",
                        length, max
                    )),
                );
            }

            let Some(number) = at.cell.as_number() else {
                continue;
            };

            if let Some(min) = min_value.filter(|m| number < *m) {
                let min = format_number(min);
                issues.push(
                    cell_issue(
                        rule,
                        format!("{}-minvalue-{}-{}", rule.id(), at.row, at.col),
                        &at,
                        format!("Value too small in column \"{}\" (minimum {})", at.header, min),
                    )
                    .with_description(format!(
                        "Current value: {}, required minimum: {}",
                        at.cell, min
                    )),
                );
            }

            if let Some(max) = max_value.filter(|m| number > *m) {
                let max = format_number(max);
                issues.push(
                    cell_issue(
                        rule,
                        format!("{}-maxvalue-{}-{}", rule.id(), at.row, at.col),
                        &at,
                        format!("Value too large in column \"{}\" (maximum {})", at.header, max),
                    )
                    .with_description(format!(
                        "Current value: {}, maximum allowed: {}",
                        at.cell, max
                    )),
                );
            }
        }

        issues
    }
}

/// Flags rows identical to an earlier row.
///
/// Rows are grouped by a canonical JSON signature of their cells. Every
/// occurrence after the first in a group is reported against the first.
pub struct DuplicateRowValidator;

impl DuplicateRowValidator {
    fn row_signature(row: &[Cell]) -> (Value, String) {
        let value = Value::Array(row.iter().map(Cell::to_json).collect());
        let signature = value.to_string();
        (value, signature)
    }
}

impl Validator for DuplicateRowValidator {
    fn validate(&self, rule: &ValidationRule, dataset: &Dataset) -> Vec<ValidationIssue> {
        let mut groups: IndexMap<String, Vec<usize>> = IndexMap::new();
        let mut row_values = Vec::with_capacity(dataset.row_count());

        for (row_idx, row) in dataset.rows().iter().enumerate() {
            let (value, signature) = Self::row_signature(row);
            groups.entry(signature).or_default().push(row_idx);
            row_values.push(value);
        }

        let mut issues = Vec::new();
        for rows in groups.values().filter(|rows| rows.len() > 1) {
            let first = rows[0] + 1;
            for &row_idx in &rows[1..] {
                issues.push(
                    ValidationIssue::new(
                        format!("{}-{}", rule.id(), row_idx),
                        rule,
                        row_idx + 1,
                        ALL_COLUMNS,
                        NO_COLUMN,
                        format!("Duplicate row found (first occurrence at row {})", first),
                    )
                    .with_current_value(row_values[row_idx].clone())
                    .with_description(format!("This row is identical to row {}", first)),
                );
            }
        }

        issues
    }
}

/// Coarse date format tag from the separator a value uses.
fn date_format_tag(value: &str) -> Option<&'static str> {
    if value.contains('/') {
        Some("MM/DD/YYYY")
    } else if value.contains('-') {
        Some("YYYY-MM-DD")
    } else if value.contains('.') {
        Some("DD.MM.YYYY")
    } else {
        None
    }
}

/// Detects mixed date formats and mixed casing within a column.
pub struct ConsistencyValidator;

impl ConsistencyValidator {
    fn check_date_formats(
        rule: &ValidationRule,
        col: usize,
        header: &str,
        values: &[&Cell],
    ) -> Option<ValidationIssue> {
        let mut formats: Vec<&'static str> = Vec::new();
        for value in values {
            if let Some(tag) = date_format_tag(&value.to_string()) {
                if !formats.contains(&tag) {
                    formats.push(tag);
                }
            }
        }

        if formats.len() <= 1 {
            return None;
        }

        let seen = formats.join(", ");
        Some(
            ValidationIssue::new(
                format!("{}-dateformat-{}", rule.id(), col),
                rule,
                0,
                header,
                col as i64,
                format!("Inconsistent date formats in column \"{}\"", header),
            )
            .with_current_value(seen.clone())
            .with_description(format!("Multiple date formats detected: {}", seen)),
        )
    }

    fn check_casing(
        rule: &ValidationRule,
        dataset: &Dataset,
        col: usize,
        header: &str,
        values: &[&Cell],
    ) -> Option<ValidationIssue> {
        if !matches!(values.first(), Some(Cell::Text(_))) {
            return None;
        }

        let rendered: Vec<String> = values.iter().map(|v| v.to_string()).collect();
        let has_upper = rendered.iter().any(|v| v.chars().any(|c| c.is_ascii_uppercase()));
        let has_lower = rendered.iter().any(|v| v.chars().any(|c| c.is_ascii_lowercase()));
        if !(has_upper && has_lower) {
            return None;
        }

        let mixed_rows: Vec<usize> = dataset
            .column_values(col)
            .enumerate()
            .filter(|(_, cell)| !cell.is_blank())
            .filter(|(_, cell)| {
                let value = cell.to_string();
                value != value.to_lowercase() && value != value.to_uppercase()
            })
            .map(|(row_idx, _)| row_idx + 1)
            .collect();

        if mixed_rows.is_empty() {
            return None;
        }

        let listed = mixed_rows
            .iter()
            .take(MAX_LISTED_ROWS)
            .map(|r| r.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let more = if mixed_rows.len() > MAX_LISTED_ROWS { "..." } else { "" };

        Some(
            ValidationIssue::new(
                format!("{}-case-{}", rule.id(), col),
                rule,
                0,
                header,
                col as i64,
                format!("Inconsistent text casing in column \"{}\"", header),
            )
            .with_current_value("Mixed case formats")
            .with_description(format!("Rows with mixed casing: {}{}", listed, more)),
        )
    }
}

impl Validator for ConsistencyValidator {
    fn validate(&self, rule: &ValidationRule, dataset: &Dataset) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        for (col, header) in dataset.headers().iter().enumerate() {
            if !rule.applies_to(header) {
                continue;
            }

            let values: Vec<&Cell> = dataset.column_values(col).filter(|c| !c.is_blank()).collect();
            if values.is_empty() {
                continue;
            }

            if is_date_column(header) {
                issues.extend(Self::check_date_formats(rule, col, header, &values));
            }

            issues.extend(Self::check_casing(rule, dataset, col, header, &values));
        }

        issues
    }
}

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%d.%m.%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
    "%d %B %Y",
    "%d %b %Y",
];

/// Lenient date parse covering the common spreadsheet and ISO forms.
pub fn parse_date(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(value) {
        return Some(dt.naive_utc());
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt);
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return date.and_hms_opt(0, 0, 0);
        }
    }

    // Year-month ("2024-03") and bare year ("2024").
    let padded = match value.len() {
        7 => format!("{}-01", value),
        4 => format!("{}-01-01", value),
        _ => return None,
    };
    NaiveDate::parse_from_str(&padded, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}
