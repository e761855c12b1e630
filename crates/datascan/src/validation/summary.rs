//! Aggregate counts, quality scoring and the per-run result.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::input::Dataset;

use super::issue::{Severity, ValidationIssue};
use super::rule::EMPTY_CELLS;

/// Round to two decimal places.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Counts and scores derived from a dataset and its issues.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationSummary {
    pub total_rows: usize,
    pub total_columns: usize,
    pub total_issues: usize,
    pub error_count: usize,
    pub warning_count: usize,
    pub info_count: usize,
    pub valid_rows: usize,
    pub invalid_rows: usize,
    pub completion_percentage: f64,
    pub data_quality_score: f64,
}

impl ValidationSummary {
    /// Compute the summary for `issues` raised against `dataset`.
    ///
    /// Completion only counts `empty-cells` issues. Column-level issues
    /// (row 0) do not mark any row invalid.
    pub fn calculate(dataset: &Dataset, issues: &[ValidationIssue]) -> Self {
        let total_rows = dataset.row_count();
        let total_columns = dataset.column_count();

        let count = |severity: Severity| issues.iter().filter(|i| i.severity == severity).count();
        let error_count = count(Severity::Error);
        let warning_count = count(Severity::Warning);
        let info_count = count(Severity::Info);

        let total_cells = total_rows * total_columns;
        let empty_cells = issues.iter().filter(|i| i.rule_id == EMPTY_CELLS).count();
        let completion_percentage = if total_cells == 0 {
            100.0
        } else {
            let filled = total_cells.saturating_sub(empty_cells);
            round2(filled as f64 / total_cells as f64 * 100.0)
        };

        let data_quality_score = round2(Self::score(error_count, warning_count, info_count));

        let invalid_rows = issues
            .iter()
            .map(|i| i.row)
            .collect::<HashSet<_>>()
            .len();

        Self {
            total_rows,
            total_columns,
            total_issues: issues.len(),
            error_count,
            warning_count,
            info_count,
            valid_rows: total_rows.saturating_sub(invalid_rows),
            invalid_rows,
            completion_percentage,
            data_quality_score,
        }
    }

    /// Quality score in `0.0..=100.0`, penalized per issue by severity.
    pub fn score(errors: usize, warnings: usize, infos: usize) -> f64 {
        let penalty = errors as f64 * Severity::Error.penalty()
            + warnings as f64 * Severity::Warning.penalty()
            + infos as f64 * Severity::Info.penalty();
        (100.0 - penalty).clamp(0.0, 100.0)
    }
}

/// Order issues by severity rank, then row. The sort is stable.
pub fn sort_issues(issues: &mut [ValidationIssue]) {
    issues.sort_by_key(|issue| (issue.severity.rank(), issue.row));
}

/// Outcome of one validation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub summary: ValidationSummary,
    pub issues: Vec<ValidationIssue>,
    pub is_valid: bool,
    pub processed_at: DateTime<Utc>,
}

impl ValidationResult {
    /// Build a result, sorting `issues` and stamping the completion time.
    pub fn new(dataset: &Dataset, mut issues: Vec<ValidationIssue>) -> Self {
        sort_issues(&mut issues);
        let summary = ValidationSummary::calculate(dataset, &issues);
        Self {
            is_valid: summary.error_count == 0,
            summary,
            issues,
            processed_at: Utc::now(),
        }
    }

    pub fn issues_with_severity(&self, severity: Severity) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(move |i| i.severity == severity)
    }

    /// First issue at a 1-based row and 0-based column.
    pub fn issue_at(&self, row: usize, column_index: usize) -> Option<&ValidationIssue> {
        self.issues
            .iter()
            .find(|i| i.row == row && i.column_index == column_index as i64)
    }

    pub fn has_issue_at(&self, row: usize, column_index: usize) -> bool {
        self.issue_at(row, column_index).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Cell, SourceFormat};
    use crate::validation::rule::{RuleKind, ValidationRule};

    fn dataset(rows: usize, cols: usize) -> Dataset {
        Dataset::new(
            (0..cols).map(|c| format!("c{}", c)).collect(),
            vec![vec![Cell::Number(1.0); cols]; rows],
            "t.csv",
            SourceFormat::Csv,
        )
    }

    fn issue(rule_id: &str, severity: Severity, row: usize) -> ValidationIssue {
        let rule = ValidationRule::new(rule_id, rule_id, RuleKind::Custom, severity);
        ValidationIssue::new(format!("{}-{}", rule_id, row), &rule, row, "c0", 0, "m")
    }

    #[test]
    fn test_score_formula() {
        let issues = vec![
            issue("a", Severity::Error, 1),
            issue("a", Severity::Error, 2),
            issue("b", Severity::Warning, 3),
        ];
        let summary = ValidationSummary::calculate(&dataset(5, 2), &issues);

        assert_eq!(summary.data_quality_score, 88.0);
        assert_eq!(summary.error_count, 2);
        assert_eq!(summary.warning_count, 1);
        assert_eq!(summary.invalid_rows, 3);
        assert_eq!(summary.valid_rows, 2);
    }

    #[test]
    fn test_score_floors_at_zero() {
        let issues: Vec<_> = (1..=30).map(|r| issue("a", Severity::Error, r)).collect();
        let summary = ValidationSummary::calculate(&dataset(30, 1), &issues);

        assert_eq!(summary.data_quality_score, 0.0);
        assert_eq!(summary.valid_rows, 0);
    }

    #[test]
    fn test_info_penalty_is_fractional() {
        assert_eq!(ValidationSummary::score(0, 0, 3), 98.5);
    }

    #[test]
    fn test_completion_counts_only_empty_cell_issues() {
        let issues = vec![
            issue(EMPTY_CELLS, Severity::Warning, 1),
            issue(EMPTY_CELLS, Severity::Warning, 2),
            issue("numeric-format", Severity::Error, 2),
        ];
        let summary = ValidationSummary::calculate(&dataset(3, 3), &issues);

        assert_eq!(summary.completion_percentage, 77.78);
        assert_eq!(summary.invalid_rows, 2);
    }

    #[test]
    fn test_empty_dataset_is_complete() {
        let summary = ValidationSummary::calculate(&dataset(0, 0), &[]);
        assert_eq!(summary.completion_percentage, 100.0);
        assert_eq!(summary.data_quality_score, 100.0);
    }

    #[test]
    fn test_column_level_issue_counts_as_invalid_row() {
        let issues = vec![issue("data-consistency", Severity::Info, 0)];
        let summary = ValidationSummary::calculate(&dataset(4, 1), &issues);

        assert_eq!(summary.invalid_rows, 1);
        assert_eq!(summary.valid_rows, 3);
    }

    #[test]
    fn test_valid_rows_saturate_at_zero() {
        let issues = vec![
            issue("data-consistency", Severity::Info, 0),
            issue("a", Severity::Error, 1),
        ];
        let summary = ValidationSummary::calculate(&dataset(1, 1), &issues);

        assert_eq!(summary.invalid_rows, 2);
        assert_eq!(summary.valid_rows, 0);
    }

    #[test]
    fn test_sort_by_severity_then_row() {
        let mut issues = vec![
            issue("x", Severity::Info, 1),
            issue("x", Severity::Error, 5),
            issue("x", Severity::Error, 2),
        ];
        sort_issues(&mut issues);

        let order: Vec<_> = issues.iter().map(|i| (i.severity, i.row)).collect();
        assert_eq!(
            order,
            vec![(Severity::Error, 2), (Severity::Error, 5), (Severity::Info, 1)]
        );
    }

    #[test]
    fn test_result_lookup() {
        let result = ValidationResult::new(
            &dataset(3, 1),
            vec![issue("w", Severity::Warning, 2), issue("e", Severity::Error, 3)],
        );

        assert!(!result.is_valid);
        assert_eq!(result.issues[0].severity, Severity::Error);
        assert!(result.has_issue_at(2, 0));
        assert!(!result.has_issue_at(1, 0));
        assert_eq!(result.issues_with_severity(Severity::Warning).count(), 1);
    }
}
