//! Property-based tests for datascan.
//!
//! These tests use proptest to generate random inputs and verify that the
//! parsers and the rule engine maintain their invariants.
//!
//! # Running Property Tests
//!
//! ```bash
//! cargo test -p datascan --test property_tests
//!
//! # More cases (slower but more thorough)
//! PROPTEST_CASES=10000 cargo test -p datascan --test property_tests
//! ```

use proptest::prelude::*;

use datascan::validation::{sort_issues, ValidationSummary};
use datascan::{import, validate, Cell, Dataset, Severity, SourceFormat, ValidationIssue};

// =============================================================================
// Test Strategies
// =============================================================================

/// A raw token as it might appear in a delimited file.
fn token() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z ]{0,12}",
        "-?[0-9]{1,6}(\\.[0-9]{1,3})?",
        "(true|false|TRUE|False|yes|no)",
        "[a-z]{1,8}@[a-z]{1,8}\\.(com|org)",
        "20[0-9]{2}-[01][0-9]-[0-3][0-9]",
        Just(String::new()),
    ]
}

fn header() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("name".to_string()),
        Just("email".to_string()),
        Just("amount".to_string()),
        Just("is_active".to_string()),
        Just("created_date".to_string()),
        Just("phone".to_string()),
        "[a-z]{1,10}",
    ]
}

/// Delimited text with a header line and ragged data rows.
fn delimited_file(delimiter: char) -> impl Strategy<Value = String> {
    (
        prop::collection::vec(header(), 1..6),
        prop::collection::vec(prop::collection::vec(token(), 0..8), 1..20),
    )
        .prop_map(move |(headers, rows)| {
            let sep = delimiter.to_string();
            let mut text = headers.join(&sep);
            for row in rows {
                text.push('\n');
                text.push_str(&row.join(&sep));
            }
            text
        })
}

fn dataset() -> impl Strategy<Value = Dataset> {
    delimited_file('\t').prop_filter_map("needs a data row", |text| {
        import(text.as_bytes(), "generated.tsv").into_result().ok()
    })
}

fn severity() -> impl Strategy<Value = Severity> {
    prop_oneof![Just(Severity::Error), Just(Severity::Warning), Just(Severity::Info)]
}

// =============================================================================
// Coercion Properties
// =============================================================================

proptest! {
    #[test]
    fn coerce_is_total(raw in "\\PC{0,40}") {
        let cell = Cell::coerce(&raw);
        if raw.is_empty() {
            prop_assert_eq!(cell, Cell::Null);
        }
    }

    #[test]
    fn coerce_numbers_are_finite(raw in "\\PC{0,40}") {
        if let Cell::Number(n) = Cell::coerce(&raw) {
            prop_assert!(n.is_finite());
        }
    }

    #[test]
    fn coerce_text_is_trimmed(raw in "[ \\t]{0,3}[a-z]{1,10}[ \\t]{0,3}") {
        let cell = Cell::coerce(&raw);
        if let Cell::Text(s) = cell {
            prop_assert_eq!(s.as_str(), raw.trim());
        }
    }
}

// =============================================================================
// Parser Properties
// =============================================================================

proptest! {
    #[test]
    fn csv_rows_match_header_width(text in delimited_file(',')) {
        if let Ok(dataset) = import(text.as_bytes(), "t.csv").into_result() {
            let width = dataset.column_count();
            prop_assert!(dataset.rows().iter().all(|row| row.len() == width));
            prop_assert_eq!(dataset.row_count(), dataset.rows().len());
        }
    }

    #[test]
    fn txt_rows_match_header_width(text in delimited_file('|')) {
        if let Ok(dataset) = import(text.as_bytes(), "t.txt").into_result() {
            let width = dataset.column_count();
            prop_assert!(dataset.rows().iter().all(|row| row.len() == width));
        }
    }

    #[test]
    fn import_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..512)) {
        for name in ["f.csv", "f.json", "f.txt", "f.tsv", "f.bin"] {
            let result = import(&bytes, name);
            prop_assert_eq!(result.success, result.dataset.is_some());
        }
    }
}

// =============================================================================
// Validation Properties
// =============================================================================

proptest! {
    #[test]
    fn issue_ids_are_deterministic(dataset in dataset()) {
        let first: Vec<String> = validate(&dataset, None).issues.into_iter().map(|i| i.id).collect();
        let second: Vec<String> = validate(&dataset, None).issues.into_iter().map(|i| i.id).collect();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn summary_stays_in_bounds(dataset in dataset()) {
        let result = validate(&dataset, None);
        let summary = &result.summary;

        prop_assert!((0.0..=100.0).contains(&summary.data_quality_score));
        prop_assert!((0.0..=100.0).contains(&summary.completion_percentage));
        prop_assert_eq!(summary.valid_rows, summary.total_rows.saturating_sub(summary.invalid_rows));
        prop_assert!(summary.invalid_rows <= summary.total_rows + 1);
        prop_assert_eq!(
            summary.error_count + summary.warning_count + summary.info_count,
            summary.total_issues
        );
        prop_assert_eq!(result.is_valid, summary.error_count == 0);
    }

    #[test]
    fn issues_point_inside_the_dataset(dataset in dataset()) {
        let result = validate(&dataset, None);
        for issue in &result.issues {
            prop_assert!(issue.row <= dataset.row_count());
            prop_assert!(issue.column_index >= -1);
            prop_assert!(issue.column_index < dataset.column_count() as i64);
        }
    }

    #[test]
    fn score_is_clamped(errors in 0usize..100, warnings in 0usize..100, infos in 0usize..100) {
        let score = ValidationSummary::score(errors, warnings, infos);
        prop_assert!((0.0..=100.0).contains(&score));
    }

    #[test]
    fn sort_orders_by_rank_then_row(
        entries in prop::collection::vec((severity(), 0usize..50), 0..40)
    ) {
        let rule = datascan::create_rule(Default::default());
        let mut issues: Vec<ValidationIssue> = entries
            .iter()
            .enumerate()
            .map(|(n, (severity, row))| {
                let mut issue = ValidationIssue::new(n.to_string(), &rule, *row, "c", 0, "m");
                issue.severity = *severity;
                issue
            })
            .collect();
        sort_issues(&mut issues);

        for pair in issues.windows(2) {
            let a = (pair[0].severity.rank(), pair[0].row);
            let b = (pair[1].severity.rank(), pair[1].row);
            prop_assert!(a <= b);
            if a == b {
                // Stable: original insertion order preserved.
                let ia: usize = pair[0].id.parse().unwrap();
                let ib: usize = pair[1].id.parse().unwrap();
                prop_assert!(ia < ib);
            }
        }
    }
}

#[test]
fn dataset_new_normalizes_hand_built_rows() {
    let dataset = Dataset::new(
        vec!["a".into(), "b".into()],
        vec![vec![], vec![Cell::Number(1.0), Cell::Number(2.0), Cell::Number(3.0)]],
        "hand.csv",
        SourceFormat::Csv,
    );
    assert!(dataset.rows().iter().all(|r| r.len() == 2));
}
