//! Validation engine for detecting data quality issues.

mod columns;
mod engine;
mod issue;
mod rule;
mod summary;
mod validators;

pub use columns::{
    is_boolean_column, is_date_column, is_email_column, is_numeric_column, is_phone_column,
};
pub use engine::{validate, ValidationEngine};
pub use issue::{Severity, ValidationIssue, ALL_COLUMNS, NO_COLUMN};
pub use rule::{
    create_rule, default_rules, load_rules, parse_rules, Check, PartialRule, RuleKind,
    ValidationRule, DATA_CONSISTENCY, DATE_FORMAT, DUPLICATE_ROWS, EMAIL_FORMAT, EMPTY_CELLS,
    LENGTH_VALIDATION, NUMERIC_FORMAT,
};
pub use summary::{sort_issues, ValidationResult, ValidationSummary};
pub use validators::{
    parse_date, ConsistencyValidator, DataTypeValidator, DuplicateRowValidator, FormatValidator,
    RangeValidator, RequiredValidator, Validator,
};
