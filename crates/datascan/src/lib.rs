//! Datascan: data-quality scanning for tabular report files.
//!
//! Files in CSV, JSON, TXT or TSV format are parsed into one canonical
//! [`Dataset`], then screened by a rule engine that reports classified
//! issues together with a completion percentage and a quality score.
//!
//! # Core Principles
//!
//! - **Two independent stages**: import and validation compose, and the
//!   validator accepts any well-formed dataset
//! - **Deterministic**: re-running a rule yields the same issue ids
//! - **Non-destructive**: input data is never modified
//!
//! # Example
//!
//! ```no_run
//! use datascan::{import, validate};
//!
//! let bytes = std::fs::read("orders.csv").unwrap();
//! let dataset = import(&bytes, "orders.csv").into_result().unwrap();
//! let result = validate(&dataset, None);
//!
//! println!("Issues: {}", result.summary.total_issues);
//! println!("Score: {:.2}", result.summary.data_quality_score);
//! ```

pub mod error;
pub mod input;
pub mod progress;
pub mod report;
pub mod validation;

mod scanner;

pub use crate::scanner::{ScanError, ScanResult, Scanner, ScannerConfig};
pub use error::{DatascanError, Result};
pub use input::{import, Cell, Dataset, ImportError, ImportResult, Importer, SourceFormat, SourceMetadata};
pub use progress::ProgressReporter;
pub use report::ValidationReport;
pub use validation::{
    create_rule, default_rules, validate, Severity, ValidationIssue, ValidationResult,
    ValidationRule, ValidationSummary,
};
