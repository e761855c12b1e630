//! Rule execution over a dataset.

use tracing::{info, trace};

use crate::input::Dataset;
use crate::progress::{ProgressReporter, ResetOnDrop};

use super::issue::ValidationIssue;
use super::rule::{default_rules, Check, ValidationRule};
use super::summary::ValidationResult;
use super::validators::{
    ConsistencyValidator, DataTypeValidator, DuplicateRowValidator, FormatValidator,
    RangeValidator, RequiredValidator, Validator,
};

/// Share of the progress range spent running rules; scoring follows.
const RULES_PROGRESS_SPAN: f64 = 80.0;
const SCORING_PROGRESS: f64 = 90.0;

/// Runs enabled rules in order and scores the collected issues.
#[derive(Debug, Clone)]
pub struct ValidationEngine {
    rules: Vec<ValidationRule>,
    progress: Option<ProgressReporter>,
}

impl ValidationEngine {
    /// Engine with the built-in rule set.
    pub fn new() -> Self {
        Self::with_rules(default_rules())
    }

    pub fn with_rules(rules: Vec<ValidationRule>) -> Self {
        Self {
            rules,
            progress: None,
        }
    }

    pub fn with_progress(mut self, progress: ProgressReporter) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn rules(&self) -> &[ValidationRule] {
        &self.rules
    }

    fn validator_for(check: Check) -> Option<&'static dyn Validator> {
        let validator: &'static dyn Validator = match check {
            Check::Required => &RequiredValidator,
            Check::DataType => &DataTypeValidator,
            Check::Format => &FormatValidator,
            Check::Range => &RangeValidator,
            Check::DuplicateRows => &DuplicateRowValidator,
            Check::DataConsistency => &ConsistencyValidator,
            Check::Unrecognized => return None,
        };
        Some(validator)
    }

    /// Run a single rule, ignoring its `enabled` flag.
    pub fn run_rule(rule: &ValidationRule, dataset: &Dataset) -> Vec<ValidationIssue> {
        match Self::validator_for(rule.check()) {
            Some(validator) => validator.validate(rule, dataset),
            None => Vec::new(),
        }
    }

    /// Validate `dataset` against every enabled rule.
    pub fn validate(&self, dataset: &Dataset) -> ValidationResult {
        let _reset = ResetOnDrop(self.progress.as_ref());
        self.report(0.0);

        let enabled: Vec<&ValidationRule> = self.rules.iter().filter(|r| r.enabled).collect();
        let mut issues = Vec::new();

        for (processed, rule) in enabled.iter().enumerate() {
            let found = Self::run_rule(rule, dataset);
            trace!(rule = rule.id(), issues = found.len(), "rule finished");
            issues.extend(found);

            self.report((processed + 1) as f64 / enabled.len() as f64 * RULES_PROGRESS_SPAN);
        }

        self.report(SCORING_PROGRESS);
        let result = ValidationResult::new(dataset, issues);
        self.report(100.0);

        info!(
            file = dataset.file_name(),
            rules = enabled.len(),
            issues = result.summary.total_issues,
            errors = result.summary.error_count,
            score = result.summary.data_quality_score,
            "validation complete"
        );

        result
    }

    fn report(&self, percent: f64) {
        if let Some(progress) = &self.progress {
            progress.report(percent);
        }
    }
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate with `rules`, or the built-in set when `None`.
///
/// Disabled rules are skipped whether they come from the built-in set or an
/// explicit list. Use [`ValidationEngine::run_rule`] to run one regardless.
pub fn validate(dataset: &Dataset, rules: Option<&[ValidationRule]>) -> ValidationResult {
    let engine = match rules {
        Some(rules) => ValidationEngine::with_rules(rules.to_vec()),
        None => ValidationEngine::new(),
    };
    engine.validate(dataset)
}
