//! Scan command - import, validate and report.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use colored::Colorize;
use comfy_table::Cell;
use tracing::info;

use datascan::validation::load_rules;
use datascan::{ScanResult, Scanner, ScannerConfig, Severity, ValidationReport};

use super::{new_table, progress_bar};
use crate::cli::ExportFormat;

/// Issues shown without `--all`.
const DEFAULT_ISSUE_LIMIT: usize = 10;

pub struct ScanArgs {
    pub file: PathBuf,
    pub rules: Option<PathBuf>,
    pub severity: Option<Severity>,
    pub all: bool,
    pub json: bool,
    pub export: Option<Option<PathBuf>>,
    pub export_format: ExportFormat,
}

/// Returns whether the file is valid (no error-level issues).
pub async fn run(args: ScanArgs) -> Result<bool, Box<dyn std::error::Error>> {
    let rules = match &args.rules {
        Some(path) => {
            let rules = load_rules(path)?;
            info!(path = %path.display(), count = rules.len(), "loaded rules");
            Some(rules)
        }
        None => None,
    };

    let (bar, progress) = progress_bar("Scanning");
    let scanner = Scanner::with_config(ScannerConfig {
        rules,
        ..Default::default()
    })
    .with_progress(progress);

    let scanned = scanner.scan_file(&args.file).await;
    bar.finish_and_clear();
    let result = scanned?;

    for warning in &result.warnings {
        eprintln!("{} {}", "warning:".yellow().bold(), warning.message);
    }

    let report = result.report();

    if args.json {
        println!("{}", report.to_json_pretty()?);
    } else {
        print_summary(&result);
        print_issues(&report, args.severity, args.all);
    }

    if let Some(target) = args.export {
        let path = target.unwrap_or_else(|| {
            PathBuf::from(report.default_file_name()).with_extension(args.export_format.extension())
        });
        export(&report, &path, args.export_format)?;
        eprintln!("{} {}", "Report written to".green(), path.display());
    }

    Ok(result.validation.is_valid)
}

fn export(
    report: &ValidationReport,
    path: &Path,
    format: ExportFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        ExportFormat::Json => report.save(path)?,
        ExportFormat::Csv => {
            let file = File::create(path)?;
            report.write_issues_csv(BufWriter::new(file))?;
        }
    }
    Ok(())
}

fn print_summary(result: &ScanResult) {
    let summary = &result.validation.summary;

    println!(
        "{} {} ({}, {} rows x {} columns)",
        "Scanned".cyan().bold(),
        result.metadata.file_name.white(),
        result.metadata.format,
        summary.total_rows,
        summary.total_columns
    );
    println!();

    println!("{}", "Issues:".yellow().bold());
    println!("  Errors:   {}", summary.error_count.to_string().red());
    println!("  Warnings: {}", summary.warning_count.to_string().yellow());
    println!("  Info:     {}", summary.info_count.to_string().blue());
    println!();

    println!(
        "Rows: {} valid, {} with issues",
        summary.valid_rows.to_string().green(),
        summary.invalid_rows.to_string().red()
    );
    println!("Completion: {:.2}%", summary.completion_percentage);

    let score = format!("{:.2}", summary.data_quality_score);
    let score = if summary.data_quality_score >= 80.0 {
        score.green()
    } else if summary.data_quality_score >= 50.0 {
        score.yellow()
    } else {
        score.red()
    };
    println!("Data quality score: {}", score);
    println!();

    if result.validation.is_valid {
        println!("{}", "No blocking errors found.".green().bold());
    } else {
        println!("{}", "File has blocking errors.".red().bold());
    }
}

fn severity_cell(severity: Severity) -> Cell {
    use comfy_table::Color;

    let color = match severity {
        Severity::Error => Color::Red,
        Severity::Warning => Color::Yellow,
        Severity::Info => Color::Blue,
    };
    Cell::new(severity.label()).fg(color)
}

fn print_issues(report: &ValidationReport, severity: Option<Severity>, all: bool) {
    let matching: Vec<_> = report
        .issues
        .iter()
        .filter(|i| severity.is_none_or(|s| i.severity == s))
        .collect();

    if matching.is_empty() {
        return;
    }

    let limit = if all { matching.len() } else { DEFAULT_ISSUE_LIMIT };
    let mut table = new_table(["Severity", "Row", "Column", "Rule", "Message"]);
    for issue in matching.iter().take(limit) {
        let row = if issue.is_column_level() {
            "-".to_string()
        } else {
            issue.row.to_string()
        };
        table.add_row(vec![
            severity_cell(issue.severity),
            Cell::new(row),
            Cell::new(&issue.column),
            Cell::new(&issue.rule_id),
            Cell::new(&issue.message),
        ]);
    }

    println!();
    println!("{table}");

    if matching.len() > limit {
        println!(
            "... and {} more (use {} to show all)",
            matching.len() - limit,
            "--all".cyan()
        );
    }
}
