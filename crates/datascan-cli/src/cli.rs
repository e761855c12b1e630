//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use datascan::Severity;

/// Datascan: data-quality screening for tabular report files
#[derive(Parser)]
#[command(name = "datascan")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value_t = LogFormatChoice::Pretty)]
    pub log_format: LogFormatChoice,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Import a file, run the validation rules and print a summary
    Scan {
        /// Path to the data file (CSV/JSON/TXT/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// JSON file with the rule set to run (default: built-in rules)
        #[arg(long, value_name = "FILE")]
        rules: Option<PathBuf>,

        /// Only show issues with this severity
        #[arg(short, long)]
        severity: Option<Severity>,

        /// Show every issue instead of the first 10
        #[arg(long)]
        all: bool,

        /// Print the report as JSON to stdout
        #[arg(long)]
        json: bool,

        /// Write the report to a file (default: validation-report-<file>-<millis>.json)
        #[arg(long, value_name = "PATH", num_args = 0..=1)]
        export: Option<Option<PathBuf>>,

        /// Format of the exported report
        #[arg(long, value_enum, default_value_t = ExportFormat::Json)]
        export_format: ExportFormat,
    },

    /// Import a file and print its first rows
    Preview {
        /// Path to the data file (CSV/JSON/TXT/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Number of rows to show
        #[arg(short = 'n', long, default_value = "20")]
        rows: usize,
    },

    /// List the built-in validation rules
    Rules {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormatChoice {
    /// Human-readable multi-line output
    #[default]
    Pretty,
    /// Single-line output
    Compact,
    /// JSON lines for machine parsing
    Json,
}
