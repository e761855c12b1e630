//! Datascan CLI - data-quality screening for tabular report files.

mod cli;
mod commands;
mod logging;

use clap::Parser;
use cli::{Cli, Commands};
use commands::scan::ScanArgs;
use logging::{init_logging, LogConfig};

/// Exit code when a scanned file has error-level issues.
const EXIT_INVALID: i32 = 2;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_logging(&LogConfig::from_verbosity(cli.verbose).with_format(cli.log_format));

    let result = match cli.command {
        Commands::Scan {
            file,
            rules,
            severity,
            all,
            json,
            export,
            export_format,
        } => commands::scan::run(ScanArgs {
            file,
            rules,
            severity,
            all,
            json,
            export,
            export_format,
        })
        .await
        .map(|valid| if valid { 0 } else { EXIT_INVALID }),

        Commands::Preview { file, rows } => commands::preview::run(file, rows).await.map(|_| 0),

        Commands::Rules { json } => commands::rules::run(json).map(|_| 0),
    };

    match result {
        Ok(0) => {}
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
