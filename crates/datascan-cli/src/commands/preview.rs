//! Preview command - show the first rows of an imported file.

use std::path::PathBuf;

use colored::Colorize;
use comfy_table::Cell;

use datascan::Importer;

use super::{new_table, progress_bar};

pub async fn run(file: PathBuf, rows: usize) -> Result<(), Box<dyn std::error::Error>> {
    let (bar, progress) = progress_bar("Importing");
    let imported = Importer::new().with_progress(progress).import_file(&file).await;
    bar.finish_and_clear();

    for warning in imported.warnings() {
        eprintln!("{} {}", "warning:".yellow().bold(), warning.message);
    }

    let dataset = imported.into_result().map_err(|errors| {
        errors
            .into_iter()
            .filter(|e| e.is_error())
            .map(|e| e.message)
            .collect::<Vec<_>>()
            .join("; ")
    })?;

    println!(
        "{} {} ({}, {} rows x {} columns)",
        "Preview of".cyan().bold(),
        dataset.file_name().white(),
        dataset.source_format(),
        dataset.row_count(),
        dataset.column_count()
    );

    let mut table = new_table(dataset.headers().iter().map(String::as_str));
    for row in dataset.preview(rows) {
        table.add_row(row.iter().map(|cell| {
            if cell.is_null() {
                Cell::new("null".dimmed())
            } else {
                Cell::new(cell)
            }
        }));
    }
    println!("{table}");

    if dataset.row_count() > rows {
        println!(
            "Showing {} of {} rows",
            rows.to_string().white().bold(),
            dataset.row_count()
        );
    }

    Ok(())
}
