//! CLI command implementations.

pub mod preview;
pub mod rules;
pub mod scan;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, ContentArrangement, Table};
use indicatif::{ProgressBar, ProgressStyle};

use datascan::ProgressReporter;

/// Table with bold headers in the shared output style.
pub(crate) fn new_table<I, S>(headers: I) -> Table
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            headers
                .into_iter()
                .map(|h| Cell::new(h.into()).add_attribute(Attribute::Bold)),
        );
    table
}

/// Progress bar driven by a [`ProgressReporter`].
///
/// The bar is hidden when stderr is not a terminal.
pub(crate) fn progress_bar(message: &'static str) -> (ProgressBar, ProgressReporter) {
    let bar = ProgressBar::new(100);
    if let Ok(style) = ProgressStyle::with_template("{msg:>10} [{bar:30.cyan/blue}] {pos:>3}%") {
        bar.set_style(style.progress_chars("=> "));
    }
    bar.set_message(message);

    let reporter = ProgressReporter::new();
    let sink = bar.clone();
    reporter.subscribe(move |percent| sink.set_position(percent.round() as u64));
    (bar, reporter)
}
