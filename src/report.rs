use std::{fmt::Write as _, path::Path};

use crate::{pipeline::CleanOutcome, stats::RunStatistics, table::TableShape};

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn push_shape(output: &mut String, title: &str, shape: &TableShape) {
    let _ = writeln!(output, "{title}:");
    let _ = writeln!(output, "  Rows: {}", shape.rows);
    let _ = writeln!(output, "  Columns: {}", shape.columns);
    let _ = writeln!(output, "  Total cells: {}", shape.cells);
    let _ = writeln!(output, "  Empty cells: {}", shape.empty_cells);
}

/// Human-readable results summary for a finished run.
pub fn render_report(outcome: &CleanOutcome) -> String {
    let stats: &RunStatistics = &outcome.statistics;
    let mut output = String::new();
    let _ = writeln!(output, "CLEANING RESULTS");
    let _ = writeln!(output, "{}", "=".repeat(50));
    let _ = writeln!(output);
    let _ = writeln!(output, "Files:");
    let _ = writeln!(output, "  Original file: {}", file_name(&outcome.input));
    let _ = writeln!(output, "  Backup created: {}", file_name(&outcome.backup_path));
    let _ = writeln!(output, "  Cleaned file: {}", file_name(&outcome.cleaned_path));
    let _ = writeln!(output);
    push_shape(&mut output, "Original data", &stats.original);
    let _ = writeln!(output);
    push_shape(&mut output, "Final data", &stats.final_shape);
    let _ = writeln!(output);

    let _ = writeln!(output, "Operations applied:");
    for step in &stats.steps {
        let _ = write!(output, "  {}", step.operation.label());
        let removed_rows = step.rows_removed();
        let removed_columns = step.columns_removed();
        if removed_rows > 0 {
            let _ = write!(output, " ({removed_rows} row(s) removed)");
        } else if removed_columns > 0 {
            let _ = write!(output, " ({removed_columns} column(s) removed)");
        } else if step.cells_changed > 0 {
            let _ = write!(output, " ({} value(s) changed)", step.cells_changed);
        }
        let _ = writeln!(output);
    }
    let _ = writeln!(output);

    let _ = writeln!(output, "Summary:");
    let _ = writeln!(output, "  Rows changed: {}", stats.rows_changed());
    let _ = writeln!(output, "  Columns changed: {}", stats.columns_changed());
    let _ = writeln!(output, "  Empty cells reduced: {}", stats.empty_cells_reduced());
    output
}
