//! The cleaning engine.
//!
//! Enabled steps always run in [`Operation::ALL`] order: duplicates first,
//! then empty rows, empty columns, trimming, header normalization and finally
//! title-casing of cell text. Every step is a total function over a valid
//! [`Table`]; none of them can fail.

use std::collections::HashSet;

use log::info;

use crate::{
    data::Value,
    selection::{Operation, OperationSelection},
    stats::{RunStatistics, StatisticsCollector},
    table::Table,
    transform::string_ops::{disambiguate, normalize_header, title_case, trim},
};

/// Emitted after each enabled step completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub operation: Operation,
    pub completed: usize,
    pub total: usize,
}

impl Progress {
    pub fn percent(&self) -> usize {
        if self.total == 0 {
            100
        } else {
            self.completed * 100 / self.total
        }
    }
}

pub fn clean(table: Table, selection: &OperationSelection) -> (Table, RunStatistics) {
    clean_with_progress(table, selection, |_| {})
}

pub fn clean_with_progress<F>(
    mut table: Table,
    selection: &OperationSelection,
    mut on_progress: F,
) -> (Table, RunStatistics)
where
    F: FnMut(Progress),
{
    let enabled = selection.enabled();
    let total = enabled.len();
    let mut collector = StatisticsCollector::begin(&table);

    for (idx, operation) in enabled.into_iter().enumerate() {
        let before = (table.row_count(), table.column_count());
        let cells_changed = apply(&mut table, operation);
        let after = (table.row_count(), table.column_count());
        let step = collector.record(operation, before, after, cells_changed);
        info!(
            "{}: rows {} -> {}, columns {} -> {}, cells changed {}",
            operation,
            step.rows_before,
            step.rows_after,
            step.columns_before,
            step.columns_after,
            step.cells_changed
        );
        on_progress(Progress {
            operation,
            completed: idx + 1,
            total,
        });
    }

    let stats = collector.finish(&table);
    (table, stats)
}

/// Runs one step and returns how many cells or names it rewrote in place.
pub fn apply(table: &mut Table, operation: Operation) -> usize {
    match operation {
        Operation::RemoveDuplicates => {
            remove_duplicate_rows(table);
            0
        }
        Operation::RemoveEmptyRows => {
            remove_empty_rows(table);
            0
        }
        Operation::RemoveEmptyColumns => {
            remove_empty_columns(table);
            0
        }
        Operation::TrimSpaces => trim_cells(table),
        Operation::NormalizeColumnNames => normalize_column_names(table),
        Operation::TitleCaseCells => title_case_cells(table),
    }
}

/// Keeps the first occurrence of every distinct row. Returns rows removed.
pub fn remove_duplicate_rows(table: &mut Table) -> usize {
    let before = table.row_count();
    let mut seen: HashSet<Vec<Value>> = HashSet::with_capacity(before);
    table.retain_rows(|row| seen.insert(row.clone()));
    before - table.row_count()
}

pub fn remove_empty_rows(table: &mut Table) -> usize {
    let before = table.row_count();
    table.retain_rows(|row| !row.iter().all(Value::is_blank));
    before - table.row_count()
}

/// A table without data rows keeps its columns.
pub fn remove_empty_columns(table: &mut Table) -> usize {
    if table.row_count() == 0 {
        return 0;
    }
    let keep: Vec<bool> = (0..table.column_count())
        .map(|idx| !table.column(idx).all(Value::is_blank))
        .collect();
    let removed = keep.iter().filter(|keep| !**keep).count();
    if removed > 0 {
        table.retain_columns(&keep);
    }
    removed
}

pub fn trim_cells(table: &mut Table) -> usize {
    rewrite_text(table, |text| trim(text).into_owned())
}

pub fn title_case_cells(table: &mut Table) -> usize {
    rewrite_text(table, |text| title_case(text).into_owned())
}

/// Returns the number of headers whose text changed.
pub fn normalize_column_names(table: &mut Table) -> usize {
    if table.column_count() == 0 {
        return 0;
    }
    let normalized = table.headers().iter().enumerate().map(|(idx, name)| {
        let name = normalize_header(name);
        if name.is_empty() {
            format!("Column {}", idx + 1)
        } else {
            name
        }
    });
    let headers = disambiguate(normalized);
    let renamed = table
        .headers()
        .iter()
        .zip(&headers)
        .filter(|(old, new)| old != new)
        .count();
    table.set_headers(headers);
    renamed
}

fn rewrite_text<F>(table: &mut Table, mut rewrite: F) -> usize
where
    F: FnMut(&str) -> String,
{
    let mut changed = 0usize;
    for cell in table.cells_mut() {
        if let Value::Text(text) = cell {
            let updated = rewrite(text);
            if updated != *text {
                *text = updated;
                changed += 1;
            }
        }
    }
    changed
}
