//! Before/after bookkeeping for a cleaning run.
//!
//! The collector never scans cell data on its own except for the start and
//! end [`TableShape`] snapshots; the engine reports each step's shapes and the
//! number of cells it rewrote, and the collector turns those into deltas.

use log::debug;
use serde::Serialize;

use crate::{
    selection::Operation,
    table::{Table, TableShape},
};

/// Effect of one enabled step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StepRecord {
    pub operation: Operation,
    pub rows_before: usize,
    pub rows_after: usize,
    pub columns_before: usize,
    pub columns_after: usize,
    /// Cells (or header names) rewritten in place by the step.
    pub cells_changed: usize,
}

impl StepRecord {
    pub fn rows_removed(&self) -> usize {
        self.rows_before.saturating_sub(self.rows_after)
    }

    pub fn columns_removed(&self) -> usize {
        self.columns_before.saturating_sub(self.columns_after)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunStatistics {
    pub rows_before: usize,
    pub columns_before: usize,
    pub rows_after: usize,
    pub columns_after: usize,
    pub duplicates_removed: usize,
    pub empty_rows_removed: usize,
    pub empty_columns_removed: usize,
    pub cells_trimmed: usize,
    pub columns_renamed: usize,
    pub cells_title_cased: usize,
    pub original: TableShape,
    pub final_shape: TableShape,
    pub steps: Vec<StepRecord>,
}

impl RunStatistics {
    pub fn operations_applied(&self) -> impl Iterator<Item = Operation> + '_ {
        self.steps.iter().map(|step| step.operation)
    }

    pub fn rows_changed(&self) -> usize {
        self.rows_before.saturating_sub(self.rows_after)
    }

    pub fn columns_changed(&self) -> usize {
        self.columns_before.saturating_sub(self.columns_after)
    }

    pub fn empty_cells_reduced(&self) -> usize {
        self.original
            .empty_cells
            .saturating_sub(self.final_shape.empty_cells)
    }

    /// True when no step removed anything or rewrote any cell.
    pub fn is_unchanged(&self) -> bool {
        self.steps.iter().all(|step| {
            step.rows_removed() == 0 && step.columns_removed() == 0 && step.cells_changed == 0
        })
    }
}

#[derive(Debug)]
pub struct StatisticsCollector {
    original: TableShape,
    steps: Vec<StepRecord>,
}

impl StatisticsCollector {
    pub fn begin(table: &Table) -> Self {
        Self {
            original: table.shape(),
            steps: Vec::new(),
        }
    }

    pub fn record(
        &mut self,
        operation: Operation,
        before: (usize, usize),
        after: (usize, usize),
        cells_changed: usize,
    ) -> StepRecord {
        let step = StepRecord {
            operation,
            rows_before: before.0,
            rows_after: after.0,
            columns_before: before.1,
            columns_after: after.1,
            cells_changed,
        };
        debug!("Recorded step {step:?}");
        self.steps.push(step);
        step
    }

    pub fn finish(self, table: &Table) -> RunStatistics {
        let final_shape = table.shape();
        let mut stats = RunStatistics {
            rows_before: self.original.rows,
            columns_before: self.original.columns,
            rows_after: final_shape.rows,
            columns_after: final_shape.columns,
            original: self.original,
            final_shape,
            ..RunStatistics::default()
        };
        for step in &self.steps {
            match step.operation {
                Operation::RemoveDuplicates => stats.duplicates_removed += step.rows_removed(),
                Operation::RemoveEmptyRows => stats.empty_rows_removed += step.rows_removed(),
                Operation::RemoveEmptyColumns => {
                    stats.empty_columns_removed += step.columns_removed()
                }
                Operation::TrimSpaces => stats.cells_trimmed += step.cells_changed,
                Operation::NormalizeColumnNames => stats.columns_renamed += step.cells_changed,
                Operation::TitleCaseCells => stats.cells_title_cased += step.cells_changed,
            }
        }
        stats.steps = self.steps;
        stats
    }
}
