use std::fmt;

use heck::ToTitleCase;
use serde::Serialize;

/// The six cleaning steps, listed in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    RemoveDuplicates,
    RemoveEmptyRows,
    RemoveEmptyColumns,
    TrimSpaces,
    NormalizeColumnNames,
    TitleCaseCells,
}

impl Operation {
    pub const ALL: [Operation; 6] = [
        Operation::RemoveDuplicates,
        Operation::RemoveEmptyRows,
        Operation::RemoveEmptyColumns,
        Operation::TrimSpaces,
        Operation::NormalizeColumnNames,
        Operation::TitleCaseCells,
    ];

    /// Stable identifier used in settings documents and logs.
    pub fn id(self) -> &'static str {
        match self {
            Operation::RemoveDuplicates => "remove_duplicates",
            Operation::RemoveEmptyRows => "remove_empty_rows",
            Operation::RemoveEmptyColumns => "remove_empty_columns",
            Operation::TrimSpaces => "trim_spaces",
            Operation::NormalizeColumnNames => "normalize_column_names",
            Operation::TitleCaseCells => "title_case_cells",
        }
    }

    /// Human-readable label, e.g. `Remove Empty Rows`.
    pub fn label(self) -> String {
        self.id().to_title_case()
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// One enabled flag per [`Operation`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OperationSelection {
    pub remove_duplicates: bool,
    pub remove_empty_rows: bool,
    pub remove_empty_columns: bool,
    pub trim_spaces: bool,
    pub normalize_column_names: bool,
    pub title_case_cells: bool,
}

impl OperationSelection {
    pub fn all() -> Self {
        Self {
            remove_duplicates: true,
            remove_empty_rows: true,
            remove_empty_columns: true,
            trim_spaces: true,
            normalize_column_names: true,
            title_case_cells: true,
        }
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn only(operations: &[Operation]) -> Self {
        let mut selection = Self::none();
        for op in operations {
            selection.set(*op, true);
        }
        selection
    }

    pub fn is_enabled(&self, op: Operation) -> bool {
        match op {
            Operation::RemoveDuplicates => self.remove_duplicates,
            Operation::RemoveEmptyRows => self.remove_empty_rows,
            Operation::RemoveEmptyColumns => self.remove_empty_columns,
            Operation::TrimSpaces => self.trim_spaces,
            Operation::NormalizeColumnNames => self.normalize_column_names,
            Operation::TitleCaseCells => self.title_case_cells,
        }
    }

    pub fn set(&mut self, op: Operation, enabled: bool) {
        let flag = match op {
            Operation::RemoveDuplicates => &mut self.remove_duplicates,
            Operation::RemoveEmptyRows => &mut self.remove_empty_rows,
            Operation::RemoveEmptyColumns => &mut self.remove_empty_columns,
            Operation::TrimSpaces => &mut self.trim_spaces,
            Operation::NormalizeColumnNames => &mut self.normalize_column_names,
            Operation::TitleCaseCells => &mut self.title_case_cells,
        };
        *flag = enabled;
    }

    /// Enabled operations in execution order, whatever order they were chosen in.
    pub fn enabled(&self) -> Vec<Operation> {
        Operation::ALL
            .into_iter()
            .filter(|op| self.is_enabled(*op))
            .collect()
    }

    pub fn any(&self) -> bool {
        Operation::ALL.into_iter().any(|op| self.is_enabled(op))
    }

    /// Flags enabled in either selection.
    pub fn union(self, other: Self) -> Self {
        let mut merged = self;
        for op in Operation::ALL {
            if other.is_enabled(op) {
                merged.set(op, true);
            }
        }
        merged
    }
}
