#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use sheet_cleaner::data::Value;
use sheet_cleaner::table::Table;
use sheet_cleaner::writer::write_table;
use tempfile::{TempDir, tempdir};

/// Scratch directory helper that cleans up files automatically on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    /// Creates a fresh scratch directory for the current test case.
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    /// Returns the root path for all files owned by this workspace.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes `table` as an xlsx workbook under the workspace and returns the path.
    pub fn write_workbook(&self, name: &str, table: &Table) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        write_table(table, &path).expect("write workbook fixture");
        path
    }

    /// Writes raw bytes into a file under the workspace and returns the path.
    pub fn write_bytes(&self, name: &str, contents: &[u8]) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        fs::write(&path, contents).expect("write temp file contents");
        path
    }

    /// File names in the workspace that contain `marker`, sorted.
    pub fn files_containing(&self, marker: &str) -> Vec<PathBuf> {
        let mut found: Vec<PathBuf> = fs::read_dir(self.path())
            .expect("read workspace")
            .map(|entry| entry.expect("dir entry").path())
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.contains(marker))
            })
            .collect();
        found.sort();
        found
    }
}

/// Builds a table from string literals; `""` becomes a blank cell.
pub fn text_table(headers: &[&str], rows: &[&[&str]]) -> Table {
    Table::new(
        headers.iter().map(|h| h.to_string()).collect(),
        rows.iter()
            .map(|row| {
                row.iter()
                    .map(|cell| {
                        if cell.is_empty() {
                            Value::Blank
                        } else {
                            Value::text(*cell)
                        }
                    })
                    .collect()
            })
            .collect(),
    )
    .expect("valid table")
}

/// A small contact list with duplicates, a blank row, a blank column and messy text.
pub fn contacts() -> Table {
    Table::new(
        vec![
            "first name".into(),
            "EMAIL ".into(),
            "notes".into(),
            "visits".into(),
        ],
        vec![
            vec![
                Value::text(" Bob "),
                Value::text("b@x.com"),
                Value::Blank,
                Value::Number(3.0),
            ],
            vec![
                Value::text("bob"),
                Value::text("B@X.COM"),
                Value::text("  "),
                Value::Number(3.0),
            ],
            vec![Value::Blank, Value::Blank, Value::Blank, Value::Blank],
            vec![
                Value::text(" Bob "),
                Value::text("b@x.com"),
                Value::Blank,
                Value::Number(3.0),
            ],
            vec![
                Value::text("alice SMITH"),
                Value::text("a@x.com"),
                Value::Blank,
                Value::Number(7.0),
            ],
        ],
    )
    .expect("valid contacts table")
}
