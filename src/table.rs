//! In-memory sheet model and a plain-text grid renderer for previews.

use std::{borrow::Cow, fmt::Write as _};

use anyhow::{Result, bail};
use itertools::Itertools;

use crate::data::Value;

/// Uniquely named headers over row-major cells.
///
/// Every row holds exactly `headers.len()` cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<Value>>,
}

/// Row/column/cell counts of a table at one point in time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct TableShape {
    pub rows: usize,
    pub columns: usize,
    pub cells: usize,
    pub empty_cells: usize,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Value>>) -> Result<Self> {
        if let Some(duplicate) = headers.iter().duplicates().next() {
            bail!("Duplicate column name '{duplicate}'");
        }
        if let Some((idx, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != headers.len())
        {
            bail!(
                "Row {} has {} cell(s) but the table has {} column(s)",
                idx + 1,
                row.len(),
                headers.len()
            );
        }
        Ok(Self { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn column(&self, idx: usize) -> impl Iterator<Item = &Value> {
        self.rows.iter().filter_map(move |row| row.get(idx))
    }

    pub fn shape(&self) -> TableShape {
        let empty_cells = self
            .rows
            .iter()
            .flatten()
            .filter(|value| value.is_blank())
            .count();
        TableShape {
            rows: self.row_count(),
            columns: self.column_count(),
            cells: self.row_count() * self.column_count(),
            empty_cells,
        }
    }

    pub(crate) fn retain_rows<F>(&mut self, keep: F)
    where
        F: FnMut(&Vec<Value>) -> bool,
    {
        self.rows.retain(keep);
    }

    /// Drops the columns whose index is not flagged in `keep`.
    pub(crate) fn retain_columns(&mut self, keep: &[bool]) {
        let mut flags = keep.iter();
        self.headers.retain(|_| flags.next().copied().unwrap_or(true));
        for row in &mut self.rows {
            let mut flags = keep.iter();
            row.retain(|_| flags.next().copied().unwrap_or(true));
        }
    }

    pub(crate) fn cells_mut(&mut self) -> impl Iterator<Item = &mut Value> {
        self.rows.iter_mut().flatten()
    }

    /// Replaces the header row. Callers guarantee the same width and unique names.
    pub(crate) fn set_headers(&mut self, headers: Vec<String>) {
        debug_assert_eq!(headers.len(), self.headers.len());
        debug_assert!(headers.iter().all_unique());
        self.headers = headers;
    }

    /// Display strings for the first `limit` rows.
    pub fn display_rows(&self, limit: usize) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .take(limit)
            .map(|row| row.iter().map(Value::as_display).collect())
            .collect()
    }
}

pub fn render_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let column_count = headers.len();
    let mut widths = headers.iter().map(|h| display_width(h)).collect::<Vec<_>>();

    for row in rows {
        for (idx, cell) in row.iter().enumerate().take(column_count) {
            widths[idx] = widths[idx].max(display_width(cell));
        }
    }

    for width in &mut widths {
        *width = (*width).max(1);
    }

    let mut output = String::new();

    let header_line = format_row(headers, &widths);
    let _ = writeln!(output, "{header_line}");

    let separator_widths = widths.iter().map(|w| (*w).max(3)).collect::<Vec<usize>>();
    let separator_cells = separator_widths
        .iter()
        .map(|w| "-".repeat(*w))
        .collect::<Vec<_>>();
    let _ = writeln!(output, "{}", format_row(&separator_cells, &separator_widths));

    for row in rows {
        let _ = writeln!(output, "{}", format_row(row, &widths));
    }

    output
}

pub fn print_table(headers: &[String], rows: &[Vec<String>]) {
    print!("{}", render_table(headers, rows));
}

fn format_row(values: &[String], widths: &[usize]) -> String {
    let mut line = values
        .iter()
        .zip(widths)
        .map(|(value, width)| {
            let sanitized = sanitize_cell(value);
            let padding = width.saturating_sub(display_width(&sanitized));
            let mut cell = sanitized.into_owned();
            cell.push_str(&" ".repeat(padding));
            cell
        })
        .join("  ");
    while line.ends_with(' ') {
        line.pop();
    }
    line
}

fn display_width(value: &str) -> usize {
    value.chars().count()
}

fn sanitize_cell(value: &str) -> Cow<'_, str> {
    if value.contains(['\n', '\r', '\t']) {
        Cow::Owned(
            value
                .chars()
                .map(|ch| match ch {
                    '\n' | '\r' | '\t' => ' ',
                    other => other,
                })
                .collect(),
        )
    } else {
        Cow::Borrowed(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::new(
            vec!["id".into(), "name".into()],
            vec![
                vec![Value::Number(1.0), Value::text("Alice")],
                vec![Value::Number(2.0), Value::Blank],
            ],
        )
        .unwrap()
    }

    #[test]
    fn new_rejects_duplicate_headers() {
        let err = Table::new(vec!["a".into(), "a".into()], Vec::new()).unwrap_err();
        assert!(err.to_string().contains("Duplicate column name 'a'"));
    }

    #[test]
    fn new_rejects_ragged_rows() {
        let err = Table::new(vec!["a".into()], vec![vec![Value::Blank, Value::Blank]])
            .unwrap_err();
        assert!(err.to_string().contains("Row 1 has 2 cell(s)"));
    }

    #[test]
    fn shape_counts_blank_cells() {
        let shape = sample().shape();
        assert_eq!(
            shape,
            TableShape {
                rows: 2,
                columns: 2,
                cells: 4,
                empty_cells: 1
            }
        );
    }

    #[test]
    fn retain_columns_drops_unflagged_cells() {
        let mut table = sample();
        table.retain_columns(&[false, true]);
        assert_eq!(table.headers(), ["name".to_string()]);
        assert_eq!(table.rows()[0], vec![Value::text("Alice")]);
    }

    #[test]
    fn render_table_aligns_columns() {
        let table = sample();
        let rendered = render_table(table.headers(), &table.display_rows(10));
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines, vec!["id  name", "---  -----", "1   Alice", "2"]);
    }

    #[test]
    fn render_table_normalizes_control_characters() {
        let headers = vec!["note".to_string()];
        let rows = vec![vec!["line1\nline2\tvalue".to_string()]];
        let rendered = render_table(&headers, &rows);
        assert_eq!(rendered.lines().nth(2), Some("line1 line2 value"));
    }
}
