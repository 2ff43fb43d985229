//! Spreadsheet loading.
//!
//! - **Format check**: only `.xlsx` and `.xls` are accepted, decided by
//!   extension before the file is opened.
//! - **Readability**: the file is opened once up front so that missing files and
//!   permission problems surface as `FileNotReadable` rather than parser errors.
//! - **Parsing**: `calamine` reads the first worksheet; the first row of its used
//!   range becomes the header row.

use std::{fs::File, io, path::Path};

use calamine::{Data, Reader, open_workbook_auto};
use log::{debug, info};

use crate::{
    data::{Value, format_number},
    error::CleanError,
    table::Table,
    transform::string_ops::disambiguate,
};

pub const SUPPORTED_EXTENSIONS: [&str; 2] = ["xlsx", "xls"];

pub fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
}

/// Fails with `UnsupportedFormat` or `FileNotReadable` without parsing anything.
pub fn ensure_readable(path: &Path) -> Result<(), CleanError> {
    if !is_supported(path) {
        return Err(CleanError::UnsupportedFormat {
            path: path.to_path_buf(),
        });
    }
    let not_readable = |source: io::Error| CleanError::FileNotReadable {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(not_readable)?;
    let metadata = file.metadata().map_err(not_readable)?;
    if metadata.is_dir() {
        return Err(not_readable(io::Error::new(
            io::ErrorKind::InvalidInput,
            "path is a directory",
        )));
    }
    Ok(())
}

pub fn load_table(path: &Path) -> Result<Table, CleanError> {
    ensure_readable(path)?;
    info!("Loading spreadsheet {path:?}");

    let mut workbook =
        open_workbook_auto(path).map_err(|err| CleanError::corrupt(path, err))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| CleanError::corrupt(path, "workbook contains no worksheets"))?
        .map_err(|err| CleanError::corrupt(path, err))?;

    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        debug!("First worksheet of {path:?} is empty");
        return Ok(Table::default());
    };
    let headers = disambiguate(
        header_row
            .iter()
            .enumerate()
            .map(|(idx, cell)| header_name(idx, cell)),
    );
    let body = rows
        .map(|row| row.iter().map(cell_value).collect::<Vec<_>>())
        .collect::<Vec<_>>();

    let table = Table::new(headers, body).map_err(|err| CleanError::corrupt(path, err))?;
    info!(
        "Loaded {} row(s) x {} column(s) from {path:?}",
        table.row_count(),
        table.column_count()
    );
    Ok(table)
}

pub fn cell_value(cell: &Data) -> Value {
    match cell {
        Data::Empty => Value::Blank,
        Data::String(s) => Value::Text(s.clone()),
        Data::Int(i) => Value::Number(*i as f64),
        Data::Float(f) => Value::Number(*f),
        Data::Bool(b) => Value::Boolean(*b),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(Value::DateTime)
            .unwrap_or_else(|| Value::Number(dt.as_f64())),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Value::Text(s.clone()),
        Data::Error(err) => Value::Text(err.to_string()),
    }
}

fn header_name(idx: usize, cell: &Data) -> String {
    let name = match cell_value(cell) {
        Value::Number(f) => format_number(f),
        other => other.as_display(),
    };
    if name.trim().is_empty() {
        format!("Unnamed: {idx}")
    } else {
        name
    }
}
