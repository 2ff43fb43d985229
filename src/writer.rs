//! Backup and cleaned-output persistence.
//!
//! The backup is a byte-for-byte copy taken before the table is loaded. The
//! cleaned workbook is rendered to memory first and only then written to disk;
//! if that write fails the partial file is removed so that a failed run never
//! leaves a truncated output behind. The backup is never touched after it has
//! been created.

use std::{
    fs::{self, File, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
};

use chrono::NaiveDateTime;
use log::{info, warn};
use rust_xlsxwriter::{ColNum, Format, RowNum, Workbook, Worksheet, XlsxError};

use crate::{
    data::{Value, is_time_only},
    error::CleanError,
    table::Table,
};

pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const DATETIME_NUMBER_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";
const TIME_NUMBER_FORMAT: &str = "hh:mm:ss";

pub fn format_timestamp(stamp: &NaiveDateTime) -> String {
    stamp.format(TIMESTAMP_FORMAT).to_string()
}

fn stem_of(input: &Path) -> String {
    input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "workbook".to_string())
}

fn target_dir(input: &Path, dir: Option<&Path>) -> PathBuf {
    match dir {
        Some(dir) => dir.to_path_buf(),
        None => input
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default(),
    }
}

/// `<dir>/<stem>_backup_<stamp>.<original-ext>`
pub fn backup_path(input: &Path, backup_dir: Option<&Path>, stamp: &NaiveDateTime) -> PathBuf {
    let ext = input
        .extension()
        .map(|ext| ext.to_string_lossy().into_owned())
        .unwrap_or_else(|| "xlsx".to_string());
    target_dir(input, backup_dir).join(format!(
        "{}_backup_{}.{ext}",
        stem_of(input),
        format_timestamp(stamp)
    ))
}

/// `<dir>/<stem>_cleaned_<stamp>.xlsx`
pub fn cleaned_path(input: &Path, output_dir: Option<&Path>, stamp: &NaiveDateTime) -> PathBuf {
    target_dir(input, output_dir).join(format!(
        "{}_cleaned_{}.xlsx",
        stem_of(input),
        format_timestamp(stamp)
    ))
}

/// Copies `input` to `backup`. An existing file at `backup` is never replaced.
pub fn create_backup(input: &Path, backup: &Path) -> Result<(), CleanError> {
    let failed = |err: io::Error| CleanError::write_failed(backup, err);
    let mut source = File::open(input).map_err(failed)?;
    let mut target = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(backup)
        .map_err(failed)?;
    let bytes = match io::copy(&mut source, &mut target)
        .and_then(|bytes| target.sync_all().map(|()| bytes))
    {
        Ok(bytes) => bytes,
        Err(err) => {
            drop(target);
            if let Err(remove_err) = fs::remove_file(backup) {
                warn!("Could not remove partial backup {backup:?}: {remove_err}");
            }
            return Err(failed(err));
        }
    };
    info!("Backed up {input:?} to {backup:?} ({bytes} bytes)");
    Ok(())
}

pub fn write_table(table: &Table, path: &Path) -> Result<(), CleanError> {
    let buffer = render_workbook(table).map_err(|err| CleanError::write_failed(path, err))?;
    let mut file = File::create(path).map_err(|err| CleanError::write_failed(path, err))?;
    if let Err(err) = file.write_all(&buffer).and_then(|()| file.sync_all()) {
        drop(file);
        if let Err(remove_err) = fs::remove_file(path) {
            warn!("Could not remove partial output {path:?}: {remove_err}");
        }
        return Err(CleanError::write_failed(path, err));
    }
    info!(
        "Wrote {} row(s) x {} column(s) to {path:?}",
        table.row_count(),
        table.column_count()
    );
    Ok(())
}

/// Serializes the table as a single-sheet xlsx workbook in memory.
pub fn render_workbook(table: &Table) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let formats = CellFormats {
        datetime: Format::new().set_num_format(DATETIME_NUMBER_FORMAT),
        time: Format::new().set_num_format(TIME_NUMBER_FORMAT),
    };
    let worksheet = workbook.add_worksheet();

    for (col, header) in table.headers().iter().enumerate() {
        worksheet.write_string(0, col_num(col)?, header)?;
    }
    for (idx, row) in table.rows().iter().enumerate() {
        let row_num = row_num(idx + 1)?;
        for (col, value) in row.iter().enumerate() {
            write_cell(worksheet, row_num, col_num(col)?, value, &formats)?;
        }
    }
    workbook.save_to_buffer()
}

struct CellFormats {
    datetime: Format,
    time: Format,
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: RowNum,
    col: ColNum,
    value: &Value,
    formats: &CellFormats,
) -> Result<(), XlsxError> {
    match value {
        Value::Blank => {}
        Value::Text(text) if text.is_empty() => {}
        Value::Text(text) => {
            worksheet.write_string(row, col, text)?;
        }
        Value::Number(number) => {
            worksheet.write_number(row, col, *number)?;
        }
        Value::Boolean(flag) => {
            worksheet.write_boolean(row, col, *flag)?;
        }
        Value::DateTime(dt) if is_time_only(dt) => {
            worksheet.write_datetime_with_format(row, col, &dt.time(), &formats.time)?;
        }
        Value::DateTime(dt) => {
            worksheet.write_datetime_with_format(row, col, dt, &formats.datetime)?;
        }
    }
    Ok(())
}

fn row_num(idx: usize) -> Result<RowNum, XlsxError> {
    RowNum::try_from(idx).map_err(|_| XlsxError::RowColumnLimitError)
}

fn col_num(idx: usize) -> Result<ColNum, XlsxError> {
    ColNum::try_from(idx).map_err(|_| XlsxError::RowColumnLimitError)
}
