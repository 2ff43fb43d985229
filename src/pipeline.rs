use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use log::{error, info};

use crate::{
    clean::{Progress, clean_with_progress},
    error::CleanError,
    loader,
    selection::OperationSelection,
    stats::RunStatistics,
    writer,
};

/// Where a run puts its files, and the clock it stamps them with.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Directory for the cleaned workbook; defaults to the input's directory.
    pub output_dir: Option<PathBuf>,
    /// Directory for the backup copy; defaults to the input's directory.
    pub backup_dir: Option<PathBuf>,
    /// Fixed timestamp for file names; local time when unset.
    pub timestamp: Option<NaiveDateTime>,
}

#[derive(Debug, Clone)]
pub struct CleanOutcome {
    pub input: PathBuf,
    pub backup_path: PathBuf,
    pub cleaned_path: PathBuf,
    pub statistics: RunStatistics,
}

/// Backs up, loads, cleans and writes `input`.
///
/// The backup is created before the table is loaded and stays in place
/// whatever happens afterwards. No cleaned file exists unless the whole run
/// succeeds.
pub fn clean_file<F>(
    input: &Path,
    selection: &OperationSelection,
    options: &RunOptions,
    on_progress: F,
) -> Result<CleanOutcome, CleanError>
where
    F: FnMut(Progress),
{
    let result = run(input, selection, options, on_progress);
    if let Err(err) = &result {
        error!("Cleaning {input:?} failed: {err}");
    }
    result
}

fn run<F>(
    input: &Path,
    selection: &OperationSelection,
    options: &RunOptions,
    on_progress: F,
) -> Result<CleanOutcome, CleanError>
where
    F: FnMut(Progress),
{
    loader::ensure_readable(input)?;

    let stamp = options
        .timestamp
        .unwrap_or_else(|| Local::now().naive_local());
    let backup_path = writer::backup_path(input, options.backup_dir.as_deref(), &stamp);
    let cleaned_path = writer::cleaned_path(input, options.output_dir.as_deref(), &stamp);

    writer::create_backup(input, &backup_path)?;
    let table = loader::load_table(input)?;

    info!(
        "Cleaning {input:?} with {} operation(s)",
        selection.enabled().len()
    );
    let (table, statistics) = clean_with_progress(table, selection, on_progress);

    writer::write_table(&table, &cleaned_path)?;
    info!("Successfully cleaned {input:?} into {cleaned_path:?}");

    Ok(CleanOutcome {
        input: input.to_path_buf(),
        backup_path,
        cleaned_path,
        statistics,
    })
}
