//! Error taxonomy for loading and persisting spreadsheets.
//!
//! Cleaning steps are total over any well-formed [`Table`](crate::table::Table),
//! so the only failures are on the way in (`UnsupportedFormat`,
//! `FileNotReadable`, `CorruptFile`) and on the way out (`WriteFailed`).
//! Command handlers wrap these in `anyhow` with extra context.

use std::{io, path::PathBuf};

use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum CleanError {
    #[error("Unsupported file format {path:?} (expected .xlsx or .xls)")]
    UnsupportedFormat { path: PathBuf },

    #[error("Cannot read {path:?}: {source}")]
    FileNotReadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot parse spreadsheet {path:?}: {source}")]
    CorruptFile {
        path: PathBuf,
        #[source]
        source: BoxError,
    },

    #[error("Cannot write {path:?}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: BoxError,
    },
}

impl CleanError {
    pub fn path(&self) -> &PathBuf {
        match self {
            CleanError::UnsupportedFormat { path }
            | CleanError::FileNotReadable { path, .. }
            | CleanError::CorruptFile { path, .. }
            | CleanError::WriteFailed { path, .. } => path,
        }
    }

    pub(crate) fn corrupt(path: impl Into<PathBuf>, source: impl Into<BoxError>) -> Self {
        CleanError::CorruptFile {
            path: path.into(),
            source: source.into(),
        }
    }

    pub(crate) fn write_failed(path: impl Into<PathBuf>, source: impl Into<BoxError>) -> Self {
        CleanError::WriteFailed {
            path: path.into(),
            source: source.into(),
        }
    }
}
