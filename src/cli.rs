use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::{
    selection::{Operation, OperationSelection},
    settings::Theme,
};

#[derive(Debug, Parser)]
#[command(author, version, about = "Clean spreadsheet files with a timestamped backup", long_about = None)]
pub struct Cli {
    /// Write log records to this file instead of stderr
    #[arg(long = "log-file", global = true)]
    pub log_file: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Back up a spreadsheet and write a cleaned, timestamped copy
    Clean(CleanArgs),
    /// Show the first rows of a spreadsheet as a formatted table
    Preview(PreviewArgs),
    /// Save a cleaning selection and theme to a settings file
    Settings(SettingsArgs),
}

/// The six cleaning switches shared by `clean` and `settings`.
#[derive(Debug, Clone, Default, Args)]
pub struct OperationFlags {
    /// Remove rows that exactly repeat an earlier row
    #[arg(long = "remove-duplicates")]
    pub remove_duplicates: bool,
    /// Remove rows whose cells are all blank
    #[arg(long = "remove-empty-rows")]
    pub remove_empty_rows: bool,
    /// Remove columns whose cells are all blank
    #[arg(long = "remove-empty-columns")]
    pub remove_empty_columns: bool,
    /// Strip leading and trailing whitespace from text cells
    #[arg(long = "trim-spaces")]
    pub trim_spaces: bool,
    /// Rewrite column names to Title Case
    #[arg(long = "normalize-column-names")]
    pub normalize_column_names: bool,
    /// Rewrite text cells to Title Case
    #[arg(long = "title-case-cells")]
    pub title_case_cells: bool,
    /// Enable every cleaning operation
    #[arg(long = "all")]
    pub all: bool,
}

impl OperationFlags {
    pub fn selection(&self) -> OperationSelection {
        if self.all {
            return OperationSelection::all();
        }
        let mut selection = OperationSelection::none();
        for (op, enabled) in [
            (Operation::RemoveDuplicates, self.remove_duplicates),
            (Operation::RemoveEmptyRows, self.remove_empty_rows),
            (Operation::RemoveEmptyColumns, self.remove_empty_columns),
            (Operation::TrimSpaces, self.trim_spaces),
            (Operation::NormalizeColumnNames, self.normalize_column_names),
            (Operation::TitleCaseCells, self.title_case_cells),
        ] {
            selection.set(op, enabled);
        }
        selection
    }
}

#[derive(Debug, Args)]
pub struct CleanArgs {
    /// Spreadsheet to clean (.xlsx or .xls)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    #[command(flatten)]
    pub operations: OperationFlags,
    /// Settings file whose enabled operations are added to the flags above
    #[arg(short = 's', long = "settings")]
    pub settings: Option<PathBuf>,
    /// Directory for the cleaned workbook (defaults to the input's directory)
    #[arg(short = 'o', long = "output-dir")]
    pub output_dir: Option<PathBuf>,
    /// Directory for the backup copy (defaults to the input's directory)
    #[arg(long = "backup-dir")]
    pub backup_dir: Option<PathBuf>,
    /// Print run statistics as JSON instead of the text report
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct PreviewArgs {
    /// Spreadsheet to preview (.xlsx or .xls)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Number of rows to display
    #[arg(long, default_value_t = 10)]
    pub rows: usize,
}

#[derive(Debug, Args)]
pub struct SettingsArgs {
    /// Destination settings file (.json)
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,
    #[command(flatten)]
    pub operations: OperationFlags,
    /// Theme name stored alongside the selection
    #[arg(long, value_enum, default_value_t = Theme::ProfessionalLight)]
    pub theme: Theme,
}
