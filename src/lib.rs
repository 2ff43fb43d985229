pub mod clean;
pub mod cli;
pub mod data;
pub mod error;
pub mod loader;
pub mod pipeline;
pub mod report;
pub mod selection;
pub mod settings;
pub mod stats;
pub mod table;
pub mod transform;
pub mod writer;

use std::{env, fs::OpenOptions, path::Path, sync::OnceLock};

use anyhow::{Context, Result, bail};
use clap::Parser;
use log::{LevelFilter, debug, info};

use crate::{
    cli::{CleanArgs, Cli, Commands, PreviewArgs, SettingsArgs},
    pipeline::RunOptions,
    settings::Settings,
};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let target = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Opening log file {path:?}"))?;
            Some(env_logger::Target::Pipe(Box::new(file)))
        }
        None => None,
    };
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("sheet_cleaner", LevelFilter::Info);
        }
        if let Some(target) = target {
            builder.target(target);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
    Ok(())
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;
    match cli.command {
        Commands::Clean(args) => handle_clean(&args),
        Commands::Preview(args) => handle_preview(&args),
        Commands::Settings(args) => handle_settings(&args),
    }
}

fn handle_clean(args: &CleanArgs) -> Result<()> {
    let mut selection = args.operations.selection();
    if let Some(path) = &args.settings {
        let settings =
            Settings::load(path).with_context(|| format!("Loading settings from {path:?}"))?;
        debug!("Settings from {path:?}: {settings:?}");
        selection = selection.union(settings.operations);
    }
    if !selection.any() {
        bail!("Select at least one cleaning operation (or pass --all)");
    }

    let options = RunOptions {
        output_dir: args.output_dir.clone(),
        backup_dir: args.backup_dir.clone(),
        timestamp: None,
    };
    let outcome = pipeline::clean_file(&args.input, &selection, &options, |progress| {
        info!(
            "[{:>3}%] {}",
            progress.percent(),
            progress.operation.label()
        );
    })
    .with_context(|| format!("Cleaning {:?}", args.input))?;

    if args.json {
        let document = serde_json::json!({
            "input": outcome.input,
            "backup": outcome.backup_path,
            "cleaned": outcome.cleaned_path,
            "statistics": outcome.statistics,
        });
        let rendered =
            serde_json::to_string_pretty(&document).context("Rendering statistics JSON")?;
        println!("{rendered}");
    } else {
        print!("{}", report::render_report(&outcome));
    }
    Ok(())
}

fn handle_preview(args: &PreviewArgs) -> Result<()> {
    let table = loader::load_table(&args.input)
        .with_context(|| format!("Loading {:?}", args.input))?;
    let rows = table.display_rows(args.rows);
    table::print_table(table.headers(), &rows);
    info!(
        "Displayed {} of {} row(s) from {:?}",
        rows.len(),
        table.row_count(),
        args.input
    );
    Ok(())
}

fn handle_settings(args: &SettingsArgs) -> Result<()> {
    let settings = Settings::new(args.theme, args.operations.selection());
    settings
        .save(&args.output)
        .with_context(|| format!("Writing settings to {:?}", args.output))?;
    info!(
        "Saved {} enabled operation(s) and theme '{}' to {:?}",
        settings.operations.enabled().len(),
        settings.theme.display_name(),
        args.output
    );
    Ok(())
}
