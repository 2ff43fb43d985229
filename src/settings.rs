//! Persisted cleaning preferences.
//!
//! The document is a flat JSON object: one boolean per operation identifier
//! plus a `theme` name. Files written by older releases nest the flags under
//! `cleaning_options`; both layouts load. Missing or mistyped fields fall back
//! to their defaults instead of failing the load.

use std::{
    fmt,
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
    str::FromStr,
};

use anyhow::{Context, Result, anyhow};
use log::warn;
use serde::Serialize;
use serde_json::{Map, Value as JsonValue};

use crate::selection::{Operation, OperationSelection};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    ProfessionalLight,
    ProfessionalDark,
    ModernBlue,
}

impl Theme {
    pub const ALL: [Theme; 3] = [
        Theme::ProfessionalLight,
        Theme::ProfessionalDark,
        Theme::ModernBlue,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Theme::ProfessionalLight => "professional_light",
            Theme::ProfessionalDark => "professional_dark",
            Theme::ModernBlue => "modern_blue",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Theme::ProfessionalLight => "Professional Light",
            Theme::ProfessionalDark => "Professional Dark",
            Theme::ModernBlue => "Modern Blue",
        }
    }
}

impl FromStr for Theme {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        Theme::ALL
            .into_iter()
            .find(|theme| theme.id() == value.trim())
            .ok_or_else(|| anyhow!("Unknown theme '{value}'"))
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Settings {
    pub theme: Theme,
    #[serde(flatten)]
    pub operations: OperationSelection,
}

impl Settings {
    pub fn new(theme: Theme, operations: OperationSelection) -> Self {
        Self { theme, operations }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let file =
            File::create(path).with_context(|| format!("Creating settings file {path:?}"))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self).context("Writing settings JSON")?;
        writer.write_all(b"\n")?;
        writer.flush().context("Flushing settings file")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("Opening settings file {path:?}"))?;
        let document: JsonValue = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Parsing settings JSON from {path:?}"))?;
        Self::from_json(&document)
    }

    /// Validates a parsed settings document, defaulting what is missing or invalid.
    pub fn from_json(document: &JsonValue) -> Result<Self> {
        let root = document
            .as_object()
            .ok_or_else(|| anyhow!("Settings document must be a JSON object"))?;

        let theme = match root.get("theme") {
            None => Theme::default(),
            Some(JsonValue::String(name)) => name.parse().unwrap_or_else(|_| {
                warn!("Unknown theme '{name}' in settings; using {}", Theme::default());
                Theme::default()
            }),
            Some(other) => {
                warn!("Ignoring non-string theme value {other}");
                Theme::default()
            }
        };

        let mut operations = OperationSelection::none();
        apply_flags(root, &mut operations);
        if let Some(nested) = root.get("cleaning_options").and_then(JsonValue::as_object) {
            apply_flags(nested, &mut operations);
        }

        Ok(Self { theme, operations })
    }
}

fn apply_flags(source: &Map<String, JsonValue>, operations: &mut OperationSelection) {
    for op in Operation::ALL {
        match source.get(op.id()) {
            None => {}
            Some(JsonValue::Bool(enabled)) => operations.set(op, *enabled),
            Some(other) => warn!("Ignoring non-boolean value {other} for '{}'", op.id()),
        }
    }
}
