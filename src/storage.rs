use crate::chore::Chore;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// On-disk chores document: `{ "chores": [...] }` or `[[chores]]`
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ChoreList {
    #[serde(default)]
    pub chores: Vec<Chore>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Toml,
}

pub struct Storage {
    file_path: PathBuf,
}

impl Storage {
    pub fn new(file_path: impl AsRef<Path>) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
        }
    }

    /// `.json` files are JSON, everything else is TOML
    fn format(&self) -> Format {
        match self.file_path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Format::Json,
            _ => Format::Toml,
        }
    }

    pub fn load(&self) -> Result<Vec<Chore>> {
        if !self.file_path.exists() {
            tracing::debug!(path = %self.file_path.display(), "chores file does not exist; starting empty");
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.file_path)
            .with_context(|| format!("Failed to read {}", self.file_path.display()))?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let list: ChoreList = match self.format() {
            Format::Json => serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse {}", self.file_path.display()))?,
            Format::Toml => {
                let table: toml::Table = toml::from_str(&content)
                    .with_context(|| format!("Failed to parse {}", self.file_path.display()))?;
                // Schedule fields go through the JSON boundary, so convert the
                // document (including TOML datetimes) to JSON first
                serde_json::from_value(toml_to_json(toml::Value::Table(table)))
                    .with_context(|| format!("Invalid chores in {}", self.file_path.display()))?
            }
        };
        tracing::debug!(count = list.chores.len(), "loaded chores");
        Ok(list.chores)
    }

    pub fn save(&self, chores: &[Chore]) -> Result<()> {
        let list = ChoreList {
            chores: chores.to_vec(),
        };
        let content = match self.format() {
            Format::Json => serde_json::to_string_pretty(&list)?,
            Format::Toml => toml::to_string_pretty(&list)?,
        };
        fs::write(&self.file_path, content)
            .with_context(|| format!("Failed to write {}", self.file_path.display()))?;
        Ok(())
    }
}

fn toml_to_json(value: toml::Value) -> serde_json::Value {
    use serde_json::Value;

    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::from(i),
        toml::Value::Float(f) => serde_json::Number::from_f64(f).map_or(Value::Null, Value::Number),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(key, value)| (key, toml_to_json(value)))
                .collect(),
        ),
    }
}
