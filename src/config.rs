//! Configuration file (`~/.config/todos.toml`)
//!
//! ```toml
//! store_dir = "~/.local/share/todos"
//! notes_col = "notes"
//! todos_col = "todos"
//! line_ending = "preserve"   # or "crlf" / "lf"
//! log_level = "warn"
//! ```
//!
//! Only `store_dir` is required.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::utils::environment::expand_tilde;

const DEFAULT_NOTES_COL: &str = "notes";
const DEFAULT_TODOS_COL: &str = "todos";
const DEFAULT_LOG_LEVEL: &str = "warn";

const CRLF: &str = "\r\n";
const LF: &str = "\n";

/// How lines are joined back together when a note is rewritten
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    /// Keep the document's own convention (CRLF if it already has one, else LF)
    #[default]
    Preserve,
    Crlf,
    Lf,
}

impl LineEnding {
    /// Separator to rejoin `original` with
    pub fn separator_for(self, original: &str) -> &'static str {
        match self {
            LineEnding::Crlf => CRLF,
            LineEnding::Lf => LF,
            LineEnding::Preserve if original.contains(CRLF) => CRLF,
            LineEnding::Preserve => LF,
        }
    }

    /// Whether a final line break of the original survives the rewrite
    pub fn keeps_trailing_break(self) -> bool {
        self == LineEnding::Preserve
    }
}

fn default_notes_col() -> String {
    DEFAULT_NOTES_COL.to_string()
}

fn default_todos_col() -> String {
    DEFAULT_TODOS_COL.to_string()
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Root directory of the document store
    pub store_dir: PathBuf,
    /// Collection holding Markdown notes
    #[serde(default = "default_notes_col")]
    pub notes_col: String,
    /// Collection holding task records
    #[serde(default = "default_todos_col")]
    pub todos_col: String,
    #[serde(default)]
    pub line_ending: LineEnding,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Config {
    /// Config with default collections around a store directory
    pub fn new(store_dir: impl Into<PathBuf>) -> Self {
        Self {
            store_dir: store_dir.into(),
            notes_col: default_notes_col(),
            todos_col: default_todos_col(),
            line_ending: LineEnding::default(),
            log_level: default_log_level(),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config")
    }

    /// Load the config file; `Ok(None)` when it does not exist
    pub fn load(path: &Path) -> Result<Option<Self>> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read config file: {}", path.display()));
            }
        };
        let config = Self::from_toml_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        Ok(Some(config))
    }

    /// Store directory with a leading `~` expanded
    pub fn store_dir(&self) -> PathBuf {
        expand_tilde(&self.store_dir)
    }
}
