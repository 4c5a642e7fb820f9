//! Filesystem loading of quest documents and reference catalogs.
//!
//! This is the only part of the crate that performs I/O. Quest documents that
//! fail to parse are collected as [`LoadFailure`]s next to the documents that
//! did parse; only an inaccessible source directory is fatal.

use crate::error::{LoadError, QuestParseError};
use crate::quest::Quest;
use serde::{Serialize, Serializer};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

pub mod catalog;

pub use catalog::load_catalog;

/// On-disk encodings a quest document may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Yaml,
    Json,
}

impl DocumentFormat {
    /// Picks the format from a file extension; other files are not quest documents.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "yaml" | "yml" => Some(DocumentFormat::Yaml),
            "json" => Some(DocumentFormat::Json),
            _ => None,
        }
    }
}

/// A quest document that could not be loaded.
#[derive(Debug, Clone, Serialize)]
pub struct LoadFailure {
    pub path: PathBuf,
    #[serde(serialize_with = "serialize_display")]
    pub error: QuestParseError,
}

impl fmt::Display for LoadFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to load {}: {}", self.path.display(), self.error)
    }
}

fn serialize_display<T: fmt::Display, S: Serializer>(
    value: &T,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

/// The result of scanning a quest directory.
#[derive(Debug, Clone, Default)]
pub struct LoadedQuests {
    pub quests: Vec<Quest>,
    pub failures: Vec<LoadFailure>,
}

/// Parses a single quest document from a string.
pub fn parse_quest(content: &str, format: DocumentFormat) -> Result<Quest, QuestParseError> {
    let quest: Quest = match format {
        DocumentFormat::Yaml => serde_yaml::from_str(content)?,
        DocumentFormat::Json => serde_json::from_str(content)?,
    };
    Ok(quest)
}

/// Reads and parses one quest file, choosing the format by extension.
pub fn load_quest_file(path: &Path) -> Result<Quest, QuestParseError> {
    let format = DocumentFormat::from_path(path).unwrap_or(DocumentFormat::Yaml);
    let content = fs::read_to_string(path).map_err(|e| QuestParseError::Io(e.to_string()))?;
    parse_quest(&content, format)
}

/// Recursively loads every `.yaml`, `.yml` and `.json` file below `root`.
///
/// Files are visited in sorted path order so that repeated runs produce the
/// same document order.
pub fn load_quests(root: impl AsRef<Path>) -> Result<LoadedQuests, LoadError> {
    let root = root.as_ref();
    ensure_directory(root).map_err(|message| LoadError::SourceUnavailable {
        path: root.display().to_string(),
        message,
    })?;

    info!("Loading quests from {}", root.display());
    let mut loaded = LoadedQuests::default();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let path = e.path().unwrap_or(root).to_path_buf();
                warn!("Failed to walk {}: {}", path.display(), e);
                loaded.failures.push(LoadFailure {
                    path,
                    error: QuestParseError::Io(e.to_string()),
                });
                continue;
            }
        };
        if !entry.file_type().is_file() || DocumentFormat::from_path(entry.path()).is_none() {
            continue;
        }

        match load_quest_file(entry.path()) {
            Ok(quest) => {
                debug!(
                    "Loaded quest '{}' ({} nodes) from {}",
                    quest.id,
                    quest.quest_nodes.len(),
                    entry.path().display()
                );
                loaded.quests.push(quest);
            }
            Err(error) => {
                warn!("Failed to load {}: {}", entry.path().display(), error);
                loaded.failures.push(LoadFailure {
                    path: entry.path().to_path_buf(),
                    error,
                });
            }
        }
    }

    info!(
        "Loaded {} quests ({} load failures)",
        loaded.quests.len(),
        loaded.failures.len()
    );
    Ok(loaded)
}

pub(crate) fn ensure_directory(path: &Path) -> Result<(), String> {
    let metadata = fs::metadata(path).map_err(|e| e.to_string())?;
    if metadata.is_dir() {
        Ok(())
    } else {
        Err("not a directory".to_string())
    }
}
