use crate::quest::NodeId;
use thiserror::Error;

/// Fatal errors that stop a run before any validation happens.
#[derive(Error, Debug, Clone)]
pub enum LoadError {
    #[error("Quest source '{path}' is not accessible: {message}")]
    SourceUnavailable { path: String, message: String },

    #[error("Reference catalog '{path}' could not be loaded: {message}")]
    CatalogUnreadable { path: String, message: String },
}

/// Errors that can occur while parsing a single quest document.
///
/// These never abort a batch; the loader records them next to the path that
/// produced them and moves on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuestParseError {
    #[error("Failed to read quest file: {0}")]
    Io(String),

    #[error("Failed to parse quest YAML: {0}")]
    Yaml(String),

    #[error("Failed to parse quest JSON: {0}")]
    Json(String),

    #[error("Node {node_id} is invalid: {message}")]
    InvalidNode { node_id: NodeId, message: String },
}

impl From<serde_yaml::Error> for QuestParseError {
    fn from(err: serde_yaml::Error) -> Self {
        QuestParseError::Yaml(err.to_string())
    }
}

impl From<serde_json::Error> for QuestParseError {
    fn from(err: serde_json::Error) -> Self {
        QuestParseError::Json(err.to_string())
    }
}
