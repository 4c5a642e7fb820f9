use crate::loader::LoadFailure;
use crate::quest::NodeId;
use serde::{Deserialize, Serialize};

pub mod formatter;

pub use formatter::ReportFormatter;

/// A single rule violation.
///
/// `quest_id` is only set once an issue leaves the single-document validator,
/// either because it was attached to its quest for a repository report or
/// because a cross-document rule raised it against a specific quest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValidationIssue {
    #[serde(rename = "questId", default, skip_serializing_if = "Option::is_none")]
    pub quest_id: Option<String>,
    #[serde(rename = "nodeId", default, skip_serializing_if = "Option::is_none")]
    pub node_id: Option<NodeId>,
    pub message: String,
}

impl ValidationIssue {
    /// An issue about one specific node.
    pub fn node(node_id: NodeId, message: impl Into<String>) -> Self {
        Self {
            quest_id: None,
            node_id: Some(node_id),
            message: message.into(),
        }
    }

    /// An issue about the document as a whole, or about the repository.
    pub fn global(message: impl Into<String>) -> Self {
        Self {
            quest_id: None,
            node_id: None,
            message: message.into(),
        }
    }

    /// Attaches the owning quest, keeping an owner that is already set.
    pub fn in_quest(mut self, quest_id: &str) -> Self {
        if self.quest_id.is_none() {
            self.quest_id = Some(quest_id.to_string());
        }
        self
    }
}

/// The outcome of validating one quest document.
///
/// Serializes as `{"valid": bool, "errors": [{"nodeId"?, "message"}]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    #[serde(rename = "errors", default)]
    pub issues: Vec<ValidationIssue>,
}

impl ValidationResult {
    pub fn from_issues(issues: Vec<ValidationIssue>) -> Self {
        Self {
            valid: issues.is_empty(),
            issues,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Whether any issue carries exactly this message.
    pub fn has_message(&self, message: &str) -> bool {
        self.issues.iter().any(|issue| issue.message == message)
    }
}

/// Everything a repository-wide run produced.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    /// Number of documents that parsed and were validated.
    pub quests_checked: usize,
    /// Documents that could not be parsed. They took no part in validation.
    pub load_failures: Vec<LoadFailure>,
    /// Single-document issues first, in document order, then cross-document issues.
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn total_problems(&self) -> usize {
        self.load_failures.len() + self.issues.len()
    }

    pub fn is_clean(&self) -> bool {
        self.total_problems() == 0
    }

    /// `0` for a clean run, `1` if any issue or load failure was found.
    pub fn exit_code(&self) -> u8 {
        if self.is_clean() { 0 } else { 1 }
    }
}
