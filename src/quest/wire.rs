//! The flat on-disk layout of a quest node.
//!
//! The editor writes every node with the same set of optional fields no matter
//! its `NodeType`. This module maps that layout onto [`NodeKind`] and back.

use super::definition::{
    DialogMessage, DialogOption, LocalizedText, MisplacedEdges, NodeId, NodeKind, NodeType,
    QuestNode,
};
use super::payload::{Action, Condition};
use crate::error::QuestParseError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawQuestNode {
    #[serde(rename = "NodeID")]
    node_id: NodeId,
    node_type: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    next_nodes: Vec<NodeId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    next_nodes_if_true: Vec<NodeId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    next_nodes_if_false: Vec<NodeId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    conditions: Vec<Condition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    conditions_required: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    conversation_partner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    speaker: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<LocalizedText>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    options: Vec<DialogOption>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    messages: Vec<DialogMessage>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    actions: Vec<Action>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    quest_progressors: Vec<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

impl TryFrom<RawQuestNode> for QuestNode {
    type Error = QuestParseError;

    fn try_from(raw: RawQuestNode) -> Result<Self, Self::Error> {
        let node_type =
            NodeType::from_name(&raw.node_type).ok_or_else(|| QuestParseError::InvalidNode {
                node_id: raw.node_id,
                message: format!("unknown NodeType '{}'", raw.node_type),
            })?;

        let mut misplaced = MisplacedEdges::default();
        let kind = match node_type {
            NodeType::Decision => {
                misplaced.next_nodes = raw.next_nodes;
                misplaced.next_nodes_if_true = raw.next_nodes_if_true;
                misplaced.next_nodes_if_false = raw.next_nodes_if_false;
                NodeKind::Decision {
                    options: raw.options,
                }
            }
            NodeType::ConditionBranch => {
                misplaced.next_nodes = raw.next_nodes;
                misplaced.options = raw.options;
                NodeKind::ConditionBranch {
                    if_true: raw.next_nodes_if_true,
                    if_false: raw.next_nodes_if_false,
                }
            }
            flat => {
                misplaced.next_nodes_if_true = raw.next_nodes_if_true;
                misplaced.next_nodes_if_false = raw.next_nodes_if_false;
                misplaced.options = raw.options;
                let next_nodes = raw.next_nodes;
                match flat {
                    NodeType::EntryPoint => NodeKind::EntryPoint { next_nodes },
                    NodeType::Actions => NodeKind::Actions { next_nodes },
                    NodeType::Dialog => NodeKind::Dialog { next_nodes },
                    _ => NodeKind::QuestProgress { next_nodes },
                }
            }
        };

        Ok(QuestNode {
            id: raw.node_id,
            kind,
            conditions: raw.conditions,
            conditions_required: non_empty(raw.conditions_required),
            conversation_partner: non_empty(raw.conversation_partner),
            speaker: non_empty(raw.speaker),
            text: raw.text,
            messages: raw.messages,
            actions: raw.actions,
            quest_progressors: raw.quest_progressors,
            misplaced,
        })
    }
}

impl From<QuestNode> for RawQuestNode {
    fn from(node: QuestNode) -> Self {
        let node_type = node.node_type().wire_name().to_string();
        let MisplacedEdges {
            mut next_nodes,
            mut next_nodes_if_true,
            mut next_nodes_if_false,
            mut options,
        } = node.misplaced;

        match node.kind {
            NodeKind::EntryPoint { next_nodes: edges }
            | NodeKind::Actions { next_nodes: edges }
            | NodeKind::Dialog { next_nodes: edges }
            | NodeKind::QuestProgress { next_nodes: edges } => next_nodes = edges,
            NodeKind::Decision { options: choices } => options = choices,
            NodeKind::ConditionBranch { if_true, if_false } => {
                next_nodes_if_true = if_true;
                next_nodes_if_false = if_false;
            }
        }

        RawQuestNode {
            node_id: node.id,
            node_type,
            next_nodes,
            next_nodes_if_true,
            next_nodes_if_false,
            conditions: node.conditions,
            conditions_required: node.conditions_required,
            conversation_partner: node.conversation_partner,
            speaker: node.speaker,
            text: node.text,
            options,
            messages: node.messages,
            actions: node.actions,
            quest_progressors: node.quest_progressors,
        }
    }
}
