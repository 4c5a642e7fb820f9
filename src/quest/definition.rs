use super::payload::{Action, Condition, lenient_string};
use super::wire::RawQuestNode;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Identifier of a node, unique within one quest.
pub type NodeId = i64;

/// The locales every localized string is authored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Locale {
    EnUs,
    DeDe,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::EnUs, Locale::DeDe];

    pub fn tag(self) -> &'static str {
        match self {
            Locale::EnUs => "en-US",
            Locale::DeDe => "de-DE",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A string with one translation per supported locale.
///
/// A translation that is not a string reads as missing. Locales outside
/// `Locale::ALL` are carried in `extra` untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    #[serde(
        rename = "en-US",
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "String::is_empty"
    )]
    pub en_us: String,
    #[serde(
        rename = "de-DE",
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "String::is_empty"
    )]
    pub de_de: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LocalizedText {
    pub fn new(en_us: impl Into<String>, de_de: impl Into<String>) -> Self {
        Self {
            en_us: en_us.into(),
            de_de: de_de.into(),
            extra: Map::new(),
        }
    }

    pub fn get(&self, locale: Locale) -> &str {
        match locale {
            Locale::EnUs => &self.en_us,
            Locale::DeDe => &self.de_de,
        }
    }

    /// Yields the non-empty translations, in `Locale::ALL` order.
    pub fn entries(&self) -> impl Iterator<Item = (Locale, &str)> {
        Locale::ALL
            .into_iter()
            .map(move |locale| (locale, self.get(locale)))
            .filter(|(_, text)| !text.is_empty())
    }
}

/// A complete quest document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Quest {
    #[serde(default)]
    pub quest_type_version: i64,
    #[serde(default)]
    pub quest_version: i64,
    #[serde(rename = "QuestID", default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub quest_type: String,
    #[serde(default)]
    pub display_name: LocalizedText,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub repeatable: String,
    #[serde(default)]
    pub quest_nodes: Vec<QuestNode>,
}

impl Quest {
    pub fn new(id: impl Into<String>, quest_nodes: Vec<QuestNode>) -> Self {
        Self {
            id: id.into(),
            quest_nodes,
            ..Self::default()
        }
    }

    /// Nodes whose variant is `EntryPoint`, in document order.
    pub fn entry_points(&self) -> impl Iterator<Item = &QuestNode> {
        self.quest_nodes
            .iter()
            .filter(|node| node.node_type() == NodeType::EntryPoint)
    }
}

/// The closed set of node variants, without their payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    EntryPoint,
    Actions,
    Dialog,
    Decision,
    ConditionBranch,
    QuestProgress,
}

impl NodeType {
    /// Resolves a `NodeType` string as written by the editor.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "EntryPoint" => Some(NodeType::EntryPoint),
            "Actions" => Some(NodeType::Actions),
            "Dialog" => Some(NodeType::Dialog),
            "Decision" | "PlayerDecisionDialog" => Some(NodeType::Decision),
            "ConditionBranch" => Some(NodeType::ConditionBranch),
            "QuestProgress" => Some(NodeType::QuestProgress),
            _ => None,
        }
    }

    /// The name written back into documents.
    pub fn wire_name(self) -> &'static str {
        match self {
            NodeType::Decision => "PlayerDecisionDialog",
            other => other.label(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            NodeType::EntryPoint => "EntryPoint",
            NodeType::Actions => "Actions",
            NodeType::Dialog => "Dialog",
            NodeType::Decision => "Decision",
            NodeType::ConditionBranch => "ConditionBranch",
            NodeType::QuestProgress => "QuestProgress",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Names one edge-bearing field of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeField {
    NextNodes,
    NextNodesIfTrue,
    NextNodesIfFalse,
    /// Zero-based option index.
    Option(usize),
}

impl fmt::Display for EdgeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeField::NextNodes => f.write_str("NextNodes"),
            EdgeField::NextNodesIfTrue => f.write_str("NextNodesIfTrue"),
            EdgeField::NextNodesIfFalse => f.write_str("NextNodesIfFalse"),
            EdgeField::Option(index) => write!(f, "option {} NextNodes", index + 1),
        }
    }
}

/// A node variant together with the edge fields that are legal for it.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    EntryPoint { next_nodes: Vec<NodeId> },
    Actions { next_nodes: Vec<NodeId> },
    Dialog { next_nodes: Vec<NodeId> },
    Decision { options: Vec<DialogOption> },
    ConditionBranch {
        if_true: Vec<NodeId>,
        if_false: Vec<NodeId>,
    },
    QuestProgress { next_nodes: Vec<NodeId> },
}

impl NodeKind {
    pub fn node_type(&self) -> NodeType {
        match self {
            NodeKind::EntryPoint { .. } => NodeType::EntryPoint,
            NodeKind::Actions { .. } => NodeType::Actions,
            NodeKind::Dialog { .. } => NodeType::Dialog,
            NodeKind::Decision { .. } => NodeType::Decision,
            NodeKind::ConditionBranch { .. } => NodeType::ConditionBranch,
            NodeKind::QuestProgress { .. } => NodeType::QuestProgress,
        }
    }

    /// The flat `NextNodes` list, for variants that route through one.
    pub fn next_nodes(&self) -> Option<&[NodeId]> {
        match self {
            NodeKind::EntryPoint { next_nodes }
            | NodeKind::Actions { next_nodes }
            | NodeKind::Dialog { next_nodes }
            | NodeKind::QuestProgress { next_nodes } => Some(next_nodes),
            NodeKind::Decision { .. } | NodeKind::ConditionBranch { .. } => None,
        }
    }

    /// Every edge-bearing field of this variant, in document order.
    pub fn edge_fields(&self) -> Vec<(EdgeField, &[NodeId])> {
        match self {
            NodeKind::EntryPoint { next_nodes }
            | NodeKind::Actions { next_nodes }
            | NodeKind::Dialog { next_nodes }
            | NodeKind::QuestProgress { next_nodes } => {
                vec![(EdgeField::NextNodes, next_nodes.as_slice())]
            }
            NodeKind::ConditionBranch { if_true, if_false } => vec![
                (EdgeField::NextNodesIfTrue, if_true.as_slice()),
                (EdgeField::NextNodesIfFalse, if_false.as_slice()),
            ],
            NodeKind::Decision { options } => options
                .iter()
                .enumerate()
                .map(|(index, option)| (EdgeField::Option(index), option.next_nodes.as_slice()))
                .collect(),
        }
    }

    pub fn options(&self) -> &[DialogOption] {
        match self {
            NodeKind::Decision { options } => options,
            _ => &[],
        }
    }
}

/// Edge fields found on a node whose variant does not route through them.
///
/// They are kept so the document re-serializes unchanged and so the shape
/// checks can report them. Their targets are checked like any other edge,
/// but they never take part in the edge graph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MisplacedEdges {
    pub next_nodes: Vec<NodeId>,
    pub next_nodes_if_true: Vec<NodeId>,
    pub next_nodes_if_false: Vec<NodeId>,
    pub options: Vec<DialogOption>,
}

impl MisplacedEdges {
    pub fn is_empty(&self) -> bool {
        self.next_nodes.is_empty()
            && self.next_nodes_if_true.is_empty()
            && self.next_nodes_if_false.is_empty()
            && self.options.is_empty()
    }

    /// Every misplaced edge list, in document order.
    pub fn edge_fields(&self) -> Vec<(EdgeField, &[NodeId])> {
        [
            (EdgeField::NextNodes, self.next_nodes.as_slice()),
            (EdgeField::NextNodesIfTrue, self.next_nodes_if_true.as_slice()),
            (EdgeField::NextNodesIfFalse, self.next_nodes_if_false.as_slice()),
        ]
        .into_iter()
        .chain(
            self.options
                .iter()
                .enumerate()
                .map(|(index, option)| (EdgeField::Option(index), option.next_nodes.as_slice())),
        )
        .filter(|(_, targets)| !targets.is_empty())
        .collect()
    }

    /// Names of the populated fields, in document order.
    pub fn populated_fields(&self) -> Vec<&'static str> {
        [
            ("NextNodes", !self.next_nodes.is_empty()),
            ("NextNodesIfTrue", !self.next_nodes_if_true.is_empty()),
            ("NextNodesIfFalse", !self.next_nodes_if_false.is_empty()),
            ("Options", !self.options.is_empty()),
        ]
        .into_iter()
        .filter_map(|(name, populated)| populated.then_some(name))
        .collect()
    }
}

/// A node in the quest flow graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawQuestNode", into = "RawQuestNode")]
pub struct QuestNode {
    pub id: NodeId,
    pub kind: NodeKind,
    pub conditions: Vec<Condition>,
    pub conditions_required: Option<String>,
    pub conversation_partner: Option<String>,
    pub speaker: Option<String>,
    pub text: Option<LocalizedText>,
    pub messages: Vec<DialogMessage>,
    pub actions: Vec<Action>,
    pub quest_progressors: Vec<String>,
    pub misplaced: MisplacedEdges,
}

impl QuestNode {
    pub fn new(id: NodeId, kind: NodeKind) -> Self {
        Self {
            id,
            kind,
            conditions: vec![],
            conditions_required: None,
            conversation_partner: None,
            speaker: None,
            text: None,
            messages: vec![],
            actions: vec![],
            quest_progressors: vec![],
            misplaced: MisplacedEdges::default(),
        }
    }

    pub fn node_type(&self) -> NodeType {
        self.kind.node_type()
    }

    pub fn is_entry_point(&self) -> bool {
        self.node_type() == NodeType::EntryPoint
    }

    /// Number of terminal shorthand actions on this node.
    pub fn terminal_action_count(&self) -> usize {
        self.actions
            .iter()
            .flat_map(Action::parts)
            .filter(|action| action.terminal().is_some())
            .count()
    }

    /// Whether this is an `Actions` node that ends its flow.
    pub fn is_terminal(&self) -> bool {
        self.node_type() == NodeType::Actions && self.terminal_action_count() > 0
    }

    /// Whether any action on this node carries the given discriminator.
    pub fn has_action(&self, discriminator: &str) -> bool {
        self.actions
            .iter()
            .flat_map(Action::parts)
            .any(|action| action.discriminator() == Some(discriminator))
    }
}

/// A player-facing choice on a decision node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DialogOption {
    #[serde(default)]
    pub text: LocalizedText,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub next_nodes: Vec<NodeId>,
}

impl DialogOption {
    pub fn leading_to(next_nodes: Vec<NodeId>) -> Self {
        Self {
            next_nodes,
            ..Self::default()
        }
    }
}

/// One line in a dialog sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DialogMessage {
    #[serde(default)]
    pub speaker: String,
    #[serde(default)]
    pub text: LocalizedText,
}
