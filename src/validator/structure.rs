//! Shape and graph checks that need nothing but the document itself.

use crate::graph::Adjacency;
use crate::quest::{NodeId, NodeKind, NodeType, Quest, QuestNode};
use crate::report::ValidationIssue;
use ahash::AHashSet;
use regex::Regex;
use std::sync::LazyLock;

pub const MAX_QUEST_ID_LENGTH: usize = 100;

static QUEST_ID_PATTERN: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^[A-Z][A-Za-z0-9.\-_:]*$"));

fn matches_quest_id_pattern(id: &str) -> bool {
    QUEST_ID_PATTERN
        .as_ref()
        .map(|re| re.is_match(id))
        .unwrap_or(false)
}

pub fn check_quest_id(quest: &Quest) -> Vec<ValidationIssue> {
    let id = quest.id.as_str();
    let message = if id.is_empty() {
        "quest ID cannot be empty".to_string()
    } else if id.chars().count() > MAX_QUEST_ID_LENGTH {
        format!("quest ID exceeds maximum length of {MAX_QUEST_ID_LENGTH} characters")
    } else if !matches_quest_id_pattern(id) {
        "quest ID must start with uppercase letter, followed by alphanumeric, dots, hyphens, underscores, or colons".to_string()
    } else {
        return vec![];
    };
    vec![ValidationIssue::global(message)]
}

/// Flags every repeated occurrence of a NodeID. The first occurrence is kept.
pub fn check_unique_node_ids(quest: &Quest) -> Vec<ValidationIssue> {
    let mut seen = AHashSet::new();
    quest
        .quest_nodes
        .iter()
        .filter(|node| !seen.insert(node.id))
        .map(|node| ValidationIssue::node(node.id, "duplicate NodeID"))
        .collect()
}

/// Checks every edge field of every node on its own: missing targets, self
/// references and repeated targets within the field. Fields the node type
/// does not route through are checked too.
pub fn check_edges(quest: &Quest, adjacency: &Adjacency<'_>) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    for node in &quest.quest_nodes {
        let fields = node
            .kind
            .edge_fields()
            .into_iter()
            .chain(node.misplaced.edge_fields());
        for (field, targets) in fields {
            let mut seen = AHashSet::new();
            for &target in targets {
                if !adjacency.contains(target) {
                    issues.push(ValidationIssue::node(
                        node.id,
                        format!("{field} references non-existent NodeID {target}"),
                    ));
                }
                if target == node.id {
                    issues.push(ValidationIssue::node(
                        node.id,
                        format!("node references itself in {field}"),
                    ));
                }
                if !seen.insert(target) {
                    issues.push(ValidationIssue::node(
                        node.id,
                        format!("duplicate edge to NodeID {target} in {field}"),
                    ));
                }
            }
        }
    }
    issues
}

pub fn check_incoming_edges(quest: &Quest) -> Vec<ValidationIssue> {
    let has_incoming: AHashSet<NodeId> = quest
        .quest_nodes
        .iter()
        .flat_map(|node| node.kind.edge_fields())
        .flat_map(|(_, targets)| targets.iter().copied())
        .collect();

    quest
        .quest_nodes
        .iter()
        .filter(|node| !node.is_entry_point() && !has_incoming.contains(&node.id))
        .map(|node| {
            ValidationIssue::node(node.id, "non-EntryPoint node has no incoming connections")
        })
        .collect()
}

pub fn check_entry_points(quest: &Quest) -> Vec<ValidationIssue> {
    if quest.entry_points().next().is_some() {
        vec![]
    } else {
        vec![ValidationIssue::global(
            "quest must have at least one EntryPoint node",
        )]
    }
}

pub fn check_terminal_actions(quest: &Quest) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    for node in &quest.quest_nodes {
        let NodeKind::Actions { next_nodes } = &node.kind else {
            continue;
        };
        let terminal_count = node.terminal_action_count();
        if terminal_count > 1 {
            issues.push(ValidationIssue::node(
                node.id,
                "Actions node has more than one terminal action",
            ));
        }
        if terminal_count >= 1 && !next_nodes.is_empty() {
            issues.push(ValidationIssue::node(
                node.id,
                "terminal action node must not have outgoing edges",
            ));
        }
        if terminal_count == 0 && next_nodes.is_empty() {
            issues.push(ValidationIssue::node(
                node.id,
                "non-terminal Actions node must have outgoing edges (quest flow ends with unspecified behaviour)",
            ));
        }
    }
    issues
}

pub fn check_decisions(quest: &Quest) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    for node in &quest.quest_nodes {
        let NodeKind::Decision { options } = &node.kind else {
            continue;
        };
        if !node.misplaced.next_nodes.is_empty() {
            issues.push(ValidationIssue::node(
                node.id,
                "Decision must not have top-level NextNodes; use NextNodes in each option instead",
            ));
        }
        if options.is_empty() {
            issues.push(ValidationIssue::node(
                node.id,
                "Decision must have at least one option",
            ));
        }
        for (index, option) in options.iter().enumerate() {
            if option.next_nodes.is_empty() {
                issues.push(ValidationIssue::node(
                    node.id,
                    format!("option {} must have NextNodes", index + 1),
                ));
            }
        }
    }
    issues
}

pub fn check_condition_branches(quest: &Quest) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    for node in &quest.quest_nodes {
        let NodeKind::ConditionBranch { if_true, if_false } = &node.kind else {
            continue;
        };
        if !node.misplaced.next_nodes.is_empty() {
            issues.push(ValidationIssue::node(
                node.id,
                "ConditionBranch must not have top-level NextNodes; use NextNodesIfTrue and NextNodesIfFalse instead",
            ));
        }
        if node.conditions.is_empty() {
            issues.push(ValidationIssue::node(
                node.id,
                "ConditionBranch must have at least one condition",
            ));
        }
        if if_true.is_empty() && if_false.is_empty() {
            issues.push(ValidationIssue::node(
                node.id,
                "ConditionBranch must have at least one of NextNodesIfTrue or NextNodesIfFalse",
            ));
        }
    }
    issues
}

/// Reports edge fields the node's variant does not route through.
///
/// Flat `NextNodes` on decisions and condition branches is left to their own
/// shape checks, which phrase it with a hint.
pub fn check_misplaced_edges(quest: &Quest) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    for node in &quest.quest_nodes {
        if node.misplaced.is_empty() {
            continue;
        }
        let node_type = node.node_type();
        for field in node.misplaced.populated_fields() {
            if field == "NextNodes"
                && matches!(node_type, NodeType::Decision | NodeType::ConditionBranch)
            {
                continue;
            }
            issues.push(ValidationIssue::node(
                node.id,
                format!("{node_type} must not have {field}"),
            ));
        }
    }
    issues
}

/// Entry points, dialogs and progress markers must lead somewhere.
pub fn check_dead_ends(quest: &Quest) -> Vec<ValidationIssue> {
    quest
        .quest_nodes
        .iter()
        .filter(|node| is_dead_end(node))
        .map(|node| ValidationIssue::node(node.id, "non-terminal node has no outgoing edges"))
        .collect()
}

fn is_dead_end(node: &QuestNode) -> bool {
    match &node.kind {
        NodeKind::EntryPoint { next_nodes }
        | NodeKind::Dialog { next_nodes }
        | NodeKind::QuestProgress { next_nodes } => next_nodes.is_empty(),
        // Covered by the terminal, decision and branch checks.
        NodeKind::Actions { .. } | NodeKind::Decision { .. } | NodeKind::ConditionBranch { .. } => {
            false
        }
    }
}

pub fn check_acyclic(adjacency: &Adjacency<'_>) -> Vec<ValidationIssue> {
    if adjacency.has_cycle() {
        vec![ValidationIssue::global(
            "quest contains a cycle (loops are not allowed)",
        )]
    } else {
        vec![]
    }
}

pub fn check_unreferenced_nodes(quest: &Quest, adjacency: &Adjacency<'_>) -> Vec<ValidationIssue> {
    let targeted = adjacency.targeted();
    quest
        .quest_nodes
        .iter()
        .filter(|node| !node.is_entry_point() && !targeted.contains(&node.id))
        .map(|node| ValidationIssue::node(node.id, "NodeID is never referenced by any other node"))
        .collect()
}
