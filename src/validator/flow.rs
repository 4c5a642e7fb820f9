//! Journal bookkeeping at the start and end of each quest flow.

use crate::graph::{Adjacency, collect_backward, find_first_forward};
use crate::quest::{NodeType, Quest, QuestNode};
use crate::report::ValidationIssue;

const JOURNAL_ENTRY: &str = "JournalEntry";
const QUEST_STAGE_DESCRIPTION: &str = "QuestStageDescription";

fn is_actions(node: &QuestNode) -> bool {
    node.node_type() == NodeType::Actions
}

/// The first `Actions` node reached from each entry point must open a journal
/// entry and describe the quest stage.
pub fn check_flow_start(quest: &Quest, adjacency: &Adjacency<'_>) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    for entry in quest.entry_points() {
        let Some(first) = find_first_forward(adjacency, entry.id, is_actions) else {
            issues.push(ValidationIssue::node(
                entry.id,
                "EntryPoint flow has no Actions node",
            ));
            continue;
        };
        if !first.has_action(JOURNAL_ENTRY) {
            issues.push(ValidationIssue::node(
                first.id,
                "first Actions node in flow must have JournalEntry action",
            ));
        }
        if !first.has_action(QUEST_STAGE_DESCRIPTION) {
            issues.push(ValidationIssue::node(
                first.id,
                "first Actions node in flow must have QuestStageDescription action",
            ));
        }
    }
    issues
}

/// Every terminal node, together with the unbroken run of `Actions` nodes
/// leading into it, must write a journal entry.
pub fn check_flow_end(quest: &Quest, adjacency: &Adjacency<'_>) -> Vec<ValidationIssue> {
    quest
        .quest_nodes
        .iter()
        .filter(|node| node.is_terminal())
        .filter(|node| {
            !collect_backward(adjacency, node, is_actions)
                .iter()
                .any(|link| link.has_action(JOURNAL_ENTRY))
        })
        .map(|node| {
            ValidationIssue::node(
                node.id,
                "terminal Actions chain must contain a JournalEntry action",
            )
        })
        .collect()
}
