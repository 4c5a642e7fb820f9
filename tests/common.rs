//! Common test utilities for building quest documents and validators.
use questcheck::prelude::*;
use serde_json::json;

#[allow(dead_code)]
pub fn entry(id: NodeId, next: &[NodeId]) -> QuestNode {
    QuestNode::new(
        id,
        NodeKind::EntryPoint {
            next_nodes: next.to_vec(),
        },
    )
}

#[allow(dead_code)]
pub fn actions(id: NodeId, next: &[NodeId], effects: Vec<Action>) -> QuestNode {
    let mut node = QuestNode::new(
        id,
        NodeKind::Actions {
            next_nodes: next.to_vec(),
        },
    );
    node.actions = effects;
    node
}

#[allow(dead_code)]
pub fn dialog(id: NodeId, next: &[NodeId]) -> QuestNode {
    QuestNode::new(
        id,
        NodeKind::Dialog {
            next_nodes: next.to_vec(),
        },
    )
}

#[allow(dead_code)]
pub fn progress(id: NodeId, next: &[NodeId]) -> QuestNode {
    QuestNode::new(
        id,
        NodeKind::QuestProgress {
            next_nodes: next.to_vec(),
        },
    )
}

/// A decision node with one option per target list.
#[allow(dead_code)]
pub fn decision(id: NodeId, options: &[&[NodeId]]) -> QuestNode {
    QuestNode::new(
        id,
        NodeKind::Decision {
            options: options
                .iter()
                .map(|targets| DialogOption::leading_to(targets.to_vec()))
                .collect(),
        },
    )
}

#[allow(dead_code)]
pub fn branch(
    id: NodeId,
    conditions: Vec<Condition>,
    if_true: &[NodeId],
    if_false: &[NodeId],
) -> QuestNode {
    let mut node = QuestNode::new(
        id,
        NodeKind::ConditionBranch {
            if_true: if_true.to_vec(),
            if_false: if_false.to_vec(),
        },
    );
    node.conditions = conditions;
    node
}

#[allow(dead_code)]
pub fn complete() -> Action {
    Action::Terminal(TerminalAction::CompleteQuest)
}

#[allow(dead_code)]
pub fn fail() -> Action {
    Action::Terminal(TerminalAction::FailQuest)
}

#[allow(dead_code)]
pub fn journal() -> Action {
    Action::JournalEntry(json!({ "en-US": "Entry", "de-DE": "Eintrag" }))
}

#[allow(dead_code)]
pub fn stage(en_us: &str, de_de: &str) -> Action {
    Action::QuestStageDescription(LocalizedText::new(en_us, de_de))
}

/// A condition that references nothing in the catalog.
#[allow(dead_code)]
pub fn opaque_condition() -> Condition {
    Condition::Opaque(json!({ "PlayerLevel": 3 }))
}

#[allow(dead_code)]
pub fn quest_completed(quest_id: &str) -> Condition {
    Condition::QuestCompleted(quest_id.to_string())
}

#[allow(dead_code)]
pub fn quest(id: &str, nodes: Vec<QuestNode>) -> Quest {
    Quest::new(id, nodes)
}

/// `EntryPoint(0) -> Actions(1)` where node 1 opens the journal, describes
/// the stage and completes the quest. Valid under every rule.
#[allow(dead_code)]
pub fn minimal_valid_quest(id: &str) -> Quest {
    quest(
        id,
        vec![
            entry(0, &[1]),
            actions(
                1,
                &[],
                vec![journal(), stage(&format!("{id} stage"), &format!("{id} Etappe")), complete()],
            ),
        ],
    )
}

/// A validator over an empty catalog with flow bookkeeping disabled, so only
/// the structural rules apply.
#[allow(dead_code)]
pub fn structural_validator() -> Validator {
    Validator::builder(ReferenceCatalog::new())
        .with_flow_bookkeeping(false)
        .build()
}

#[allow(dead_code)]
pub fn full_validator(catalog: ReferenceCatalog) -> Validator {
    Validator::builder(catalog).build()
}

#[allow(dead_code)]
pub fn messages(issues: &[ValidationIssue]) -> Vec<&str> {
    issues.iter().map(|issue| issue.message.as_str()).collect()
}

#[allow(dead_code)]
pub fn issues_for(issues: &[ValidationIssue], node_id: NodeId) -> Vec<&str> {
    issues
        .iter()
        .filter(|issue| issue.node_id == Some(node_id))
        .map(|issue| issue.message.as_str())
        .collect()
}
