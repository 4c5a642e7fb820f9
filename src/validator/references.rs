use crate::catalog::{CatalogKind, ReferenceLookup};
use crate::quest::{EntityRef, Quest, QuestNode};
use crate::report::ValidationIssue;

/// Resolves every entity ID a quest mentions against the reference catalog.
///
/// `player_speaker` is accepted as a speaker without a catalog entry.
pub fn check_references(
    quest: &Quest,
    catalog: &dyn ReferenceLookup,
    player_speaker: &str,
) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    for node in &quest.quest_nodes {
        check_speakers(node, catalog, player_speaker, &mut issues);
        check_payloads(node, catalog, &mut issues);
        check_quest_progressors(node, catalog, &mut issues);
    }
    issues
}

fn is_character(catalog: &dyn ReferenceLookup, id: &str) -> bool {
    catalog.contains(CatalogKind::Character, id)
}

fn check_speakers(
    node: &QuestNode,
    catalog: &dyn ReferenceLookup,
    player_speaker: &str,
    issues: &mut Vec<ValidationIssue>,
) {
    if let Some(partner) = &node.conversation_partner {
        if !is_character(catalog, partner) {
            issues.push(ValidationIssue::node(
                node.id,
                format!("unknown conversation partner: {partner}"),
            ));
        }
    }
    if let Some(speaker) = &node.speaker {
        if speaker != player_speaker && !is_character(catalog, speaker) {
            issues.push(ValidationIssue::node(
                node.id,
                format!("unknown speaker: {speaker}"),
            ));
        }
    }
    for message in &node.messages {
        if message.speaker != player_speaker && !is_character(catalog, &message.speaker) {
            issues.push(ValidationIssue::node(
                node.id,
                format!("unknown speaker in message: {}", message.speaker),
            ));
        }
    }
}

fn check_payloads(node: &QuestNode, catalog: &dyn ReferenceLookup, issues: &mut Vec<ValidationIssue>) {
    let option_conditions = node
        .kind
        .options()
        .iter()
        .flat_map(|option| option.conditions.iter());
    let condition_refs = node
        .conditions
        .iter()
        .chain(option_conditions)
        .flat_map(|condition| condition.entity_refs());
    let action_refs = node.actions.iter().flat_map(|action| action.entity_refs());

    for EntityRef { kind, id, context } in condition_refs.chain(action_refs) {
        if !catalog.contains(kind, id) {
            issues.push(ValidationIssue::node(
                node.id,
                format!("unknown {} in {}: {}", kind.label(), context, id),
            ));
        }
    }
}

fn check_quest_progressors(
    node: &QuestNode,
    catalog: &dyn ReferenceLookup,
    issues: &mut Vec<ValidationIssue>,
) {
    for (index, progressor) in node.quest_progressors.iter().enumerate() {
        if progressor.is_empty() {
            issues.push(ValidationIssue::node(
                node.id,
                format!("quest progressor {} is empty", index + 1),
            ));
        } else if !is_character(catalog, progressor) {
            issues.push(ValidationIssue::node(
                node.id,
                format!("unknown quest progressor: {progressor}"),
            ));
        }
    }
}
