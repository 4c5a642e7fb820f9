//! Tests for the rules that span a whole quest repository.
mod common;
use common::*;
use questcheck::prelude::*;
use questcheck::validator::cross::{check_quest_references, check_unique_stage_descriptions};

fn named(mut quest: Quest, en_us: &str, de_de: &str) -> Quest {
    quest.display_name = LocalizedText::new(en_us, de_de);
    quest
}

#[test]
fn test_duplicate_quest_id_reported_once_with_count() {
    let quests = vec![minimal_valid_quest("Q1"), minimal_valid_quest("Q1")];

    let issues = validate_cross_quest(&quests);
    let duplicates: Vec<&ValidationIssue> = issues
        .iter()
        .filter(|issue| issue.message.starts_with("duplicate QuestID"))
        .collect();
    assert_eq!(duplicates.len(), 1);
    assert_eq!(duplicates[0].message, "duplicate QuestID \"Q1\" found 2 times");
    assert_eq!(duplicates[0].quest_id, None);
}

#[test]
fn test_duplicate_display_names_per_locale() {
    let quests = vec![
        named(minimal_valid_quest("QA"), "The Hammer", "Der Hammer"),
        named(minimal_valid_quest("QB"), "The Hammer", "Ein Hammer"),
        named(minimal_valid_quest("QC"), "The Anvil", "Der Hammer"),
    ];

    let issues = validate_cross_quest(&quests);
    assert_eq!(
        messages(&issues),
        vec![
            "duplicate DisplayName \"The Hammer\" (en-US) in quests: QA, QB",
            "duplicate DisplayName \"Der Hammer\" (de-DE) in quests: QA, QC",
        ]
    );
}

#[test]
fn test_empty_display_names_are_not_duplicates() {
    let quests = vec![minimal_valid_quest("QA"), minimal_valid_quest("QB")];
    assert!(validate_cross_quest(&quests).is_empty());
}

#[test]
fn test_stage_description_shared_across_quests() {
    let shared = |id: &str| {
        quest(
            id,
            vec![
                entry(0, &[1]),
                actions(1, &[], vec![journal(), stage("Go home", "Geh heim"), complete()]),
            ],
        )
    };
    let quests = vec![shared("QA"), shared("QB")];

    assert_eq!(
        messages(&check_unique_stage_descriptions(&quests)),
        vec![
            "duplicate QuestStageDescription \"Go home\" (en-US) in quests: QA, QB",
            "duplicate QuestStageDescription \"Geh heim\" (de-DE) in quests: QA, QB",
        ]
    );
}

#[test]
fn test_stage_description_with_a_missing_locale_still_counts() {
    let described = |id: &str, action: serde_json::Value| {
        quest(
            id,
            vec![
                entry(0, &[1]),
                actions(1, &[], vec![journal(), Action::from(action), complete()]),
            ],
        )
    };
    let quests = vec![
        described(
            "QA",
            serde_json::json!({ "QuestStageDescription": { "en-US": "Go home", "de-DE": null } }),
        ),
        described(
            "QB",
            serde_json::json!({
                "Celebrate": true,
                "QuestStageDescription": { "en-US": "Go home", "de-DE": "Geh heim" }
            }),
        ),
    ];

    assert_eq!(
        messages(&check_unique_stage_descriptions(&quests)),
        vec!["duplicate QuestStageDescription \"Go home\" (en-US) in quests: QA, QB"]
    );
}

#[test]
fn test_stage_description_repeated_within_one_quest_is_allowed() {
    let quest = quest(
        "QA",
        vec![
            entry(0, &[1]),
            actions(1, &[2], vec![journal(), stage("Same", "Gleich")]),
            actions(2, &[], vec![stage("Same", "Gleich"), complete()]),
        ],
    );

    assert!(check_unique_stage_descriptions(&[quest]).is_empty());
}

#[test]
fn test_quest_completed_must_name_existing_quest() {
    let mut gate = branch(1, vec![quest_completed("QB"), quest_completed("QMissing")], &[2], &[]);
    gate.conditions.push(quest_completed(""));
    let mut choice = decision(3, &[&[2]]);
    if let NodeKind::Decision { options } = &mut choice.kind {
        options[0].conditions = vec![quest_completed("QGone")];
    }
    let qa = quest(
        "QA",
        vec![entry(0, &[1]), gate, actions(2, &[], vec![complete()]), choice],
    );
    let quests = vec![qa, minimal_valid_quest("QB")];

    let issues = check_quest_references(&quests);
    assert_eq!(issues.len(), 2);
    assert_eq!(issues[0].quest_id.as_deref(), Some("QA"));
    assert_eq!(issues[0].node_id, Some(1));
    assert_eq!(
        issues[0].message,
        "QuestCompleted references non-existent quest \"QMissing\""
    );
    assert_eq!(issues[1].node_id, Some(3));
    assert_eq!(
        issues[1].message,
        "QuestCompleted references non-existent quest \"QGone\""
    );
}

#[test]
fn test_repository_validation_attaches_owners() {
    let mut broken = minimal_valid_quest("QB");
    broken.quest_nodes.push(dialog(7, &[1]));
    let quests = vec![
        minimal_valid_quest("QA"),
        broken,
        minimal_valid_quest("QA"),
    ];

    let issues = structural_validator().validate_repository(&quests);
    let lines: Vec<String> = issues.iter().map(ReportFormatter::format_issue).collect();
    assert_eq!(
        lines,
        vec![
            "[QB] Node 7: non-EntryPoint node has no incoming connections",
            "[QB] Node 7: NodeID is never referenced by any other node",
            "[CROSS-QUEST]: duplicate QuestID \"QA\" found 2 times",
        ]
    );
}

#[test]
fn test_repository_validation_is_deterministic() {
    let quests: Vec<Quest> = (0..64)
        .map(|i| {
            let mut quest = minimal_valid_quest(&format!("Q{}", i % 7));
            if i % 5 == 0 {
                quest.quest_nodes.push(dialog(9, &[9]));
            }
            quest
        })
        .collect();

    let validator = full_validator(ReferenceCatalog::new());
    let first = validator.validate_repository(&quests);
    let second = validator.validate_repository(&quests);
    assert!(!first.is_empty());
    assert_eq!(first, second);
}
