//! Tests for loading quest repositories and reference catalogs from disk.
mod common;
use questcheck::prelude::*;
use std::fs;
use tempfile::TempDir;

const HAMMER_QUEST: &str = r#"
QuestTypeVersion: 1
QuestVersion: 3
QuestID: TheMissingHammer
QuestType: Side
DisplayName:
  en-US: The Missing Hammer
  de-DE: Der verschwundene Hammer
QuestNodes:
  - NodeID: 0
    NodeType: EntryPoint
    NextNodes: [1]
  - NodeID: 1
    NodeType: Dialog
    ConversationPartner: "NPC:Smith"
    Speaker: "NPC:Smith"
    Messages:
      - Speaker: Player
        Text:
          en-US: Need help?
          de-DE: Brauchst du Hilfe?
    NextNodes: [2]
  - NodeID: 2
    NodeType: PlayerDecisionDialog
    Options:
      - Text:
          en-US: Sure
          de-DE: Klar
        NextNodes: [3]
      - Text:
          en-US: Not now
          de-DE: Nicht jetzt
        NextNodes: [4]
  - NodeID: 3
    NodeType: Actions
    Actions:
      - JournalEntry:
          en-US: Smith lost his hammer.
          de-DE: Smith hat seinen Hammer verloren.
      - QuestStageDescription:
          en-US: Find the hammer
          de-DE: Finde den Hammer
      - ItemsGained:
          - Type: "Item:Hammer"
            Amount: 1
      - CompleteQuest
  - NodeID: 4
    NodeType: Actions
    Actions:
      - JournalEntry:
          en-US: Maybe later.
          de-DE: Vielleicht spaeter.
      - QuestStageDescription:
          en-US: Declined
          de-DE: Abgelehnt
      - DeclineQuest: {}
"#;

const JSON_QUEST: &str = r#"{
  "QuestID": "Errand",
  "QuestNodes": [
    { "NodeID": 0, "NodeType": "EntryPoint", "NextNodes": [1] },
    { "NodeID": 1, "NodeType": "Actions", "Actions": ["FailQuest"] }
  ]
}"#;

const NPCS: &str = r#"
- NPCID: "NPC:Smith"
  Name: Smith
- NPCID: "NPC:Innkeeper"
"#;

const ITEMS: &str = r#"
- ItemID: "Item:Hammer"
"#;

fn write(dir: &TempDir, name: &str, content: &str) {
    let path = dir.path().join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create directory");
    }
    fs::write(path, content).expect("Failed to write test file");
}

fn catalog_dir() -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    write(&dir, "npcs.yaml", NPCS);
    write(&dir, "items.yaml", ITEMS);
    write(&dir, "objects.yaml", "");
    dir
}

#[test]
fn test_parse_yaml_quest() {
    let quest = questcheck::loader::parse_quest(HAMMER_QUEST, questcheck::loader::DocumentFormat::Yaml)
        .expect("Failed to parse quest");

    assert_eq!(quest.id, "TheMissingHammer");
    assert_eq!(quest.quest_version, 3);
    assert_eq!(quest.display_name.get(Locale::DeDe), "Der verschwundene Hammer");
    assert_eq!(quest.quest_nodes.len(), 5);

    let decision = &quest.quest_nodes[2];
    assert_eq!(decision.node_type(), NodeType::Decision);
    assert_eq!(decision.kind.options().len(), 2);
    assert_eq!(decision.kind.options()[1].next_nodes, vec![4]);

    let accept = &quest.quest_nodes[3];
    assert!(accept.is_terminal());
    assert!(accept.has_action("JournalEntry"));
    assert!(matches!(&accept.actions[2], Action::ItemsGained(stacks) if stacks[0].item_type() == Some("Item:Hammer")));

    let decline = &quest.quest_nodes[4];
    assert_eq!(decline.actions[2].terminal(), Some(TerminalAction::DeclineQuest));
}

#[test]
fn test_load_quests_collects_documents_and_failures() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    write(&dir, "a_hammer.yaml", HAMMER_QUEST);
    write(&dir, "b_errand.json", JSON_QUEST);
    write(&dir, "c_broken.yml", "QuestID: [unclosed");
    write(&dir, "notes.txt", "not a quest");
    write(&dir, "nested/d_teleport.yaml", "QuestID: Teleport\nQuestNodes:\n  - NodeID: 0\n    NodeType: Teleport\n");

    let loaded = load_quests(dir.path()).expect("Failed to load quests");

    let ids: Vec<&str> = loaded.quests.iter().map(|q| q.id.as_str()).collect();
    assert_eq!(ids, vec!["TheMissingHammer", "Errand"]);
    assert_eq!(loaded.failures.len(), 2);
    assert!(loaded.failures[0].path.ends_with("c_broken.yml"));
    assert!(loaded.failures[1].path.ends_with("nested/d_teleport.yaml"));
    assert!(
        loaded.failures[1]
            .error
            .to_string()
            .contains("unknown NodeType 'Teleport'"),
        "unexpected error: {}",
        loaded.failures[1].error
    );
}

#[test]
fn test_load_quests_missing_directory_is_fatal() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let result = load_quests(dir.path().join("does-not-exist"));
    assert!(matches!(result, Err(LoadError::SourceUnavailable { .. })));
}

#[test]
fn test_load_catalog_reads_id_sets() {
    let dir = catalog_dir();
    let catalog = load_catalog(dir.path()).expect("Failed to load catalog");

    assert!(catalog.contains(CatalogKind::Character, "NPC:Smith"));
    assert!(catalog.contains(CatalogKind::Character, "NPC:Innkeeper"));
    assert!(catalog.items().contains("Item:Hammer"));
    assert!(catalog.objects().is_empty());
    assert!(catalog.factions().is_empty(), "missing file yields an empty set");
    assert_eq!(catalog.len(), 3);
}

#[test]
fn test_load_catalog_rejects_malformed_file() {
    let dir = catalog_dir();
    write(&dir, "factions.yaml", "- FactionID: [oops");

    let result = load_catalog(dir.path());
    match result {
        Err(LoadError::CatalogUnreadable { path, .. }) => assert!(path.ends_with("factions.yaml")),
        other => panic!("expected CatalogUnreadable, got {:?}", other.map(|c| c.len())),
    }
}

#[test]
fn test_load_catalog_skips_entries_without_id() {
    let dir = catalog_dir();
    write(
        &dir,
        "factions.yaml",
        "- FactionID: \"Faction:Guild\"\n- Name: Unnamed\n- FactionID: \"\"\n",
    );

    let catalog = load_catalog(dir.path()).expect("Failed to load catalog");
    assert_eq!(catalog.factions().len(), 1);
    assert!(catalog.contains(CatalogKind::Faction, "Faction:Guild"));
    assert!(!catalog.contains(CatalogKind::Faction, ""));
}

#[test]
fn test_load_catalog_missing_directory_is_fatal() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let result = load_catalog(dir.path().join("data"));
    assert!(matches!(result, Err(LoadError::CatalogUnreadable { .. })));
}

#[test]
fn test_report_over_loaded_repository() {
    let data = catalog_dir();
    let quests = TempDir::new().expect("Failed to create temp dir");
    write(&quests, "hammer.yaml", HAMMER_QUEST);
    write(&quests, "errand.json", JSON_QUEST);
    write(&quests, "zz_broken.yaml", "QuestNodes: 12");

    let catalog = load_catalog(data.path()).expect("Failed to load catalog");
    let loaded = load_quests(quests.path()).expect("Failed to load quests");
    let report = Validator::builder(catalog).build().report(&loaded);

    assert_eq!(report.quests_checked, 2);
    assert_eq!(report.load_failures.len(), 1);
    // The errand never opens a journal entry or describes its stage.
    let errand: Vec<String> = report
        .issues
        .iter()
        .map(ReportFormatter::format_issue)
        .collect();
    assert_eq!(
        errand,
        vec![
            "[Errand] Node 1: first Actions node in flow must have JournalEntry action",
            "[Errand] Node 1: first Actions node in flow must have QuestStageDescription action",
            "[Errand] Node 1: terminal Actions chain must contain a JournalEntry action",
        ]
    );
    assert_eq!(report.exit_code(), 1);

    let lines = ReportFormatter::format_report(&report, true);
    assert!(lines[0].starts_with("[LOAD ERROR]: failed to load "));
    assert_eq!(
        lines.last().map(String::as_str),
        Some("Checked 2 quests, found 4 issues.")
    );
}
