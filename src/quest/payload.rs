use super::definition::LocalizedText;
use crate::catalog::CatalogKind;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// An entity ID embedded in a condition or action payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityRef<'a> {
    pub kind: CatalogKind,
    pub id: &'a str,
    /// The discriminator the ID was found under, e.g. `"ItemUsedOnNPC"`.
    pub context: &'static str,
}

impl<'a> EntityRef<'a> {
    fn new(kind: CatalogKind, id: &'a str, context: &'static str) -> Option<Self> {
        (!id.is_empty()).then_some(Self { kind, id, context })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceAvailability {
    #[serde(rename = "Resource", default, deserialize_with = "lenient_string")]
    pub resource: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemUsedOnObject {
    #[serde(rename = "Item", default, deserialize_with = "lenient_string")]
    pub item: String,
    #[serde(rename = "Object", default, deserialize_with = "lenient_string")]
    pub object: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemUsedOnNpc {
    #[serde(rename = "Item", default, deserialize_with = "lenient_string")]
    pub item: String,
    #[serde(rename = "NPC", default, deserialize_with = "lenient_string")]
    pub npc: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FactionStanding {
    #[serde(rename = "Faction", default, deserialize_with = "lenient_string")]
    pub faction: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An item type with a quantity, as used by inventory checks and item effects.
///
/// Entries are kept verbatim so a malformed one does not hide its neighbours;
/// only a string `Type` is read from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemStack(Value);

impl ItemStack {
    pub fn new(item_type: impl Into<String>) -> Self {
        let mut entry = Map::new();
        entry.insert("Type".to_string(), Value::String(item_type.into()));
        Self(Value::Object(entry))
    }

    pub fn item_type(&self) -> Option<&str> {
        self.0.get("Type").and_then(Value::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }
}

/// A predicate attached to a node or a dialog option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum Condition {
    ResourceAvailability(ResourceAvailability),
    ItemUsedOnObject(ItemUsedOnObject),
    ItemUsedOnNpc(ItemUsedOnNpc),
    FactionStanding(FactionStanding),
    Inventory(Vec<ItemStack>),
    ItemLost(String),
    QuestCompleted(String),
    /// An object carrying several discriminators, each interpreted on its own.
    Compound(Vec<Condition>),
    /// Any payload this crate does not recognise, kept verbatim.
    Opaque(Value),
}

impl Condition {
    /// The single-discriminator conditions this one is made of.
    pub fn parts(&self) -> &[Condition] {
        match self {
            Condition::Compound(parts) => parts,
            single => std::slice::from_ref(single),
        }
    }

    pub fn discriminator(&self) -> Option<&str> {
        match self {
            Condition::ResourceAvailability(_) => Some("ResourceAvailability"),
            Condition::ItemUsedOnObject(_) => Some("ItemUsedOnObject"),
            Condition::ItemUsedOnNpc(_) => Some("ItemUsedOnNPC"),
            Condition::FactionStanding(_) => Some("FactionStanding"),
            Condition::Inventory(_) => Some("Inventory"),
            Condition::ItemLost(_) => Some("ItemLost"),
            Condition::QuestCompleted(_) => Some("QuestCompleted"),
            Condition::Compound(_) => None,
            Condition::Opaque(value) => opaque_discriminator(value),
        }
    }

    /// Catalog references embedded in this condition. Empty IDs are skipped.
    pub fn entity_refs(&self) -> Vec<EntityRef<'_>> {
        match self {
            Condition::ResourceAvailability(ra) => {
                EntityRef::new(CatalogKind::Resource, &ra.resource, "ResourceAvailability")
                    .into_iter()
                    .collect()
            }
            Condition::ItemUsedOnObject(iuo) => [
                EntityRef::new(CatalogKind::Item, &iuo.item, "ItemUsedOnObject"),
                EntityRef::new(CatalogKind::Object, &iuo.object, "ItemUsedOnObject"),
            ]
            .into_iter()
            .flatten()
            .collect(),
            Condition::ItemUsedOnNpc(iun) => [
                EntityRef::new(CatalogKind::Item, &iun.item, "ItemUsedOnNPC"),
                EntityRef::new(CatalogKind::Character, &iun.npc, "ItemUsedOnNPC"),
            ]
            .into_iter()
            .flatten()
            .collect(),
            Condition::FactionStanding(fs) => {
                EntityRef::new(CatalogKind::Faction, &fs.faction, "FactionStanding")
                    .into_iter()
                    .collect()
            }
            Condition::Inventory(stacks) => item_refs(stacks, "Inventory"),
            Condition::ItemLost(item) => EntityRef::new(CatalogKind::Item, item, "ItemLost")
                .into_iter()
                .collect(),
            Condition::Compound(parts) => parts.iter().flat_map(Condition::entity_refs).collect(),
            // Quest references are resolved against the repository, not a catalog.
            Condition::QuestCompleted(_) | Condition::Opaque(_) => vec![],
        }
    }

    /// The quest ID named by a `QuestCompleted` condition, if non-empty.
    pub fn completed_quest(&self) -> Option<&str> {
        match self {
            Condition::QuestCompleted(quest_id) if !quest_id.is_empty() => Some(quest_id),
            _ => None,
        }
    }
}

impl From<Value> for Condition {
    fn from(value: Value) -> Self {
        if let Some(entries) = split_entries(&value) {
            return Condition::Compound(entries.into_iter().map(Condition::from).collect());
        }
        let Some((key, payload)) = single_entry(&value) else {
            return Condition::Opaque(value);
        };
        let parsed = match key {
            "ResourceAvailability" => typed(payload).map(Condition::ResourceAvailability),
            "ItemUsedOnObject" => typed(payload).map(Condition::ItemUsedOnObject),
            "ItemUsedOnNPC" => typed(payload).map(Condition::ItemUsedOnNpc),
            "FactionStanding" => typed(payload).map(Condition::FactionStanding),
            "Inventory" => typed(payload).map(Condition::Inventory),
            "ItemLost" => payload.as_str().map(|item| Condition::ItemLost(item.to_string())),
            "QuestCompleted" => payload
                .as_str()
                .map(|quest_id| Condition::QuestCompleted(quest_id.to_string())),
            _ => None,
        };
        parsed.unwrap_or(Condition::Opaque(value))
    }
}

impl From<Condition> for Value {
    fn from(condition: Condition) -> Self {
        match condition {
            Condition::ResourceAvailability(ra) => tagged("ResourceAvailability", &ra),
            Condition::ItemUsedOnObject(iuo) => tagged("ItemUsedOnObject", &iuo),
            Condition::ItemUsedOnNpc(iun) => tagged("ItemUsedOnNPC", &iun),
            Condition::FactionStanding(fs) => tagged("FactionStanding", &fs),
            Condition::Inventory(stacks) => tagged("Inventory", &stacks),
            Condition::ItemLost(item) => tagged("ItemLost", &item),
            Condition::QuestCompleted(quest_id) => tagged("QuestCompleted", &quest_id),
            Condition::Compound(parts) => merged(parts.into_iter().map(Value::from)),
            Condition::Opaque(value) => value,
        }
    }
}

/// The shorthand actions that end a quest flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerminalAction {
    CompleteQuest,
    FailQuest,
    DeclineQuest,
}

impl TerminalAction {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "CompleteQuest" => Some(TerminalAction::CompleteQuest),
            "FailQuest" => Some(TerminalAction::FailQuest),
            "DeclineQuest" => Some(TerminalAction::DeclineQuest),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TerminalAction::CompleteQuest => "CompleteQuest",
            TerminalAction::FailQuest => "FailQuest",
            TerminalAction::DeclineQuest => "DeclineQuest",
        }
    }
}

/// An effect executed when the flow reaches an `Actions` node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum Action {
    Terminal(TerminalAction),
    JournalEntry(Value),
    QuestStageDescription(LocalizedText),
    ItemsGained(Vec<ItemStack>),
    ItemsLost(Vec<ItemStack>),
    FactionStanding(FactionStanding),
    /// An object carrying several discriminators, each interpreted on its own.
    Compound(Vec<Action>),
    /// Any payload this crate does not recognise, kept verbatim.
    Opaque(Value),
}

impl Action {
    /// The single-discriminator actions this one is made of.
    pub fn parts(&self) -> &[Action] {
        match self {
            Action::Compound(parts) => parts,
            single => std::slice::from_ref(single),
        }
    }

    pub fn terminal(&self) -> Option<TerminalAction> {
        match self {
            Action::Terminal(terminal) => Some(*terminal),
            _ => None,
        }
    }

    pub fn discriminator(&self) -> Option<&str> {
        match self {
            Action::Terminal(terminal) => Some(terminal.as_str()),
            Action::JournalEntry(_) => Some("JournalEntry"),
            Action::QuestStageDescription(_) => Some("QuestStageDescription"),
            Action::ItemsGained(_) => Some("ItemsGained"),
            Action::ItemsLost(_) => Some("ItemsLost"),
            Action::FactionStanding(_) => Some("FactionStanding"),
            Action::Compound(_) => None,
            Action::Opaque(value) => opaque_discriminator(value),
        }
    }

    /// Catalog references embedded in this action. Empty IDs are skipped.
    pub fn entity_refs(&self) -> Vec<EntityRef<'_>> {
        match self {
            Action::ItemsGained(stacks) => item_refs(stacks, "ItemsGained"),
            Action::ItemsLost(stacks) => item_refs(stacks, "ItemsLost"),
            Action::FactionStanding(fs) => {
                EntityRef::new(CatalogKind::Faction, &fs.faction, "FactionStanding")
                    .into_iter()
                    .collect()
            }
            Action::Compound(parts) => parts.iter().flat_map(Action::entity_refs).collect(),
            Action::Terminal(_)
            | Action::JournalEntry(_)
            | Action::QuestStageDescription(_)
            | Action::Opaque(_) => vec![],
        }
    }

    pub fn stage_description(&self) -> Option<&LocalizedText> {
        match self {
            Action::QuestStageDescription(text) => Some(text),
            _ => None,
        }
    }
}

fn item_refs<'a>(stacks: &'a [ItemStack], context: &'static str) -> Vec<EntityRef<'a>> {
    stacks
        .iter()
        .filter_map(|stack| EntityRef::new(CatalogKind::Item, stack.item_type()?, context))
        .collect()
}

impl From<Value> for Action {
    fn from(value: Value) -> Self {
        if let Some(terminal) = value.as_str().and_then(TerminalAction::from_name) {
            return Action::Terminal(terminal);
        }
        if let Some(entries) = split_entries(&value) {
            return Action::Compound(entries.into_iter().map(Action::from).collect());
        }
        let Some((key, payload)) = single_entry(&value) else {
            return Action::Opaque(value);
        };
        let parsed = match key {
            "JournalEntry" => Some(Action::JournalEntry(payload.clone())),
            "QuestStageDescription" => typed(payload).map(Action::QuestStageDescription),
            "ItemsGained" => typed(payload).map(Action::ItemsGained),
            "ItemsLost" => typed(payload).map(Action::ItemsLost),
            "FactionStanding" => typed(payload).map(Action::FactionStanding),
            other => TerminalAction::from_name(other).map(Action::Terminal),
        };
        parsed.unwrap_or(Action::Opaque(value))
    }
}

impl From<Action> for Value {
    fn from(action: Action) -> Self {
        match action {
            Action::Terminal(terminal) => Value::String(terminal.as_str().to_string()),
            Action::JournalEntry(payload) => tagged("JournalEntry", &payload),
            Action::QuestStageDescription(text) => tagged("QuestStageDescription", &text),
            Action::ItemsGained(stacks) => tagged("ItemsGained", &stacks),
            Action::ItemsLost(stacks) => tagged("ItemsLost", &stacks),
            Action::FactionStanding(fs) => tagged("FactionStanding", &fs),
            Action::Compound(parts) => merged(parts.into_iter().map(Value::from)),
            Action::Opaque(value) => value,
        }
    }
}

/// Splits a `{ Discriminator: payload }` object into its only entry.
fn single_entry(value: &Value) -> Option<(&str, &Value)> {
    let map = value.as_object()?;
    if map.len() != 1 {
        return None;
    }
    map.iter().next().map(|(key, payload)| (key.as_str(), payload))
}

/// Splits an object with several discriminators into one object per entry.
fn split_entries(value: &Value) -> Option<Vec<Value>> {
    let map = value.as_object().filter(|map| map.len() > 1)?;
    Some(
        map.iter()
            .map(|(key, payload)| {
                let mut entry = Map::new();
                entry.insert(key.clone(), payload.clone());
                Value::Object(entry)
            })
            .collect(),
    )
}

/// Joins the parts of a compound payload back into one object.
fn merged(parts: impl Iterator<Item = Value>) -> Value {
    Value::Object(
        parts
            .flat_map(|part| match part {
                Value::Object(entries) => entries,
                // Terminal shorthand serializes as a bare name.
                Value::String(name) => [(name, Value::Object(Map::new()))].into_iter().collect(),
                _ => Map::new(),
            })
            .collect(),
    )
}

/// Reads a string field, treating any other value as absent.
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => text,
        _ => String::new(),
    })
}

fn opaque_discriminator(value: &Value) -> Option<&str> {
    value
        .as_str()
        .or_else(|| single_entry(value).map(|(key, _)| key))
}

fn typed<T: DeserializeOwned>(payload: &Value) -> Option<T> {
    serde_json::from_value(payload.clone()).ok()
}

fn tagged<T: Serialize>(key: &str, payload: &T) -> Value {
    let mut map = Map::new();
    map.insert(
        key.to_string(),
        serde_json::to_value(payload).unwrap_or(Value::Null),
    );
    Value::Object(map)
}
