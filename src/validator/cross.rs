//! Rules that span the whole quest repository.

use crate::quest::{Action, Condition, Locale, Quest};
use crate::report::ValidationIssue;
use ahash::{AHashMap, AHashSet};
use itertools::Itertools;
use std::hash::Hash;

/// Runs every cross-document rule over the successfully loaded quests.
///
/// Issues come out grouped by rule and, within a rule, in order of first
/// occurrence, so repeated runs over the same repository agree.
pub fn validate_cross_quest(quests: &[Quest]) -> Vec<ValidationIssue> {
    let mut issues = check_unique_quest_ids(quests);
    issues.extend(check_unique_display_names(quests));
    issues.extend(check_unique_stage_descriptions(quests));
    issues.extend(check_quest_references(quests));
    issues
}

/// Groups values by key, keeping keys in first-seen order.
fn group_in_order<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Vec<(K, Vec<V>)>
where
    K: Eq + Hash + Clone,
{
    let mut index: AHashMap<K, usize> = AHashMap::new();
    let mut groups: Vec<(K, Vec<V>)> = Vec::new();
    for (key, value) in pairs {
        match index.get(&key) {
            Some(&slot) => groups[slot].1.push(value),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push((key, vec![value]));
            }
        }
    }
    groups
}

pub fn check_unique_quest_ids(quests: &[Quest]) -> Vec<ValidationIssue> {
    group_in_order(quests.iter().map(|quest| (quest.id.as_str(), ())))
        .into_iter()
        .filter(|(_, occurrences)| occurrences.len() > 1)
        .map(|(id, occurrences)| {
            ValidationIssue::global(format!(
                "duplicate QuestID {:?} found {} times",
                id,
                occurrences.len()
            ))
        })
        .collect()
}

pub fn check_unique_display_names(quests: &[Quest]) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    for locale in Locale::ALL {
        let names = quests.iter().filter_map(|quest| {
            let name = quest.display_name.get(locale);
            (!name.is_empty()).then_some((name, quest.id.as_str()))
        });
        for (name, owners) in group_in_order(names) {
            if owners.len() > 1 {
                issues.push(ValidationIssue::global(format!(
                    "duplicate DisplayName {:?} ({}) in quests: {}",
                    name,
                    locale,
                    owners.join(", ")
                )));
            }
        }
    }
    issues
}

/// Stage descriptions must be unique across quests. A quest may repeat its
/// own description on several nodes.
pub fn check_unique_stage_descriptions(quests: &[Quest]) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    for locale in Locale::ALL {
        let descriptions = quests.iter().flat_map(|quest| {
            quest
                .quest_nodes
                .iter()
                .flat_map(|node| node.actions.iter())
                .flat_map(Action::parts)
                .filter_map(|action| action.stage_description())
                .map(move |text| text.get(locale))
                .filter(|text| !text.is_empty())
                .map(move |text| (text, quest.id.as_str()))
        });
        for (text, owners) in group_in_order(descriptions) {
            let owners: Vec<&str> = owners.into_iter().unique().collect();
            if owners.len() > 1 {
                issues.push(ValidationIssue::global(format!(
                    "duplicate QuestStageDescription {:?} ({}) in quests: {}",
                    text,
                    locale,
                    owners.iter().join(", ")
                )));
            }
        }
    }
    issues
}

/// `QuestCompleted` conditions must name a quest that exists in the repository.
pub fn check_quest_references(quests: &[Quest]) -> Vec<ValidationIssue> {
    let known: AHashSet<&str> = quests.iter().map(|quest| quest.id.as_str()).collect();
    let mut issues = Vec::new();
    for quest in quests {
        for node in &quest.quest_nodes {
            let option_conditions = node
                .kind
                .options()
                .iter()
                .flat_map(|option| option.conditions.iter());
            for referenced in node
                .conditions
                .iter()
                .chain(option_conditions)
                .flat_map(Condition::parts)
                .filter_map(|condition| condition.completed_quest())
            {
                if !known.contains(referenced) {
                    issues.push(
                        ValidationIssue::node(
                            node.id,
                            format!("QuestCompleted references non-existent quest {referenced:?}"),
                        )
                        .in_quest(&quest.id),
                    );
                }
            }
        }
    }
    issues
}
