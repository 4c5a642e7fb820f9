use crate::catalog::ReferenceLookup;
use crate::graph::Adjacency;
use crate::loader::LoadedQuests;
use crate::quest::Quest;
use crate::report::{ValidationIssue, ValidationReport, ValidationResult};
use rayon::prelude::*;
use tracing::{debug, info};

pub mod cross;
pub mod flow;
pub mod references;
pub mod structure;

pub use cross::validate_cross_quest;

/// The speaker value that always refers to the player character.
pub const PLAYER_SPEAKER: &str = "Player";

/// Tunables for a [`Validator`].
#[derive(Debug, Clone)]
pub struct ValidatorOptions {
    /// Run the journal / stage-description checks at flow start and end.
    pub flow_bookkeeping: bool,
    /// Speaker name that is exempt from the character catalog.
    pub player_speaker: String,
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self {
            flow_bookkeeping: true,
            player_speaker: PLAYER_SPEAKER.to_string(),
        }
    }
}

/// Checks quest documents against the full rule set.
///
/// A `Validator` holds no per-run state; it can be shared across threads and
/// reused for any number of documents.
pub struct Validator {
    catalog: Box<dyn ReferenceLookup>,
    options: ValidatorOptions,
}

pub struct ValidatorBuilder {
    catalog: Box<dyn ReferenceLookup>,
    options: ValidatorOptions,
}

impl ValidatorBuilder {
    pub fn new(catalog: impl ReferenceLookup + 'static) -> Self {
        Self {
            catalog: Box::new(catalog),
            options: ValidatorOptions::default(),
        }
    }

    pub fn with_flow_bookkeeping(mut self, enabled: bool) -> Self {
        self.options.flow_bookkeeping = enabled;
        self
    }

    pub fn with_player_speaker(mut self, speaker: &str) -> Self {
        self.options.player_speaker = speaker.to_string();
        self
    }

    pub fn build(self) -> Validator {
        Validator {
            catalog: self.catalog,
            options: self.options,
        }
    }
}

impl Validator {
    pub fn builder(catalog: impl ReferenceLookup + 'static) -> ValidatorBuilder {
        ValidatorBuilder::new(catalog)
    }

    pub fn options(&self) -> &ValidatorOptions {
        &self.options
    }

    /// Validates a single quest document.
    pub fn validate(&self, quest: &Quest) -> ValidationResult {
        ValidationResult::from_issues(self.issues(quest))
    }

    /// Runs every single-document check and returns the issues in check order.
    ///
    /// No check stops the others; the adjacency view is built once and shared.
    pub fn issues(&self, quest: &Quest) -> Vec<ValidationIssue> {
        let adjacency = Adjacency::build(quest);

        let mut passes: Vec<(&str, Vec<ValidationIssue>)> = vec![
            ("quest id", structure::check_quest_id(quest)),
            ("unique node ids", structure::check_unique_node_ids(quest)),
            ("edges", structure::check_edges(quest, &adjacency)),
            ("incoming edges", structure::check_incoming_edges(quest)),
            ("entry points", structure::check_entry_points(quest)),
            ("terminal actions", structure::check_terminal_actions(quest)),
            ("decisions", structure::check_decisions(quest)),
            ("condition branches", structure::check_condition_branches(quest)),
            ("misplaced edges", structure::check_misplaced_edges(quest)),
            ("dead ends", structure::check_dead_ends(quest)),
            ("cycles", structure::check_acyclic(&adjacency)),
            (
                "references",
                references::check_references(
                    quest,
                    self.catalog.as_ref(),
                    &self.options.player_speaker,
                ),
            ),
        ];
        if self.options.flow_bookkeeping {
            passes.push(("flow start", flow::check_flow_start(quest, &adjacency)));
            passes.push(("flow end", flow::check_flow_end(quest, &adjacency)));
        }
        passes.push((
            "unreferenced nodes",
            structure::check_unreferenced_nodes(quest, &adjacency),
        ));

        passes
            .into_iter()
            .flat_map(|(name, issues)| {
                if !issues.is_empty() {
                    debug!("Quest '{}': {} issue(s) from {} check", quest.id, issues.len(), name);
                }
                issues
            })
            .collect()
    }

    /// Validates every quest on its own, then the repository as a whole.
    ///
    /// Single-document issues are attached to their quest and keep document
    /// order; cross-document issues follow.
    pub fn validate_repository(&self, quests: &[Quest]) -> Vec<ValidationIssue> {
        let per_quest: Vec<Vec<ValidationIssue>> = quests
            .par_iter()
            .map(|quest| {
                self.issues(quest)
                    .into_iter()
                    .map(|issue| issue.in_quest(&quest.id))
                    .collect()
            })
            .collect();

        let mut issues: Vec<ValidationIssue> = per_quest.into_iter().flatten().collect();
        issues.extend(validate_cross_quest(quests));
        issues
    }

    /// Builds the full report for a loaded repository.
    pub fn report(&self, loaded: &LoadedQuests) -> ValidationReport {
        let issues = self.validate_repository(&loaded.quests);
        info!(
            "Checked {} quests: {} issue(s), {} load failure(s)",
            loaded.quests.len(),
            issues.len(),
            loaded.failures.len()
        );
        ValidationReport {
            quests_checked: loaded.quests.len(),
            load_failures: loaded.failures.clone(),
            issues,
        }
    }
}
