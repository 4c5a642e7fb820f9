use super::{ValidationIssue, ValidationReport};
use crate::loader::LoadFailure;

/// Renders issues and reports as the line-oriented text the CLI prints.
pub struct ReportFormatter;

impl ReportFormatter {
    /// Formats one issue as `[QuestID] Node N: message`, `[QuestID]: message`,
    /// or `[CROSS-QUEST]: message` when the issue has no owning quest.
    pub fn format_issue(issue: &ValidationIssue) -> String {
        match (&issue.quest_id, issue.node_id) {
            (Some(quest_id), Some(node_id)) => {
                format!("[{}] Node {}: {}", quest_id, node_id, issue.message)
            }
            (Some(quest_id), None) => format!("[{}]: {}", quest_id, issue.message),
            (None, _) => format!("[CROSS-QUEST]: {}", issue.message),
        }
    }

    pub fn format_load_failure(failure: &LoadFailure) -> String {
        format!("[LOAD ERROR]: {}", failure)
    }

    /// All report lines: load failures, then issues, then an optional summary.
    pub fn format_report(report: &ValidationReport, with_summary: bool) -> Vec<String> {
        let mut lines: Vec<String> = report
            .load_failures
            .iter()
            .map(Self::format_load_failure)
            .chain(report.issues.iter().map(Self::format_issue))
            .collect();

        if with_summary {
            if report.quests_checked == 0 && report.load_failures.is_empty() {
                lines.push("No quests found.".to_string());
            } else {
                lines.push("-".repeat(40));
                lines.push(format!(
                    "Checked {} quests, found {} issues.",
                    report.quests_checked,
                    report.total_problems()
                ));
            }
        }
        lines
    }
}
