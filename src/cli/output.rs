//! CLI output formatting

use crate::core::{MockAction, MockPayload, MockSpec, StepIdentifier};
use crate::mocker::MockPlan;
use console::Emoji;
use std::path::Path;

// Re-export style
pub use console::style;

// Emojis for output
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "✓ ");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "✗ ");
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "i ");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "!");

/// Format one identifier (and its nested composite identifiers) as indented lines
pub fn format_identifier(identifier: &StepIdentifier, depth: usize) -> Vec<String> {
    let indent = "  ".repeat(depth + 1);
    let selector = style(identifier.selector.to_string()).cyan();

    match &identifier.action {
        MockAction::Replace(MockPayload::Command(command)) => {
            vec![format!(
                "{}{} → run {}",
                indent,
                selector,
                style(first_line(command)).dim()
            )]
        }
        MockAction::Replace(MockPayload::Partial(step)) => {
            let fields: Vec<_> = step.iter().filter_map(|(k, _)| k.as_str()).collect();
            vec![format!(
                "{}{} → merge {}",
                indent,
                selector,
                style(fields.join(", ")).dim()
            )]
        }
        MockAction::Composite(nested) => {
            let mut lines = vec![format!(
                "{}{} → composite ({} step{})",
                indent,
                selector,
                nested.len(),
                if nested.len() == 1 { "" } else { "s" }
            )];
            for inner in nested {
                lines.extend(format_identifier(inner, depth + 1));
            }
            lines
        }
    }
}

/// Format a mock spec grouped by job
pub fn format_spec(spec: &MockSpec) -> String {
    let mut lines = Vec::new();
    for (job, identifiers) in spec.jobs() {
        lines.push(format!("  {}", style(job).bold()));
        for identifier in identifiers {
            lines.extend(format_identifier(identifier, 1));
        }
    }
    lines.join("\n")
}

/// One-line summary of a planned pass
pub fn format_plan_summary(plan: &MockPlan) -> String {
    let actions = plan.actions().count();
    format!(
        "{} substitution{} in {}{}",
        style(plan.substitutions()).cyan(),
        if plan.substitutions() == 1 { "" } else { "s" },
        style(plan.workflow_path().display()).bold(),
        if actions > 0 {
            format!(" and {} composite action{}", style(actions).cyan(), if actions == 1 { "" } else { "s" })
        } else {
            String::new()
        }
    )
}

/// Format a rendered document under a header naming its path
pub fn format_document(path: &Path, contents: &str) -> String {
    format!("{} {}\n{}", INFO, style(path.display()).bold(), contents.trim_end())
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::StepSelector;

    #[test]
    fn test_format_document_keeps_every_line() {
        let contents: String = (1..=60).map(|i| format!("line{}\n", i)).collect();
        let formatted = format_document(Path::new("ci.yml"), &contents);

        assert!(formatted.contains("ci.yml"));
        assert!(formatted.ends_with("line60"));
        assert_eq!(formatted.lines().count(), 61);
    }

    #[test]
    fn test_format_identifier_nests() {
        let identifier = StepIdentifier::composite(
            StepSelector::uses("./actions/setup"),
            vec![StepIdentifier::mock_command(StepSelector::name("Install"), "echo skip")],
        );
        let lines = format_identifier(&identifier, 0);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("composite (1 step)"));
        assert!(lines[1].starts_with("    "));
        assert!(lines[1].contains("echo skip"));
    }
}
