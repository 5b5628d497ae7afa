use crate::diagnostics::Finding;
use crate::rules::RuleRegistry;

/// Findings per rule id, grouped in first-appearance order.
pub fn rule_counts(findings: &[Finding]) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();

    for finding in findings {
        match counts.iter_mut().find(|(id, _)| *id == finding.rule_id) {
            Some((_, count)) => *count += 1,
            None => counts.push((finding.rule_id.clone(), 1)),
        }
    }

    counts
}

/// Render findings as a human-readable summary: total count, findings
/// grouped per rule, and a trailing note about how many are auto-fixable.
pub fn format_findings(findings: &[Finding], registry: &RuleRegistry) -> String {
    if findings.is_empty() {
        return "No lint issues found".to_owned();
    }

    let mut lines = Vec::new();
    lines.push(format!(
        "Found {} lint issue{}:",
        findings.len(),
        plural(findings.len())
    ));
    lines.push(String::new());

    for (rule_id, count) in rule_counts(findings) {
        let rule_name = registry
            .get(&rule_id)
            .map(|rule| rule.name())
            .unwrap_or(&rule_id);
        lines.push(format!("{rule_name} ({count} issue{})", plural(count)));

        for finding in findings.iter().filter(|f| f.rule_id == rule_id) {
            let fixable = if finding.fixable { " [fixable]" } else { "" };
            lines.push(format!(
                "  {} at line {}, column {}: {}{fixable}",
                finding.severity, finding.line, finding.column, finding.message
            ));
        }

        lines.push(String::new());
    }

    let fixable_count = findings.iter().filter(|f| f.fixable).count();
    if fixable_count > 0 {
        lines.push(format!(
            "{fixable_count} issue{} can be fixed automatically",
            plural(fixable_count)
        ));
    } else {
        // Drop the trailing blank group separator.
        lines.pop();
    }

    lines.join("\n")
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}
