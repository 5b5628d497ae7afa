use crate::diagnostics::{Edit, Finding, apply_edits, char_column};
use crate::rules::{Rule, RuleError};

/// Byte offsets of `*` characters on `line` that look like stray
/// punctuation: not preceded by `\` or `*`, not followed by a letter or `*`.
fn stray_asterisks(line: &str) -> Vec<usize> {
    let mut offsets = Vec::new();

    for (i, _) in line.match_indices('*') {
        let prev = line[..i].chars().last();
        let next = line[i + 1..].chars().next();

        if matches!(prev, Some('\\' | '*')) {
            continue;
        }
        if matches!(next, Some(c) if c == '*' || c.is_alphabetic()) {
            continue;
        }
        offsets.push(i);
    }

    offsets
}

/// The opposite policy to `unescape-markdown`: a bare `*` that cannot start
/// emphasis is treated as stray punctuation and escaped. Disabled by
/// default; enabling both variants would make their fixers fight.
pub struct EscapeAsteriskRule;

impl Rule for EscapeAsteriskRule {
    fn id(&self) -> &'static str {
        "escape-asterisk"
    }

    fn name(&self) -> &'static str {
        "Escape Stray Asterisks"
    }

    fn description(&self) -> &'static str {
        "Escape bare * characters that are not emphasis syntax (treats the missing backslash as the defect)"
    }

    fn enabled_by_default(&self) -> bool {
        false
    }

    fn check(&self, document: &str) -> Result<Vec<Finding>, RuleError> {
        let mut findings = Vec::new();

        for (index, line) in document.split('\n').enumerate() {
            for offset in stray_asterisks(line) {
                findings.push(
                    Finding::warning(
                        index + 1,
                        char_column(line, offset),
                        self.id(),
                        "Consider escaping * if not used for emphasis",
                    )
                    .fixable(),
                );
            }
        }

        Ok(findings)
    }

    fn fix(&self, document: &str, _findings: &[Finding]) -> Option<Result<String, RuleError>> {
        let mut edits = Vec::new();
        let mut line_start = 0;

        for line in document.split('\n') {
            for offset in stray_asterisks(line) {
                edits.push(Edit::insert(line_start + offset, "\\"));
            }
            line_start += line.len() + 1;
        }

        Some(Ok(apply_edits(document, edits)))
    }
}
