use std::sync::LazyLock;

use regex::Regex;

use crate::diagnostics::{Finding, offset_to_line_col};
use crate::rules::{Rule, RuleError};

// Longest marker first so `\**` reports once, as a bold marker.
static ESCAPED_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\(\*\*|__|\*|_)").expect("valid escape pattern"));

fn marker_kind(marker: &str) -> &'static str {
    match marker {
        "**" | "__" => "bold marker",
        _ => "italic marker",
    }
}

/// Backslash-escaped emphasis markers are almost always over-escaping;
/// strip the backslash and leave the bare marker.
pub struct UnescapeMarkdownRule;

impl Rule for UnescapeMarkdownRule {
    fn id(&self) -> &'static str {
        "unescape-markdown"
    }

    fn name(&self) -> &'static str {
        "Unescape Markdown Symbols"
    }

    fn description(&self) -> &'static str {
        "Remove unnecessary escaping from emphasis markers (treats the backslash as the defect)"
    }

    fn check(&self, document: &str) -> Result<Vec<Finding>, RuleError> {
        let mut findings = Vec::new();

        for caps in ESCAPED_MARKER_RE.captures_iter(document) {
            let whole = caps.get(0).expect("match");
            let marker = &caps[1];
            let (line, column) = offset_to_line_col(document, whole.start());
            findings.push(
                Finding::warning(
                    line,
                    column,
                    self.id(),
                    format!(
                        "Remove unnecessary escape from {} (\\{marker} → {marker})",
                        marker_kind(marker)
                    ),
                )
                .fixable(),
            );
        }

        Ok(findings)
    }

    fn fix(&self, document: &str, _findings: &[Finding]) -> Option<Result<String, RuleError>> {
        Some(Ok(ESCAPED_MARKER_RE
            .replace_all(document, "$1")
            .into_owned()))
    }
}
