use std::sync::LazyLock;

use regex::Regex;

use crate::diagnostics::Finding;
use crate::rules::{Rule, RuleError};

static FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*)(```|~~~)").expect("valid fence pattern"));

struct OpenFence {
    line_index: usize,
    indent: String,
    style: String,
}

/// Scan top to bottom, tracking at most one open fenced block. A delimiter
/// toggles state only when it opens a block or matches the opening style;
/// the other style inside a block is plain content.
fn unclosed_fence(document: &str) -> Option<OpenFence> {
    let mut open: Option<OpenFence> = None;

    for (index, line) in document.split('\n').enumerate() {
        let Some(caps) = FENCE_RE.captures(line) else {
            continue;
        };

        match &open {
            None => {
                open = Some(OpenFence {
                    line_index: index,
                    indent: caps[1].to_owned(),
                    style: caps[2].to_owned(),
                });
            }
            Some(fence) if fence.style == caps[2] => {
                open = None;
            }
            Some(_) => {}
        }
    }

    open
}

/// Fenced code blocks must be closed with a delimiter of the opening style.
pub struct FenceCloseRule;

impl Rule for FenceCloseRule {
    fn id(&self) -> &'static str {
        "fence-close"
    }

    fn name(&self) -> &'static str {
        "Fence Close"
    }

    fn description(&self) -> &'static str {
        "Require closing fences for code blocks"
    }

    fn check(&self, document: &str) -> Result<Vec<Finding>, RuleError> {
        let mut findings = Vec::new();

        if let Some(fence) = unclosed_fence(document) {
            findings.push(
                Finding::error(
                    fence.line_index + 1,
                    1,
                    self.id(),
                    "Code block is not properly closed",
                )
                .fixable(),
            );
        }

        Ok(findings)
    }

    fn fix(&self, document: &str, _findings: &[Finding]) -> Option<Result<String, RuleError>> {
        // Re-scan rather than trusting finding positions: earlier fixers may
        // have shifted lines, and a closed document must pass through
        // untouched.
        let fixed = match unclosed_fence(document) {
            Some(fence) => format!("{document}\n\n{}{}", fence.indent, fence.style),
            None => document.to_owned(),
        };

        Some(Ok(fixed))
    }
}
