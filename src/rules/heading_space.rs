use std::sync::LazyLock;

use regex::Regex;

use crate::diagnostics::Finding;
use crate::rules::{Rule, RuleError};

static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})([^\s#].*)").expect("valid heading pattern"));

/// ATX headings must have a space between the `#` run and the heading text.
pub struct HeadingSpaceRule;

impl Rule for HeadingSpaceRule {
    fn id(&self) -> &'static str {
        "heading-space"
    }

    fn name(&self) -> &'static str {
        "Heading Space"
    }

    fn description(&self) -> &'static str {
        "Require a space after ATX heading markers"
    }

    fn check(&self, document: &str) -> Result<Vec<Finding>, RuleError> {
        let mut findings = Vec::new();

        for (index, line) in document.split('\n').enumerate() {
            if let Some(caps) = HEADING_RE.captures(line) {
                let marker_len = caps[1].len();
                findings.push(
                    Finding::error(
                        index + 1,
                        marker_len + 1,
                        self.id(),
                        "Heading markers should be followed by a space",
                    )
                    .fixable(),
                );
            }
        }

        Ok(findings)
    }

    fn fix(&self, document: &str, _findings: &[Finding]) -> Option<Result<String, RuleError>> {
        // Lines are independent, so front-to-back rewriting is safe here.
        let fixed: Vec<String> = document
            .split('\n')
            .map(|line| match HEADING_RE.captures(line) {
                Some(caps) => format!("{} {}", &caps[1], &caps[2]),
                None => line.to_owned(),
            })
            .collect();

        Some(Ok(fixed.join("\n")))
    }
}
