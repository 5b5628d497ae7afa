use std::sync::LazyLock;

use regex::Regex;

use crate::diagnostics::{Finding, char_column};
use crate::rules::{Rule, RuleError};

static TIGHT_BOLD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^\s](\*\*[^*]+\*\*)|(\*\*[^*]+\*\*)[^\s]").expect("valid bold pattern")
});
static TIGHT_LEFT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\S)(\*\*[^*]+\*\*)").expect("valid bold pattern"));
static TIGHT_RIGHT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\*\*[^*]+\*\*)(\S)").expect("valid bold pattern"));

/// `**bold**` runs should be separated from adjacent text by spaces.
pub struct BoldSpacingRule;

impl Rule for BoldSpacingRule {
    fn id(&self) -> &'static str {
        "bold-spacing"
    }

    fn name(&self) -> &'static str {
        "Bold Spacing"
    }

    fn description(&self) -> &'static str {
        "Require spaces around bold text"
    }

    fn check(&self, document: &str) -> Result<Vec<Finding>, RuleError> {
        let mut findings = Vec::new();

        for (index, line) in document.split('\n').enumerate() {
            for m in TIGHT_BOLD_RE.find_iter(line) {
                findings.push(
                    Finding::warning(
                        index + 1,
                        char_column(line, m.start()),
                        self.id(),
                        "Bold text should have spaces before and after",
                    )
                    .fixable(),
                );
            }
        }

        Ok(findings)
    }

    fn fix(&self, document: &str, _findings: &[Finding]) -> Option<Result<String, RuleError>> {
        // Each side independently; `\S` cannot match a newline, so neither
        // pass reaches across lines.
        let fixed = TIGHT_LEFT_RE.replace_all(document, "$1 $2");
        let fixed = TIGHT_RIGHT_RE.replace_all(&fixed, "$1 $2");
        Some(Ok(fixed.into_owned()))
    }
}
