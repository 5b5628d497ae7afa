use std::sync::LazyLock;

use regex::Regex;

use crate::diagnostics::Finding;
use crate::rules::{Rule, RuleError};

static LIST_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*)([+-])(\s+)").expect("valid list marker pattern"));

/// List items should use `*` as the bullet instead of `+` or `-`.
pub struct ListMarkerStyleRule;

impl Rule for ListMarkerStyleRule {
    fn id(&self) -> &'static str {
        "list-marker-style"
    }

    fn name(&self) -> &'static str {
        "List Marker Style"
    }

    fn description(&self) -> &'static str {
        "Use * as the list item marker instead of + or -"
    }

    fn check(&self, document: &str) -> Result<Vec<Finding>, RuleError> {
        let mut findings = Vec::new();

        for (index, line) in document.split('\n').enumerate() {
            if let Some(caps) = LIST_MARKER_RE.captures(line) {
                findings.push(
                    Finding::warning(
                        index + 1,
                        caps[1].chars().count() + 1,
                        self.id(),
                        format!("Consider using * for list items instead of {}", &caps[2]),
                    )
                    .fixable(),
                );
            }
        }

        Ok(findings)
    }

    fn fix(&self, document: &str, _findings: &[Finding]) -> Option<Result<String, RuleError>> {
        let fixed: Vec<String> = document
            .split('\n')
            .map(|line| LIST_MARKER_RE.replace(line, "${1}*${3}").into_owned())
            .collect();

        Some(Ok(fixed.join("\n")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(input: &str) -> Vec<Finding> {
        ListMarkerStyleRule.check(input).unwrap()
    }

    fn fix(input: &str) -> String {
        let findings = check(input);
        ListMarkerStyleRule.fix(input, &findings).unwrap().unwrap()
    }

    #[test]
    fn test_dash_marker_flagged() {
        let findings = check("- item");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].line, 1);
        assert_eq!(findings[0].column, 1);
        assert!(findings[0].fixable);
        assert!(findings[0].message.contains("instead of -"));
    }

    #[test]
    fn test_indented_plus_marker_flagged() {
        let findings = check("  + nested");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].column, 3);
        assert!(findings[0].message.contains("instead of +"));
    }

    #[test]
    fn test_asterisk_marker_clean() {
        assert_eq!(check("* item").len(), 0);
    }

    #[test]
    fn test_horizontal_rule_clean() {
        assert_eq!(check("---").len(), 0);
    }

    #[test]
    fn test_fix_replaces_marker_in_place() {
        assert_eq!(fix("- item"), "* item");
        assert_eq!(fix("  + nested\n- flat"), "  * nested\n* flat");
    }

    #[test]
    fn test_fix_preserves_spacing() {
        assert_eq!(fix("-   wide gap"), "*   wide gap");
    }
}
