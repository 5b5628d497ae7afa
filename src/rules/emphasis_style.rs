use std::sync::LazyLock;

use regex::Regex;

use crate::diagnostics::{Edit, Finding, apply_edits, char_column};
use crate::rules::{Rule, RuleError};

static UNDERSCORE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_([^_\n]+)_").expect("valid underscore pattern"));

fn is_word(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Prefer asterisk emphasis over underscores, and spot the narrow case
/// where an escaped asterisk was probably meant to open emphasis.
pub struct EmphasisStyleRule;

impl EmphasisStyleRule {
    /// Byte offsets of `\*` occurrences that sit after whitespace (or line
    /// start) and before a non-whitespace character. The second element is
    /// true when the next character is a word character, the only shape the
    /// fixer rewrites.
    fn misplaced_escapes(line: &str) -> Vec<(usize, bool)> {
        let mut out = Vec::new();

        for (i, _) in line.match_indices("\\*") {
            let prev_is_space = line[..i].chars().last().is_none_or(char::is_whitespace);
            let next = line[i + 2..].chars().next();
            let Some(next) = next else { continue };

            if prev_is_space && !next.is_whitespace() {
                out.push((i, is_word(next)));
            }
        }

        out
    }
}

impl Rule for EmphasisStyleRule {
    fn id(&self) -> &'static str {
        "emphasis-style"
    }

    fn name(&self) -> &'static str {
        "Emphasis Style Consistency"
    }

    fn description(&self) -> &'static str {
        "Use * for emphasis instead of _ and unescape asterisks that were meant as emphasis"
    }

    fn check(&self, document: &str) -> Result<Vec<Finding>, RuleError> {
        let mut findings = Vec::new();

        for (index, line) in document.split('\n').enumerate() {
            for (offset, narrow) in Self::misplaced_escapes(line) {
                let finding = Finding::warning(
                    index + 1,
                    char_column(line, offset),
                    self.id(),
                    "Consider using unescaped * for emphasis instead of \\*",
                );
                findings.push(if narrow { finding.fixable() } else { finding });
            }

            for m in UNDERSCORE_RE.find_iter(line) {
                if line[..m.start()].ends_with('\\') {
                    continue;
                }
                findings.push(
                    Finding::warning(
                        index + 1,
                        char_column(line, m.start()),
                        self.id(),
                        "Consider using * for emphasis instead of _",
                    )
                    .fixable(),
                );
            }
        }

        Ok(findings)
    }

    fn fix(&self, document: &str, _findings: &[Finding]) -> Option<Result<String, RuleError>> {
        // Underscore emphasis first, then the narrow escaped-asterisk shape;
        // both passes collect span edits and apply them back to front.
        let mut edits = Vec::new();
        for caps in UNDERSCORE_RE.captures_iter(document) {
            let whole = caps.get(0).expect("match");
            if document[..whole.start()].ends_with('\\') {
                continue;
            }
            edits.push(Edit::replace(
                whole.start(),
                whole.end(),
                format!("*{}*", &caps[1]),
            ));
        }
        let intermediate = apply_edits(document, edits);

        let mut edits = Vec::new();
        let mut line_start = 0;
        for line in intermediate.split('\n') {
            for (offset, narrow) in Self::misplaced_escapes(line) {
                if narrow {
                    edits.push(Edit::delete(line_start + offset, line_start + offset + 1));
                }
            }
            line_start += line.len() + 1;
        }

        Some(Ok(apply_edits(&intermediate, edits)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(input: &str) -> Vec<Finding> {
        EmphasisStyleRule.check(input).unwrap()
    }

    fn fix(input: &str) -> String {
        let findings = check(input);
        EmphasisStyleRule.fix(input, &findings).unwrap().unwrap()
    }

    #[test]
    fn test_underscore_emphasis_flagged() {
        let findings = check("some _emphasis_ here");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].line, 1);
        assert_eq!(findings[0].column, 6);
        assert!(findings[0].fixable);
    }

    #[test]
    fn test_escaped_underscores_skipped() {
        assert_eq!(check("literal \\_text\\_ stays").len(), 0);
        assert_eq!(check("\\_text\\_").len(), 0);
    }

    #[test]
    fn test_escaped_asterisk_before_word_flagged() {
        let findings = check("go \\*fast now");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].column, 4);
        assert!(findings[0].fixable);
    }

    #[test]
    fn test_escaped_asterisk_before_punctuation_not_fixable() {
        let findings = check("\\*! odd");
        assert_eq!(findings.len(), 1);
        assert!(!findings[0].fixable);
    }

    #[test]
    fn test_mid_word_escape_skipped() {
        assert_eq!(check("a\\*b").len(), 0);
    }

    #[test]
    fn test_fix_rewrites_underscores() {
        assert_eq!(fix("some _emphasis_ here"), "some *emphasis* here");
    }

    #[test]
    fn test_fix_unescapes_narrow_shape_only() {
        assert_eq!(fix("go \\*fast but keep \\*!"), "go *fast but keep \\*!");
    }

    #[test]
    fn test_fix_handles_both_patterns() {
        assert_eq!(fix("_mix_ and \\*go"), "*mix* and *go");
    }
}
