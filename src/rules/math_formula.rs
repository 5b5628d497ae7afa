use crate::diagnostics::{Finding, char_column};
use crate::rules::{Rule, RuleError};

/// Split `line` at its first `$$…$$` pair when text sits outside the pair:
/// leading text, `$$`, formula body, `$$`, trailing text, with empty outer
/// pieces dropped. `None` when the line needs no split.
fn split_display_line(line: &str) -> Option<Vec<String>> {
    let parts: Vec<&str> = line.split("$$").collect();
    if parts.len() < 3 {
        return None;
    }

    let before = parts[0].trim();
    let rest = parts[2..].join("$$");
    let after = rest.trim();
    if before.is_empty() && after.is_empty() {
        return None;
    }

    let mut out = Vec::new();
    if !before.is_empty() {
        out.push(before.to_owned());
    }
    out.push("$$".to_owned());
    out.push(parts[1].to_owned());
    out.push("$$".to_owned());
    if !after.is_empty() {
        out.push(after.to_owned());
    }
    Some(out)
}

fn looks_like_math(content: &str) -> bool {
    content
        .chars()
        .any(|c| c.is_ascii_alphabetic() || "+-*/=<>^_{}\\".contains(c))
}

/// Byte offsets of opening `$` delimiters of inline `$…$` pairs whose
/// content does not look like math. A `$` that is part of `$$` never opens
/// or closes an inline pair.
fn suspicious_inline_dollars(line: &str) -> Vec<usize> {
    let bytes = line.as_bytes();
    let mut offsets = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'$' && (i + 1 >= bytes.len() || bytes[i + 1] != b'$') {
            if let Some(rel) = bytes[i + 1..].iter().position(|&c| c == b'$') {
                let close = i + 1 + rel;
                if close + 1 >= bytes.len() || bytes[close + 1] != b'$' {
                    let content = &line[i + 1..close];
                    if !content.is_empty() && !looks_like_math(content.trim()) {
                        offsets.push(i);
                    }
                    i = close + 1;
                    continue;
                }
            }
        }
        i += 1;
    }

    offsets
}

/// Display math belongs on its own lines; an inline `$…$` pair with no
/// math-like content is probably an accidental dollar pairing.
pub struct MathFormulaRule;

impl Rule for MathFormulaRule {
    fn id(&self) -> &'static str {
        "math-formula"
    }

    fn name(&self) -> &'static str {
        "Math Formula Format"
    }

    fn description(&self) -> &'static str {
        "Put display math ($$) on its own lines and flag suspicious inline $ pairs"
    }

    fn check(&self, document: &str) -> Result<Vec<Finding>, RuleError> {
        let mut findings = Vec::new();

        for (index, line) in document.split('\n').enumerate() {
            let delimiters: Vec<usize> = line.match_indices("$$").map(|(i, _)| i).collect();
            for pair in delimiters.chunks(2) {
                let &[open, close] = pair else { continue };
                let before = line[..open].trim();
                let after = line[close + 2..].trim();
                if !before.is_empty() || !after.is_empty() {
                    findings.push(
                        Finding::warning(
                            index + 1,
                            char_column(line, open),
                            self.id(),
                            "Display math ($$) should be on separate lines",
                        )
                        .fixable(),
                    );
                }
            }

            for offset in suspicious_inline_dollars(line) {
                findings.push(Finding::warning(
                    index + 1,
                    char_column(line, offset),
                    self.id(),
                    "Consider escaping $ if not used for math",
                ));
            }
        }

        Ok(findings)
    }

    fn fix(&self, document: &str, _findings: &[Finding]) -> Option<Result<String, RuleError>> {
        let mut lines: Vec<String> = document.split('\n').map(str::to_owned).collect();

        let mut i = lines.len();
        while i > 0 {
            i -= 1;
            if let Some(replacement) = split_display_line(&lines[i]) {
                let len = replacement.len();
                lines.splice(i..=i, replacement);
                // The trailing piece may still hold a pair; re-walk the
                // replacement before moving further up.
                i += len;
            }
        }

        Some(Ok(lines.join("\n")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(input: &str) -> Vec<Finding> {
        MathFormulaRule.check(input).unwrap()
    }

    fn fix(input: &str) -> String {
        let findings = check(input);
        MathFormulaRule.fix(input, &findings).unwrap().unwrap()
    }

    #[test]
    fn test_display_math_sharing_a_line() {
        let findings = check("The formula $$E=mc^2$$ is famous");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].line, 1);
        assert_eq!(findings[0].column, 13);
        assert!(findings[0].fixable);
    }

    #[test]
    fn test_standalone_display_block_clean() {
        assert_eq!(check("$$\nE = mc^2\n$$").len(), 0);
    }

    #[test]
    fn test_fix_splits_display_line() {
        assert_eq!(
            fix("The formula $$E=mc^2$$ is famous"),
            "The formula\n$$\nE=mc^2\n$$\nis famous"
        );
    }

    #[test]
    fn test_fix_resolves_every_pair_on_a_line() {
        let fixed = fix("a $$x$$ b $$y$$ c");
        assert_eq!(fixed, "a\n$$\nx\n$$\nb\n$$\ny\n$$\nc");
        assert!(check(&fixed).is_empty());
    }

    #[test]
    fn test_suspicious_inline_dollars_not_fixable() {
        let findings = check("That costs $100$ these days");
        assert_eq!(findings.len(), 1);
        assert!(!findings[0].fixable);
        assert!(findings[0].message.contains("escaping $"));
    }

    #[test]
    fn test_mathy_inline_dollars_clean() {
        assert_eq!(check("where $x + y$ holds").len(), 0);
        assert_eq!(check("let $n$ be an integer").len(), 0);
    }

    #[test]
    fn test_unpaired_display_delimiter_ignored() {
        assert_eq!(check("dangling $$ here").len(), 0);
        let input = "dangling $$ here";
        assert_eq!(fix(input), input);
    }
}
