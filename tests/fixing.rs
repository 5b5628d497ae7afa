//! Integration tests for the auto-fix pipeline: combined fixes, round-trip
//! behavior, and idempotence.

use marklint::LintRunner;
use similar_asserts::assert_eq;

#[test]
fn test_combined_fixes_do_not_interfere() {
    let input = "#Intro\n\n- first item\n\n```js\nconsole.log(1)";
    let report = marklint::lint_with_fixes(input);

    assert_eq!(
        report.fixed_content.as_deref(),
        Some("# Intro\n\n* first item\n\n```js\nconsole.log(1)\n\n```")
    );
    assert!(report.findings.is_empty());
}

#[test]
fn test_heading_space_example() {
    let report = marklint::lint_with_fixes("#Heading\n##Another");
    assert_eq!(report.fixed_content.as_deref(), Some("# Heading\n## Another"));
}

#[test]
fn test_list_marker_example() {
    let report = marklint::lint_with_fixes("- item");
    assert_eq!(report.fixed_content.as_deref(), Some("* item"));
}

#[test]
fn test_bold_spacing_example() {
    let report = marklint::lint_with_fixes("This is**bold**text");
    assert_eq!(report.fixed_content.as_deref(), Some("This is **bold** text"));
}

#[test]
fn test_round_trip_leaves_no_fixable_findings() {
    let inputs = [
        "#Intro\n\n- first item\n\n```js\nconsole.log(1)",
        "## Notes\nsome _note_ taken\nwork is**hard**ok\nmath $$x+y$$ here\n\\*escaped",
        "#One\n#Two\n#Three",
        "mixed \\_escape\\_ and _style_ and**tight**bold",
    ];

    for input in inputs {
        let report = marklint::lint_with_fixes(input);
        let fixed = report.fixed_content.expect("fixable input");

        assert!(
            report.findings.iter().all(|f| !f.fixable),
            "fixable residue for {input:?}: {:?}",
            report.findings
        );

        // The residual findings in the report are exactly a fresh lint of
        // the fixed text.
        let relint = marklint::lint(&fixed);
        assert_eq!(relint.findings, report.findings);
    }
}

#[test]
fn test_fixing_is_idempotent() {
    let input = "#Intro\n\n- first item\n\nwork is**hard**ok";
    let first = marklint::lint_with_fixes(input);
    let fixed = first.fixed_content.expect("fixable input");

    // A second pass has nothing left to do.
    let second = marklint::lint_with_fixes(&fixed);
    assert!(second.fixed_content.is_none());
    assert!(second.findings.is_empty());
}

#[test]
fn test_nothing_to_fix_is_distinguishable() {
    // Suspicious inline math is reported but never rewritten.
    let report = marklint::lint_with_fixes("worth $100$ maybe");
    assert!(report.fixed_content.is_none());
    assert_eq!(report.findings.len(), 1);
    assert!(!report.findings[0].fixable);
}

#[test]
fn test_fixed_content_keeps_crlf_line_endings() {
    let report = marklint::lint_with_fixes("#Head\r\n- item\r\n");
    assert_eq!(report.fixed_content.as_deref(), Some("# Head\r\n* item\r\n"));
}

#[test]
fn test_progressive_fixing_with_explicit_runner() {
    let runner = LintRunner::default();

    let report = runner.lint_with_fixes("some \\*text and _more_");
    let fixed = report.fixed_content.expect("fixable input");

    // The unescape pass strips the escape before the emphasis pass runs;
    // neither reintroduces the other's defect.
    assert_eq!(fixed, "some *text and *more*");
    assert!(runner.lint(&fixed).findings.is_empty());
}
