//! A rule-based linter and auto-fix engine for Markdown documents.
//!
//! Independent rules scan a full-document snapshot for structural and
//! stylistic defects, report precisely-located findings, and can rewrite
//! the document so their findings disappear. Hosting applications construct
//! a [`LintRunner`] (or use the [`lint`] / [`lint_with_fixes`] shortcuts),
//! feed it editor text, and show the findings or the fixed text to the user.

pub mod config;
pub mod diagnostics;
pub mod report;
pub mod rules;
pub mod runner;
mod text;

pub use config::RuleSettings;
pub use diagnostics::{Edit, Finding, Severity, apply_edits};
pub use report::{format_findings, rule_counts};
pub use rules::{Rule, RuleError, RuleRegistry, default_registry};
pub use runner::{LintReport, LintRunner};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Lint `input` with the default rule set.
///
/// # Examples
///
/// ```no_run
/// let report = marklint::lint("#Missing space");
/// assert!(report.has_errors());
/// ```
pub fn lint(input: &str) -> LintReport {
    #[cfg(debug_assertions)]
    {
        init_logger();
    }

    LintRunner::default().lint(input)
}

/// Lint `input` with the default rule set and apply every available fix.
///
/// The returned report carries the rewritten document in `fixed_content`
/// (unless nothing was fixable) and the findings that remain against it.
///
/// # Examples
///
/// ```no_run
/// let report = marklint::lint_with_fixes("#Title");
/// assert_eq!(report.fixed_content.as_deref(), Some("# Title"));
/// ```
pub fn lint_with_fixes(input: &str) -> LintReport {
    #[cfg(debug_assertions)]
    {
        init_logger();
    }

    LintRunner::default().lint_with_fixes(input)
}
