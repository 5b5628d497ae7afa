use std::collections::{HashMap, HashSet};

use crate::config::RuleSettings;
use crate::diagnostics::{Finding, Severity};
use crate::rules::{Rule, RuleRegistry, default_registry};
use crate::text::detect_line_ending;

/// The outcome of one lint pass.
///
/// After `lint_with_fixes`, `findings` holds the residual findings against
/// `fixed_content`; a `fixed_content` of `None` means nothing was fixable.
#[derive(Debug, Clone)]
pub struct LintReport {
    pub findings: Vec<Finding>,
    pub fixed_content: Option<String>,
}

impl LintReport {
    pub fn has_errors(&self) -> bool {
        self.findings.iter().any(|f| f.severity == Severity::Error)
    }

    pub fn has_warnings(&self) -> bool {
        self.findings
            .iter()
            .any(|f| f.severity == Severity::Warning)
    }

    pub fn fixable_count(&self) -> usize {
        self.findings.iter().filter(|f| f.fixable).count()
    }
}

/// Runs an enabled subset of registered rules over full-document snapshots.
///
/// Construct one per session and hand it to whatever component needs
/// linting; rules are pure, so `&self` calls are safe from any number of
/// callers at once.
pub struct LintRunner {
    registry: RuleRegistry,
    enabled: HashSet<String>,
}

impl LintRunner {
    pub fn new(registry: RuleRegistry) -> Self {
        let enabled = registry
            .rules()
            .iter()
            .filter(|rule| rule.enabled_by_default())
            .map(|rule| rule.id().to_owned())
            .collect();

        Self { registry, enabled }
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Replace the enabled subset. Ids not present in the registry are
    /// ignored; calls already in flight keep the subset they started with.
    pub fn set_enabled_rules<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enabled = ids.into_iter().map(Into::into).collect();
    }

    /// Recompute the enabled subset from persisted settings: an explicit
    /// entry wins, otherwise the rule's default applies.
    pub fn apply_settings(&mut self, settings: &RuleSettings) {
        self.enabled = self
            .registry
            .rules()
            .iter()
            .filter(|rule| settings.is_enabled(rule.as_ref()))
            .map(|rule| rule.id().to_owned())
            .collect();
    }

    /// Enabled rules in registration order.
    pub fn enabled_rules(&self) -> impl Iterator<Item = &dyn Rule> {
        self.registry
            .rules()
            .iter()
            .map(|rule| rule.as_ref())
            .filter(|rule| self.enabled.contains(rule.id()))
    }

    /// Run every enabled rule and report findings sorted by (line, column),
    /// ties broken by registration order.
    pub fn lint(&self, input: &str) -> LintReport {
        let document = input.replace("\r\n", "\n");
        let findings = self.check_all(&document);

        LintReport {
            findings,
            fixed_content: None,
        }
    }

    /// Lint, apply every enabled rule's fixer, and re-lint the result so the
    /// report shows the residual state. When no finding is fixable the
    /// report carries `fixed_content: None` — the defined "nothing to do"
    /// outcome.
    pub fn lint_with_fixes(&self, input: &str) -> LintReport {
        let line_ending = detect_line_ending(input);
        let document = input.replace("\r\n", "\n");

        let findings = self.check_all(&document);
        if !findings.iter().any(|f| f.fixable) {
            return LintReport {
                findings,
                fixed_content: None,
            };
        }

        let fixed = self.apply_fixes(&document, &findings);
        let residual = self.check_all(&fixed);

        let fixed_content = if line_ending == "\r\n" {
            fixed.replace('\n', "\r\n")
        } else {
            fixed
        };

        LintReport {
            findings: residual,
            fixed_content: Some(fixed_content),
        }
    }

    fn check_all(&self, document: &str) -> Vec<Finding> {
        let mut findings = Vec::new();

        for rule in self.enabled_rules() {
            log::debug!("Running lint rule: {}", rule.id());
            match rule.check(document) {
                Ok(rule_findings) => {
                    log::debug!(
                        "Rule {} found {} finding(s)",
                        rule.id(),
                        rule_findings.len()
                    );
                    findings.extend(rule_findings);
                }
                Err(e) => {
                    // A defect in one rule must not abort the pass; the
                    // remaining rules still report.
                    log::warn!("Lint rule '{}' failed: {}", rule.id(), e);
                }
            }
        }

        findings.sort_by_key(|f| (f.line, f.column));
        findings
    }

    /// Thread the document through each rule's fixer in registration order,
    /// handing every rule its own fixable findings.
    fn apply_fixes(&self, document: &str, findings: &[Finding]) -> String {
        let mut by_rule: HashMap<&str, Vec<Finding>> = HashMap::new();
        for finding in findings.iter().filter(|f| f.fixable) {
            by_rule
                .entry(finding.rule_id.as_str())
                .or_default()
                .push(finding.clone());
        }

        let mut fixed = document.to_owned();
        for rule in self.enabled_rules() {
            let Some(rule_findings) = by_rule.get(rule.id()) else {
                continue;
            };
            match rule.fix(&fixed, rule_findings) {
                Some(Ok(next)) => fixed = next,
                Some(Err(e)) => {
                    log::warn!("Fix for rule '{}' failed: {}", rule.id(), e);
                }
                None => {}
            }
        }

        fixed
    }
}

impl Default for LintRunner {
    fn default() -> Self {
        Self::new(default_registry())
    }
}
