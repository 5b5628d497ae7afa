use crate::diagnostics::Finding;

pub mod bold_spacing;
pub mod emphasis_style;
pub mod escape_asterisk;
pub mod fence_close;
pub mod heading_space;
pub mod list_marker_style;
pub mod math_formula;
pub mod unescape_markdown;

/// A rule-execution fault. Built-in rules never fail, but the runner
/// isolates failures so a defective custom rule cannot abort a lint pass.
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    /// A scan pattern could not be evaluated.
    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// The rule gave up on this document.
    #[error("{0}")]
    Failed(String),
}

/// One category of Markdown defect: how to find it and, optionally, how to
/// rewrite the document so it disappears.
///
/// Rules are stateless and pure. `check` must not mutate anything and must
/// report positions consistent with splitting the document on `'\n'`.
pub trait Rule: Send + Sync {
    /// Stable kebab-case identifier. This is the join key across the
    /// registry, persisted settings, and findings.
    fn id(&self) -> &'static str;

    /// Short display name.
    fn name(&self) -> &'static str;

    /// What the rule checks for, stated precisely enough that a settings
    /// screen can present the toggle.
    fn description(&self) -> &'static str;

    /// Whether the rule is active when the caller has not supplied an
    /// enabled-set of its own.
    fn enabled_by_default(&self) -> bool {
        true
    }

    /// Scan `document` and report every defect this rule recognizes.
    fn check(&self, document: &str) -> Result<Vec<Finding>, RuleError>;

    /// Rewrite `document` so that this rule's fixable findings no longer
    /// occur. Returns `None` for detection-only rules.
    ///
    /// `findings` are the findings this rule reported against an earlier
    /// snapshot; fixers re-derive positions from `document` itself, which
    /// may already carry other rules' fixes.
    fn fix(&self, document: &str, findings: &[Finding]) -> Option<Result<String, RuleError>> {
        let _ = (document, findings);
        None
    }
}

/// Ordered collection of rules. Registration order is the tie-breaking
/// order for findings and the order in which fixers run.
pub struct RuleRegistry {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn register(&mut self, rule: Box<dyn Rule>) {
        self.rules.push(rule);
    }

    pub fn rules(&self) -> &[Box<dyn Rule>] {
        &self.rules
    }

    pub fn get(&self, id: &str) -> Option<&dyn Rule> {
        self.rules
            .iter()
            .find(|rule| rule.id() == id)
            .map(|rule| rule.as_ref())
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Create the registry with all built-in rules in their canonical order.
pub fn default_registry() -> RuleRegistry {
    let mut registry = RuleRegistry::new();
    registry.register(Box::new(unescape_markdown::UnescapeMarkdownRule));
    registry.register(Box::new(escape_asterisk::EscapeAsteriskRule));
    registry.register(Box::new(heading_space::HeadingSpaceRule));
    registry.register(Box::new(fence_close::FenceCloseRule));
    registry.register(Box::new(math_formula::MathFormulaRule));
    registry.register(Box::new(emphasis_style::EmphasisStyleRule));
    registry.register(Box::new(list_marker_style::ListMarkerStyleRule));
    registry.register(Box::new(bold_spacing::BoldSpacingRule));
    registry
}
