use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::rules::{Rule, RuleRegistry};

/// Per-rule enablement, exactly as the host application persists it: a flat
/// rule-id → bool map.
///
/// The engine never touches disk; the host reads this at startup and writes
/// it back whenever the user toggles a rule. Ids missing from the map fall
/// back to the rule's own default, so a settings file written against an
/// older rule set keeps working.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSettings {
    rules: BTreeMap<String, bool>,
}

impl RuleSettings {
    /// Settings with every registered rule written out explicitly at its
    /// default state.
    pub fn defaults(registry: &RuleRegistry) -> Self {
        let rules = registry
            .rules()
            .iter()
            .map(|rule| (rule.id().to_owned(), rule.enabled_by_default()))
            .collect();

        Self { rules }
    }

    pub fn set(&mut self, id: impl Into<String>, enabled: bool) {
        self.rules.insert(id.into(), enabled);
    }

    /// Whether `rule` is active under these settings: an explicit entry
    /// wins, otherwise the rule's default applies.
    pub fn is_enabled(&self, rule: &dyn Rule) -> bool {
        self.rules
            .get(rule.id())
            .copied()
            .unwrap_or_else(|| rule.enabled_by_default())
    }

    /// Ids of the rules active under these settings, in registration order.
    pub fn enabled_ids(&self, registry: &RuleRegistry) -> Vec<String> {
        registry
            .rules()
            .iter()
            .filter(|rule| self.is_enabled(rule.as_ref()))
            .map(|rule| rule.id().to_owned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::default_registry;

    #[test]
    fn test_defaults_follow_rule_flags() {
        let registry = default_registry();
        let settings = RuleSettings::defaults(&registry);

        assert!(settings.is_enabled(registry.get("heading-space").unwrap()));
        assert!(!settings.is_enabled(registry.get("escape-asterisk").unwrap()));
    }

    #[test]
    fn test_explicit_entry_overrides_default() {
        let registry = default_registry();
        let mut settings = RuleSettings::default();

        settings.set("heading-space", false);
        settings.set("escape-asterisk", true);

        assert!(!settings.is_enabled(registry.get("heading-space").unwrap()));
        assert!(settings.is_enabled(registry.get("escape-asterisk").unwrap()));
        // Untouched rules keep their defaults.
        assert!(settings.is_enabled(registry.get("fence-close").unwrap()));
    }

    #[test]
    fn test_serializes_as_flat_map() {
        let mut settings = RuleSettings::default();
        settings.set("fence-close", true);
        settings.set("heading-space", false);

        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(json, r#"{"fence-close":true,"heading-space":false}"#);

        let back: RuleSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, settings);
    }

    #[test]
    fn test_enabled_ids_in_registration_order() {
        let registry = default_registry();
        let settings = RuleSettings::defaults(&registry);
        let ids = settings.enabled_ids(&registry);

        assert_eq!(ids.first().map(String::as_str), Some("unescape-markdown"));
        assert!(!ids.contains(&"escape-asterisk".to_owned()));
        assert_eq!(ids.len(), registry.rules().len() - 1);
    }
}
