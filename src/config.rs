//! Per-rule configuration.
//!
//! Plain serde data supplied by the caller (the CLI layer loads it from
//! wherever it likes). Rules absent from the map run at their catalog
//! default severity.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::reporter::Severity;
use crate::rules::Rule;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RulesConfig {
    #[serde(default)]
    pub rules: BTreeMap<String, RuleSettings>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RuleSettings {
    #[serde(default = "enabled_default")]
    pub enabled: bool,
    #[serde(default)]
    pub severity: Option<Severity>,
}

fn enabled_default() -> bool {
    true
}

impl RulesConfig {
    /// Effective severity for a rule; `None` means disabled.
    pub fn resolve(&self, rule: &Rule) -> Option<Severity> {
        match self.rules.get(rule.name) {
            Some(settings) if !settings.enabled => None,
            Some(settings) => Some(settings.severity.unwrap_or(rule.default_severity)),
            None => Some(rule.default_severity),
        }
    }

    /// Disable one rule (builder-style, mostly for tests and tooling).
    pub fn disable(mut self, rule_name: &str) -> Self {
        self.rules.insert(
            rule_name.to_string(),
            RuleSettings {
                enabled: false,
                severity: None,
            },
        );
        self
    }

    /// Override one rule's severity.
    pub fn with_severity(mut self, rule_name: &str, severity: Severity) -> Self {
        self.rules.insert(
            rule_name.to_string(),
            RuleSettings {
                enabled: true,
                severity: Some(severity),
            },
        );
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules;

    #[test]
    fn unset_rules_run_at_default_severity() {
        let config = RulesConfig::default();
        for rule in rules::CATALOG {
            assert_eq!(config.resolve(rule), Some(rule.default_severity));
        }
    }

    #[test]
    fn deserializes_from_yaml() {
        let config: RulesConfig = serde_yaml::from_str(
            "rules:\n  no-latest-image:\n    enabled: false\n  prefer-beta:\n    severity: error\n",
        )
        .unwrap();
        let latest = rules::find("no-latest-image").unwrap();
        let beta = rules::find("prefer-beta").unwrap();
        assert_eq!(config.resolve(latest), None);
        assert_eq!(config.resolve(beta), Some(Severity::Error));
    }
}
