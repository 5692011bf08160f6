//! Shared builders for the integration suites.

#![allow(dead_code)]

use tekton_lint::config::RulesConfig;
use tekton_lint::engine;
use tekton_lint::parse;
use tekton_lint::reporter::Diagnostic;

/// Parse a YAML stream and lint it with the default configuration.
pub fn lint_yaml(yaml: &str) -> Vec<Diagnostic> {
    let docs = parse::parse_yaml(yaml).expect("fixture should parse");
    engine::lint(&docs)
}

pub fn lint_yaml_with(yaml: &str, config: &RulesConfig) -> Vec<Diagnostic> {
    let docs = parse::parse_yaml(yaml).expect("fixture should parse");
    engine::lint_with_config(&docs, config)
}

/// Diagnostics produced by one catalog rule.
pub fn from_rule<'a>(diagnostics: &'a [Diagnostic], rule: &str) -> Vec<&'a Diagnostic> {
    diagnostics
        .iter()
        .filter(|d| d.rule.as_deref() == Some(rule))
        .collect()
}

/// Diagnostics whose message contains the given fragment.
pub fn containing<'a>(diagnostics: &'a [Diagnostic], fragment: &str) -> Vec<&'a Diagnostic> {
    diagnostics
        .iter()
        .filter(|d| d.message.contains(fragment))
        .collect()
}
