//! Lint orchestration.
//!
//! One pass: build the resource graph, enforce global name uniqueness,
//! dispatch the rule catalog under the caller's configuration, then run the
//! cross-resource analyses. Everything is synchronous and read-only; the
//! diagnostic list is the only output.

use std::collections::{HashMap, HashSet};
use std::panic::{self, AssertUnwindSafe};

use crate::analysis;
use crate::config::RulesConfig;
use crate::parse::{Document, ResourceGraph};
use crate::reporter::{Diagnostic, Location, Reporter, RuleReporter};
use crate::rules;

/// Lint with every rule enabled at its default severity.
pub fn lint(documents: &[Document]) -> Vec<Diagnostic> {
    lint_with_config(documents, &RulesConfig::default())
}

pub fn lint_with_config(documents: &[Document], config: &RulesConfig) -> Vec<Diagnostic> {
    let mut reporter = Reporter::new();

    let graph = ResourceGraph::build(documents, &mut reporter);
    check_duplicate_definitions(documents, &mut reporter);
    run_rules(documents, &graph, rules::CATALOG, config, &mut reporter);
    analysis::run_all(documents, &graph, &mut reporter);

    reporter.into_problems()
}

fn run_rules(
    documents: &[Document],
    graph: &ResourceGraph,
    catalog: &[rules::Rule],
    config: &RulesConfig,
    reporter: &mut Reporter,
) {
    for rule in catalog {
        let Some(severity) = config.resolve(rule) else {
            continue;
        };
        let mut scoped = RuleReporter::new(rule.name, severity, reporter);
        // A buggy rule must not take the whole run down: trap its panic,
        // surface it as a diagnostic and keep going.
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            (rule.check)(documents, graph, &mut scoped)
        }));
        if outcome.is_err() {
            reporter.error(
                format!("rule '{}' failed internally and was skipped", rule.name),
                Location::resource("rule", rule.name),
            );
        }
    }
}

/// Within a kind, names are unique. The second and later occurrences of a
/// `(kind, name)` pair are flagged; every later consumer may then assume one
/// definition per key.
fn check_duplicate_definitions(documents: &[Document], reporter: &mut Reporter) {
    let mut names: HashMap<&str, HashSet<&str>> = HashMap::new();
    for doc in documents {
        let seen = names.entry(doc.kind.as_str()).or_default();
        if !seen.insert(doc.name.as_str()) {
            reporter.error(
                format!("'{}' is already defined (as a '{}')", doc.name, doc.kind),
                Location::resource(&doc.kind, &doc.name)
                    .at("metadata.name")
                    .field("name"),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporter::Severity;
    use crate::rules::Rule;

    fn panicking(_: &[Document], _: &ResourceGraph, _: &mut RuleReporter) {
        panic!("boom");
    }

    fn reporting(_: &[Document], _: &ResourceGraph, report: &mut RuleReporter) {
        report.report("ran", Location::resource("Task", "t"));
    }

    #[test]
    fn panicking_rule_is_isolated_and_the_run_continues() {
        let catalog = [
            Rule {
                name: "exploding-rule",
                default_severity: Severity::Error,
                check: panicking,
            },
            Rule {
                name: "well-behaved-rule",
                default_severity: Severity::Warning,
                check: reporting,
            },
        ];

        let mut reporter = Reporter::new();
        let graph = ResourceGraph::build(&[], &mut reporter);
        run_rules(&[], &graph, &catalog, &RulesConfig::default(), &mut reporter);

        let problems = reporter.into_problems();
        assert_eq!(problems.len(), 2);

        assert_eq!(problems[0].severity, Severity::Error);
        assert_eq!(problems[0].rule, None);
        assert_eq!(
            problems[0].message,
            "rule 'exploding-rule' failed internally and was skipped"
        );

        assert_eq!(problems[1].rule.as_deref(), Some("well-behaved-rule"));
        assert_eq!(problems[1].message, "ran");
    }
}
