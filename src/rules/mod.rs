//! Rule contract and catalog.
//!
//! Every rule is a pure function over the documents and the resource graph;
//! findings flow through the rule-scoped reporter, so a rule has no return
//! value and no other side effects. Catalog order is fixed — it determines
//! diagnostic ordering, nothing else.

pub mod pipeline;
pub mod resource;
pub mod task;
pub mod trigger;

use crate::parse::{Document, ResourceGraph};
use crate::reporter::{RuleReporter, Severity};

pub type RuleCheck = fn(&[Document], &ResourceGraph, &mut RuleReporter);

pub struct Rule {
    /// Stable, user-facing identifier (used in configuration).
    pub name: &'static str,
    pub default_severity: Severity,
    pub check: RuleCheck,
}

pub const CATALOG: &[Rule] = &[
    Rule {
        name: "no-invalid-name",
        default_severity: Severity::Error,
        check: resource::no_invalid_name,
    },
    Rule {
        name: "no-resourceversion",
        default_severity: Severity::Error,
        check: resource::no_resourceversion,
    },
    Rule {
        name: "prefer-beta",
        default_severity: Severity::Warning,
        check: resource::prefer_beta,
    },
    Rule {
        name: "no-params-api-mix",
        default_severity: Severity::Error,
        check: task::no_params_api_mix,
    },
    Rule {
        name: "no-duplicate-param",
        default_severity: Severity::Error,
        check: task::no_duplicate_param,
    },
    Rule {
        name: "no-duplicate-env",
        default_severity: Severity::Error,
        check: task::no_duplicate_env,
    },
    Rule {
        name: "no-undefined-volume",
        default_severity: Severity::Error,
        check: task::no_undefined_volume,
    },
    Rule {
        name: "no-undefined-param",
        default_severity: Severity::Error,
        check: task::no_undefined_param,
    },
    Rule {
        name: "no-unused-param",
        default_severity: Severity::Warning,
        check: task::no_unused_param,
    },
    Rule {
        name: "no-latest-image",
        default_severity: Severity::Error,
        check: task::no_latest_image,
    },
    Rule {
        name: "no-pipeline-missing-task",
        default_severity: Severity::Error,
        check: pipeline::no_pipeline_missing_task,
    },
    Rule {
        name: "no-pipeline-missing-condition",
        default_severity: Severity::Error,
        check: pipeline::no_pipeline_missing_condition,
    },
    Rule {
        name: "no-pipeline-task-cycle",
        default_severity: Severity::Error,
        check: pipeline::no_pipeline_task_cycle,
    },
    Rule {
        name: "no-template-missing-pipeline",
        default_severity: Severity::Error,
        check: trigger::no_template_missing_pipeline,
    },
    Rule {
        name: "no-missing-param-value",
        default_severity: Severity::Warning,
        check: trigger::no_missing_param_value,
    },
];

/// Registry lookup by rule name, for tooling.
pub fn find(name: &str) -> Option<&'static Rule> {
    CATALOG.iter().find(|rule| rule.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_names_are_unique() {
        let mut names: Vec<_> = CATALOG.iter().map(|rule| rule.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), CATALOG.len());
    }

    #[test]
    fn find_resolves_known_rules() {
        assert!(find("no-pipeline-task-cycle").is_some());
        assert!(find("no-such-rule").is_none());
    }
}
