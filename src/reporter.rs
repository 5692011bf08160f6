//! Diagnostic accumulation.
//!
//! A lint run owns one [`Reporter`]; catalog rules see it through a
//! [`RuleReporter`] that stamps the rule name and the configuration-resolved
//! severity onto every finding.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Where a diagnostic points: the owning resource, plus an optional path
/// into its document tree and an optional field key within that node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    pub kind: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl Location {
    pub fn resource(kind: &str, name: &str) -> Self {
        Location {
            kind: kind.to_string(),
            name: name.to_string(),
            path: None,
            field: None,
        }
    }

    pub fn at(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn field(mut self, key: &str) -> Self {
        self.field = Some(key.to_string());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Catalog rule that produced this finding; `None` for structural checks
    /// and the cross-resource analyses, which are not configurable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<String>,
    pub message: String,
    pub location: Location,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] {} ({} '{}')",
            self.severity, self.message, self.location.kind, self.location.name
        )
    }
}

/// Shared accumulator for one lint run.
#[derive(Debug, Default)]
pub struct Reporter {
    problems: Vec<Diagnostic>,
}

impl Reporter {
    pub fn new() -> Self {
        Reporter::default()
    }

    pub fn error(&mut self, message: impl Into<String>, location: Location) {
        self.push(Severity::Error, None, message, location);
    }

    pub fn warning(&mut self, message: impl Into<String>, location: Location) {
        self.push(Severity::Warning, None, message, location);
    }

    pub(crate) fn push(
        &mut self,
        severity: Severity,
        rule: Option<&str>,
        message: impl Into<String>,
        location: Location,
    ) {
        self.problems.push(Diagnostic {
            severity,
            rule: rule.map(str::to_string),
            message: message.into(),
            location,
        });
    }

    pub fn problems(&self) -> &[Diagnostic] {
        &self.problems
    }

    pub fn into_problems(self) -> Vec<Diagnostic> {
        self.problems
    }
}

/// Rule-scoped view of the shared [`Reporter`]: every report carries the
/// rule's name and its configuration-resolved severity.
pub struct RuleReporter<'a> {
    rule: &'static str,
    severity: Severity,
    reporter: &'a mut Reporter,
}

impl<'a> RuleReporter<'a> {
    pub fn new(rule: &'static str, severity: Severity, reporter: &'a mut Reporter) -> Self {
        RuleReporter {
            rule,
            severity,
            reporter,
        }
    }

    pub fn report(&mut self, message: impl Into<String>, location: Location) {
        self.reporter
            .push(self.severity, Some(self.rule), message, location);
    }
}
