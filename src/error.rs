//! Fail-hard errors at the parse boundary.
//!
//! Everything past parsing is collected as [`crate::reporter::Diagnostic`]
//! values; only an unreadable input stream or a document missing its minimal
//! shape aborts a run.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LintError {
    #[error("failed to parse YAML stream: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("failed to parse JSON document: {0}")]
    Json(#[from] serde_json::Error),

    /// A document that cannot be reduced to the `{kind, metadata.name}` shape.
    #[error("document {index} is malformed: {reason}")]
    MalformedDocument { index: usize, reason: &'static str },
}
