//! Parse phase: YAML/JSON manifests → flat [`Document`] list.
//!
//! Discovery (glob expansion, file IO) belongs to the caller; this boundary
//! takes raw text and enforces the minimal `{kind, metadata.name}` shape
//! every downstream consumer assumes.

pub mod graph;
pub mod types;

pub use graph::ResourceGraph;

use serde::Deserialize;
use serde_yaml::Value;

use crate::error::LintError;

/// A parsed resource document in its generic tree form.
#[derive(Debug, Clone)]
pub struct Document {
    pub kind: String,
    pub api_version: Option<String>,
    pub name: String,
    /// The full document tree, consumed by kind-agnostic rules and the
    /// tree walker.
    pub value: Value,
}

/// Parse a (possibly multi-document) YAML stream.
pub fn parse_yaml(input: &str) -> Result<Vec<Document>, LintError> {
    let mut documents = Vec::new();
    for de in serde_yaml::Deserializer::from_str(input) {
        let value = Value::deserialize(de)?;
        if value.is_null() {
            // Empty documents between `---` separators are not defects.
            continue;
        }
        documents.push(from_value(value, documents.len())?);
    }
    Ok(documents)
}

/// Parse a single JSON manifest (Kubernetes accepts both serializations).
pub fn parse_json(input: &str) -> Result<Vec<Document>, LintError> {
    let json: serde_json::Value = serde_json::from_str(input)?;
    let value = serde_yaml::to_value(&json)?;
    Ok(vec![from_value(value, 0)?])
}

/// Wrap an already-parsed tree, enforcing the minimal document shape.
pub fn from_value(value: Value, index: usize) -> Result<Document, LintError> {
    if !value.is_mapping() {
        return Err(LintError::MalformedDocument {
            index,
            reason: "not a mapping",
        });
    }

    let kind = value
        .get("kind")
        .and_then(Value::as_str)
        .ok_or(LintError::MalformedDocument {
            index,
            reason: "missing 'kind'",
        })?
        .to_string();

    let name = value
        .get("metadata")
        .and_then(|metadata| metadata.get("name"))
        .and_then(Value::as_str)
        .ok_or(LintError::MalformedDocument {
            index,
            reason: "missing 'metadata.name'",
        })?
        .to_string();

    let api_version = value
        .get("apiVersion")
        .and_then(Value::as_str)
        .map(str::to_string);

    Ok(Document {
        kind,
        api_version,
        name,
        value,
    })
}
