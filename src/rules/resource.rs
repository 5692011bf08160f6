//! Kind-agnostic document rules.

use std::sync::LazyLock;

use regex::Regex;

use crate::parse::{Document, ResourceGraph};
use crate::reporter::{Location, RuleReporter};

// DNS-1123 label, the shape every resource name must take to be applyable.
static VALID_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?$").expect("valid regex"));

pub fn no_invalid_name(docs: &[Document], _graph: &ResourceGraph, report: &mut RuleReporter) {
    for doc in docs {
        if !VALID_NAME.is_match(&doc.name) || doc.name.len() > 63 {
            report.report(
                format!(
                    "Invalid name '{}' for {}: names must be lowercase alphanumeric, optionally separated by dashes",
                    doc.name, doc.kind
                ),
                Location::resource(&doc.kind, &doc.name)
                    .at("metadata.name")
                    .field("name"),
            );
        }
    }
}

pub fn no_resourceversion(docs: &[Document], _graph: &ResourceGraph, report: &mut RuleReporter) {
    for doc in docs {
        let has_resource_version = doc
            .value
            .get("metadata")
            .and_then(|metadata| metadata.get("resourceVersion"))
            .is_some();
        if has_resource_version {
            report.report(
                format!(
                    "{} '{}' sets 'metadata.resourceVersion'; it is managed by the cluster and must not appear in definitions",
                    doc.kind, doc.name
                ),
                Location::resource(&doc.kind, &doc.name)
                    .at("metadata.resourceVersion")
                    .field("resourceVersion"),
            );
        }
    }
}

pub fn prefer_beta(docs: &[Document], _graph: &ResourceGraph, report: &mut RuleReporter) {
    for doc in docs {
        let Some(api_version) = &doc.api_version else {
            continue;
        };
        if api_version.contains("alpha") {
            report.report(
                format!(
                    "{} '{}' uses apiVersion '{}': migrate to a beta apiVersion",
                    doc.kind, doc.name, api_version
                ),
                Location::resource(&doc.kind, &doc.name)
                    .at("apiVersion")
                    .field("apiVersion"),
            );
        }
    }
}
