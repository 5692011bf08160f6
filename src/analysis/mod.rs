//! Cross-resource consistency analyses.
//!
//! These checks are too graph-global to be ordinary catalog rules: each one
//! reasons about data flowing across reference edges between resources. They
//! run after the catalog, in fixed order, against the finished resource
//! graph, and report directly at their fixed severities (configuration does
//! not apply to them).

pub mod params;
pub mod references;
pub mod workspaces;

use crate::parse::{Document, ResourceGraph};
use crate::reporter::Reporter;

pub fn run_all(documents: &[Document], graph: &ResourceGraph, reporter: &mut Reporter) {
    params::check_task_params(graph, reporter);
    params::check_template_params(graph, reporter);
    workspaces::check_pipeline_task_workspaces(graph, reporter);
    workspaces::check_trigger_workspaces(graph, reporter);
    references::check_task_name_references(graph, reporter);
    references::check_result_references(documents, graph, reporter);
}
