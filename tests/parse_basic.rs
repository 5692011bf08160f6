//! Parse phase integration: multi-document streams, typed graph grouping,
//! legacy parameter-shape normalization.

use tekton_lint::parse::{self, ResourceGraph};
use tekton_lint::reporter::Reporter;

#[test]
fn parse_valid_stream() {
    let docs = parse::parse_yaml(include_str!("fixtures/valid.yaml")).expect("should parse");
    assert_eq!(docs.len(), 5);
    assert_eq!(docs[0].kind, "Task");
    assert_eq!(docs[0].name, "build-image");
    assert_eq!(docs[2].kind, "Pipeline");
    assert_eq!(
        docs[2].api_version.as_deref(),
        Some("tekton.dev/v1beta1")
    );
}

#[test]
fn graph_groups_by_kind() {
    let docs = parse::parse_yaml(include_str!("fixtures/valid.yaml")).unwrap();
    let mut reporter = Reporter::new();
    let graph = ResourceGraph::build(&docs, &mut reporter);

    assert!(reporter.problems().is_empty());
    assert_eq!(graph.tasks.len(), 2);
    assert_eq!(graph.pipelines.len(), 1);
    assert_eq!(graph.trigger_templates.len(), 1);
    assert_eq!(graph.trigger_bindings.len(), 1);
    assert!(graph.conditions.is_empty());
}

#[test]
fn legacy_inputs_params_are_normalized() {
    let docs = parse::parse_yaml(
        "\
kind: Task
metadata:
  name: legacy
spec:
  inputs:
    params:
      - name: revision
      - name: url
        default: https://example.com
",
    )
    .unwrap();
    let mut reporter = Reporter::new();
    let graph = ResourceGraph::build(&docs, &mut reporter);

    let params = graph.tasks["legacy"].spec.params();
    assert_eq!(params.len(), 2);
    assert_eq!(params[0].name, "revision");
    assert!(params[0].is_required());
    assert!(!params[1].is_required());
}

#[test]
fn unrecognized_kinds_stay_out_of_the_graph() {
    let docs = parse::parse_yaml(
        "kind: EventListener\nmetadata:\n  name: listener\n",
    )
    .unwrap();
    let mut reporter = Reporter::new();
    let graph = ResourceGraph::build(&docs, &mut reporter);

    assert!(reporter.problems().is_empty());
    assert!(graph.pipelines.is_empty());
    assert!(graph.tasks.is_empty());
    // Still linted by kind-agnostic rules via the flat list.
    assert_eq!(docs.len(), 1);
}
