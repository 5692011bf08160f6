//! Parameter resolution across reference edges.

mod helpers;

use helpers::{containing, from_rule, lint_yaml};
use tekton_lint::reporter::Severity;

#[test]
fn extra_param_on_task_ref_is_an_error() {
    let diagnostics = lint_yaml(
        "\
kind: Task
metadata:
  name: build
spec:
  params:
    - name: a
  steps:
    - name: run
      image: alpine:3.19
      env:
        - name: A
          value: $(params.a)
---
kind: Pipeline
metadata:
  name: p
spec:
  tasks:
    - name: invoke-build
      taskRef:
        name: build
      params:
        - name: a
          value: one
        - name: b
          value: two
",
    );
    let extra = containing(&diagnostics, "it's not a valid parameter");
    assert_eq!(extra.len(), 1);
    assert!(extra[0].message.contains("'b'"));
    assert_eq!(extra[0].severity, Severity::Error);
}

#[test]
fn extra_param_on_inline_task_spec_names_the_invocation_once() {
    let diagnostics = lint_yaml(
        "\
kind: Pipeline
metadata:
  name: p
spec:
  tasks:
    - name: inline
      taskSpec:
        params:
          - name: a
            default: fallback
        steps:
          - name: run
            image: alpine:3.19
            env:
              - name: A
                value: $(params.a)
      params:
        - name: a
          value: one
        - name: b
          value: two
",
    );
    let extra = containing(&diagnostics, "it's not a valid parameter");
    assert_eq!(extra.len(), 1);
    assert!(extra[0].message.contains("references task 'inline', and supplies parameter 'b'"));
    assert!(!extra[0].message.contains("(as "));
}

#[test]
fn missing_required_param_on_inline_task_spec() {
    let diagnostics = lint_yaml(
        "\
kind: Pipeline
metadata:
  name: p
spec:
  tasks:
    - name: inline
      taskSpec:
        params:
          - name: a
        steps:
          - name: run
            image: alpine:3.19
            env:
              - name: A
                value: $(params.a)
",
    );
    let missing = containing(&diagnostics, "is not supplied");
    assert_eq!(missing.len(), 1);
    assert!(missing[0].message.contains("'a'"));
}

#[test]
fn defaulted_params_are_not_required() {
    let diagnostics = lint_yaml(
        "\
kind: Pipeline
metadata:
  name: p
spec:
  tasks:
    - name: inline
      taskSpec:
        params:
          - name: a
            default: fallback
        steps:
          - name: run
            image: alpine:3.19
            env:
              - name: A
                value: $(params.a)
",
    );
    assert!(containing(&diagnostics, "is not supplied").is_empty());
}

#[test]
fn duplicate_supplied_param_is_an_error() {
    let diagnostics = lint_yaml(
        "\
kind: Task
metadata:
  name: build
spec:
  params:
    - name: a
  steps:
    - name: run
      image: alpine:3.19
      env:
        - name: A
          value: $(params.a)
---
kind: Pipeline
metadata:
  name: p
spec:
  tasks:
    - name: invoke-build
      taskRef:
        name: build
      params:
        - name: a
          value: one
        - name: a
          value: two
",
    );
    let duplicates = containing(&diagnostics, "duplicate param name");
    assert_eq!(duplicates.len(), 1);
    assert!(duplicates[0].message.contains("'a'"));
}

#[test]
fn unknown_task_ref_is_left_to_the_existence_rule() {
    let diagnostics = lint_yaml(
        "\
kind: Pipeline
metadata:
  name: p
spec:
  tasks:
    - name: invoke-ghost
      taskRef:
        name: ghost
      params:
        - name: whatever
          value: x
",
    );
    // The analysis stays silent; only the existence rule fires.
    assert!(containing(&diagnostics, "valid parameter").is_empty());
    assert_eq!(from_rule(&diagnostics, "no-pipeline-missing-task").len(), 1);
}

#[test]
fn template_params_missing_and_extra() {
    let diagnostics = lint_yaml(
        "\
kind: Pipeline
metadata:
  name: p
spec:
  params:
    - name: needed
  tasks:
    - name: noop
      taskSpec:
        steps:
          - name: run
            image: alpine:3.19
            env:
              - name: N
                value: $(params.needed)
---
kind: TriggerTemplate
metadata:
  name: t
spec:
  resourcetemplates:
    - kind: PipelineRun
      spec:
        pipelineRef:
          name: p
        params:
          - name: surplus
            value: x
",
    );
    let missing = containing(&diagnostics, "not supplied in triggerTemplate");
    assert_eq!(missing.len(), 1);
    assert!(missing[0].message.contains("'needed'"));
    assert_eq!(missing[0].severity, Severity::Error);

    let extra = containing(&diagnostics, "it's not a valid parameter");
    assert_eq!(extra.len(), 1);
    assert!(extra[0].message.contains("'surplus'"));
    assert_eq!(extra[0].severity, Severity::Warning);
}

#[test]
fn duplicate_declarations_within_one_resource() {
    let diagnostics = lint_yaml(
        "\
kind: Pipeline
metadata:
  name: p
spec:
  params:
    - name: tag
    - name: tag
  tasks:
    - name: noop
      taskSpec:
        steps:
          - name: run
            image: alpine:3.19
            env:
              - name: T
                value: $(params.tag)
",
    );
    let duplicates = from_rule(&diagnostics, "no-duplicate-param");
    assert_eq!(duplicates.len(), 1);
    assert!(duplicates[0].message.contains("'tag'"));
}
