//! Task-local rules, plus the parameter hygiene rules that apply the same
//! check across every kind that declares parameters.

use std::collections::BTreeSet;

use serde_yaml::Value;

use crate::parse::types::Step;
use crate::parse::{Document, ResourceGraph};
use crate::reference;
use crate::reporter::{Location, RuleReporter};
use crate::walk::{Segment, walk};

pub fn no_params_api_mix(_docs: &[Document], graph: &ResourceGraph, report: &mut RuleReporter) {
    for task in graph.tasks.values() {
        if task.spec.params.is_some() && task.spec.inputs.is_some() {
            report.report(
                format!(
                    "Task '{}' defines parameters both under 'spec.params' and 'spec.inputs.params'; use a single parameter API",
                    task.metadata.name
                ),
                Location::resource("Task", &task.metadata.name).at("spec"),
            );
        }
    }
}

pub fn no_duplicate_param(_docs: &[Document], graph: &ResourceGraph, report: &mut RuleReporter) {
    for pipeline in graph.pipelines.values() {
        let names = pipeline.spec.params.iter().map(|p| p.name.as_str());
        report_duplicates("Pipeline", &pipeline.metadata.name, names, report);
    }
    for task in graph.tasks.values() {
        let names = task.spec.params().iter().map(|p| p.name.as_str());
        report_duplicates("Task", &task.metadata.name, names, report);
    }
    for template in graph.trigger_templates.values() {
        let names = template.spec.params.iter().map(|p| p.name.as_str());
        report_duplicates("TriggerTemplate", &template.metadata.name, names, report);
    }
    for binding in graph.trigger_bindings.values() {
        let names = binding.spec.params.iter().map(|p| p.name.as_str());
        report_duplicates("TriggerBinding", &binding.metadata.name, names, report);
    }
    for condition in graph.conditions.values() {
        let names = condition.spec.params.iter().map(|p| p.name.as_str());
        report_duplicates("Condition", &condition.metadata.name, names, report);
    }
}

fn report_duplicates<'a>(
    kind: &str,
    name: &str,
    params: impl Iterator<Item = &'a str>,
    report: &mut RuleReporter,
) {
    let mut seen = BTreeSet::new();
    for param in params {
        if !seen.insert(param) {
            report.report(
                format!("{} '{}' declares parameter '{}' more than once", kind, name, param),
                Location::resource(kind, name).field("name"),
            );
        }
    }
}

pub fn no_duplicate_env(_docs: &[Document], graph: &ResourceGraph, report: &mut RuleReporter) {
    for task in graph.tasks.values() {
        for step in &task.spec.steps {
            let mut seen = BTreeSet::new();
            for env in &step.env {
                if !seen.insert(env.name.as_str()) {
                    report.report(
                        format!(
                            "Step '{}' in Task '{}' defines environment variable '{}' more than once",
                            step.name, task.metadata.name, env.name
                        ),
                        Location::resource("Task", &task.metadata.name).field("name"),
                    );
                }
            }
        }
        if let Some(template) = &task.spec.step_template {
            let mut seen = BTreeSet::new();
            for env in &template.env {
                if !seen.insert(env.name.as_str()) {
                    report.report(
                        format!(
                            "stepTemplate in Task '{}' defines environment variable '{}' more than once",
                            task.metadata.name, env.name
                        ),
                        Location::resource("Task", &task.metadata.name)
                            .at("spec.stepTemplate.env")
                            .field("name"),
                    );
                }
            }
        }
    }
}

pub fn no_undefined_volume(_docs: &[Document], graph: &ResourceGraph, report: &mut RuleReporter) {
    for task in graph.tasks.values() {
        let declared: BTreeSet<&str> = task.spec.volumes.iter().map(|v| v.name.as_str()).collect();
        for step in &task.spec.steps {
            for mount in &step.volume_mounts {
                if !declared.contains(mount.name.as_str()) {
                    report.report(
                        format!(
                            "Task '{}' mounts volume '{}' in step '{}', but no volume with that name is defined",
                            task.metadata.name, mount.name, step.name
                        ),
                        Location::resource("Task", &task.metadata.name).field("name"),
                    );
                }
            }
        }
    }
}

pub fn no_undefined_param(docs: &[Document], graph: &ResourceGraph, report: &mut RuleReporter) {
    for task in graph.tasks.values() {
        let declared: BTreeSet<&str> = task.spec.params().iter().map(|p| p.name.as_str()).collect();
        check_undefined(docs, "Task", &task.metadata.name, &declared, report);
    }
    for condition in graph.conditions.values() {
        let declared: BTreeSet<&str> =
            condition.spec.params.iter().map(|p| p.name.as_str()).collect();
        check_undefined(docs, "Condition", &condition.metadata.name, &declared, report);
    }
}

fn check_undefined(
    docs: &[Document],
    kind: &str,
    name: &str,
    declared: &BTreeSet<&str>,
    report: &mut RuleReporter,
) {
    let Some(doc) = find_doc(docs, kind, name) else {
        return;
    };
    walk(&doc.value, &mut |value, path, _parent| {
        let Value::String(text) = value else { return };
        if is_param_declaration_path(path) {
            return;
        }
        for param in reference::param_references(text) {
            if !declared.contains(param.as_str()) {
                report.report(
                    format!(
                        "{} '{}' uses parameter '{}' but does not define it",
                        kind, name, param
                    ),
                    Location::resource(kind, name).at(crate::walk::path_to_string(path)),
                );
            }
        }
    });
}

pub fn no_unused_param(docs: &[Document], graph: &ResourceGraph, report: &mut RuleReporter) {
    for pipeline in graph.pipelines.values() {
        let declared = pipeline.spec.params.iter().map(|p| p.name.as_str());
        check_unused(docs, "Pipeline", &pipeline.metadata.name, declared, report);
    }
    for task in graph.tasks.values() {
        let declared = task.spec.params().iter().map(|p| p.name.as_str());
        check_unused(docs, "Task", &task.metadata.name, declared, report);
    }
    for condition in graph.conditions.values() {
        let declared = condition.spec.params.iter().map(|p| p.name.as_str());
        check_unused(docs, "Condition", &condition.metadata.name, declared, report);
    }
}

fn check_unused<'a>(
    docs: &[Document],
    kind: &str,
    name: &str,
    declared: impl Iterator<Item = &'a str>,
    report: &mut RuleReporter,
) {
    let Some(doc) = find_doc(docs, kind, name) else {
        return;
    };
    let mut used = BTreeSet::new();
    walk(&doc.value, &mut |value, path, _parent| {
        let Value::String(text) = value else { return };
        if is_param_declaration_path(path) {
            return;
        }
        for param in reference::param_references(text) {
            used.insert(param);
        }
    });
    for param in declared {
        if !used.contains(param) {
            report.report(
                format!("{} '{}' defines parameter '{}', but it's never used", kind, name, param),
                Location::resource(kind, name).field("name"),
            );
        }
    }
}

pub fn no_latest_image(_docs: &[Document], graph: &ResourceGraph, report: &mut RuleReporter) {
    for task in graph.tasks.values() {
        if let Some(template) = &task.spec.step_template {
            if let Some(image) = &template.image {
                if is_unpinned(image) {
                    report.report(
                        format!(
                            "Invalid image: '{}' for stepTemplate in Task '{}'. Specify the image tag instead of using ':latest'",
                            image, task.metadata.name
                        ),
                        Location::resource("Task", &task.metadata.name)
                            .at("spec.stepTemplate.image")
                            .field("image"),
                    );
                }
            }
        }
        for (idx, step) in task.spec.steps.iter().enumerate() {
            check_step_image(step, idx, &task.metadata.name, report);
        }
    }
}

fn check_step_image(step: &Step, idx: usize, task_name: &str, report: &mut RuleReporter) {
    let Some(image) = &step.image else { return };
    if is_unpinned(image) {
        report.report(
            format!(
                "Invalid image: '{}' for step '{}' in Task '{}'. Specify the image tag instead of using ':latest'",
                image, step.name, task_name
            ),
            Location::resource("Task", task_name)
                .at(format!("spec.steps[{}].image", idx))
                .field("image"),
        );
    }
}

/// `:latest`, or no tag at all (unless the image is interpolated).
fn is_unpinned(image: &str) -> bool {
    image.ends_with(":latest") || (!image.contains(':') && !image.contains('$'))
}

fn find_doc<'a>(docs: &'a [Document], kind: &str, name: &str) -> Option<&'a Document> {
    docs.iter().find(|doc| doc.kind == kind && doc.name == name)
}

/// True under `spec.params` / `spec.inputs`, where param names appear as
/// declarations rather than uses.
fn is_param_declaration_path(path: &[Segment]) -> bool {
    matches!(path.first(), Some(Segment::Key(k)) if k == "spec")
        && matches!(path.get(1), Some(Segment::Key(k)) if k == "params" || k == "inputs")
}
