//! Pipeline-local rules: reference existence and dependency-cycle detection.

use std::collections::HashMap;

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};

use crate::parse::types::Pipeline;
use crate::parse::{Document, ResourceGraph};
use crate::reference;
use crate::reporter::{Location, RuleReporter};

pub fn no_pipeline_missing_task(
    _docs: &[Document],
    graph: &ResourceGraph,
    report: &mut RuleReporter,
) {
    for pipeline in graph.pipelines.values() {
        for (idx, task) in pipeline.spec.tasks.iter().enumerate() {
            let Some(task_ref) = &task.task_ref else {
                continue;
            };
            if !graph.tasks.contains_key(&task_ref.name) {
                report.report(
                    format!(
                        "Pipeline '{}' references Task '{}' (as '{}'), but no Task with that name is defined",
                        pipeline.metadata.name, task_ref.name, task.name
                    ),
                    Location::resource("Pipeline", &pipeline.metadata.name)
                        .at(format!("spec.tasks[{}].taskRef.name", idx))
                        .field("name"),
                );
            }
        }
    }
}

pub fn no_pipeline_missing_condition(
    _docs: &[Document],
    graph: &ResourceGraph,
    report: &mut RuleReporter,
) {
    for pipeline in graph.pipelines.values() {
        for (idx, task) in pipeline.spec.tasks.iter().enumerate() {
            for condition in &task.conditions {
                if !graph.conditions.contains_key(&condition.condition_ref) {
                    report.report(
                        format!(
                            "Pipeline '{}' references Condition '{}' in task '{}', but no Condition with that name is defined",
                            pipeline.metadata.name, condition.condition_ref, task.name
                        ),
                        Location::resource("Pipeline", &pipeline.metadata.name)
                            .at(format!("spec.tasks[{}].conditions", idx))
                            .field("conditionRef"),
                    );
                }
            }
        }
    }
}

/// Detect cycles in the per-pipeline task dependency graph.
///
/// Edges come from explicit `runAfter` entries and from implicit ordering:
/// one invocation's param values referencing another invocation through
/// `$(tasks.<name>...)`. Strongly connected components of size > 1 (or a
/// self-edge) are cycles; one error per cycle, naming its members.
pub fn no_pipeline_task_cycle(
    _docs: &[Document],
    graph: &ResourceGraph,
    report: &mut RuleReporter,
) {
    for pipeline in graph.pipelines.values() {
        for cycle in find_cycles(pipeline) {
            report.report(
                format!(
                    "Pipeline '{}' contains a task dependency cycle: {}",
                    pipeline.metadata.name,
                    render_cycle(&cycle)
                ),
                Location::resource("Pipeline", &pipeline.metadata.name).at("spec.tasks"),
            );
        }
    }
}

fn find_cycles(pipeline: &Pipeline) -> Vec<Vec<String>> {
    let mut dag: DiGraph<&str, ()> = DiGraph::new();
    let mut indices: HashMap<&str, NodeIndex> = HashMap::new();

    for task in &pipeline.spec.tasks {
        let idx = dag.add_node(task.name.as_str());
        indices.insert(task.name.as_str(), idx);
    }

    for task in &pipeline.spec.tasks {
        let to = indices[task.name.as_str()];
        for dep in &task.run_after {
            if let Some(&from) = indices.get(dep.as_str()) {
                dag.update_edge(from, to, ());
            }
        }
        for param in &task.params {
            let Some(value) = param.string_value() else {
                continue;
            };
            for referenced in reference::task_references(value) {
                if let Some(&from) = indices.get(referenced.task.as_str()) {
                    dag.update_edge(from, to, ());
                }
            }
        }
    }

    let mut cycles = Vec::new();
    for component in tarjan_scc(&dag) {
        if component.len() > 1 {
            // Sorted member list keeps the message deterministic.
            let mut names: Vec<String> =
                component.iter().map(|&idx| dag[idx].to_string()).collect();
            names.sort();
            cycles.push(names);
        } else if let Some(&only) = component.first() {
            if dag.find_edge(only, only).is_some() {
                cycles.push(vec![dag[only].to_string()]);
            }
        }
    }
    cycles
}

fn render_cycle(members: &[String]) -> String {
    let mut rendered = members.join(" -> ");
    if let Some(first) = members.first() {
        rendered.push_str(" -> ");
        rendered.push_str(first);
    }
    rendered
}
