//! Resolution of `$(tasks...)` reference expressions inside field values.

use serde_yaml::Value;

use crate::parse::types::Pipeline;
use crate::parse::{Document, ResourceGraph};
use crate::reference;
use crate::reporter::{Location, Reporter};
use crate::walk::{Segment, path_to_string, walk};

/// Every `$(tasks.<name>...)` in a supplied param value must name a task
/// invocation that exists in the same pipeline.
pub fn check_task_name_references(graph: &ResourceGraph, reporter: &mut Reporter) {
    for pipeline in graph.pipelines.values() {
        let pipeline_name = &pipeline.metadata.name;
        for (idx, task) in pipeline.spec.tasks.iter().enumerate() {
            for (param_idx, param) in task.params.iter().enumerate() {
                let Some(value) = param.string_value() else {
                    continue;
                };
                for referenced in reference::task_references(value) {
                    let exists = pipeline
                        .spec
                        .tasks
                        .iter()
                        .any(|t| t.name == referenced.task);
                    if !exists {
                        reporter.error(
                            format!(
                                "Task '{}' refers to task '{}' at value of param '{}', but there is no task with that name in pipeline '{}'",
                                task.name, referenced.task, param.name, pipeline_name
                            ),
                            Location::resource("Pipeline", pipeline_name)
                                .at(format!("spec.tasks[{}].params[{}].value", idx, param_idx))
                                .field("value"),
                        );
                    }
                }
            }
        }
    }
}

/// Resolve `$(tasks.<task>.results.<result>)` anywhere in a pipeline
/// document. Only provably wrong references are flagged; anything that
/// cannot be resolved (unknown invocation, unknown `taskRef` target) is
/// skipped so a missing Task never cascades into result-reference noise.
pub fn check_result_references(
    documents: &[Document],
    graph: &ResourceGraph,
    reporter: &mut Reporter,
) {
    for doc in documents {
        if doc.kind != "Pipeline" {
            continue;
        }
        let Some(pipeline) = graph.pipelines.get(&doc.name) else {
            continue;
        };
        walk(&doc.value, &mut |value, path, _parent| {
            let Value::String(text) = value else { return };
            for referenced in reference::task_references(text) {
                let Some(result) = &referenced.result else {
                    continue;
                };
                if resolve_declares_result(pipeline, graph, &referenced.task, result)
                    == Some(false)
                {
                    report_undefined_result(
                        reporter,
                        &pipeline.metadata.name,
                        path,
                        text,
                        &referenced.task,
                        result,
                    );
                }
            }
        });
    }
}

/// `Some(true)`/`Some(false)` when the referenced task resolves and does /
/// does not declare the result; `None` when resolution fails.
fn resolve_declares_result(
    pipeline: &Pipeline,
    graph: &ResourceGraph,
    task_name: &str,
    result: &str,
) -> Option<bool> {
    let invocation = pipeline.spec.tasks.iter().find(|t| t.name == task_name)?;
    let spec = if let Some(task_ref) = &invocation.task_ref {
        &graph.tasks.get(&task_ref.name)?.spec
    } else {
        invocation.task_spec.as_ref()?
    };
    Some(spec.has_result(result))
}

fn report_undefined_result(
    reporter: &mut Reporter,
    pipeline_name: &str,
    path: &[Segment],
    value: &str,
    task_name: &str,
    result: &str,
) {
    let field = path.last().map(|segment| segment.to_string());
    let mut location =
        Location::resource("Pipeline", pipeline_name).at(path_to_string(path));
    if let Some(field) = field {
        location = location.field(&field);
    }
    reporter.error(
        format!(
            "In Pipeline '{}' the value on path '{}' refers to an undefined output result (as '{}' - '{}' is not a result in Task '{}')",
            pipeline_name,
            path_to_string(path),
            value,
            result,
            task_name
        ),
        location,
    );
}
