//! Parameter resolution across reference edges: pipeline→task and
//! triggerTemplate→pipeline.

use std::collections::BTreeSet;

use crate::parse::ResourceGraph;
use crate::parse::types::{ParamDecl, PipelineTask};
use crate::reporter::{Location, Reporter};

/// Supplied vs. declared parameters for every task invocation.
///
/// For a `taskRef` to a known Task: duplicate supplied names and extra
/// (undeclared) params are errors. Unknown targets are skipped — the
/// existence rule owns those. For an inline `taskSpec` the declaration is
/// right there, so missing required params are errors as well.
pub fn check_task_params(graph: &ResourceGraph, reporter: &mut Reporter) {
    for pipeline in graph.pipelines.values() {
        let pipeline_name = &pipeline.metadata.name;
        for (idx, task) in pipeline.spec.tasks.iter().enumerate() {
            if let Some(task_ref) = &task.task_ref {
                let Some(target) = graph.tasks.get(&task_ref.name) else {
                    continue;
                };
                check_duplicate_supplied(pipeline_name, task, idx, &task_ref.name, reporter);
                check_extra(
                    pipeline_name,
                    task,
                    idx,
                    Target::Referenced(&task_ref.name),
                    target.spec.params(),
                    reporter,
                );
            }

            if let Some(task_spec) = &task.task_spec {
                let declared = task_spec.params();
                check_extra(pipeline_name, task, idx, Target::Inline, declared, reporter);

                let supplied: BTreeSet<&str> =
                    task.params.iter().map(|p| p.name.as_str()).collect();
                for param in declared {
                    if param.is_required() && !supplied.contains(param.name.as_str()) {
                        reporter.error(
                            format!(
                                "Pipeline '{}' references task '{}', but parameter '{}' is not supplied (it's a required param in '{}')",
                                pipeline_name, task.name, param.name, task.name
                            ),
                            Location::resource("Pipeline", pipeline_name)
                                .at(format!("spec.tasks[{}]", idx)),
                        );
                    }
                }
            }
        }
    }
}

fn check_duplicate_supplied(
    pipeline_name: &str,
    task: &PipelineTask,
    idx: usize,
    target_name: &str,
    reporter: &mut Reporter,
) {
    let mut seen = BTreeSet::new();
    for (param_idx, param) in task.params.iter().enumerate() {
        if !seen.insert(param.name.as_str()) {
            reporter.error(
                format!(
                    "Pipeline '{}' invokes task '{}' which references '{}' with a duplicate param name: '{}'",
                    pipeline_name, task.name, target_name, param.name
                ),
                Location::resource("Pipeline", pipeline_name)
                    .at(format!("spec.tasks[{}].params[{}]", idx, param_idx))
                    .field("name"),
            );
        }
    }
}

/// How an invocation names its work: a `taskRef` to another resource (the
/// invocation-local alias is worth spelling out) or an inline `taskSpec`
/// (the invocation name is the only name there is).
#[derive(Clone, Copy)]
enum Target<'a> {
    Referenced(&'a str),
    Inline,
}

fn check_extra(
    pipeline_name: &str,
    task: &PipelineTask,
    idx: usize,
    target: Target<'_>,
    declared: &[ParamDecl],
    reporter: &mut Reporter,
) {
    let declared: BTreeSet<&str> = declared.iter().map(|p| p.name.as_str()).collect();
    for (param_idx, param) in task.params.iter().enumerate() {
        if !declared.contains(param.name.as_str()) {
            let subject = match target {
                Target::Referenced(name) => format!("task '{}' (as '{}')", name, task.name),
                Target::Inline => format!("task '{}'", task.name),
            };
            reporter.error(
                format!(
                    "Pipeline '{}' references {}, and supplies parameter '{}' to it, but it's not a valid parameter",
                    pipeline_name, subject, param.name
                ),
                Location::resource("Pipeline", pipeline_name)
                    .at(format!("spec.tasks[{}].params[{}]", idx, param_idx))
                    .field("name"),
            );
        }
    }
}

/// Parameters flowing from a TriggerTemplate's PipelineRun body into the
/// pipeline it references. Missing required pipeline params are errors;
/// extra supplied ones only warn — an unused value cannot fail the run.
pub fn check_template_params(graph: &ResourceGraph, reporter: &mut Reporter) {
    for pipeline in graph.pipelines.values() {
        let pipeline_name = &pipeline.metadata.name;
        for template in graph.trigger_templates.values() {
            let matching = template
                .spec
                .resourcetemplates
                .iter()
                .enumerate()
                .find(|(_, body)| body.pipeline_ref() == Some(pipeline_name.as_str()));
            let Some((body_idx, body)) = matching else {
                continue;
            };
            let supplied: Vec<&str> = body
                .spec
                .as_ref()
                .map(|spec| spec.params.iter().map(|p| p.name.as_str()).collect())
                .unwrap_or_default();
            let declared: BTreeSet<&str> =
                pipeline.spec.params.iter().map(|p| p.name.as_str()).collect();

            for param in &supplied {
                if !declared.contains(param) {
                    reporter.warning(
                        format!(
                            "TriggerTemplate '{}' references pipeline '{}', and supplies '{}', but it's not a valid parameter",
                            template.metadata.name, pipeline_name, param
                        ),
                        Location::resource("TriggerTemplate", &template.metadata.name)
                            .at(format!("spec.resourcetemplates[{}].spec.params", body_idx))
                            .field("name"),
                    );
                }
            }

            for param in &pipeline.spec.params {
                if param.is_required() && !supplied.contains(&param.name.as_str()) {
                    reporter.error(
                        format!(
                            "Pipeline '{}' references param '{}', but it is not supplied in triggerTemplate '{}'",
                            pipeline_name, param.name, template.metadata.name
                        ),
                        Location::resource("TriggerTemplate", &template.metadata.name)
                            .at(format!("spec.resourcetemplates[{}]", body_idx)),
                    );
                }
            }
        }
    }
}
