//! Workspace propagation: pipeline→task and pipeline→trigger.

use std::collections::BTreeSet;

use crate::parse::ResourceGraph;
use crate::reporter::{Location, Reporter};

/// Both directions of the pipeline↔task workspace contract:
/// every mapped pipeline workspace must be declared by the pipeline, and
/// every workspace a referenced Task requires must be supplied to it.
pub fn check_pipeline_task_workspaces(graph: &ResourceGraph, reporter: &mut Reporter) {
    for pipeline in graph.pipelines.values() {
        let pipeline_name = &pipeline.metadata.name;
        let declared: BTreeSet<&str> = pipeline
            .spec
            .workspaces
            .iter()
            .map(|ws| ws.name.as_str())
            .collect();

        for (idx, task) in pipeline.spec.tasks.iter().enumerate() {
            for (ws_idx, binding) in task.workspaces.iter().enumerate() {
                let Some(workspace) = &binding.workspace else {
                    continue;
                };
                if !declared.contains(workspace.as_str()) {
                    reporter.error(
                        format!(
                            "Pipeline '{}' provides workspace '{}' for '{}' for Task '{}', but '{}' doesn't exist in '{}'",
                            pipeline_name, workspace, binding.name, task.name, workspace, pipeline_name
                        ),
                        Location::resource("Pipeline", pipeline_name)
                            .at(format!("spec.tasks[{}].workspaces[{}]", idx, ws_idx))
                            .field("workspace"),
                    );
                }
            }
        }
    }

    for task in graph.tasks.values() {
        let task_name = &task.metadata.name;
        let required: Vec<&str> = task
            .spec
            .workspaces
            .iter()
            .filter(|ws| !ws.optional)
            .map(|ws| ws.name.as_str())
            .collect();
        if required.is_empty() {
            continue;
        }

        for pipeline in graph.pipelines.values() {
            for (idx, invocation) in pipeline.spec.tasks.iter().enumerate() {
                let references_task = invocation
                    .task_ref
                    .as_ref()
                    .is_some_and(|r| &r.name == task_name);
                if !references_task {
                    continue;
                }
                let supplied: BTreeSet<&str> = invocation
                    .workspaces
                    .iter()
                    .map(|ws| ws.name.as_str())
                    .collect();
                for workspace in &required {
                    if !supplied.contains(workspace) {
                        reporter.error(
                            format!(
                                "Pipeline '{}' references Task '{}' (as '{}'), but provides no workspace for '{}' (it's a required workspace in '{}')",
                                pipeline.metadata.name, task_name, invocation.name, workspace, task_name
                            ),
                            Location::resource("Pipeline", &pipeline.metadata.name)
                                .at(format!("spec.tasks[{}].workspaces", idx)),
                        );
                    }
                }
            }
        }
    }
}

/// One level up: every workspace a Pipeline declares must be supplied by
/// every PipelineRun body that a TriggerTemplate instantiates for it.
pub fn check_trigger_workspaces(graph: &ResourceGraph, reporter: &mut Reporter) {
    for pipeline in graph.pipelines.values() {
        let pipeline_name = &pipeline.metadata.name;
        let required: Vec<&str> = pipeline
            .spec
            .workspaces
            .iter()
            .filter(|ws| !ws.optional)
            .map(|ws| ws.name.as_str())
            .collect();
        if required.is_empty() {
            continue;
        }

        for template in graph.trigger_templates.values() {
            for (idx, body) in template.spec.resourcetemplates.iter().enumerate() {
                if body.pipeline_ref() != Some(pipeline_name.as_str()) {
                    continue;
                }
                let supplied: BTreeSet<&str> = body
                    .spec
                    .as_ref()
                    .map(|spec| spec.workspaces.iter().map(|ws| ws.name.as_str()).collect())
                    .unwrap_or_default();
                for workspace in &required {
                    if !supplied.contains(workspace) {
                        reporter.error(
                            format!(
                                "TriggerTemplate '{}' references Pipeline '{}', but provides no workspace for '{}' (it's a required workspace in '{}')",
                                template.metadata.name, pipeline_name, workspace, pipeline_name
                            ),
                            Location::resource("TriggerTemplate", &template.metadata.name)
                                .at(format!("spec.resourcetemplates[{}].spec.workspaces", idx)),
                        );
                    }
                }
            }
        }
    }
}
