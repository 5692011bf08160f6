//! TriggerTemplate / TriggerBinding rules.

use crate::parse::{Document, ResourceGraph};
use crate::reporter::{Location, RuleReporter};

pub fn no_template_missing_pipeline(
    _docs: &[Document],
    graph: &ResourceGraph,
    report: &mut RuleReporter,
) {
    for template in graph.trigger_templates.values() {
        for (idx, body) in template.spec.resourcetemplates.iter().enumerate() {
            let Some(pipeline) = body.pipeline_ref() else {
                continue;
            };
            if !graph.pipelines.contains_key(pipeline) {
                report.report(
                    format!(
                        "TriggerTemplate '{}' references Pipeline '{}', but no Pipeline with that name is defined",
                        template.metadata.name, pipeline
                    ),
                    Location::resource("TriggerTemplate", &template.metadata.name)
                        .at(format!("spec.resourcetemplates[{}].spec.pipelineRef.name", idx))
                        .field("name"),
                );
            }
        }
    }
}

pub fn no_missing_param_value(
    _docs: &[Document],
    graph: &ResourceGraph,
    report: &mut RuleReporter,
) {
    for binding in graph.trigger_bindings.values() {
        for param in &binding.spec.params {
            if param.value.is_none() {
                report.report(
                    format!(
                        "TriggerBinding '{}' defines parameter '{}' with missing value",
                        binding.metadata.name, param.name
                    ),
                    Location::resource("TriggerBinding", &binding.metadata.name).field("name"),
                );
            }
        }
    }
}
