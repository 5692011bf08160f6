//! Typed resource graph built from the flat document list.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;

use super::Document;
use super::types::{Condition, Pipeline, Task, TriggerBinding, TriggerTemplate};
use crate::reporter::{Location, Reporter};

/// The five typed collections, indexed by `metadata.name`.
///
/// Built once per lint run and read-only afterwards. Documents of
/// unrecognized kind stay in the flat list only; documents of a recognized
/// kind that do not deserialize into the typed shape are quarantined with a
/// structural diagnostic rather than half-parsed.
#[derive(Debug, Default)]
pub struct ResourceGraph {
    pub pipelines: BTreeMap<String, Pipeline>,
    pub tasks: BTreeMap<String, Task>,
    pub trigger_templates: BTreeMap<String, TriggerTemplate>,
    pub trigger_bindings: BTreeMap<String, TriggerBinding>,
    pub conditions: BTreeMap<String, Condition>,
}

impl ResourceGraph {
    pub fn build(documents: &[Document], reporter: &mut Reporter) -> Self {
        let mut graph = ResourceGraph::default();

        for doc in documents {
            match doc.kind.as_str() {
                "Pipeline" => insert(&mut graph.pipelines, doc, reporter),
                "Task" => insert(&mut graph.tasks, doc, reporter),
                "TriggerTemplate" => insert(&mut graph.trigger_templates, doc, reporter),
                "TriggerBinding" => insert(&mut graph.trigger_bindings, doc, reporter),
                "Condition" => insert(&mut graph.conditions, doc, reporter),
                // Unrecognized kinds are served by kind-agnostic rules only.
                _ => {}
            }
        }

        graph
    }
}

fn insert<T: DeserializeOwned>(
    collection: &mut BTreeMap<String, T>,
    doc: &Document,
    reporter: &mut Reporter,
) {
    match serde_yaml::from_value::<T>(doc.value.clone()) {
        Ok(resource) => {
            // Duplicate (kind, name) pairs are reported by the engine before
            // any rule runs; keeping the first occurrence here keeps the map
            // well-formed for every later consumer.
            collection.entry(doc.name.clone()).or_insert(resource);
        }
        Err(err) => {
            reporter.error(
                format!(
                    "{} '{}' does not match the expected resource shape: {}",
                    doc.kind, doc.name, err
                ),
                Location::resource(&doc.kind, &doc.name),
            );
        }
    }
}
