//! Reference expressions embedded in string values.
//!
//! Tekton threads data between resources through `$(...)` interpolation
//! inside otherwise opaque strings. These are the implicit edges of the
//! resource graph, so they are parsed once into typed values here and reused
//! by every rule and analysis instead of re-matching at each use site.

use std::sync::LazyLock;

use regex::Regex;

static TASK_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\(tasks\.([^.()\s]+)\.([^()]+)\)").expect("valid regex")
});

static PARAM_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\((?:inputs\.)?params\.([A-Za-z0-9_-]+)").expect("valid regex")
});

/// One `$(tasks.<task>.<tail>)` expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskReference {
    /// Invocation name of the task being referenced.
    pub task: String,
    /// Result name when the tail is `results.<name>`.
    pub result: Option<String>,
}

/// Extract every `$(tasks...)` expression from a string value, in order.
pub fn task_references(value: &str) -> Vec<TaskReference> {
    TASK_REFERENCE
        .captures_iter(value)
        .map(|captures| TaskReference {
            task: captures[1].to_string(),
            result: captures[2].strip_prefix("results.").map(str::to_string),
        })
        .collect()
}

/// Extract every `$(params.<name>)` / `$(inputs.params.<name>)` reference.
pub fn param_references(value: &str) -> Vec<String> {
    PARAM_REFERENCE
        .captures_iter(value)
        .map(|captures| captures[1].to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_result_reference() {
        let refs = task_references("$(tasks.build.results.IMAGE_URL)");
        assert_eq!(
            refs,
            vec![TaskReference {
                task: "build".into(),
                result: Some("IMAGE_URL".into()),
            }]
        );
    }

    #[test]
    fn parses_non_result_tail() {
        let refs = task_references("image: $(tasks.build.status)");
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].task, "build");
        assert_eq!(refs[0].result, None);
    }

    #[test]
    fn finds_all_references_in_one_value() {
        let refs = task_references("$(tasks.a.results.x)/$(tasks.b.results.y)");
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].task, "a");
        assert_eq!(refs[1].task, "b");
    }

    #[test]
    fn plain_strings_have_no_references() {
        assert!(task_references("registry.example.com/app:v1").is_empty());
        assert!(param_references("no interpolation here").is_empty());
    }

    #[test]
    fn param_references_accept_legacy_inputs_prefix() {
        assert_eq!(param_references("$(params.tag)"), vec!["tag"]);
        assert_eq!(param_references("$(inputs.params.tag)"), vec!["tag"]);
    }
}
