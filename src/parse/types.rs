//! Serde target types for the five Tekton resource kinds.
//!
//! The shapes are deliberately lenient: almost every field defaults, so a
//! sparse manifest still deserializes and each rule decides for itself what
//! absence means. The one normalization lives in [`TaskSpec::params`], which
//! hides the legacy `spec.inputs.params` layout behind the current
//! `spec.params` one.

use serde::Deserialize;
use serde_yaml::Value;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub namespace: Option<String>,
}

/// A named parameter declaration; no `default` marks the param required.
#[derive(Debug, Clone, Deserialize)]
pub struct ParamDecl {
    pub name: String,
    #[serde(default)]
    pub default: Option<Value>,
    #[serde(default, rename = "type")]
    pub param_type: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl ParamDecl {
    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }
}

/// A supplied name/value pair; the value may embed reference expressions.
#[derive(Debug, Clone, Deserialize)]
pub struct ParamBinding {
    pub name: String,
    #[serde(default)]
    pub value: Option<Value>,
}

impl ParamBinding {
    /// The supplied value when it is a plain string.
    pub fn string_value(&self) -> Option<&str> {
        match &self.value {
            Some(Value::String(s)) => Some(s),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WorkspaceDecl {
    pub name: String,
    #[serde(default)]
    pub optional: bool,
}

/// A workspace mapping on a task invocation or a PipelineRun body:
/// `name` is the consumer-local slot, `workspace` the pipeline-level one.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkspaceBinding {
    pub name: String,
    #[serde(default)]
    pub workspace: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NameRef {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub kind: Option<String>,
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct Pipeline {
    pub metadata: Metadata,
    #[serde(default)]
    pub spec: PipelineSpec,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PipelineSpec {
    #[serde(default)]
    pub params: Vec<ParamDecl>,
    #[serde(default)]
    pub tasks: Vec<PipelineTask>,
    #[serde(default)]
    pub workspaces: Vec<WorkspaceDecl>,
}

/// One task invocation inside a pipeline. `name` is invocation-local; the
/// work comes from either `task_ref` (registry lookup) or an inline
/// `task_spec`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineTask {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub task_ref: Option<NameRef>,
    #[serde(default)]
    pub task_spec: Option<TaskSpec>,
    #[serde(default)]
    pub params: Vec<ParamBinding>,
    #[serde(default)]
    pub workspaces: Vec<WorkspaceBinding>,
    #[serde(default)]
    pub run_after: Vec<String>,
    #[serde(default)]
    pub conditions: Vec<ConditionRef>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionRef {
    #[serde(default)]
    pub condition_ref: String,
    #[serde(default)]
    pub params: Vec<ParamBinding>,
}

// ---------------------------------------------------------------------------
// Task
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct Task {
    pub metadata: Metadata,
    #[serde(default)]
    pub spec: TaskSpec,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskSpec {
    /// Current-shape params. Use [`TaskSpec::params`], not this field.
    #[serde(default)]
    pub params: Option<Vec<ParamDecl>>,
    /// Legacy shape: params nested under `spec.inputs`.
    #[serde(default)]
    pub inputs: Option<TaskInputs>,
    #[serde(default)]
    pub steps: Vec<Step>,
    #[serde(default)]
    pub step_template: Option<StepTemplate>,
    #[serde(default)]
    pub workspaces: Vec<WorkspaceDecl>,
    #[serde(default)]
    pub results: Vec<ResultDecl>,
    #[serde(default)]
    pub volumes: Vec<Volume>,
}

impl TaskSpec {
    /// Declared params, whichever legacy shape they were written in.
    pub fn params(&self) -> &[ParamDecl] {
        if let Some(inputs) = &self.inputs {
            return &inputs.params;
        }
        self.params.as_deref().unwrap_or_default()
    }

    pub fn has_result(&self, name: &str) -> bool {
        self.results.iter().any(|result| result.name == name)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskInputs {
    #[serde(default)]
    pub params: Vec<ParamDecl>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub env: Vec<EnvVar>,
    #[serde(default)]
    pub volume_mounts: Vec<VolumeMount>,
}

/// Step defaults applied to every step of the task.
#[derive(Debug, Clone, Deserialize)]
pub struct StepTemplate {
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub env: Vec<EnvVar>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EnvVar {
    pub name: String,
    #[serde(default)]
    pub value: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeMount {
    pub name: String,
    #[serde(default)]
    pub mount_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Volume {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResultDecl {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

// ---------------------------------------------------------------------------
// Triggers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct TriggerTemplate {
    pub metadata: Metadata,
    #[serde(default)]
    pub spec: TriggerTemplateSpec,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TriggerTemplateSpec {
    #[serde(default)]
    pub params: Vec<ParamDecl>,
    #[serde(default)]
    pub resourcetemplates: Vec<ResourceTemplate>,
}

/// A resource body instantiated on trigger. Only PipelineRun-shaped bodies
/// carry the fields we inspect; anything else deserializes to defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceTemplate {
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub metadata: Option<Metadata>,
    #[serde(default)]
    pub spec: Option<RunSpec>,
}

impl ResourceTemplate {
    /// The pipeline this body would run, when it is PipelineRun-shaped.
    pub fn pipeline_ref(&self) -> Option<&str> {
        self.spec
            .as_ref()
            .and_then(|spec| spec.pipeline_ref.as_ref())
            .map(|r| r.name.as_str())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSpec {
    #[serde(default)]
    pub pipeline_ref: Option<NameRef>,
    #[serde(default)]
    pub params: Vec<ParamBinding>,
    #[serde(default)]
    pub workspaces: Vec<WorkspaceBinding>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TriggerBinding {
    pub metadata: Metadata,
    #[serde(default)]
    pub spec: TriggerBindingSpec,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TriggerBindingSpec {
    #[serde(default)]
    pub params: Vec<ParamBinding>,
}

// ---------------------------------------------------------------------------
// Condition
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct Condition {
    pub metadata: Metadata,
    #[serde(default)]
    pub spec: ConditionSpec,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConditionSpec {
    #[serde(default)]
    pub params: Vec<ParamDecl>,
    #[serde(default)]
    pub check: Option<Step>,
}
