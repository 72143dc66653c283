//! Workflow and composite action documents

use crate::core::{error::MockError, step::Step};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use std::path::Path;

/// Trigger that marks a workflow as callable from other workflows
pub const WORKFLOW_CALL_TRIGGER: &str = "workflow_call";

/// A CI workflow: header fields plus named jobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workflow {
    /// Fields other than `jobs` (name, on, env, permissions, ...)
    #[serde(flatten)]
    pub header: Mapping,

    /// Jobs in document order
    pub jobs: IndexMap<String, Job>,
}

/// A named unit of work inside a workflow
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Job {
    /// Fields other than `steps` (runs-on, needs, if, ...)
    #[serde(flatten)]
    pub settings: Mapping,

    /// Absent for jobs that call a reusable workflow
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<Step>>,
}

/// A composite action (`action.yml`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionBundle {
    /// Fields other than `runs` (name, description, inputs, outputs, ...)
    #[serde(flatten)]
    pub header: Mapping,

    pub runs: ActionRuns,
}

/// The `runs` block of an action
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionRuns {
    /// Fields other than `steps` (using, main, image, ...)
    #[serde(flatten)]
    pub settings: Mapping,

    /// Only composite actions carry steps
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<Step>>,
}

/// A parsed document of either shape
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowDocument {
    Workflow(Workflow),
    Action(ActionBundle),
}

impl Workflow {
    /// Parse a workflow from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, MockError> {
        match WorkflowDocument::parse(Path::new("<inline>"), yaml)? {
            WorkflowDocument::Workflow(workflow) => Ok(workflow),
            WorkflowDocument::Action(_) => Err(MockError::UnsupportedDocumentShape {
                path: "<inline>".into(),
                reason: "expected a workflow but found a composite action".to_string(),
            }),
        }
    }

    pub fn job(&self, job: &str) -> Option<&Job> {
        self.jobs.get(job)
    }

    /// Steps of a job, empty when the job has none
    pub fn job_steps(&self, job: &str) -> Result<&[Step], MockError> {
        let job_def = self.jobs.get(job).ok_or_else(|| MockError::JobNotFound {
            job: job.to_string(),
        })?;
        Ok(job_def.steps.as_deref().unwrap_or_default())
    }

    /// Mutable steps of a job, empty when the job has none
    pub fn job_steps_mut(&mut self, job: &str) -> Result<&mut [Step], MockError> {
        let job_def = self
            .jobs
            .get_mut(job)
            .ok_or_else(|| MockError::JobNotFound {
                job: job.to_string(),
            })?;
        Ok(job_def.steps.as_deref_mut().unwrap_or_default())
    }

    /// Whether the workflow can be called from other workflows
    pub fn is_reusable(&self) -> bool {
        match self.header.get("on") {
            Some(Value::String(trigger)) => trigger == WORKFLOW_CALL_TRIGGER,
            Some(Value::Sequence(triggers)) => triggers
                .iter()
                .any(|t| t.as_str() == Some(WORKFLOW_CALL_TRIGGER)),
            Some(Value::Mapping(triggers)) => triggers.contains_key(WORKFLOW_CALL_TRIGGER),
            _ => false,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.header.get("name").and_then(Value::as_str)
    }
}

impl ActionBundle {
    /// Parse a composite action from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, MockError> {
        match WorkflowDocument::parse(Path::new("<inline>"), yaml)? {
            WorkflowDocument::Action(action) => Ok(action),
            WorkflowDocument::Workflow(_) => Err(MockError::UnsupportedDocumentShape {
                path: "<inline>".into(),
                reason: "expected a composite action but found a workflow".to_string(),
            }),
        }
    }

    pub fn steps(&self) -> &[Step] {
        self.runs.steps.as_deref().unwrap_or_default()
    }

    pub fn steps_mut(&mut self) -> &mut [Step] {
        self.runs.steps.as_deref_mut().unwrap_or_default()
    }

    /// The `runs.using` value (`composite`, `node20`, `docker`, ...)
    pub fn using(&self) -> Option<&str> {
        self.runs.settings.get("using").and_then(Value::as_str)
    }

    pub fn is_composite(&self) -> bool {
        self.using() == Some("composite")
    }
}

impl WorkflowDocument {
    /// Parse a document, detecting its shape from the top-level keys
    ///
    /// A mapping with `jobs` is a workflow, a mapping with `runs` is an action.
    pub fn parse(path: &Path, contents: &str) -> Result<Self, MockError> {
        let parse_err = |source| MockError::Parse {
            path: path.to_path_buf(),
            source,
        };

        let value: Value = serde_yaml::from_str(contents).map_err(parse_err)?;
        let shape = match &value {
            Value::Mapping(root) if root.contains_key("jobs") => DocumentShape::Workflow,
            Value::Mapping(root) if root.contains_key("runs") => DocumentShape::Action,
            _ => {
                return Err(MockError::UnsupportedDocumentShape {
                    path: path.to_path_buf(),
                    reason: "expected a workflow with `jobs` or an action with `runs`".to_string(),
                })
            }
        };

        match shape {
            DocumentShape::Workflow => serde_yaml::from_value(value)
                .map(WorkflowDocument::Workflow)
                .map_err(parse_err),
            DocumentShape::Action => serde_yaml::from_value(value)
                .map(WorkflowDocument::Action)
                .map_err(parse_err),
        }
    }
}

/// Serialize a workflow or action back to YAML, attributing failures to `path`
pub fn to_yaml<T: Serialize>(path: &Path, document: &T) -> Result<String, MockError> {
    serde_yaml::to_string(document).map_err(|source| MockError::Serialize {
        path: path.to_path_buf(),
        source,
    })
}

enum DocumentShape {
    Workflow,
    Action,
}
