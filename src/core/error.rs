//! Error types for step mocking

use crate::core::identifier::StepSelector;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while locating, merging or persisting mocked steps
#[derive(Debug, Error)]
pub enum MockError {
    #[error("Could not locate workflow {file} from {} (tried: {})", .cwd.display(), display_paths(.tried))]
    WorkflowNotFound {
        file: String,
        cwd: PathBuf,
        tried: Vec<PathBuf>,
    },

    #[error("Job '{job}' does not exist in the workflow")]
    JobNotFound { job: String },

    #[error("Could not find step with {selector} in job '{job}'")]
    StepNotFound { job: String, selector: StepSelector },

    #[error(
        "Step with {selector} in job '{job}' does not use a local composite action (uses: {})",
        .uses.as_deref().unwrap_or("<none>")
    )]
    InvalidCompositeReference {
        job: String,
        selector: StepSelector,
        uses: Option<String>,
    },

    #[error("Could not locate composite action in {} (tried: {})", .directory.display(), display_paths(.tried))]
    CompositeActionNotFound {
        directory: PathBuf,
        tried: Vec<PathBuf>,
    },

    #[error(
        "Composite action {} is already being mocked further up in '{job}'",
        .path.display()
    )]
    RecursiveCompositeAction { job: String, path: PathBuf },

    #[error("Unsupported document {}: {reason}", .path.display())]
    UnsupportedDocumentShape { path: PathBuf, reason: String },

    #[error("Unrecognized step identifier: {reason}")]
    UnrecognizedIdentifier { reason: String },

    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to serialize {}: {source}", .path.display())]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl MockError {
    pub(crate) fn unrecognized(reason: impl Into<String>) -> Self {
        MockError::UnrecognizedIdentifier {
            reason: reason.into(),
        }
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
