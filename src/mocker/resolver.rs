//! Resolves workflow and composite action locations on disk

use crate::core::{step::LOCAL_ACTION_PREFIX, MockError};
use crate::storage::WorkflowStore;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Hidden configuration directory at the repository root
pub const CONFIG_DIR: &str = ".github";

/// Directory holding workflow files inside [`CONFIG_DIR`]
pub const WORKFLOWS_DIR: &str = "workflows";

/// Accepted action file names, in probe order
pub const ACTION_FILE_NAMES: [&str; 2] = ["action.yml", "action.yaml"];

/// Where a composite action lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeActionLocation {
    /// The action's directory
    pub directory: PathBuf,
    /// `action.yml` or `action.yaml`
    pub file_name: &'static str,
}

impl CompositeActionLocation {
    /// Full path of the action file
    pub fn path(&self) -> PathBuf {
        self.directory.join(self.file_name)
    }
}

/// Find a workflow file relative to a working directory
///
/// Tries, in order: `<cwd>/<file>`; `<cwd>/workflows/<file>` when `cwd` is
/// itself the `.github` directory; `<cwd>/.github/workflows/<file>`.
pub async fn resolve_workflow_path<S>(store: &S, cwd: &Path, file: &str) -> Result<PathBuf, MockError>
where
    S: WorkflowStore + ?Sized,
{
    let mut candidates = vec![cwd.join(file)];
    if cwd.file_name().is_some_and(|name| name == CONFIG_DIR) {
        candidates.push(cwd.join(WORKFLOWS_DIR).join(file));
    }
    candidates.push(cwd.join(CONFIG_DIR).join(WORKFLOWS_DIR).join(file));

    for candidate in &candidates {
        if store.exists(candidate).await? {
            info!("Resolved workflow {} to {}", file, candidate.display());
            return Ok(candidate.clone());
        }
        debug!("Workflow not at {}", candidate.display());
    }

    Err(MockError::WorkflowNotFound {
        file: file.to_string(),
        cwd: cwd.to_path_buf(),
        tried: candidates,
    })
}

/// Repository root for a workflow file
///
/// Workflows live in `<repo>/.github/workflows/`, so the root is two levels
/// above the file's directory.
pub fn repository_root(workflow_path: &Path) -> PathBuf {
    workflow_path
        .parent()
        .and_then(Path::parent)
        .and_then(Path::parent)
        .map(Path::to_path_buf)
        .unwrap_or_default()
}

/// Resolve a local action reference (`./path/to/action`) used by a workflow
pub async fn resolve_composite_action<S>(
    store: &S,
    workflow_path: &Path,
    reference: &str,
) -> Result<CompositeActionLocation, MockError>
where
    S: WorkflowStore + ?Sized,
{
    resolve_composite_action_in(store, &repository_root(workflow_path), reference).await
}

/// Resolve a local action reference against a known repository root
///
/// `action.yml` is preferred over `action.yaml` when both exist.
pub async fn resolve_composite_action_in<S>(
    store: &S,
    root: &Path,
    reference: &str,
) -> Result<CompositeActionLocation, MockError>
where
    S: WorkflowStore + ?Sized,
{
    let relative = reference
        .strip_prefix(LOCAL_ACTION_PREFIX)
        .unwrap_or(reference)
        .trim_end_matches('/');
    let directory = root.join(relative);

    let mut tried = Vec::with_capacity(ACTION_FILE_NAMES.len());
    for file_name in ACTION_FILE_NAMES {
        let location = CompositeActionLocation {
            directory: directory.clone(),
            file_name,
        };
        let path = location.path();
        if store.exists(&path).await? {
            info!("Resolved composite action {} to {}", reference, path.display());
            return Ok(location);
        }
        tried.push(path);
    }

    Err(MockError::CompositeActionNotFound { directory, tried })
}
