//! Filesystem-backed document store

use crate::core::MockError;
use crate::storage::WorkflowStore;
use std::path::Path;
use tracing::debug;

/// Reads and writes documents on the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSystemStore;

impl FileSystemStore {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl WorkflowStore for FileSystemStore {
    async fn read(&self, path: &Path) -> Result<String, MockError> {
        debug!("Reading {}", path.display());
        tokio::fs::read_to_string(path)
            .await
            .map_err(|source| MockError::Io {
                path: path.to_path_buf(),
                source,
            })
    }

    async fn write(&self, path: &Path, contents: &str) -> Result<(), MockError> {
        debug!("Writing {} ({} bytes)", path.display(), contents.len());
        tokio::fs::write(path, contents)
            .await
            .map_err(|source| MockError::Io {
                path: path.to_path_buf(),
                source,
            })
    }

    async fn exists(&self, path: &Path) -> Result<bool, MockError> {
        tokio::fs::try_exists(path).await.map_err(|source| {
            debug!("Could not check {}: {}", path.display(), source);
            MockError::Io {
                path: path.to_path_buf(),
                source,
            }
        })
    }
}
