//! Storage layer for reading and writing workflow documents

pub mod fs;

pub use fs::FileSystemStore;

use crate::core::MockError;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

/// Trait for document storage backends
#[async_trait::async_trait]
pub trait WorkflowStore: Send + Sync {
    /// Read a document as UTF-8 text
    async fn read(&self, path: &Path) -> Result<String, MockError>;

    /// Replace a document's contents
    async fn write(&self, path: &Path, contents: &str) -> Result<(), MockError>;

    /// Check whether a document exists
    ///
    /// Only a definite "not found" is `Ok(false)`; other I/O failures are errors.
    async fn exists(&self, path: &Path) -> Result<bool, MockError>;
}

/// In-memory storage (for testing or dry runs)
pub struct InMemoryStore {
    files: RwLock<HashMap<PathBuf, String>>,
    writes: RwLock<Vec<PathBuf>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            files: RwLock::new(HashMap::new()),
            writes: RwLock::new(Vec::new()),
        }
    }

    /// Builder-style file registration
    pub fn with_file(mut self, path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        self.files.get_mut().insert(path.into(), contents.into());
        self
    }

    /// Register a file without recording a write
    pub async fn insert(&self, path: impl Into<PathBuf>, contents: impl Into<String>) {
        self.files.write().await.insert(path.into(), contents.into());
    }

    /// Current contents of a file
    pub async fn contents(&self, path: &Path) -> Option<String> {
        self.files.read().await.get(path).cloned()
    }

    /// Paths written so far, in write order
    pub async fn writes(&self) -> Vec<PathBuf> {
        self.writes.read().await.clone()
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl WorkflowStore for InMemoryStore {
    async fn read(&self, path: &Path) -> Result<String, MockError> {
        let files = self.files.read().await;
        files.get(path).cloned().ok_or_else(|| MockError::Io {
            path: path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::NotFound, "no such document"),
        })
    }

    async fn write(&self, path: &Path, contents: &str) -> Result<(), MockError> {
        let mut files = self.files.write().await;
        files.insert(path.to_path_buf(), contents.to_string());

        let mut writes = self.writes.write().await;
        writes.push(path.to_path_buf());

        Ok(())
    }

    async fn exists(&self, path: &Path) -> Result<bool, MockError> {
        Ok(self.files.read().await.contains_key(path))
    }
}
