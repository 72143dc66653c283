//! Test utility functions for step-mocker

#![allow(dead_code)]

use step_mocker::{FileSystemStore, MockSpec, Step, StepMocker, Workflow};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A throwaway repository laid out like a real checkout
pub struct TestRepo {
    dir: TempDir,
}

impl TestRepo {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        std::fs::create_dir_all(dir.path().join(".github/workflows"))
            .expect("Should create workflows dir");
        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Write `.github/workflows/<name>`
    pub fn workflow(self, name: &str, contents: &str) -> Self {
        self.file(&format!(".github/workflows/{}", name), contents)
    }

    /// Write any file relative to the repository root
    pub fn file(self, relative: &str, contents: &str) -> Self {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Should create parent dirs");
        }
        std::fs::write(&path, contents).expect("Should write file");
        self
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    pub fn read(&self, relative: &str) -> String {
        std::fs::read_to_string(self.path(relative)).expect("Should read file")
    }

    pub fn read_workflow(&self, name: &str) -> Workflow {
        Workflow::from_yaml(&self.read(&format!(".github/workflows/{}", name)))
            .expect("Should parse workflow")
    }

    pub fn mocker(&self, workflow: &str) -> StepMocker<FileSystemStore> {
        StepMocker::new(FileSystemStore::new(), workflow, self.root())
    }
}

/// Parse a mock spec from YAML
pub fn spec(yaml: &str) -> MockSpec {
    MockSpec::from_yaml(yaml).expect("Should parse mock spec")
}

/// Parse a step list from YAML
pub fn steps(yaml: &str) -> Vec<Step> {
    serde_yaml::from_str(yaml).expect("Should parse steps")
}

/// Assert a job's steps equal the given YAML step list
pub fn assert_job_steps(workflow: &Workflow, job: &str, expected_yaml: &str) {
    let actual = workflow.job_steps(job).expect("Job should exist");
    let expected = steps(expected_yaml);
    assert_eq!(
        actual,
        expected.as_slice(),
        "Steps of job '{}' differ:\n{}",
        job,
        serde_yaml::to_string(actual).unwrap_or_default()
    );
}
