//! Mock spec configuration from YAML or JSON

use crate::core::identifier::{MockAction, StepIdentifier};
use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Per-job step substitutions, keyed by job id
///
/// ```yaml
/// build:
///   - id: test
///     mockWith: echo mocked
///   - uses: ./actions/setup
///     mockCompositeSteps:
///       - name: Install
///         mockWith: echo skipped
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MockSpec {
    jobs: IndexMap<String, Vec<StepIdentifier>>,
}

impl MockSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style job insertion
    pub fn with_job(mut self, job: impl Into<String>, identifiers: Vec<StepIdentifier>) -> Self {
        self.insert(job, identifiers);
        self
    }

    /// Add identifiers for a job, appending to any already registered
    pub fn insert(&mut self, job: impl Into<String>, identifiers: Vec<StepIdentifier>) {
        self.jobs.entry(job.into()).or_default().extend(identifiers);
    }

    /// Jobs in the order they were declared
    pub fn jobs(&self) -> impl Iterator<Item = (&str, &[StepIdentifier])> {
        self.jobs
            .iter()
            .map(|(job, identifiers)| (job.as_str(), identifiers.as_slice()))
    }

    pub fn job(&self, job: &str) -> Option<&[StepIdentifier]> {
        self.jobs.get(job).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.values().all(Vec::is_empty)
    }

    /// Total identifiers, counting nested composite ones
    pub fn identifier_count(&self) -> usize {
        self.jobs
            .values()
            .flat_map(|identifiers| identifiers.iter())
            .map(StepIdentifier::count)
            .sum()
    }

    /// Load a mock spec from a file, picking the format from the extension
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read mock spec {}", path.display()))?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let spec = if is_json {
            Self::from_json(&content)
        } else {
            Self::from_yaml(&content)
        };
        spec.with_context(|| format!("Invalid mock spec {}", path.display()))
    }

    /// Parse a mock spec from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let spec: MockSpec = serde_yaml::from_str(yaml)?;
        spec.validate()?;
        Ok(spec)
    }

    /// Parse a mock spec from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let spec: MockSpec = serde_json::from_str(json)?;
        spec.validate()?;
        Ok(spec)
    }

    /// Validate the mock spec
    pub fn validate(&self) -> Result<()> {
        for (job, identifiers) in &self.jobs {
            if job.trim().is_empty() {
                anyhow::bail!("Mock spec contains an empty job id");
            }
            for identifier in identifiers {
                Self::validate_identifier(job, identifier)?;
            }
        }
        Ok(())
    }

    fn validate_identifier(job: &str, identifier: &StepIdentifier) -> Result<()> {
        if identifier.selector.value().is_empty() {
            anyhow::bail!(
                "Job '{}' has a step identifier with an empty `{}`",
                job,
                identifier.selector.field()
            );
        }

        if let MockAction::Composite(nested) = &identifier.action {
            for inner in nested {
                Self::validate_identifier(job, inner)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::identifier::{MockPayload, StepSelector};

    #[test]
    fn test_parse_yaml_spec() {
        let yaml = r#"
build:
  - id: test
    mockWith: echo mocked
  - uses: ./actions/setup
    mockCompositeSteps:
      - name: Install
        mockWith: echo skipped
lint:
  - run: npm run lint
    mockWith:
      env:
        CI: "false"
"#;

        let spec = MockSpec::from_yaml(yaml).unwrap();
        let jobs: Vec<_> = spec.jobs().map(|(job, _)| job).collect();
        assert_eq!(jobs, vec!["build", "lint"]);
        assert_eq!(spec.identifier_count(), 4);

        let build = spec.job("build").unwrap();
        assert_eq!(
            build[0],
            StepIdentifier::mock_command(StepSelector::id("test"), "echo mocked")
        );
        assert!(build[1].is_composite());

        let lint = spec.job("lint").unwrap();
        assert!(matches!(
            &lint[0].action,
            MockAction::Replace(MockPayload::Partial(_))
        ));
    }

    #[test]
    fn test_parse_json_spec() {
        let json = r#"{ "build": [ { "id": "test", "mockWith": "echo mocked" } ] }"#;
        let spec = MockSpec::from_json(json).unwrap();
        assert_eq!(spec.identifier_count(), 1);
    }

    #[test]
    fn test_empty_selector_fails() {
        let yaml = r#"
build:
  - id: ""
    mockWith: echo mocked
"#;
        let err = MockSpec::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("empty `id`"));
    }

    #[test]
    fn test_empty_nested_selector_fails() {
        let yaml = r#"
build:
  - uses: ./actions/setup
    mockCompositeSteps:
      - name: ""
        mockWith: echo
"#;
        assert!(MockSpec::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_unrecognized_identifier_fails() {
        let yaml = r#"
build:
  - mockWith: echo mocked
"#;
        assert!(MockSpec::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_from_file_picks_format() {
        let dir = tempfile::tempdir().unwrap();

        let json_path = dir.path().join("mocks.json");
        std::fs::write(&json_path, r#"{ "build": [] }"#).unwrap();
        let spec = MockSpec::from_file(&json_path).unwrap();
        assert!(spec.is_empty());

        let yaml_path = dir.path().join("mocks.yml");
        std::fs::write(&yaml_path, "build:\n  - id: a\n    mockWith: echo\n").unwrap();
        let spec = MockSpec::from_file(&yaml_path).unwrap();
        assert_eq!(spec.identifier_count(), 1);
    }

    #[test]
    fn test_from_file_missing_mentions_path() {
        let err = MockSpec::from_file("/nonexistent/mocks_12345.yml").unwrap_err();
        assert!(err.to_string().contains("mocks_12345.yml"));
    }

    #[test]
    fn test_builder_appends() {
        let spec = MockSpec::new()
            .with_job("build", vec![StepIdentifier::mock_command(StepSelector::id("a"), "echo a")])
            .with_job("build", vec![StepIdentifier::mock_command(StepSelector::id("b"), "echo b")]);
        assert_eq!(spec.job("build").unwrap().len(), 2);
    }
}
