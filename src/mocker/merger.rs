//! Step merger - folds a mock payload into a located step

use crate::core::{MockPayload, Step};
use serde_yaml::{Mapping, Value};

/// How an override field combines with the original step's value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldMergePolicy {
    /// Override value wholly replaces the original
    Replace,
    /// Key union of both mappings, override wins on collision
    Union,
}

/// Fields with a policy other than [`FieldMergePolicy::Replace`]
pub const FIELD_MERGE_POLICIES: &[(&str, FieldMergePolicy)] = &[
    ("env", FieldMergePolicy::Union),
    ("with", FieldMergePolicy::Union),
];

/// Look up the merge policy for a step field
pub fn merge_policy(field: &str) -> FieldMergePolicy {
    FIELD_MERGE_POLICIES
        .iter()
        .find(|(name, _)| *name == field)
        .map(|(_, policy)| *policy)
        .unwrap_or(FieldMergePolicy::Replace)
}

/// Produce the mocked version of `original`
pub fn merge(original: &Step, payload: &MockPayload) -> Step {
    match payload {
        MockPayload::Command(command) => mock_command(original, command),
        MockPayload::Partial(overrides) => merge_partial(original, overrides),
    }
}

/// A mocked command always runs inline, never through an action
fn mock_command(original: &Step, command: &str) -> Step {
    let mut step = original.clone();
    step.set("run", command);
    step.remove("uses");
    step
}

fn merge_partial(original: &Step, overrides: &Step) -> Step {
    let mut merged = original.clone();

    for (key, value) in overrides.iter() {
        let policy = key
            .as_str()
            .map(merge_policy)
            .unwrap_or(FieldMergePolicy::Replace);

        let next = match (policy, merged.get_value(key), value) {
            (FieldMergePolicy::Union, Some(Value::Mapping(base)), Value::Mapping(extra)) => {
                Value::Mapping(union(base, extra))
            }
            (FieldMergePolicy::Union, Some(_), Value::Null) => continue,
            _ => value.clone(),
        };

        merged.set_value(key.clone(), next);
    }

    merged
}

fn union(base: &Mapping, extra: &Mapping) -> Mapping {
    let mut result = base.clone();
    for (key, value) in extra {
        result.insert(key.clone(), value.clone());
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(yaml: &str) -> Step {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_policy_table() {
        assert_eq!(merge_policy("env"), FieldMergePolicy::Union);
        assert_eq!(merge_policy("with"), FieldMergePolicy::Union);
        assert_eq!(merge_policy("run"), FieldMergePolicy::Replace);
        assert_eq!(merge_policy("if"), FieldMergePolicy::Replace);
    }

    #[test]
    fn test_command_replaces_uses_with_run() {
        let original = step(
            r#"
id: deploy
name: Deploy
uses: some/deploy-action@v1
with:
  target: prod
"#,
        );
        let merged = merge(&original, &MockPayload::Command("echo mocked".to_string()));

        assert_eq!(merged.run(), Some("echo mocked"));
        assert_eq!(merged.uses(), None);
        assert!(!merged.contains("uses"));
        assert_eq!(merged.id(), Some("deploy"));
        assert_eq!(merged.name(), Some("Deploy"));
        assert_eq!(merged.inputs(), original.inputs());
    }

    #[test]
    fn test_command_overwrites_existing_run_in_place() {
        let original = step("id: test\nrun: npm test\nshell: bash\n");
        let merged = merge(&original, &MockPayload::Command("echo mocked".to_string()));

        assert_eq!(
            serde_yaml::to_string(&merged).unwrap(),
            "id: test\nrun: echo mocked\nshell: bash\n"
        );
    }

    #[test]
    fn test_with_is_key_union() {
        let original = step("uses: a/b@v1\nwith:\n  a: 1\n");
        let merged = merge(
            &original,
            &MockPayload::Partial(step("with:\n  b: 2\n")),
        );
        let expected: Mapping = serde_yaml::from_str("a: 1\nb: 2\n").unwrap();
        assert_eq!(merged.inputs(), Some(&expected));
    }

    #[test]
    fn test_with_override_wins_on_collision() {
        let original = step("uses: a/b@v1\nwith:\n  a: 1\n");
        let merged = merge(
            &original,
            &MockPayload::Partial(step("with:\n  a: 2\n")),
        );
        let inputs = merged.inputs().unwrap();
        assert_eq!(inputs.len(), 1);
        assert_eq!(inputs.get("a"), Some(&Value::from(2)));
    }

    #[test]
    fn test_env_is_key_union() {
        let original = step("run: make\nenv:\n  A: one\n  B: two\n");
        let merged = merge(
            &original,
            &MockPayload::Partial(step("env:\n  B: mocked\n  C: three\n")),
        );
        let env = merged.env().unwrap();
        assert_eq!(env.get("A"), Some(&Value::from("one")));
        assert_eq!(env.get("B"), Some(&Value::from("mocked")));
        assert_eq!(env.get("C"), Some(&Value::from("three")));
    }

    #[test]
    fn test_other_fields_replace_and_survive() {
        let original = step(
            r#"
name: Build
run: make build
if: github.event_name == 'push'
with:
  a: 1
"#,
        );
        let merged = merge(
            &original,
            &MockPayload::Partial(step("run: echo build\ncontinue-on-error: true\n")),
        );

        assert_eq!(merged.run(), Some("echo build"));
        assert_eq!(merged.name(), Some("Build"));
        assert_eq!(merged.get("if"), original.get("if"));
        assert_eq!(merged.inputs(), original.inputs());
        assert_eq!(merged.get("continue-on-error"), Some(&Value::from(true)));
    }

    #[test]
    fn test_union_field_only_in_override_is_added() {
        let original = step("run: make\n");
        let merged = merge(
            &original,
            &MockPayload::Partial(step("env:\n  A: one\n")),
        );
        assert_eq!(merged.env().unwrap().len(), 1);
    }

    #[test]
    fn test_null_union_override_keeps_original() {
        let original = step("uses: a/b@v1\nwith:\n  a: 1\n");
        let merged = merge(&original, &MockPayload::Partial(step("with: null\n")));
        assert_eq!(merged.inputs(), original.inputs());
    }

    #[test]
    fn test_non_mapping_union_value_is_replaced() {
        let original = step("uses: a/b@v1\nwith: ${{ fromJSON(inputs.args) }}\n");
        let merged = merge(&original, &MockPayload::Partial(step("with:\n  a: 1\n")));
        assert_eq!(merged.inputs().unwrap().len(), 1);
    }

    #[test]
    fn test_empty_partial_is_identity() {
        let original = step("id: a\nuses: a/b@v1\nwith:\n  x: 1\n");
        let merged = merge(&original, &MockPayload::Partial(Step::new()));
        assert_eq!(merged, original);
    }
}
