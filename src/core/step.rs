//! Step domain model

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use std::borrow::Cow;

/// Prefix that marks a `uses` reference as a composite action stored in the repository
pub const LOCAL_ACTION_PREFIX: &str = "./";

/// A single workflow step
///
/// Steps are kept as ordered YAML mappings so that fields this crate never
/// inspects (`if`, `shell`, `timeout-minutes`, ...) survive a rewrite
/// untouched. The fields the mocker cares about have typed accessors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Step {
    fields: Mapping,
}

impl Step {
    /// Create an empty step
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing mapping
    pub fn from_mapping(fields: Mapping) -> Self {
        Self { fields }
    }

    /// Builder-style field setter
    pub fn with_field(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.set(field, value);
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.str_field("id")
    }

    pub fn name(&self) -> Option<&str> {
        self.str_field("name")
    }

    pub fn uses(&self) -> Option<&str> {
        self.str_field("uses")
    }

    pub fn run(&self) -> Option<&str> {
        self.str_field("run")
    }

    pub fn env(&self) -> Option<&Mapping> {
        self.fields.get("env").and_then(Value::as_mapping)
    }

    /// The `with` inputs passed to the action
    pub fn inputs(&self) -> Option<&Mapping> {
        self.fields.get("with").and_then(Value::as_mapping)
    }

    /// The `uses` reference if it points at a composite action inside the repository
    pub fn local_action(&self) -> Option<&str> {
        self.uses().filter(|uses| uses.starts_with(LOCAL_ACTION_PREFIX))
    }

    /// A scalar field in string form, so `name: 2024` reads as `"2024"`
    pub fn scalar(&self, field: &str) -> Option<Cow<'_, str>> {
        match self.fields.get(field)? {
            Value::String(text) => Some(Cow::Borrowed(text.as_str())),
            Value::Number(number) => Some(Cow::Owned(number.to_string())),
            Value::Bool(flag) => Some(Cow::Owned(flag.to_string())),
            _ => None,
        }
    }

    /// Get a raw field value
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Get a raw field value by YAML key
    pub fn get_value(&self, key: &Value) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Set a field, keeping its position if it already exists
    pub fn set(&mut self, field: &str, value: impl Into<Value>) {
        self.fields.insert(Value::from(field), value.into());
    }

    /// Set a field by YAML key, keeping its position if it already exists
    pub fn set_value(&mut self, key: Value, value: Value) {
        self.fields.insert(key, value);
    }

    /// Remove a field, preserving the order of the remaining ones
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.fields.shift_remove(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn iter(&self) -> serde_yaml::mapping::Iter<'_> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Short human-readable label for logs and CLI output
    pub fn label(&self) -> String {
        if let Some(id) = self.id() {
            format!("id={}", id)
        } else if let Some(name) = self.name() {
            format!("name={}", name)
        } else if let Some(uses) = self.uses() {
            format!("uses={}", uses)
        } else if let Some(run) = self.run() {
            format!("run={}", run.lines().next().unwrap_or_default())
        } else {
            "<anonymous>".to_string()
        }
    }

    fn str_field(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(Value::as_str)
    }
}

impl From<Mapping> for Step {
    fn from(fields: Mapping) -> Self {
        Self::from_mapping(fields)
    }
}
