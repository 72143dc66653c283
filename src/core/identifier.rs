//! Step identifiers: which step to mock, and what to replace it with

use crate::core::{error::MockError, step::Step};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The field a step is looked up by
///
/// When an identifier names more than one field, the variant is chosen in
/// the order `id`, `name`, `uses`, `run`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StepSelector {
    Id(String),
    Name(String),
    Uses(String),
    Run(String),
}

impl StepSelector {
    pub fn id(value: impl Into<String>) -> Self {
        StepSelector::Id(value.into())
    }

    pub fn name(value: impl Into<String>) -> Self {
        StepSelector::Name(value.into())
    }

    pub fn uses(value: impl Into<String>) -> Self {
        StepSelector::Uses(value.into())
    }

    pub fn run(value: impl Into<String>) -> Self {
        StepSelector::Run(value.into())
    }

    /// Name of the step field this selector compares against
    pub fn field(&self) -> &'static str {
        match self {
            StepSelector::Id(_) => "id",
            StepSelector::Name(_) => "name",
            StepSelector::Uses(_) => "uses",
            StepSelector::Run(_) => "run",
        }
    }

    /// The lookup key
    pub fn value(&self) -> &str {
        match self {
            StepSelector::Id(v)
            | StepSelector::Name(v)
            | StepSelector::Uses(v)
            | StepSelector::Run(v) => v,
        }
    }

    /// Check whether a step's corresponding field equals the lookup key
    ///
    /// Numeric and boolean fields compare by their string form.
    pub fn matches(&self, step: &Step) -> bool {
        step.scalar(self.field()).as_deref() == Some(self.value())
    }
}

impl fmt::Display for StepSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?}", self.field(), self.value())
    }
}

/// Replacement applied to a located step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MockPayload {
    /// Replace the step with an inline command
    Command(String),
    /// Merge these fields into the step
    Partial(Step),
}

/// What to do with a located step
#[derive(Debug, Clone, PartialEq)]
pub enum MockAction {
    /// Fold a payload into the step itself
    Replace(MockPayload),
    /// The step uses a local composite action; mock these steps inside it
    Composite(Vec<StepIdentifier>),
}

/// A selector paired with the mock to apply to the step it finds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawStepIdentifier", into = "RawStepIdentifier")]
pub struct StepIdentifier {
    pub selector: StepSelector,
    pub action: MockAction,
}

impl StepIdentifier {
    /// Identifier that replaces the located step
    pub fn mock(selector: StepSelector, payload: MockPayload) -> Self {
        Self {
            selector,
            action: MockAction::Replace(payload),
        }
    }

    /// Identifier that replaces the located step with an inline command
    pub fn mock_command(selector: StepSelector, command: impl Into<String>) -> Self {
        Self::mock(selector, MockPayload::Command(command.into()))
    }

    /// Identifier that mocks steps inside the composite action the located step uses
    pub fn composite(selector: StepSelector, steps: Vec<StepIdentifier>) -> Self {
        Self {
            selector,
            action: MockAction::Composite(steps),
        }
    }

    pub fn is_composite(&self) -> bool {
        matches!(self.action, MockAction::Composite(_))
    }

    /// Number of identifiers including nested composite ones
    pub fn count(&self) -> usize {
        match &self.action {
            MockAction::Replace(_) => 1,
            MockAction::Composite(nested) => 1 + nested.iter().map(Self::count).sum::<usize>(),
        }
    }
}

/// Wire shape of an identifier as written in mock spec files
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawStepIdentifier {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    uses: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    run: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    mock_with: Option<MockPayload>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    mock_composite_steps: Option<Vec<StepIdentifier>>,
}

impl TryFrom<RawStepIdentifier> for StepIdentifier {
    type Error = MockError;

    fn try_from(raw: RawStepIdentifier) -> Result<Self, Self::Error> {
        let selector = if let Some(id) = raw.id {
            StepSelector::Id(id)
        } else if let Some(name) = raw.name {
            StepSelector::Name(name)
        } else if let Some(uses) = raw.uses {
            StepSelector::Uses(uses)
        } else if let Some(run) = raw.run {
            StepSelector::Run(run)
        } else {
            return Err(MockError::unrecognized(
                "expected one of `id`, `name`, `uses` or `run`",
            ));
        };

        let action = match (raw.mock_with, raw.mock_composite_steps) {
            (Some(payload), None) => MockAction::Replace(payload),
            (None, Some(steps)) => MockAction::Composite(steps),
            (Some(_), Some(_)) => {
                return Err(MockError::unrecognized(format!(
                    "step with {} sets both `mockWith` and `mockCompositeSteps`",
                    selector
                )))
            }
            (None, None) => {
                return Err(MockError::unrecognized(format!(
                    "step with {} needs `mockWith` or `mockCompositeSteps`",
                    selector
                )))
            }
        };

        Ok(StepIdentifier { selector, action })
    }
}

impl From<StepIdentifier> for RawStepIdentifier {
    fn from(identifier: StepIdentifier) -> Self {
        let mut raw = RawStepIdentifier::default();
        match identifier.selector {
            StepSelector::Id(v) => raw.id = Some(v),
            StepSelector::Name(v) => raw.name = Some(v),
            StepSelector::Uses(v) => raw.uses = Some(v),
            StepSelector::Run(v) => raw.run = Some(v),
        }
        match identifier.action {
            MockAction::Replace(payload) => raw.mock_with = Some(payload),
            MockAction::Composite(steps) => raw.mock_composite_steps = Some(steps),
        }
        raw
    }
}
