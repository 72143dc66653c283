//! step-mocker - rewrite CI workflow steps with mock replacements

pub mod cli;
pub mod core;
pub mod mocker;
pub mod storage;

// Re-export commonly used types
pub use crate::core::{MockAction, MockError, MockPayload, MockSpec, Step, StepIdentifier, StepSelector};
pub use crate::core::{ActionBundle, Workflow, WorkflowDocument};
pub use crate::mocker::{MockPlan, StepMocker};
pub use crate::storage::{FileSystemStore, InMemoryStore, WorkflowStore};
