//! Step mocking engine
//!
//! - [`locator`] finds the step an identifier refers to
//! - [`merger`] folds a mock payload into that step
//! - [`resolver`] finds workflow files and local composite actions on disk
//! - [`orchestrator`] drives a whole pass and stages the rewritten documents

pub mod locator;
pub mod merger;
pub mod orchestrator;
pub mod resolver;

pub use locator::locate;
pub use merger::{merge, merge_policy, FieldMergePolicy, FIELD_MERGE_POLICIES};
pub use orchestrator::{MockPlan, StepMocker};
pub use resolver::{
    repository_root, resolve_composite_action, resolve_composite_action_in,
    resolve_workflow_path, CompositeActionLocation,
};
