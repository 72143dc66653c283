//! Core domain models for step mocking
//!
//! This module defines the documents being rewritten (workflows and
//! composite actions), their steps, and the identifiers that say which
//! steps to mock and how.

pub mod config;
pub mod document;
pub mod error;
pub mod identifier;
pub mod step;

pub use config::MockSpec;
pub use document::{to_yaml, ActionBundle, ActionRuns, Job, Workflow, WorkflowDocument};
pub use error::MockError;
pub use identifier::{MockAction, MockPayload, StepIdentifier, StepSelector};
pub use step::Step;
