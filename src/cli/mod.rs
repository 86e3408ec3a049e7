//! Command workflows, independent of argument parsing

pub mod orchestration;

pub use orchestration::{run_update_workflow, ComponentOutcome, UpdateWorkflowArgs};
