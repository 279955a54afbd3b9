//! The Jira export pipeline.
//!
//! Stages run in order per request: resolution, project provisioning,
//! filter/board provisioning, the per-task translation loop, and local
//! reconciliation. The sprint-folder path adds remote sprint creation
//! after the task loop.

pub mod provision;
pub mod reconcile;
pub mod resolve;
pub mod sprints;
pub mod tasks;
pub mod translate;
