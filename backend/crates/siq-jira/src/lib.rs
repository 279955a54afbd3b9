//! Typed client for the Jira Cloud REST API, scoped to the operations the
//! export pipeline consumes. Responses are decoded into per-operation
//! result structs at the HTTP boundary so pipeline logic never touches an
//! unchecked shape.

pub mod client;
pub mod error;
pub mod retry;
pub mod types;

pub use client::{JiraClient, JiraCredentials};
pub use error::{JiraError, Result as JiraResult};
pub use retry::{DelaySchedule, RetryPolicy, with_retry};
