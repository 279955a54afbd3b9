pub mod error;
pub mod models;

#[cfg(test)]
mod tests;

pub use error::{CoreError, Result as CoreResult};
pub use models::external_data::{ProjectExternalData, StatusExternalData, TaskExternalData};
pub use models::jira_integration::JiraIntegration;
pub use models::profile::Profile;
pub use models::project::Project;
pub use models::space::Space;
pub use models::sprint::Sprint;
pub use models::sprint_folder::SprintFolder;
pub use models::status::Status;
pub use models::sync_status::SyncStatus;
pub use models::task::Task;
pub use models::task_priority::TaskPriority;
pub use models::team_member::TeamMember;
pub use models::workspace::Workspace;

/// Integration type written onto exported rows
pub const JIRA_INTEGRATION_TYPE: &str = "jira";
