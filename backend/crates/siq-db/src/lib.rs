pub mod error;
pub mod repositories;

mod row;

pub use error::{DbError, Result};
pub use repositories::jira_integration_repository::JiraIntegrationRepository;
pub use repositories::profile_repository::ProfileRepository;
pub use repositories::project_repository::ProjectRepository;
pub use repositories::space_repository::SpaceRepository;
pub use repositories::sprint_folder_repository::SprintFolderRepository;
pub use repositories::sprint_repository::SprintRepository;
pub use repositories::status_repository::StatusRepository;
pub use repositories::task_repository::TaskRepository;
pub use repositories::team_member_repository::TeamMemberRepository;
pub use repositories::workspace_repository::WorkspaceRepository;

/// Run the embedded migrations against a pool.
pub async fn migrate(pool: &sqlx::SqlitePool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
