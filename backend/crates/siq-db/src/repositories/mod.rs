pub mod jira_integration_repository;
pub mod profile_repository;
pub mod project_repository;
pub mod space_repository;
pub mod sprint_folder_repository;
pub mod sprint_repository;
pub mod status_repository;
pub mod task_repository;
pub mod team_member_repository;
pub mod workspace_repository;
