pub mod external_data;
pub mod jira_integration;
pub mod profile;
pub mod project;
pub mod space;
pub mod sprint;
pub mod sprint_folder;
pub mod status;
pub mod sync_status;
pub mod task;
pub mod task_priority;
pub mod team_member;
pub mod workspace;
