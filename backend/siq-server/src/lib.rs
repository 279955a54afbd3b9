pub mod api;
pub mod app_state;
pub mod error;
pub mod export;
pub mod health;
pub mod logger;
pub mod routes;

#[cfg(test)]
mod tests;

pub use api::{
    error::ApiError,
    error::Result as ApiResult,
    extractors::user_id::UserId,
    jira::{
        export_request::{ExportRequest, JiraCredentialsDto, StatusMapping},
        export_response::{ExportData, ExportResponse, ExportedTaskDto},
        jira::{export_sprint_folder_to_jira, export_to_jira},
        sprint_folder_export_request::SprintFolderExportRequest,
        sprint_folder_export_response::{
            CreatedSprintDto, SprintFolderExportData, SprintFolderExportResponse,
        },
    },
};

pub use crate::app_state::AppState;
pub use crate::routes::build_router;
