use crate::api::jira::export_response::ExportedTaskDto;

use serde::Serialize;

/// POST /api/workspace/{workspace_id}/jira/export-sprint-folder response
/// envelope
#[derive(Debug, Serialize)]
pub struct SprintFolderExportResponse {
    pub success: bool,
    pub data: SprintFolderExportData,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SprintFolderExportData {
    pub tasks_exported: usize,
    pub tasks_failed: usize,
    pub sprints_created: usize,
    pub board_created: bool,
    pub filter_created: bool,
    pub project_key: String,
    pub exported_issues: Vec<ExportedTaskDto>,
    pub created_sprints: Vec<CreatedSprintDto>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedSprintDto {
    pub sprint_id: String,
    pub jira_sprint_id: i64,
    pub name: String,
    pub issues_moved: usize,
}
