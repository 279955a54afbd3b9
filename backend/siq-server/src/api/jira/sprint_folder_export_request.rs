use crate::api::jira::export_request::{JiraCredentialsDto, StatusMapping};

use serde::Deserialize;

/// POST /api/workspace/{workspace_id}/jira/export-sprint-folder
///
/// Same shape as the plain export request, with a sprint folder id in
/// place of the project/space selection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SprintFolderExportRequest {
    pub jira_credentials: JiraCredentialsDto,
    #[serde(default)]
    pub project_key: Option<String>,
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default)]
    pub create_new_project: bool,
    pub status_mappings: Vec<StatusMapping>,
    pub sprint_folder_id: String,
}
