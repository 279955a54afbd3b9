use serde::Serialize;

/// POST /api/workspace/{workspace_id}/jira/export response envelope
#[derive(Debug, Serialize)]
pub struct ExportResponse {
    pub success: bool,
    pub data: ExportData,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportData {
    pub tasks_exported: usize,
    pub tasks_failed: usize,
    pub total_tasks: usize,
    pub exported_tasks: Vec<ExportedTaskDto>,
    pub project_key: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedTaskDto {
    pub task_id: String,
    pub jira_issue_key: String,
    pub jira_issue_id: String,
}
