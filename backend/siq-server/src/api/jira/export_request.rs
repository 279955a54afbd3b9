use serde::Deserialize;

/// Caller-supplied Jira credentials, never persisted before the export
/// succeeds.
#[derive(Debug, Clone, Deserialize)]
pub struct JiraCredentialsDto {
    pub jira_domain: String,
    pub jira_email: String,
    pub jira_api_token: String,
}

/// One row of the caller's local-to-remote status mapping table.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusMapping {
    pub local_status_id: String,
    pub local_status_name: String,
    #[serde(default)]
    pub jira_status_id: Option<String>,
    #[serde(default)]
    pub jira_status_name: Option<String>,
}

/// POST /api/workspace/{workspace_id}/jira/export
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    pub jira_credentials: JiraCredentialsDto,
    #[serde(default)]
    pub project_key: Option<String>,
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default)]
    pub create_new_project: bool,
    pub status_mappings: Vec<StatusMapping>,
    #[serde(default)]
    pub selected_project_id: Option<String>,
    #[serde(default)]
    pub selected_space_id: Option<String>,
}
