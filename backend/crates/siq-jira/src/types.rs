//! Request and response payloads, one tagged type per remote operation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

// =============================================================================
// Responses
// =============================================================================

/// GET /rest/api/2/myself
#[derive(Debug, Clone, Deserialize)]
pub struct JiraUser {
    #[serde(rename = "accountId")]
    pub account_id: String,
    #[serde(rename = "displayName", default)]
    pub display_name: Option<String>,
    #[serde(rename = "emailAddress", default)]
    pub email_address: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IssueType {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub subtask: bool,
}

/// POST /rest/api/2/project (the create endpoint returns a numeric id)
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedProject {
    pub id: i64,
    pub key: String,
}

/// GET /rest/api/2/project/{key}
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectDetails {
    pub id: String,
    pub key: String,
    pub name: String,
    #[serde(rename = "issueTypes", default)]
    pub issue_types: Vec<IssueType>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Priority {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Filter {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub jql: Option<String>,
}

/// POST /rest/agile/1.0/board
#[derive(Debug, Clone, Deserialize)]
pub struct Board {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type", default)]
    pub board_type: Option<String>,
}

/// POST /rest/api/2/issue
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedIssue {
    pub id: String,
    pub key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatusCategory {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "colorName", default)]
    pub color_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JiraStatus {
    pub id: String,
    pub name: String,
    #[serde(rename = "statusCategory", default)]
    pub status_category: Option<StatusCategory>,
}

/// One entry of GET /rest/api/2/project/{key}/statuses: an issue type with
/// the statuses its workflow allows.
#[derive(Debug, Clone, Deserialize)]
pub struct IssueTypeStatuses {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub statuses: Vec<JiraStatus>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Transition {
    pub id: String,
    pub name: String,
    pub to: JiraStatus,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransitionsResponse {
    #[serde(default)]
    pub transitions: Vec<Transition>,
}

/// GET /rest/api/2/field
#[derive(Debug, Clone, Deserialize)]
pub struct Field {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub custom: bool,
}

/// POST /rest/agile/1.0/sprint
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteSprint {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub state: Option<String>,
}

/// Error envelope Jira attaches to non-2xx responses
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ErrorBody {
    #[serde(rename = "errorMessages", default)]
    pub error_messages: Vec<String>,
    #[serde(default)]
    pub errors: HashMap<String, String>,
}

impl ErrorBody {
    /// Flatten into a single human-readable message
    pub fn flatten(&self) -> String {
        let mut parts: Vec<String> = self.error_messages.clone();
        for (field, message) in &self.errors {
            parts.push(format!("{}: {}", field, message));
        }
        if parts.is_empty() {
            "Unknown error".to_string()
        } else {
            parts.join("; ")
        }
    }
}

// =============================================================================
// Requests
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct CreateProjectRequest {
    pub key: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "projectTypeKey")]
    pub project_type_key: String,
    #[serde(rename = "leadAccountId")]
    pub lead_account_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateProjectIssueTypesRequest {
    #[serde(rename = "issueTypeIds")]
    pub issue_type_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateFilterRequest {
    pub name: String,
    pub description: String,
    pub jql: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateBoardRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub board_type: String,
    #[serde(rename = "filterId")]
    pub filter_id: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectRef {
    pub key: String,
}

/// Issue type reference, by id when project discovery succeeded, by name
/// for the literal fallbacks.
#[derive(Debug, Clone, Serialize)]
pub struct IssueTypeRef {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl IssueTypeRef {
    pub fn by_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            name: None,
        }
    }

    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PriorityRef {
    pub name: String,
}

/// Create-issue fields. The assignee is deliberately absent: assignment is
/// always a separate follow-up call.
#[derive(Debug, Clone, Serialize)]
pub struct NewIssueFields {
    pub project: ProjectRef,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub issuetype: IssueTypeRef,
    pub priority: PriorityRef,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateIssueRequest {
    pub fields: NewIssueFields,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssignIssueRequest {
    #[serde(rename = "accountId")]
    pub account_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TransitionRequest {
    pub transition: TransitionRef,
}

#[derive(Debug, Clone, Serialize)]
pub struct TransitionRef {
    pub id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateSprintRequest {
    pub name: String,
    #[serde(rename = "originBoardId")]
    pub origin_board_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
    #[serde(rename = "startDate", skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(rename = "endDate", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MoveIssuesRequest {
    pub issues: Vec<String>,
}
