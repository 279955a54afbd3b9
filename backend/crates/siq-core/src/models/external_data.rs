use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Remote identifiers written onto a task after its issue is created.
/// Stored as a JSON column on the task row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskExternalData {
    pub jira_key: String,
    pub jira_id: String,
    pub jira_project_key: String,
    pub last_synced_at: DateTime<Utc>,
}

/// Remote identifiers written onto a project after a plain-project export.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectExternalData {
    pub jira_project_key: String,
    pub last_synced_at: DateTime<Utc>,
}

/// Remote status details written onto a local status after export.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatusExternalData {
    pub jira_name: String,
    pub jira_category: Option<String>,
    pub jira_color: Option<String>,
    pub jira_project_key: String,
}
