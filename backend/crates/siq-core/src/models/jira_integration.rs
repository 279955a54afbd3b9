use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One-per-workspace Jira credential record.
///
/// Upserted at the end of a successful export; never read back
/// mid-pipeline (credentials are supplied fresh on every request).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JiraIntegration {
    pub id: Uuid,
    pub workspace_id: Uuid,
    pub jira_domain: String,
    pub jira_email: String,
    pub jira_api_token: String,
    pub active: bool,

    // Audit
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl JiraIntegration {
    pub fn new(
        workspace_id: Uuid,
        jira_domain: String,
        jira_email: String,
        jira_api_token: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            workspace_id,
            jira_domain,
            jira_email,
            jira_api_token,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }
}
