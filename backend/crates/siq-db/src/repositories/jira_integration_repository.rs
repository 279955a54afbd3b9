use crate::error::Result as DbErrorResult;
use crate::row::{parse_timestamp, parse_uuid};

use siq_core::JiraIntegration;

use chrono::Utc;
use uuid::Uuid;

#[derive(sqlx::FromRow)]
struct JiraIntegrationRow {
    id: String,
    workspace_id: String,
    jira_domain: String,
    jira_email: String,
    jira_api_token: String,
    active: i64,
    created_at: i64,
    updated_at: i64,
}

impl JiraIntegrationRow {
    fn into_integration(self) -> DbErrorResult<JiraIntegration> {
        Ok(JiraIntegration {
            id: parse_uuid(&self.id, "jira_integration.id")?,
            workspace_id: parse_uuid(&self.workspace_id, "jira_integration.workspace_id")?,
            jira_domain: self.jira_domain,
            jira_email: self.jira_email,
            jira_api_token: self.jira_api_token,
            active: self.active != 0,
            created_at: parse_timestamp(self.created_at, "jira_integration.created_at")?,
            updated_at: parse_timestamp(self.updated_at, "jira_integration.updated_at")?,
        })
    }
}

pub struct JiraIntegrationRepository;

impl JiraIntegrationRepository {
    pub async fn find_by_workspace<'e, E>(
        executor: E,
        workspace_id: Uuid,
    ) -> DbErrorResult<Option<JiraIntegration>>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let row = sqlx::query_as::<_, JiraIntegrationRow>(
            r#"
                SELECT id, workspace_id, jira_domain, jira_email, jira_api_token,
                       active, created_at, updated_at
                FROM siq_jira_integrations
                WHERE workspace_id = ?
            "#,
        )
        .bind(workspace_id.to_string())
        .fetch_optional(executor)
        .await?;

        row.map(JiraIntegrationRow::into_integration).transpose()
    }

    /// Update the credential row if one exists for the workspace, else
    /// insert a new one. Called once at the end of a successful export.
    pub async fn upsert<'e, E>(executor: E, integration: &JiraIntegration) -> DbErrorResult<()>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let now = Utc::now().timestamp();

        sqlx::query(
            r#"
                INSERT INTO siq_jira_integrations (
                    id, workspace_id, jira_domain, jira_email, jira_api_token,
                    active, created_at, updated_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                ON CONFLICT(workspace_id) DO UPDATE SET
                    jira_domain = excluded.jira_domain,
                    jira_email = excluded.jira_email,
                    jira_api_token = excluded.jira_api_token,
                    active = excluded.active,
                    updated_at = excluded.updated_at
            "#,
        )
        .bind(integration.id.to_string())
        .bind(integration.workspace_id.to_string())
        .bind(&integration.jira_domain)
        .bind(&integration.jira_email)
        .bind(&integration.jira_api_token)
        .bind(integration.active as i64)
        .bind(integration.created_at.timestamp())
        .bind(now)
        .execute(executor)
        .await?;

        Ok(())
    }
}
