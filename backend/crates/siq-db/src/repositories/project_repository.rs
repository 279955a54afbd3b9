use crate::error::Result as DbErrorResult;
use crate::row::{parse_json, parse_opt_timestamp, parse_opt_uuid, parse_timestamp, parse_uuid};

use siq_core::{JIRA_INTEGRATION_TYPE, Project, ProjectExternalData};

use chrono::Utc;
use uuid::Uuid;

#[derive(sqlx::FromRow)]
struct ProjectRow {
    id: String,
    workspace_id: String,
    space_id: Option<String>,
    name: String,
    integration_type: Option<String>,
    external_id: Option<String>,
    external_data: Option<String>,
    last_synced_at: Option<i64>,
    created_at: i64,
    updated_at: i64,
}

impl ProjectRow {
    fn into_project(self) -> DbErrorResult<Project> {
        Ok(Project {
            id: parse_uuid(&self.id, "project.id")?,
            workspace_id: parse_uuid(&self.workspace_id, "project.workspace_id")?,
            space_id: parse_opt_uuid(self.space_id.as_deref(), "project.space_id")?,
            name: self.name,
            integration_type: self.integration_type,
            external_id: self.external_id,
            external_data: parse_json(self.external_data.as_deref(), "project.external_data")?,
            last_synced_at: parse_opt_timestamp(self.last_synced_at),
            created_at: parse_timestamp(self.created_at, "project.created_at")?,
            updated_at: parse_timestamp(self.updated_at, "project.updated_at")?,
        })
    }
}

const PROJECT_COLUMNS: &str = r#"
    id, workspace_id, space_id, name,
    integration_type, external_id, external_data, last_synced_at,
    created_at, updated_at
"#;

pub struct ProjectRepository;

impl ProjectRepository {
    pub async fn create<'e, E>(executor: E, project: &Project) -> DbErrorResult<()>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        sqlx::query(
            r#"
                INSERT INTO siq_projects (
                    id, workspace_id, space_id, name,
                    integration_type, external_id, external_data, last_synced_at,
                    created_at, updated_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(project.id.to_string())
        .bind(project.workspace_id.to_string())
        .bind(project.space_id.map(|id| id.to_string()))
        .bind(&project.name)
        .bind(&project.integration_type)
        .bind(&project.external_id)
        .bind(
            project
                .external_data
                .as_ref()
                .and_then(|d| serde_json::to_string(d).ok()),
        )
        .bind(project.last_synced_at.map(|dt| dt.timestamp()))
        .bind(project.created_at.timestamp())
        .bind(project.updated_at.timestamp())
        .execute(executor)
        .await?;

        Ok(())
    }

    pub async fn find_by_id<'e, E>(executor: E, id: Uuid) -> DbErrorResult<Option<Project>>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let row = sqlx::query_as::<_, ProjectRow>(&format!(
            "SELECT {} FROM siq_projects WHERE id = ?",
            PROJECT_COLUMNS
        ))
        .bind(id.to_string())
        .fetch_optional(executor)
        .await?;

        row.map(ProjectRow::into_project).transpose()
    }

    /// Write remote identifiers onto the project after a plain-project
    /// export. Never rolled back.
    pub async fn mark_synced<'e, E>(
        executor: E,
        id: Uuid,
        external_id: &str,
        external_data: &ProjectExternalData,
    ) -> DbErrorResult<()>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let data = serde_json::to_string(external_data).unwrap_or_default();
        let now = Utc::now().timestamp();

        sqlx::query(
            r#"
                UPDATE siq_projects
                SET integration_type = ?,
                    external_id = ?,
                    external_data = ?,
                    last_synced_at = ?,
                    updated_at = ?
                WHERE id = ?
            "#,
        )
        .bind(JIRA_INTEGRATION_TYPE)
        .bind(external_id)
        .bind(data)
        .bind(now)
        .bind(now)
        .bind(id.to_string())
        .execute(executor)
        .await?;

        Ok(())
    }
}
