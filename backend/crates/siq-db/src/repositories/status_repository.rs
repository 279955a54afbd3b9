use crate::error::Result as DbErrorResult;
use crate::row::{parse_json, parse_timestamp, parse_uuid};

use siq_core::{JIRA_INTEGRATION_TYPE, Status, StatusExternalData, SyncStatus};

use std::str::FromStr;

use chrono::Utc;
use uuid::Uuid;

#[derive(sqlx::FromRow)]
struct StatusRow {
    id: String,
    workspace_id: String,
    name: String,
    color: Option<String>,
    position: i64,
    integration_type: Option<String>,
    external_id: Option<String>,
    external_data: Option<String>,
    sync_status: Option<String>,
    pending_sync: i64,
    created_at: i64,
    updated_at: i64,
}

impl StatusRow {
    fn into_status(self) -> DbErrorResult<Status> {
        Ok(Status {
            id: parse_uuid(&self.id, "status.id")?,
            workspace_id: parse_uuid(&self.workspace_id, "status.workspace_id")?,
            name: self.name,
            color: self.color,
            position: self.position as i32,
            integration_type: self.integration_type,
            external_id: self.external_id,
            external_data: parse_json(self.external_data.as_deref(), "status.external_data")?,
            sync_status: self
                .sync_status
                .as_deref()
                .and_then(|s| SyncStatus::from_str(s).ok()),
            pending_sync: self.pending_sync != 0,
            created_at: parse_timestamp(self.created_at, "status.created_at")?,
            updated_at: parse_timestamp(self.updated_at, "status.updated_at")?,
        })
    }
}

const STATUS_COLUMNS: &str = r#"
    id, workspace_id, name, color, position,
    integration_type, external_id, external_data, sync_status, pending_sync,
    created_at, updated_at
"#;

pub struct StatusRepository;

impl StatusRepository {
    pub async fn create<'e, E>(executor: E, status: &Status) -> DbErrorResult<()>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        sqlx::query(
            r#"
                INSERT INTO siq_statuses (
                    id, workspace_id, name, color, position,
                    integration_type, external_id, external_data, sync_status, pending_sync,
                    created_at, updated_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(status.id.to_string())
        .bind(status.workspace_id.to_string())
        .bind(&status.name)
        .bind(&status.color)
        .bind(status.position)
        .bind(&status.integration_type)
        .bind(&status.external_id)
        .bind(
            status
                .external_data
                .as_ref()
                .and_then(|d| serde_json::to_string(d).ok()),
        )
        .bind(status.sync_status.map(|s| s.as_str().to_string()))
        .bind(status.pending_sync as i64)
        .bind(status.created_at.timestamp())
        .bind(status.updated_at.timestamp())
        .execute(executor)
        .await?;

        Ok(())
    }

    pub async fn find_by_id<'e, E>(executor: E, id: Uuid) -> DbErrorResult<Option<Status>>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let row = sqlx::query_as::<_, StatusRow>(&format!(
            "SELECT {} FROM siq_statuses WHERE id = ?",
            STATUS_COLUMNS
        ))
        .bind(id.to_string())
        .fetch_optional(executor)
        .await?;

        row.map(StatusRow::into_status).transpose()
    }

    pub async fn find_by_workspace<'e, E>(
        executor: E,
        workspace_id: Uuid,
    ) -> DbErrorResult<Vec<Status>>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let rows = sqlx::query_as::<_, StatusRow>(&format!(
            r#"
                SELECT {}
                FROM siq_statuses
                WHERE workspace_id = ?
                ORDER BY position, id
            "#,
            STATUS_COLUMNS
        ))
        .bind(workspace_id.to_string())
        .fetch_all(executor)
        .await?;

        rows.into_iter().map(StatusRow::into_status).collect()
    }

    /// Write remote status details onto the local status. Done once at the
    /// end of an export since statuses are shared across tasks.
    pub async fn mark_synced<'e, E>(
        executor: E,
        id: Uuid,
        external_id: &str,
        external_data: &StatusExternalData,
    ) -> DbErrorResult<()>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let data = serde_json::to_string(external_data).unwrap_or_default();
        let now = Utc::now().timestamp();

        sqlx::query(
            r#"
                UPDATE siq_statuses
                SET integration_type = ?,
                    external_id = ?,
                    external_data = ?,
                    sync_status = 'synced',
                    pending_sync = 0,
                    updated_at = ?
                WHERE id = ?
            "#,
        )
        .bind(JIRA_INTEGRATION_TYPE)
        .bind(external_id)
        .bind(data)
        .bind(now)
        .bind(id.to_string())
        .execute(executor)
        .await?;

        Ok(())
    }
}
