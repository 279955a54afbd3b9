use crate::error::Result as DbErrorResult;
use crate::row::{parse_timestamp, parse_uuid};

use siq_core::Workspace;

#[derive(sqlx::FromRow)]
struct WorkspaceRow {
    id: String,
    short_id: String,
    name: String,
    created_at: i64,
    updated_at: i64,
}

impl WorkspaceRow {
    fn into_workspace(self) -> DbErrorResult<Workspace> {
        Ok(Workspace {
            id: parse_uuid(&self.id, "workspace.id")?,
            short_id: self.short_id,
            name: self.name,
            created_at: parse_timestamp(self.created_at, "workspace.created_at")?,
            updated_at: parse_timestamp(self.updated_at, "workspace.updated_at")?,
        })
    }
}

pub struct WorkspaceRepository;

impl WorkspaceRepository {
    pub async fn create<'e, E>(executor: E, workspace: &Workspace) -> DbErrorResult<()>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        sqlx::query(
            r#"
                INSERT INTO siq_workspaces (id, short_id, name, created_at, updated_at)
                VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(workspace.id.to_string())
        .bind(&workspace.short_id)
        .bind(&workspace.name)
        .bind(workspace.created_at.timestamp())
        .bind(workspace.updated_at.timestamp())
        .execute(executor)
        .await?;

        Ok(())
    }

    /// Resolve a workspace by its public short id. Done once per export
    /// request; the result is threaded through the whole pipeline.
    pub async fn find_by_short_id<'e, E>(
        executor: E,
        short_id: &str,
    ) -> DbErrorResult<Option<Workspace>>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let row = sqlx::query_as::<_, WorkspaceRow>(
            r#"
                SELECT id, short_id, name, created_at, updated_at
                FROM siq_workspaces
                WHERE short_id = ?
            "#,
        )
        .bind(short_id)
        .fetch_optional(executor)
        .await?;

        row.map(WorkspaceRow::into_workspace).transpose()
    }
}
