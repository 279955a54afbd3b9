use crate::error::Result as DbErrorResult;
use crate::row::{parse_timestamp, parse_uuid};

use siq_core::Space;

use uuid::Uuid;

#[derive(sqlx::FromRow)]
struct SpaceRow {
    id: String,
    workspace_id: String,
    name: String,
    created_at: i64,
    updated_at: i64,
}

impl SpaceRow {
    fn into_space(self) -> DbErrorResult<Space> {
        Ok(Space {
            id: parse_uuid(&self.id, "space.id")?,
            workspace_id: parse_uuid(&self.workspace_id, "space.workspace_id")?,
            name: self.name,
            created_at: parse_timestamp(self.created_at, "space.created_at")?,
            updated_at: parse_timestamp(self.updated_at, "space.updated_at")?,
        })
    }
}

pub struct SpaceRepository;

impl SpaceRepository {
    pub async fn create<'e, E>(executor: E, space: &Space) -> DbErrorResult<()>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        sqlx::query(
            r#"
                INSERT INTO siq_spaces (id, workspace_id, name, created_at, updated_at)
                VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(space.id.to_string())
        .bind(space.workspace_id.to_string())
        .bind(&space.name)
        .bind(space.created_at.timestamp())
        .bind(space.updated_at.timestamp())
        .execute(executor)
        .await?;

        Ok(())
    }

    pub async fn find_by_id<'e, E>(executor: E, id: Uuid) -> DbErrorResult<Option<Space>>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let row = sqlx::query_as::<_, SpaceRow>(
            r#"
                SELECT id, workspace_id, name, created_at, updated_at
                FROM siq_spaces
                WHERE id = ?
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(executor)
        .await?;

        row.map(SpaceRow::into_space).transpose()
    }
}
