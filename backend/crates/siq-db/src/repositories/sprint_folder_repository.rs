use crate::error::Result as DbErrorResult;
use crate::row::{parse_timestamp, parse_uuid};

use siq_core::SprintFolder;

use uuid::Uuid;

#[derive(sqlx::FromRow)]
struct SprintFolderRow {
    id: String,
    space_id: String,
    name: String,
    created_at: i64,
    updated_at: i64,
}

impl SprintFolderRow {
    fn into_sprint_folder(self) -> DbErrorResult<SprintFolder> {
        Ok(SprintFolder {
            id: parse_uuid(&self.id, "sprint_folder.id")?,
            space_id: parse_uuid(&self.space_id, "sprint_folder.space_id")?,
            name: self.name,
            created_at: parse_timestamp(self.created_at, "sprint_folder.created_at")?,
            updated_at: parse_timestamp(self.updated_at, "sprint_folder.updated_at")?,
        })
    }
}

pub struct SprintFolderRepository;

impl SprintFolderRepository {
    pub async fn create<'e, E>(executor: E, folder: &SprintFolder) -> DbErrorResult<()>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        sqlx::query(
            r#"
                INSERT INTO siq_sprint_folders (id, space_id, name, created_at, updated_at)
                VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(folder.id.to_string())
        .bind(folder.space_id.to_string())
        .bind(&folder.name)
        .bind(folder.created_at.timestamp())
        .bind(folder.updated_at.timestamp())
        .execute(executor)
        .await?;

        Ok(())
    }

    pub async fn find_by_id<'e, E>(executor: E, id: Uuid) -> DbErrorResult<Option<SprintFolder>>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let row = sqlx::query_as::<_, SprintFolderRow>(
            r#"
                SELECT id, space_id, name, created_at, updated_at
                FROM siq_sprint_folders
                WHERE id = ?
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(executor)
        .await?;

        row.map(SprintFolderRow::into_sprint_folder).transpose()
    }
}
