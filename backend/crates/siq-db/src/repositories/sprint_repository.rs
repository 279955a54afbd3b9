use crate::error::Result as DbErrorResult;
use crate::row::{parse_opt_timestamp, parse_timestamp, parse_uuid};

use siq_core::Sprint;

use uuid::Uuid;

#[derive(sqlx::FromRow)]
struct SprintRow {
    id: String,
    sprint_folder_id: String,
    name: String,
    goal: Option<String>,
    start_date: Option<i64>,
    end_date: Option<i64>,
    created_at: i64,
    updated_at: i64,
}

impl SprintRow {
    fn into_sprint(self) -> DbErrorResult<Sprint> {
        Ok(Sprint {
            id: parse_uuid(&self.id, "sprint.id")?,
            sprint_folder_id: parse_uuid(&self.sprint_folder_id, "sprint.sprint_folder_id")?,
            name: self.name,
            goal: self.goal,
            start_date: parse_opt_timestamp(self.start_date),
            end_date: parse_opt_timestamp(self.end_date),
            created_at: parse_timestamp(self.created_at, "sprint.created_at")?,
            updated_at: parse_timestamp(self.updated_at, "sprint.updated_at")?,
        })
    }
}

pub struct SprintRepository;

impl SprintRepository {
    pub async fn create<'e, E>(executor: E, sprint: &Sprint) -> DbErrorResult<()>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        sqlx::query(
            r#"
                INSERT INTO siq_sprints (
                    id, sprint_folder_id, name, goal, start_date, end_date,
                    created_at, updated_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(sprint.id.to_string())
        .bind(sprint.sprint_folder_id.to_string())
        .bind(&sprint.name)
        .bind(&sprint.goal)
        .bind(sprint.start_date.map(|dt| dt.timestamp()))
        .bind(sprint.end_date.map(|dt| dt.timestamp()))
        .bind(sprint.created_at.timestamp())
        .bind(sprint.updated_at.timestamp())
        .execute(executor)
        .await?;

        Ok(())
    }

    /// Sprints of a folder in creation order; drives the sprint-folder
    /// export variant.
    pub async fn find_by_folder<'e, E>(executor: E, folder_id: Uuid) -> DbErrorResult<Vec<Sprint>>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let rows = sqlx::query_as::<_, SprintRow>(
            r#"
                SELECT id, sprint_folder_id, name, goal, start_date, end_date,
                       created_at, updated_at
                FROM siq_sprints
                WHERE sprint_folder_id = ?
                ORDER BY created_at, id
            "#,
        )
        .bind(folder_id.to_string())
        .fetch_all(executor)
        .await?;

        rows.into_iter().map(SprintRow::into_sprint).collect()
    }
}
