use crate::error::Result as DbErrorResult;
use crate::row::{parse_json, parse_opt_timestamp, parse_opt_uuid, parse_timestamp, parse_uuid};

use siq_core::{JIRA_INTEGRATION_TYPE, SyncStatus, Task, TaskExternalData, TaskPriority};

use std::panic::Location;
use std::str::FromStr;

use chrono::Utc;
use error_location::ErrorLocation;
use uuid::Uuid;

#[derive(sqlx::FromRow)]
struct TaskRow {
    id: String,
    workspace_id: String,
    project_id: Option<String>,
    sprint_id: Option<String>,
    status_id: String,
    name: String,
    description: Option<String>,
    priority: String,
    story_points: Option<f64>,
    assignee_id: Option<String>,
    assigned_member_id: Option<String>,
    integration_type: Option<String>,
    external_id: Option<String>,
    external_data: Option<String>,
    sync_status: Option<String>,
    last_synced_at: Option<i64>,
    created_at: i64,
    updated_at: i64,
}

impl TaskRow {
    fn into_task(self) -> DbErrorResult<Task> {
        Ok(Task {
            id: parse_uuid(&self.id, "task.id")?,
            workspace_id: parse_uuid(&self.workspace_id, "task.workspace_id")?,
            project_id: parse_opt_uuid(self.project_id.as_deref(), "task.project_id")?,
            sprint_id: parse_opt_uuid(self.sprint_id.as_deref(), "task.sprint_id")?,
            status_id: parse_uuid(&self.status_id, "task.status_id")?,
            name: self.name,
            description: self.description,
            priority: TaskPriority::from_str(&self.priority).map_err(|e| {
                crate::DbError::Conversion {
                    message: format!("Invalid priority in task.priority: {}", e),
                    location: ErrorLocation::from(Location::caller()),
                }
            })?,
            story_points: self.story_points,
            assignee_id: parse_opt_uuid(self.assignee_id.as_deref(), "task.assignee_id")?,
            assigned_member_id: parse_opt_uuid(
                self.assigned_member_id.as_deref(),
                "task.assigned_member_id",
            )?,
            integration_type: self.integration_type,
            external_id: self.external_id,
            external_data: parse_json(self.external_data.as_deref(), "task.external_data")?,
            sync_status: self
                .sync_status
                .as_deref()
                .and_then(|s| SyncStatus::from_str(s).ok()),
            last_synced_at: parse_opt_timestamp(self.last_synced_at),
            created_at: parse_timestamp(self.created_at, "task.created_at")?,
            updated_at: parse_timestamp(self.updated_at, "task.updated_at")?,
        })
    }
}

const TASK_COLUMNS: &str = r#"
    id, workspace_id, project_id, sprint_id, status_id,
    name, description, priority, story_points,
    assignee_id, assigned_member_id,
    integration_type, external_id, external_data, sync_status, last_synced_at,
    created_at, updated_at
"#;

pub struct TaskRepository;

impl TaskRepository {
    pub async fn create<'e, E>(executor: E, task: &Task) -> DbErrorResult<()>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        sqlx::query(
            r#"
                INSERT INTO siq_tasks (
                    id, workspace_id, project_id, sprint_id, status_id,
                    name, description, priority, story_points,
                    assignee_id, assigned_member_id,
                    integration_type, external_id, external_data, sync_status, last_synced_at,
                    created_at, updated_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(task.id.to_string())
        .bind(task.workspace_id.to_string())
        .bind(task.project_id.map(|id| id.to_string()))
        .bind(task.sprint_id.map(|id| id.to_string()))
        .bind(task.status_id.to_string())
        .bind(&task.name)
        .bind(&task.description)
        .bind(task.priority.as_str())
        .bind(task.story_points)
        .bind(task.assignee_id.map(|id| id.to_string()))
        .bind(task.assigned_member_id.map(|id| id.to_string()))
        .bind(&task.integration_type)
        .bind(&task.external_id)
        .bind(
            task.external_data
                .as_ref()
                .and_then(|d| serde_json::to_string(d).ok()),
        )
        .bind(task.sync_status.map(|s| s.as_str().to_string()))
        .bind(task.last_synced_at.map(|dt| dt.timestamp()))
        .bind(task.created_at.timestamp())
        .bind(task.updated_at.timestamp())
        .execute(executor)
        .await?;

        Ok(())
    }

    pub async fn find_by_id<'e, E>(executor: E, id: Uuid) -> DbErrorResult<Option<Task>>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let row = sqlx::query_as::<_, TaskRow>(&format!(
            "SELECT {} FROM siq_tasks WHERE id = ?",
            TASK_COLUMNS
        ))
        .bind(id.to_string())
        .fetch_optional(executor)
        .await?;

        row.map(TaskRow::into_task).transpose()
    }

    /// Tasks exported by the plain-project path. Sprint-sourced tasks are
    /// excluded; they are routed through the sprint-folder path instead.
    pub async fn find_exportable_by_project<'e, E>(
        executor: E,
        project_id: Uuid,
    ) -> DbErrorResult<Vec<Task>>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let rows = sqlx::query_as::<_, TaskRow>(&format!(
            r#"
                SELECT {}
                FROM siq_tasks
                WHERE project_id = ? AND sprint_id IS NULL
                ORDER BY created_at, id
            "#,
            TASK_COLUMNS
        ))
        .bind(project_id.to_string())
        .fetch_all(executor)
        .await?;

        rows.into_iter().map(TaskRow::into_task).collect()
    }

    /// Tasks of every project within a space, for space-wide exports.
    pub async fn find_exportable_by_space<'e, E>(
        executor: E,
        space_id: Uuid,
    ) -> DbErrorResult<Vec<Task>>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let rows = sqlx::query_as::<_, TaskRow>(&format!(
            r#"
                SELECT {}
                FROM siq_tasks
                WHERE sprint_id IS NULL AND project_id IN (
                    SELECT id FROM siq_projects WHERE space_id = ?
                )
                ORDER BY created_at, id
            "#,
            TASK_COLUMNS
        ))
        .bind(space_id.to_string())
        .fetch_all(executor)
        .await?;

        rows.into_iter().map(TaskRow::into_task).collect()
    }

    pub async fn find_by_sprint<'e, E>(executor: E, sprint_id: Uuid) -> DbErrorResult<Vec<Task>>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let rows = sqlx::query_as::<_, TaskRow>(&format!(
            r#"
                SELECT {}
                FROM siq_tasks
                WHERE sprint_id = ?
                ORDER BY created_at, id
            "#,
            TASK_COLUMNS
        ))
        .bind(sprint_id.to_string())
        .fetch_all(executor)
        .await?;

        rows.into_iter().map(TaskRow::into_task).collect()
    }

    /// Write remote identifiers onto the task immediately after its issue
    /// is confirmed created. `clear_project_id` is set on the sprint-folder
    /// path so sprint-sourced tasks are never left attached to a project.
    pub async fn mark_synced<'e, E>(
        executor: E,
        id: Uuid,
        external_id: &str,
        external_data: &TaskExternalData,
        clear_project_id: bool,
    ) -> DbErrorResult<()>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let data = serde_json::to_string(external_data).unwrap_or_default();
        let now = Utc::now().timestamp();

        let sql = if clear_project_id {
            r#"
                UPDATE siq_tasks
                SET integration_type = ?,
                    external_id = ?,
                    external_data = ?,
                    sync_status = 'synced',
                    last_synced_at = ?,
                    updated_at = ?,
                    project_id = NULL
                WHERE id = ?
            "#
        } else {
            r#"
                UPDATE siq_tasks
                SET integration_type = ?,
                    external_id = ?,
                    external_data = ?,
                    sync_status = 'synced',
                    last_synced_at = ?,
                    updated_at = ?
                WHERE id = ?
            "#
        };

        sqlx::query(sql)
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
