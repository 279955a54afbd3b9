use crate::models::external_data::TaskExternalData;
use crate::models::sync_status::SyncStatus;
use crate::models::task_priority::TaskPriority;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The unit of work translated into a remote issue.
///
/// A task belongs to a project or a sprint; sprint-sourced tasks are routed
/// through the sprint/board export path and are never also filed under a
/// plain project export. At most one of `assignee_id` (profile) and
/// `assigned_member_id` (team member) is populated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub workspace_id: Uuid,

    pub project_id: Option<Uuid>,
    pub sprint_id: Option<Uuid>,
    pub status_id: Uuid,

    pub name: String,
    /// HTML body, passed through to the remote tracker as-is on export
    pub description: Option<String>,
    pub priority: TaskPriority,
    pub story_points: Option<f64>,

    pub assignee_id: Option<Uuid>,
    pub assigned_member_id: Option<Uuid>,

    // Sync bookkeeping, populated after a successful export
    pub integration_type: Option<String>,
    pub external_id: Option<String>,
    pub external_data: Option<TaskExternalData>,
    pub sync_status: Option<SyncStatus>,
    pub last_synced_at: Option<DateTime<Utc>>,

    // Audit
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    pub fn new(workspace_id: Uuid, status_id: Uuid, name: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            workspace_id,
            project_id: None,
            sprint_id: None,
            status_id,
            name,
            description: None,
            priority: TaskPriority::Medium,
            story_points: None,
            assignee_id: None,
            assigned_member_id: None,
            integration_type: None,
            external_id: None,
            external_data: None,
            sync_status: None,
            last_synced_at: None,
            created_at: now,
            updated_at: now,
        }
    }
}
