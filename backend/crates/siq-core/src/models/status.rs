use crate::models::external_data::StatusExternalData;
use crate::models::sync_status::SyncStatus;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Local workflow state, mapped 1:1 to a remote status through the
/// caller-supplied mapping table at export time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Status {
    pub id: Uuid,
    pub workspace_id: Uuid,
    pub name: String,
    pub color: Option<String>,
    pub position: i32,

    // Sync bookkeeping, populated after a successful export
    pub integration_type: Option<String>,
    pub external_id: Option<String>,
    pub external_data: Option<StatusExternalData>,
    pub sync_status: Option<SyncStatus>,
    pub pending_sync: bool,

    // Audit
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Status {
    pub fn new(workspace_id: Uuid, name: String, position: i32) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            workspace_id,
            name,
            color: None,
            position,
            integration_type: None,
            external_id: None,
            external_data: None,
            sync_status: None,
            pending_sync: false,
            created_at: now,
            updated_at: now,
        }
    }
}
