use crate::models::external_data::ProjectExternalData;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub workspace_id: Uuid,
    pub space_id: Option<Uuid>,
    pub name: String,

    // Sync bookkeeping, populated after a successful export
    pub integration_type: Option<String>,
    pub external_id: Option<String>,
    pub external_data: Option<ProjectExternalData>,
    pub last_synced_at: Option<DateTime<Utc>>,

    // Audit
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Project {
    pub fn new(workspace_id: Uuid, space_id: Option<Uuid>, name: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            workspace_id,
            space_id,
            name,
            integration_type: None,
            external_id: None,
            external_data: None,
            last_synced_at: None,
            created_at: now,
            updated_at: now,
        }
    }
}
