use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Grouping container holding one or more sprints within a space.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SprintFolder {
    pub id: Uuid,
    pub space_id: Uuid,
    pub name: String,

    // Audit
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SprintFolder {
    pub fn new(space_id: Uuid, name: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            space_id,
            name,
            created_at: now,
            updated_at: now,
        }
    }
}
