use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Top-level tenant. Export requests are always scoped to exactly one
/// workspace, resolved once at request start by its public short id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workspace {
    pub id: Uuid,
    /// Short public-facing identifier used in URLs
    pub short_id: String,
    pub name: String,

    // Audit
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Workspace {
    pub fn new(short_id: String, name: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            short_id,
            name,
            created_at: now,
            updated_at: now,
        }
    }
}
