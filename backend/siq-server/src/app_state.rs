use siq_config::JiraConfig;

use sqlx::SqlitePool;

/// Shared state for all request handlers.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub jira: JiraConfig,
}
