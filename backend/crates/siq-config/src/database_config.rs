use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

const DEFAULT_DATABASE_FILE: &str = "sprintiq.db";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite database file, relative to the config directory
    pub file: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            file: String::from(DEFAULT_DATABASE_FILE),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl DatabaseConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.file.is_empty() {
            return Err(ConfigError::validation(
                "database.file",
                "must not be empty",
            ));
        }
        if self.max_connections == 0 {
            return Err(ConfigError::validation(
                "database.max_connections",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}
