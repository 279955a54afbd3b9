use crate::{
    ConfigError, ConfigErrorResult, DatabaseConfig, JiraConfig, LogLevel, LoggingConfig,
    ServerConfig,
};

use std::path::PathBuf;
use std::str::FromStr;

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub jira: JiraConfig,
}

impl Config {
    /// Load config with env overrides.
    ///
    /// Loading order:
    /// 1. Check for SIQ_CONFIG_DIR env var, else use ./.siq/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply SIQ_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join("config.toml");

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    fn load_toml(path: &PathBuf) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.clone(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: SIQ_CONFIG_DIR env var > ./.siq/ (relative to cwd)
    pub fn config_dir() -> Result<PathBuf, ConfigError> {
        if let Ok(dir) = std::env::var("SIQ_CONFIG_DIR") {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(".siq"))
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("SIQ_SERVER_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("SIQ_SERVER_PORT") {
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
        if let Ok(file) = std::env::var("SIQ_DATABASE_FILE") {
            self.database.file = file;
        }
        if let Ok(level) = std::env::var("SIQ_LOG_LEVEL") {
            if let Ok(level) = LogLevel::from_str(&level) {
                self.logging.level = level;
            }
        }
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.server.validate()?;
        self.database.validate()?;
        self.jira.validate()?;
        Ok(())
    }

    pub fn log_summary(&self) {
        info!("Server: {}", self.server.bind_address());
        info!("Database file: {}", self.database.file);
        info!("Log level: {:?}", self.logging.level.0);
        info!(
            "Jira client: timeout {}s, filter retries {}",
            self.jira.request_timeout_secs, self.jira.filter_retry_max_attempts
        );
    }
}
