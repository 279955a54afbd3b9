pub mod config;
pub mod database_config;
pub mod error;
pub mod jira_config;
pub mod log_level;
pub mod logging_config;
pub mod server_config;


pub use config::Config;
pub use database_config::DatabaseConfig;
pub use error::{ConfigError, Result as ConfigErrorResult};
pub use jira_config::JiraConfig;
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use server_config::ServerConfig;

pub const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
pub const DEFAULT_LOG_DIRECTORY: &str = "logs";
