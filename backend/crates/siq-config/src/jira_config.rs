use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_FILTER_RETRY_MAX_ATTEMPTS: u32 = 3;
const DEFAULT_FILTER_RETRY_DELAY_SECS: u64 = 1;

/// Knobs for the outbound Jira client used by the export pipeline.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct JiraConfig {
    pub request_timeout_secs: u64,
    /// Name-collision retries when creating the export filter
    pub filter_retry_max_attempts: u32,
    /// Base delay for the linear collision backoff (delay × attempt)
    pub filter_retry_delay_secs: u64,
}

impl Default for JiraConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            filter_retry_max_attempts: DEFAULT_FILTER_RETRY_MAX_ATTEMPTS,
            filter_retry_delay_secs: DEFAULT_FILTER_RETRY_DELAY_SECS,
        }
    }
}

impl JiraConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::validation(
                "jira.request_timeout_secs",
                "must be at least 1",
            ));
        }
        if self.filter_retry_max_attempts == 0 {
            return Err(ConfigError::validation(
                "jira.filter_retry_max_attempts",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}
