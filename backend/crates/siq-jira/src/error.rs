use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum JiraError {
    /// Transport-level failure (connect, timeout, TLS)
    #[error("Jira request failed: {source} {location}")]
    Http {
        source: reqwest::Error,
        location: ErrorLocation,
    },

    /// Non-2xx response from the Jira API
    #[error("Jira API error ({status}): {message} {location}")]
    Api {
        status: u16,
        message: String,
        location: ErrorLocation,
    },

    /// 2xx response whose body did not match the expected shape
    #[error("Failed to decode Jira response for {operation}: {message} {location}")]
    Decode {
        operation: String,
        message: String,
        location: ErrorLocation,
    },
}

impl JiraError {
    #[track_caller]
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    fn api_message_lowercase(&self) -> Option<String> {
        match self {
            Self::Api { message, .. } => Some(message.to_lowercase()),
            _ => None,
        }
    }

    /// Filter-name collision: "A filter with the name 'x' already exists."
    pub fn is_duplicate_filter_name(&self) -> bool {
        self.api_message_lowercase()
            .is_some_and(|m| m.contains("filter") && m.contains("already exists"))
    }

    /// Project-key conflict on create-project
    pub fn is_duplicate_project_key(&self) -> bool {
        self.api_message_lowercase().is_some_and(|m| {
            m.contains("project key") || (m.contains("project") && m.contains("already exists"))
        })
    }

    /// The lead account id supplied on create-project was rejected
    pub fn is_invalid_project_lead(&self) -> bool {
        self.api_message_lowercase()
            .is_some_and(|m| m.contains("lead"))
    }

    pub fn is_permission_denied(&self) -> bool {
        match self {
            Self::Api {
                status, message, ..
            } => *status == 403 || message.to_lowercase().contains("permission"),
            _ => false,
        }
    }

    /// Transient failures worth retrying: transport errors and 5xx
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http { source, .. } => source.is_timeout() || source.is_connect(),
            Self::Api { status, .. } => *status >= 500,
            Self::Decode { .. } => false,
        }
    }
}

impl From<reqwest::Error> for JiraError {
    #[track_caller]
    fn from(source: reqwest::Error) -> Self {
        Self::Http {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, JiraError>;
