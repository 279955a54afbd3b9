//! Request validation, workspace resolution and project key derivation.
//!
//! Everything here runs before the first remote call; any failure aborts
//! the export with no remote side effects.

use crate::api::error::{ApiError, Result as ApiResult};
use crate::api::jira::export_request::{JiraCredentialsDto, StatusMapping};

use siq_core::Workspace;
use siq_db::WorkspaceRepository;
use siq_jira::JiraCredentials;

use sqlx::SqlitePool;

/// Jira project keys are uppercase alphanumerics, at most 10 characters,
/// starting with a letter.
const MAX_PROJECT_KEY_LEN: usize = 10;

pub fn validate_credentials(dto: &JiraCredentialsDto) -> ApiResult<JiraCredentials> {
    let credentials = JiraCredentials {
        domain: dto.jira_domain.trim().to_string(),
        email: dto.jira_email.trim().to_string(),
        api_token: dto.jira_api_token.trim().to_string(),
    };

    if !credentials.is_complete() {
        return Err(ApiError::validation_field(
            "Jira domain, email and API token are required",
            "jiraCredentials",
        ));
    }

    Ok(credentials)
}

pub fn validate_status_mappings(mappings: &[StatusMapping]) -> ApiResult<()> {
    if mappings.is_empty() {
        return Err(ApiError::validation_field(
            "Status mappings are required",
            "statusMappings",
        ));
    }
    Ok(())
}

/// Resolve the workspace by its public short id, once per request.
pub async fn resolve_workspace(pool: &SqlitePool, short_id: &str) -> ApiResult<Workspace> {
    WorkspaceRepository::find_by_short_id(pool, short_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Workspace {} not found", short_id)))
}

/// Compute the remote project key from the request.
///
/// A supplied key is normalized and validated; otherwise, when a new
/// project is requested, the key is derived from the project name.
pub fn resolve_project_key(
    create_new_project: bool,
    project_key: Option<&str>,
    project_name: Option<&str>,
) -> ApiResult<String> {
    if let Some(key) = project_key {
        return validate_project_key(key);
    }

    if create_new_project {
        let name = project_name.ok_or_else(|| {
            ApiError::validation_field(
                "A project name is required to create a new Jira project",
                "projectName",
            )
        })?;
        return derive_project_key(name);
    }

    Err(ApiError::validation_field(
        "A Jira project key is required when exporting to an existing project",
        "projectKey",
    ))
}

/// Derive a project key from a project name: uppercase, drop everything
/// non-alphanumeric, drop leading digits, truncate. Deterministic for a
/// given name.
pub fn derive_project_key(name: &str) -> ApiResult<String> {
    normalize_key(name).ok_or_else(|| {
        ApiError::validation_field(
            format!("Cannot derive a Jira project key from \"{}\"", name),
            "projectName",
        )
    })
}

/// Normalize and validate a caller-supplied project key against the same
/// constraints as derivation.
pub fn validate_project_key(key: &str) -> ApiResult<String> {
    normalize_key(key).ok_or_else(|| {
        ApiError::validation_field(format!("Invalid Jira project key \"{}\"", key), "projectKey")
    })
}

fn normalize_key(input: &str) -> Option<String> {
    let cleaned: String = input
        .to_uppercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .skip_while(|c| !c.is_ascii_alphabetic())
        .take(MAX_PROJECT_KEY_LEN)
        .collect();

    if cleaned.is_empty() { None } else { Some(cleaned) }
}
