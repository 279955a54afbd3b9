//! Remote project, filter and board provisioning.

use crate::api::error::{ApiError, Result as ApiResult};

use siq_config::JiraConfig;
use siq_jira::types::{CreateBoardRequest, CreateFilterRequest, CreateProjectRequest};
use siq_jira::{DelaySchedule, JiraClient, JiraError, RetryPolicy, with_retry};

use std::time::Duration;

use chrono::Utc;

/// Filter and scrum board backing the export, created or reused.
#[derive(Debug, Clone, Copy)]
pub struct ProvisionedBoard {
    pub filter_id: i64,
    pub filter_created: bool,
    pub board_id: i64,
    pub board_created: bool,
}

/// Create the remote project and make sure it carries a Story issue type.
pub async fn provision_project(
    client: &JiraClient,
    project_key: &str,
    project_name: &str,
    workspace_name: &str,
) -> ApiResult<()> {
    let lead = client.current_user().await.map_err(|e| {
        log::error!("Failed to resolve Jira user for project lead: {}", e);
        ApiError::bad_request("Could not resolve the Jira account for the project lead")
    })?;

    let request = CreateProjectRequest {
        key: project_key.to_string(),
        name: project_name.to_string(),
        description: format!("Exported from SprintiQ workspace \"{}\"", workspace_name),
        project_type_key: "software".to_string(),
        lead_account_id: lead.account_id,
    };

    client
        .create_project(&request)
        .await
        .map_err(|e| classify_create_project_error(e, project_key))?;

    log::info!("Created Jira project {}", project_key);

    ensure_story_issue_type(client, project_key).await;

    Ok(())
}

/// Distinct user-facing messages for the known create-project failures.
fn classify_create_project_error(e: JiraError, project_key: &str) -> ApiError {
    log::error!("Failed to create Jira project {}: {}", project_key, e);

    if e.is_invalid_project_lead() {
        ApiError::bad_request("Jira rejected the project lead account. Check that the API token belongs to a user who can lead projects")
    } else if e.is_duplicate_project_key() {
        ApiError::bad_request(format!(
            "A Jira project with key {} already exists",
            project_key
        ))
    } else if e.is_permission_denied() {
        ApiError::bad_request("The Jira account does not have permission to create projects")
    } else {
        ApiError::internal(format!("Failed to create Jira project: {}", e))
    }
}

/// Add the global Story issue type to the project when it is missing.
/// Absence of a global Story type is tolerated; later issue-type selection
/// falls back to Task/Issue/first-available.
async fn ensure_story_issue_type(client: &JiraClient, project_key: &str) {
    let types = match client.project_issue_types(project_key).await {
        Ok(types) => types,
        Err(e) => {
            log::warn!(
                "Could not list issue types for {}: {}. Skipping Story check",
                project_key,
                e
            );
            return;
        }
    };

    if types.iter().any(|t| t.name.eq_ignore_ascii_case("story")) {
        return;
    }

    let global = match client.global_issue_types().await {
        Ok(global) => global,
        Err(e) => {
            log::warn!("Could not list global issue types: {}", e);
            return;
        }
    };

    let Some(story) = global.iter().find(|t| t.name.eq_ignore_ascii_case("story")) else {
        log::warn!("No global Story issue type found; project {} will use fallback issue types", project_key);
        return;
    };

    let mut ids: Vec<String> = types.into_iter().map(|t| t.id).collect();
    ids.push(story.id.clone());

    match client.update_project_issue_types(project_key, ids).await {
        Ok(()) => log::info!("Added Story issue type to project {}", project_key),
        Err(e) => log::warn!("Failed to add Story issue type to {}: {}", project_key, e),
    }
}

/// Ensure a saved filter and a scrum board exist for the project.
pub async fn provision_board_and_filter(
    client: &JiraClient,
    config: &JiraConfig,
    project_key: &str,
) -> ApiResult<ProvisionedBoard> {
    let (filter_id, filter_created) = ensure_filter(client, config, project_key).await?;
    let (board_id, board_created) = ensure_board(client, project_key, filter_id).await?;

    Ok(ProvisionedBoard {
        filter_id,
        filter_created,
        board_id,
        board_created,
    })
}

/// Reuse a saved filter referencing the project key, else create one with
/// a timestamped name, retrying name collisions and transient failures
/// with linear backoff and falling back once to a generic name.
async fn ensure_filter(
    client: &JiraClient,
    config: &JiraConfig,
    project_key: &str,
) -> ApiResult<(i64, bool)> {
    match client.my_filters().await {
        Ok(filters) => {
            let existing = filters
                .iter()
                .find(|f| f.jql.as_deref().is_some_and(|jql| jql.contains(project_key)));
            if let Some(filter) = existing {
                log::info!(
                    "Reusing Jira filter {} ({}) for project {}",
                    filter.name,
                    filter.id,
                    project_key
                );
                return Ok((parse_remote_id(&filter.id, "filter")?, false));
            }
        }
        Err(e) => {
            log::warn!("Could not list saved filters: {}. Creating a new one", e);
        }
    }

    let policy = RetryPolicy::new(
        config.filter_retry_max_attempts,
        DelaySchedule::Linear(Duration::from_secs(config.filter_retry_delay_secs)),
    );
    let jql = format!("project = {} ORDER BY created DESC", project_key);

    let created = with_retry(
        &policy,
        "create filter",
        |e: &JiraError| e.is_duplicate_filter_name() || e.is_retryable(),
        |attempt| {
            let request = CreateFilterRequest {
                name: format!(
                    "{} tasks {} #{}",
                    project_key,
                    Utc::now().timestamp_millis(),
                    attempt
                ),
                description: format!("SprintiQ export filter for {}", project_key),
                jql: jql.clone(),
            };
            async move { client.create_filter(&request).await }
        },
    )
    .await;

    let filter = match created {
        Ok(filter) => filter,
        Err(e) => {
            log::warn!(
                "Filter creation for {} failed ({}). Trying a generic name",
                project_key,
                e
            );
            let fallback = CreateFilterRequest {
                name: format!("SprintiQ export filter {}", Utc::now().timestamp_millis()),
                description: format!("SprintiQ export filter for {}", project_key),
                jql: jql.clone(),
            };
            client.create_filter(&fallback).await.map_err(|e| {
                ApiError::internal(format!("Failed to create a Jira filter for the export: {}", e))
            })?
        }
    };

    log::info!("Created Jira filter {} ({})", filter.name, filter.id);
    Ok((parse_remote_id(&filter.id, "filter")?, true))
}

/// Create the scrum board, retrying once with a generic name.
async fn ensure_board(
    client: &JiraClient,
    project_key: &str,
    filter_id: i64,
) -> ApiResult<(i64, bool)> {
    let policy = RetryPolicy::new(2, DelaySchedule::None);

    let board = with_retry(
        &policy,
        "create board",
        |_: &JiraError| true,
        |attempt| {
            let name = if attempt == 1 {
                format!("{} Scrum Board", project_key)
            } else {
                format!("SprintiQ board {}", Utc::now().timestamp_millis())
            };
            let request = CreateBoardRequest {
                name,
                board_type: "scrum".to_string(),
                filter_id,
            };
            async move { client.create_board(&request).await }
        },
    )
    .await
    .map_err(|e| {
        ApiError::internal(format!("Failed to create a Jira board for the export: {}", e))
    })?;

    log::info!("Created Jira board {} ({})", board.name, board.id);
    Ok((board.id, true))
}

fn parse_remote_id(raw: &str, what: &str) -> ApiResult<i64> {
    raw.parse::<i64>()
        .map_err(|_| ApiError::internal(format!("Jira returned a non-numeric {} id: {}", what, raw)))
}
