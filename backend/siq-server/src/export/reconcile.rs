//! Local write-back after remote creation.
//!
//! Every write here is fire-and-forget relative to the remote calls: a
//! failure is logged but never surfaced, retried or reverted. The remote
//! object already exists; losing the local bookkeeping is the accepted
//! cost of the at-least-once design.

use crate::api::jira::export_request::StatusMapping;

use siq_core::{
    JiraIntegration, ProjectExternalData, StatusExternalData, Task, TaskExternalData,
};
use siq_db::{JiraIntegrationRepository, ProjectRepository, StatusRepository, TaskRepository};
use siq_jira::types::CreatedIssue;
use siq_jira::{JiraClient, JiraCredentials};

use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

/// Mark one task synced immediately after its issue is confirmed created.
pub async fn mark_task_synced(
    pool: &SqlitePool,
    task: &Task,
    created: &CreatedIssue,
    project_key: &str,
    clear_project_id: bool,
) {
    let data = TaskExternalData {
        jira_key: created.key.clone(),
        jira_id: created.id.clone(),
        jira_project_key: project_key.to_string(),
        last_synced_at: Utc::now(),
    };

    if let Err(e) =
        TaskRepository::mark_synced(pool, task.id, &created.id, &data, clear_project_id).await
    {
        log::warn!("Failed to mark task {} synced: {}", task.id, e);
    }
}

/// Write the remote project key onto the local project after a
/// plain-project export.
pub async fn mark_project_synced(pool: &SqlitePool, project_id: Uuid, project_key: &str) {
    let data = ProjectExternalData {
        jira_project_key: project_key.to_string(),
        last_synced_at: Utc::now(),
    };

    if let Err(e) = ProjectRepository::mark_synced(pool, project_id, project_key, &data).await {
        log::warn!("Failed to mark project {} synced: {}", project_id, e);
    }
}

/// Reconcile local statuses against the remote project's statuses, once
/// at the end of the batch (statuses are shared across tasks).
///
/// Every mapping entry carrying a remote status id gets its local row
/// updated with the remote name, category and color.
pub async fn reconcile_statuses(
    pool: &SqlitePool,
    client: &JiraClient,
    project_key: &str,
    mappings: &[StatusMapping],
) {
    let remote = match client.all_project_statuses(project_key).await {
        Ok(remote) => remote,
        Err(e) => {
            log::warn!("Could not fetch statuses for {}: {}", project_key, e);
            return;
        }
    };

    for mapping in mappings {
        let Some(remote_id) = mapping.jira_status_id.as_deref() else {
            continue;
        };

        let Some(status) = remote.iter().find(|s| s.id == remote_id) else {
            log::warn!(
                "Mapped Jira status {} not found on project {}",
                remote_id,
                project_key
            );
            continue;
        };

        let local_id = match Uuid::parse_str(&mapping.local_status_id) {
            Ok(local_id) => local_id,
            Err(_) => {
                log::warn!("Invalid local status id in mapping: {}", mapping.local_status_id);
                continue;
            }
        };

        let data = StatusExternalData {
            jira_name: status.name.clone(),
            jira_category: status
                .status_category
                .as_ref()
                .and_then(|c| c.name.clone().or_else(|| c.key.clone())),
            jira_color: status
                .status_category
                .as_ref()
                .and_then(|c| c.color_name.clone()),
            jira_project_key: project_key.to_string(),
        };

        if let Err(e) = StatusRepository::mark_synced(pool, local_id, &status.id, &data).await {
            log::warn!("Failed to mark status {} synced: {}", local_id, e);
        }
    }
}

/// Upsert the workspace's credential record at the end of a successful
/// export.
pub async fn upsert_integration(
    pool: &SqlitePool,
    workspace_id: Uuid,
    credentials: &JiraCredentials,
) {
    let integration = JiraIntegration::new(
        workspace_id,
        credentials.domain.clone(),
        credentials.email.clone(),
        credentials.api_token.clone(),
    );

    if let Err(e) = JiraIntegrationRepository::upsert(pool, &integration).await {
        log::warn!(
            "Failed to upsert Jira integration for workspace {}: {}",
            workspace_id,
            e
        );
    }
}
