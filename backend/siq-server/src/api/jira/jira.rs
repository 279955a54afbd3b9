//! Jira export REST handlers, one per export mode.

use crate::api::error::{ApiError, Result as ApiResult};
use crate::api::extractors::user_id::UserId;
use crate::api::jira::export_request::ExportRequest;
use crate::api::jira::export_response::{ExportData, ExportResponse, ExportedTaskDto};
use crate::api::jira::sprint_folder_export_request::SprintFolderExportRequest;
use crate::api::jira::sprint_folder_export_response::{
    CreatedSprintDto, SprintFolderExportData, SprintFolderExportResponse,
};
use crate::app_state::AppState;
use crate::export::tasks::ExportBatch;
use crate::export::translate::TranslationContext;
use crate::export::{provision, reconcile, resolve, sprints, tasks};

use siq_db::{
    ProjectRepository, SpaceRepository, SprintFolderRepository, SprintRepository, TaskRepository,
};
use siq_jira::JiraClient;

use std::time::Duration;

use axum::{
    Json,
    extract::{Path, State},
};
use uuid::Uuid;

/// POST /api/workspace/{workspace_id}/jira/export
///
/// Export all tasks of a project (or space) as Jira issues.
pub async fn export_to_jira(
    State(state): State<AppState>,
    Path(workspace_id): Path<String>,
    _user: UserId,
    Json(request): Json<ExportRequest>,
) -> ApiResult<Json<ExportResponse>> {
    let credentials = resolve::validate_credentials(&request.jira_credentials)?;
    resolve::validate_status_mappings(&request.status_mappings)?;

    let workspace = resolve::resolve_workspace(&state.pool, &workspace_id).await?;
    let project_key = resolve::resolve_project_key(
        request.create_new_project,
        request.project_key.as_deref(),
        request.project_name.as_deref(),
    )?;

    // Resolve the export source before any remote call is made.
    let mut local_project_id = None;
    let exportable = if let Some(project_id) = request.selected_project_id.as_deref() {
        let project_id = Uuid::parse_str(project_id)?;
        let project = ProjectRepository::find_by_id(&state.pool, project_id)
            .await?
            .filter(|p| p.workspace_id == workspace.id)
            .ok_or_else(|| ApiError::not_found(format!("Project {} not found", project_id)))?;
        local_project_id = Some(project.id);
        TaskRepository::find_exportable_by_project(&state.pool, project.id).await?
    } else if let Some(space_id) = request.selected_space_id.as_deref() {
        let space_id = Uuid::parse_str(space_id)?;
        let space = SpaceRepository::find_by_id(&state.pool, space_id)
            .await?
            .filter(|s| s.workspace_id == workspace.id)
            .ok_or_else(|| ApiError::not_found(format!("Space {} not found", space_id)))?;
        TaskRepository::find_exportable_by_space(&state.pool, space.id).await?
    } else {
        return Err(ApiError::validation_field(
            "A project or space must be selected for export",
            "selectedProjectId",
        ));
    };

    if exportable.is_empty() {
        return Err(ApiError::bad_request("No exportable tasks found"));
    }

    log::info!(
        "Exporting {} tasks from workspace {} to Jira project {}",
        exportable.len(),
        workspace.short_id,
        project_key
    );

    let client = build_client(&credentials, &state)?;

    if request.create_new_project {
        let project_name = request.project_name.as_deref().unwrap_or(&project_key);
        provision::provision_project(&client, &project_key, project_name, &workspace.name).await?;
    }

    provision::provision_board_and_filter(&client, &state.jira, &project_key).await?;

    let mut ctx = TranslationContext::new(&client, &project_key);
    let batch = tasks::export_tasks(
        &state.pool,
        &client,
        &mut ctx,
        &exportable,
        &request.status_mappings,
        &project_key,
        true,
        false,
    )
    .await;

    require_any_exported(&batch)?;

    if let Some(project_id) = local_project_id {
        reconcile::mark_project_synced(&state.pool, project_id, &project_key).await;
    }
    reconcile::reconcile_statuses(&state.pool, &client, &project_key, &request.status_mappings)
        .await;
    reconcile::upsert_integration(&state.pool, workspace.id, &credentials).await;

    log::info!(
        "Export to {} complete: {} exported, {} failed",
        project_key,
        batch.exported_count(),
        batch.failed
    );

    Ok(Json(ExportResponse {
        success: true,
        data: ExportData {
            tasks_exported: batch.exported_count(),
            tasks_failed: batch.failed,
            total_tasks: batch.total,
            exported_tasks: exported_task_dtos(&batch),
            project_key,
        },
    }))
}

/// POST /api/workspace/{workspace_id}/jira/export-sprint-folder
///
/// Export every sprint of a folder: issues are created first, then one
/// remote sprint per local sprint, then issues are moved in by key.
pub async fn export_sprint_folder_to_jira(
    State(state): State<AppState>,
    Path(workspace_id): Path<String>,
    _user: UserId,
    Json(request): Json<SprintFolderExportRequest>,
) -> ApiResult<Json<SprintFolderExportResponse>> {
    let credentials = resolve::validate_credentials(&request.jira_credentials)?;
    resolve::validate_status_mappings(&request.status_mappings)?;

    let workspace = resolve::resolve_workspace(&state.pool, &workspace_id).await?;
    let project_key = resolve::resolve_project_key(
        request.create_new_project,
        request.project_key.as_deref(),
        request.project_name.as_deref(),
    )?;

    let folder_id = Uuid::parse_str(&request.sprint_folder_id)?;
    let folder = SprintFolderRepository::find_by_id(&state.pool, folder_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Sprint folder {} not found", folder_id)))?;

    // The folder hangs off a space; the space anchors it to the workspace.
    SpaceRepository::find_by_id(&state.pool, folder.space_id)
        .await?
        .filter(|s| s.workspace_id == workspace.id)
        .ok_or_else(|| ApiError::not_found(format!("Sprint folder {} not found", folder_id)))?;

    let folder_sprints = SprintRepository::find_by_folder(&state.pool, folder.id).await?;

    let mut exportable = Vec::new();
    for sprint in &folder_sprints {
        let mut sprint_tasks = TaskRepository::find_by_sprint(&state.pool, sprint.id).await?;
        exportable.append(&mut sprint_tasks);
    }

    if exportable.is_empty() {
        return Err(ApiError::bad_request(
            "No exportable tasks found in the sprint folder",
        ));
    }

    log::info!(
        "Exporting sprint folder {} ({} sprints, {} tasks) to Jira project {}",
        folder.name,
        folder_sprints.len(),
        exportable.len(),
        project_key
    );

    let client = build_client(&credentials, &state)?;

    if request.create_new_project {
        let project_name = request.project_name.as_deref().unwrap_or(&project_key);
        provision::provision_project(&client, &project_key, project_name, &workspace.name).await?;
    }

    let board = provision::provision_board_and_filter(&client, &state.jira, &project_key).await?;

    let mut ctx = TranslationContext::new(&client, &project_key);
    let batch = tasks::export_tasks(
        &state.pool,
        &client,
        &mut ctx,
        &exportable,
        &request.status_mappings,
        &project_key,
        false,
        true,
    )
    .await;

    require_any_exported(&batch)?;

    let grouped = sprints::group_issues_by_sprint(&folder_sprints, &batch.exported);
    let created_sprints =
        sprints::create_remote_sprints(&client, board.board_id, &folder_sprints, &grouped).await;

    reconcile::reconcile_statuses(&state.pool, &client, &project_key, &request.status_mappings)
        .await;
    reconcile::upsert_integration(&state.pool, workspace.id, &credentials).await;

    log::info!(
        "Sprint folder export to {} complete: {} exported, {} failed, {} sprints created",
        project_key,
        batch.exported_count(),
        batch.failed,
        created_sprints.len()
    );

    Ok(Json(SprintFolderExportResponse {
        success: true,
        data: SprintFolderExportData {
            tasks_exported: batch.exported_count(),
            tasks_failed: batch.failed,
            sprints_created: created_sprints.len(),
            board_created: board.board_created,
            filter_created: board.filter_created,
            project_key,
            exported_issues: exported_task_dtos(&batch),
            created_sprints: created_sprints
                .into_iter()
                .map(|s| CreatedSprintDto {
                    sprint_id: s.sprint_id.to_string(),
                    jira_sprint_id: s.jira_sprint_id,
                    name: s.name,
                    issues_moved: s.issues_moved,
                })
                .collect(),
        },
    }))
}

fn build_client(credentials: &siq_jira::JiraCredentials, state: &AppState) -> ApiResult<JiraClient> {
    JiraClient::new(
        credentials,
        Duration::from_secs(state.jira.request_timeout_secs),
    )
    .map_err(|e| ApiError::internal(format!("Failed to build Jira client: {}", e)))
}

/// A batch where every task failed escalates to a request error; partial
/// failure does not.
fn require_any_exported(batch: &ExportBatch) -> ApiResult<()> {
    if batch.exported.is_empty() {
        return Err(ApiError::bad_request("Failed to export any tasks to Jira"));
    }
    Ok(())
}

fn exported_task_dtos(batch: &ExportBatch) -> Vec<ExportedTaskDto> {
    batch
        .exported
        .iter()
        .map(|issue| ExportedTaskDto {
            task_id: issue.task_id.to_string(),
            jira_issue_key: issue.issue_key.clone(),
            jira_issue_id: issue.issue_id.clone(),
        })
        .collect()
}
