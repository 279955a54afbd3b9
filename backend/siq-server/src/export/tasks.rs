//! The per-task export loop: issue creation plus the three best-effort
//! enrichments (assignee, story points, status transition).

use crate::api::jira::export_request::StatusMapping;
use crate::export::reconcile;
use crate::export::translate::TranslationContext;

use siq_core::Task;
use siq_db::{ProfileRepository, TeamMemberRepository};
use siq_jira::JiraClient;
use siq_jira::types::{CreateIssueRequest, NewIssueFields, ProjectRef};

use sqlx::SqlitePool;
use uuid::Uuid;

/// Outcome of one best-effort enrichment call. Skips and failures never
/// fail the task; they are carried in the batch summary for inspection.
#[derive(Debug, Clone, PartialEq)]
pub enum SideCall {
    Ok,
    Skipped(String),
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct EnrichmentOutcome {
    pub assignee: SideCall,
    pub story_points: SideCall,
    pub transition: SideCall,
}

/// One successfully created issue with its source task identifiers.
#[derive(Debug, Clone)]
pub struct ExportedIssue {
    pub task_id: Uuid,
    pub sprint_id: Option<Uuid>,
    pub issue_key: String,
    pub issue_id: String,
    pub enrichment: EnrichmentOutcome,
}

/// Batch tally, threaded through the task loop as an accumulator.
#[derive(Debug, Clone)]
pub struct ExportBatch {
    pub total: usize,
    pub failed: usize,
    pub exported: Vec<ExportedIssue>,
}

impl ExportBatch {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            failed: 0,
            exported: Vec::new(),
        }
    }

    pub fn with_success(mut self, issue: ExportedIssue) -> Self {
        self.exported.push(issue);
        self
    }

    pub fn with_failure(mut self) -> Self {
        self.failed += 1;
        self
    }

    pub fn exported_count(&self) -> usize {
        self.exported.len()
    }
}

/// Export every task sequentially. A failed issue creation is counted and
/// the loop continues; enrichment failures are recorded but never fatal.
///
/// `transition_statuses` is set on the plain-project path only; the
/// sprint-folder path places issues into sprints afterwards instead.
/// `clear_project_id` is set on the sprint-folder path so sprint-sourced
/// tasks are detached from any local project when marked synced.
pub async fn export_tasks(
    pool: &SqlitePool,
    client: &JiraClient,
    ctx: &mut TranslationContext<'_>,
    tasks: &[Task],
    mappings: &[StatusMapping],
    project_key: &str,
    transition_statuses: bool,
    clear_project_id: bool,
) -> ExportBatch {
    let mut batch = ExportBatch::new(tasks.len());

    for task in tasks {
        let issuetype = ctx.issue_type().await;
        let priority = ctx.priority(task.priority).await;

        let request = CreateIssueRequest {
            fields: NewIssueFields {
                project: ProjectRef {
                    key: project_key.to_string(),
                },
                summary: task.name.clone(),
                description: task.description.clone(),
                issuetype,
                priority,
            },
        };

        let created = match client.create_issue(&request).await {
            Ok(created) => created,
            Err(e) => {
                log::error!("Failed to create issue for task {}: {}", task.id, e);
                batch = batch.with_failure();
                continue;
            }
        };

        log::info!("Created issue {} for task {}", created.key, task.id);

        reconcile::mark_task_synced(pool, task, &created, project_key, clear_project_id).await;

        let assignee = assign_task(pool, client, task, &created.key).await;
        let story_points = apply_story_points(client, ctx, task, &created.key).await;
        let transition = if transition_statuses {
            transition_status(client, mappings, task, &created.key).await
        } else {
            SideCall::Skipped("sprint placement handles status".to_string())
        };

        batch = batch.with_success(ExportedIssue {
            task_id: task.id,
            sprint_id: task.sprint_id,
            issue_key: created.key,
            issue_id: created.id,
            enrichment: EnrichmentOutcome {
                assignee,
                story_points,
                transition,
            },
        });
    }

    batch
}

/// Resolve the remote account id from the task's profile assignee, else
/// its team-member assignee, and assign the issue. At most one of the two
/// sources is populated on any task.
async fn assign_task(
    pool: &SqlitePool,
    client: &JiraClient,
    task: &Task,
    issue_key: &str,
) -> SideCall {
    let account_id = match resolve_assignee_account(pool, task).await {
        Ok(account_id) => account_id,
        Err(message) => return SideCall::Failed(message),
    };

    let Some(account_id) = account_id else {
        log::debug!("Task {} has no linked Jira account; skipping assignment", task.id);
        return SideCall::Skipped("no linked Jira account".to_string());
    };

    match client.assign_issue(issue_key, &account_id).await {
        Ok(()) => SideCall::Ok,
        Err(e) => {
            log::warn!("Failed to assign {} to {}: {}", issue_key, account_id, e);
            SideCall::Failed(e.to_string())
        }
    }
}

async fn resolve_assignee_account(
    pool: &SqlitePool,
    task: &Task,
) -> Result<Option<String>, String> {
    if let Some(profile_id) = task.assignee_id {
        let profile = ProfileRepository::find_by_id(pool, profile_id)
            .await
            .map_err(|e| e.to_string())?;
        if let Some(account_id) = profile.and_then(|p| p.jira_account_id) {
            return Ok(Some(account_id));
        }
    }

    if let Some(member_id) = task.assigned_member_id {
        let member = TeamMemberRepository::find_by_id(pool, member_id)
            .await
            .map_err(|e| e.to_string())?;
        if let Some(account_id) = member.and_then(|m| m.jira_account_id) {
            return Ok(Some(account_id));
        }
    }

    Ok(None)
}

/// Write story points through the discovered custom field, when the task
/// has a numeric value and the instance exposes such a field.
async fn apply_story_points(
    client: &JiraClient,
    ctx: &mut TranslationContext<'_>,
    task: &Task,
    issue_key: &str,
) -> SideCall {
    let Some(points) = task.story_points.filter(|p| p.is_finite()) else {
        return SideCall::Skipped("no story points".to_string());
    };

    let Some(field) = ctx.story_points_field().await else {
        return SideCall::Skipped("no story points field discovered".to_string());
    };

    let fields = serde_json::json!({ field: points });
    match client.update_issue_fields(issue_key, fields).await {
        Ok(()) => SideCall::Ok,
        Err(e) => {
            log::warn!("Failed to set story points on {}: {}", issue_key, e);
            SideCall::Failed(e.to_string())
        }
    }
}

/// Move the new issue to the mapped remote status, when the caller mapped
/// the task's local status to one.
async fn transition_status(
    client: &JiraClient,
    mappings: &[StatusMapping],
    task: &Task,
    issue_key: &str,
) -> SideCall {
    let local_status_id = task.status_id.to_string();
    let mapped = mappings
        .iter()
        .find(|m| m.local_status_id == local_status_id)
        .and_then(|m| m.jira_status_id.as_deref());

    let Some(remote_status_id) = mapped else {
        return SideCall::Skipped("no status mapping".to_string());
    };

    match client
        .transition_issue_to_status(issue_key, remote_status_id)
        .await
    {
        Ok(true) => SideCall::Ok,
        Ok(false) => {
            log::debug!(
                "No transition on {} leads to status {}",
                issue_key,
                remote_status_id
            );
            SideCall::Skipped("no transition to mapped status".to_string())
        }
        Err(e) => {
            log::warn!("Failed to transition {}: {}", issue_key, e);
            SideCall::Failed(e.to_string())
        }
    }
}
