//! Remote sprint creation and issue placement for the sprint-folder path.

use crate::export::tasks::ExportedIssue;

use siq_core::Sprint;
use siq_jira::JiraClient;

use std::collections::HashMap;

use uuid::Uuid;

/// Grouping key for created issues by their source sprint. A dedicated
/// type rather than a concatenated string, so sprint names containing any
/// separator character cannot collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SprintKey {
    pub id: Uuid,
    pub name: String,
}

impl SprintKey {
    pub fn of(sprint: &Sprint) -> Self {
        Self {
            id: sprint.id,
            name: sprint.name.clone(),
        }
    }
}

/// One remote sprint created for a local sprint.
#[derive(Debug, Clone)]
pub struct CreatedSprint {
    pub sprint_id: Uuid,
    pub jira_sprint_id: i64,
    pub name: String,
    pub issues_moved: usize,
}

/// Group created issue keys by their source sprint. Every sprint of the
/// folder gets an entry, including sprints with no exported issues.
pub fn group_issues_by_sprint(
    sprints: &[Sprint],
    exported: &[ExportedIssue],
) -> HashMap<SprintKey, Vec<String>> {
    let mut grouped: HashMap<SprintKey, Vec<String>> = sprints
        .iter()
        .map(|sprint| (SprintKey::of(sprint), Vec::new()))
        .collect();

    for issue in exported {
        let Some(sprint_id) = issue.sprint_id else {
            continue;
        };
        let Some(sprint) = sprints.iter().find(|s| s.id == sprint_id) else {
            continue;
        };
        if let Some(keys) = grouped.get_mut(&SprintKey::of(sprint)) {
            keys.push(issue.issue_key.clone());
        }
    }

    grouped
}

/// Create one remote sprint per local sprint and move its issues in a
/// single batched call. A creation failure leaves that sprint's issues
/// un-sprinted; nothing is retried or rolled back.
pub async fn create_remote_sprints(
    client: &JiraClient,
    board_id: i64,
    sprints: &[Sprint],
    grouped: &HashMap<SprintKey, Vec<String>>,
) -> Vec<CreatedSprint> {
    let mut created = Vec::new();

    for sprint in sprints {
        let remote = match client
            .create_sprint(
                board_id,
                &sprint.name,
                sprint.goal.as_deref(),
                sprint.start_date,
                sprint.end_date,
            )
            .await
        {
            Ok(remote) => remote,
            Err(e) => {
                log::warn!("Failed to create remote sprint for {}: {}", sprint.name, e);
                continue;
            }
        };

        log::info!(
            "Created remote sprint {} ({}) for {}",
            remote.name,
            remote.id,
            sprint.id
        );

        let keys = grouped
            .get(&SprintKey::of(sprint))
            .cloned()
            .unwrap_or_default();

        let issues_moved = if keys.is_empty() {
            0
        } else {
            let count = keys.len();
            match client.move_issues_to_sprint(remote.id, keys).await {
                Ok(()) => count,
                Err(e) => {
                    log::warn!(
                        "Failed to move issues into sprint {}: {}. Issues stay un-sprinted",
                        remote.id,
                        e
                    );
                    0
                }
            }
        };

        created.push(CreatedSprint {
            sprint_id: sprint.id,
            jira_sprint_id: remote.id,
            name: remote.name,
            issues_moved,
        });
    }

    created
}
