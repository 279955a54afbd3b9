use crate::export::sprints::{SprintKey, group_issues_by_sprint};
use crate::export::tasks::{EnrichmentOutcome, ExportedIssue, SideCall};

use siq_core::Sprint;

use uuid::Uuid;

fn sprint(name: &str) -> Sprint {
    Sprint::new(Uuid::new_v4(), name.to_string(), None, None, None)
}

fn issue_in_sprint(key: &str, sprint_id: Uuid) -> ExportedIssue {
    ExportedIssue {
        task_id: Uuid::new_v4(),
        sprint_id: Some(sprint_id),
        issue_key: key.to_string(),
        issue_id: "10001".to_string(),
        enrichment: EnrichmentOutcome {
            assignee: SideCall::Skipped("no linked Jira account".to_string()),
            story_points: SideCall::Skipped("no story points".to_string()),
            transition: SideCall::Skipped("sprint placement handles status".to_string()),
        },
    }
}

#[test]
fn test_grouping_includes_empty_sprints() {
    let sprint_a = sprint("Sprint A");
    let sprint_b = sprint("Sprint B");
    let sprints = vec![sprint_a.clone(), sprint_b.clone()];

    let exported = vec![
        issue_in_sprint("ABC-1", sprint_a.id),
        issue_in_sprint("ABC-2", sprint_a.id),
    ];

    let grouped = group_issues_by_sprint(&sprints, &exported);

    assert_eq!(grouped.len(), 2);
    assert_eq!(grouped[&SprintKey::of(&sprint_a)], vec!["ABC-1", "ABC-2"]);
    assert!(grouped[&SprintKey::of(&sprint_b)].is_empty());
}

#[test]
fn test_grouping_distinguishes_same_named_sprints() {
    let sprint_a = sprint("Sprint 1");
    let sprint_b = sprint("Sprint 1");
    let sprints = vec![sprint_a.clone(), sprint_b.clone()];

    let exported = vec![issue_in_sprint("ABC-1", sprint_b.id)];
    let grouped = group_issues_by_sprint(&sprints, &exported);

    assert!(grouped[&SprintKey::of(&sprint_a)].is_empty());
    assert_eq!(grouped[&SprintKey::of(&sprint_b)], vec!["ABC-1"]);
}

#[test]
fn test_grouping_ignores_unknown_sprint_ids() {
    let sprint_a = sprint("Sprint A");
    let sprints = vec![sprint_a.clone()];

    let exported = vec![issue_in_sprint("ABC-1", Uuid::new_v4())];
    let grouped = group_issues_by_sprint(&sprints, &exported);

    assert!(grouped[&SprintKey::of(&sprint_a)].is_empty());
}
