use crate::export::tasks::{EnrichmentOutcome, ExportBatch, ExportedIssue, SideCall};

use uuid::Uuid;

fn exported(key: &str) -> ExportedIssue {
    ExportedIssue {
        task_id: Uuid::new_v4(),
        sprint_id: None,
        issue_key: key.to_string(),
        issue_id: "10001".to_string(),
        enrichment: EnrichmentOutcome {
            assignee: SideCall::Skipped("no linked Jira account".to_string()),
            story_points: SideCall::Skipped("no story points".to_string()),
            transition: SideCall::Ok,
        },
    }
}

#[test]
fn test_batch_tally_partial_failure() {
    let batch = ExportBatch::new(3)
        .with_success(exported("ABC-1"))
        .with_failure()
        .with_success(exported("ABC-2"));

    assert_eq!(batch.total, 3);
    assert_eq!(batch.exported_count(), 2);
    assert_eq!(batch.failed, 1);
}

#[test]
fn test_batch_counts_are_consistent() {
    let batch = ExportBatch::new(2).with_failure().with_failure();

    assert_eq!(batch.exported_count() + batch.failed, batch.total);
    assert!(batch.exported.is_empty());
}

#[test]
fn test_enrichment_outcomes_are_inspectable() {
    let issue = exported("ABC-1");

    assert_eq!(issue.enrichment.transition, SideCall::Ok);
    assert!(matches!(issue.enrichment.assignee, SideCall::Skipped(_)));
}
