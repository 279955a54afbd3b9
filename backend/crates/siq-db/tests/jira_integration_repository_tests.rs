mod common;

use crate::common::{create_test_pool, seed_workspace};

use siq_core::JiraIntegration;
use siq_db::JiraIntegrationRepository;

#[tokio::test]
async fn test_upsert_inserts_then_updates() {
    let pool = create_test_pool().await;
    let workspace = seed_workspace(&pool).await;

    let first = JiraIntegration::new(
        workspace.id,
        "acme.atlassian.net".to_string(),
        "pm@acme.io".to_string(),
        "token-1".to_string(),
    );
    JiraIntegrationRepository::upsert(&pool, &first)
        .await
        .unwrap();

    let stored = JiraIntegrationRepository::find_by_workspace(&pool, workspace.id)
        .await
        .unwrap()
        .expect("integration should exist");
    assert_eq!(stored.jira_api_token, "token-1");
    assert!(stored.active);

    // Second export with rotated credentials updates the same row
    let second = JiraIntegration::new(
        workspace.id,
        "acme.atlassian.net".to_string(),
        "pm@acme.io".to_string(),
        "token-2".to_string(),
    );
    JiraIntegrationRepository::upsert(&pool, &second)
        .await
        .unwrap();

    let updated = JiraIntegrationRepository::find_by_workspace(&pool, workspace.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.jira_api_token, "token-2");
    assert_eq!(updated.id, stored.id, "upsert must not replace the row id");
}
