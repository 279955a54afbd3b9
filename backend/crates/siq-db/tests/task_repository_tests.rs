mod common;

use crate::common::{
    create_test_pool, seed_project, seed_space, seed_sprint, seed_sprint_folder, seed_status,
    seed_task, seed_workspace,
};

use siq_core::{SyncStatus, Task, TaskExternalData};
use siq_db::TaskRepository;

use chrono::Utc;

#[tokio::test]
async fn test_create_and_find_round_trip() {
    let pool = create_test_pool().await;
    let workspace = seed_workspace(&pool).await;
    let status = seed_status(&pool, &workspace, "Todo").await;

    let mut task = Task::new(workspace.id, status.id, "Write spec".to_string());
    task.description = Some("<p>details</p>".to_string());
    task.story_points = Some(3.0);
    TaskRepository::create(&pool, &task).await.unwrap();

    let found = TaskRepository::find_by_id(&pool, task.id)
        .await
        .unwrap()
        .expect("task should exist");

    assert_eq!(found.name, "Write spec");
    assert_eq!(found.description.as_deref(), Some("<p>details</p>"));
    assert_eq!(found.story_points, Some(3.0));
    assert!(found.external_id.is_none());
    assert!(found.sync_status.is_none());
}

#[tokio::test]
async fn test_exportable_by_project_excludes_sprint_tasks() {
    let pool = create_test_pool().await;
    let workspace = seed_workspace(&pool).await;
    let space = seed_space(&pool, &workspace).await;
    let status = seed_status(&pool, &workspace, "Todo").await;
    let project = seed_project(&pool, &workspace).await;
    let folder = seed_sprint_folder(&pool, &space).await;
    let sprint = seed_sprint(&pool, &folder, "Sprint 1").await;

    let mut plain = Task::new(workspace.id, status.id, "Plain".to_string());
    plain.project_id = Some(project.id);
    TaskRepository::create(&pool, &plain).await.unwrap();

    let mut sprinted = Task::new(workspace.id, status.id, "Sprinted".to_string());
    sprinted.project_id = Some(project.id);
    sprinted.sprint_id = Some(sprint.id);
    TaskRepository::create(&pool, &sprinted).await.unwrap();

    let exportable = TaskRepository::find_exportable_by_project(&pool, project.id)
        .await
        .unwrap();

    assert_eq!(exportable.len(), 1);
    assert_eq!(exportable[0].name, "Plain");

    let in_sprint = TaskRepository::find_by_sprint(&pool, sprint.id)
        .await
        .unwrap();
    assert_eq!(in_sprint.len(), 1);
    assert_eq!(in_sprint[0].name, "Sprinted");
}

#[tokio::test]
async fn test_mark_synced_writes_external_data() {
    let pool = create_test_pool().await;
    let workspace = seed_workspace(&pool).await;
    let status = seed_status(&pool, &workspace, "Todo").await;
    let task = seed_task(&pool, &workspace, &status, "Export me").await;

    let data = TaskExternalData {
        jira_key: "ABC-1".to_string(),
        jira_id: "10001".to_string(),
        jira_project_key: "ABC".to_string(),
        last_synced_at: Utc::now(),
    };
    TaskRepository::mark_synced(&pool, task.id, "10001", &data, false)
        .await
        .unwrap();

    let found = TaskRepository::find_by_id(&pool, task.id)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(found.integration_type.as_deref(), Some("jira"));
    assert_eq!(found.external_id.as_deref(), Some("10001"));
    assert_eq!(found.sync_status, Some(SyncStatus::Synced));
    assert!(found.last_synced_at.is_some());
    let external = found.external_data.expect("external data should be set");
    assert_eq!(external.jira_key, "ABC-1");
    assert_eq!(external.jira_project_key, "ABC");
}

#[tokio::test]
async fn test_mark_synced_can_clear_project_link() {
    let pool = create_test_pool().await;
    let workspace = seed_workspace(&pool).await;
    let space = seed_space(&pool, &workspace).await;
    let status = seed_status(&pool, &workspace, "Todo").await;
    let project = seed_project(&pool, &workspace).await;
    let folder = seed_sprint_folder(&pool, &space).await;
    let sprint = seed_sprint(&pool, &folder, "Sprint 1").await;

    let mut task = Task::new(workspace.id, status.id, "Sprint task".to_string());
    task.project_id = Some(project.id);
    task.sprint_id = Some(sprint.id);
    TaskRepository::create(&pool, &task).await.unwrap();

    let data = TaskExternalData {
        jira_key: "ABC-2".to_string(),
        jira_id: "10002".to_string(),
        jira_project_key: "ABC".to_string(),
        last_synced_at: Utc::now(),
    };
    TaskRepository::mark_synced(&pool, task.id, "10002", &data, true)
        .await
        .unwrap();

    let found = TaskRepository::find_by_id(&pool, task.id)
        .await
        .unwrap()
        .unwrap();

    assert!(found.project_id.is_none());
    assert_eq!(found.sprint_id, Some(sprint.id));
}
