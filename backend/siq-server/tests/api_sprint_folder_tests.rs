//! End-to-end tests for the sprint folder export endpoint.

mod common;

use common::*;

use siq_core::Task;
use siq_db::TaskRepository;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_sprint_folder_export_recreates_sprints_remotely() {
    let (app, pool) = test_router().await;
    let server = MockServer::start().await;

    let workspace = seed_workspace(&pool, "acme").await;
    let space = seed_space(&pool, workspace.id).await;
    let folder = seed_sprint_folder(&pool, space.id).await;
    let sprint_a = seed_sprint(&pool, folder.id, "Sprint A", 0).await;
    seed_sprint(&pool, folder.id, "Sprint B", 5).await;
    let status = seed_status(&pool, workspace.id, "To Do", 0).await;

    for i in 0..3 {
        seed_sprint_task(
            &pool,
            workspace.id,
            sprint_a.id,
            status.id,
            &format!("Task {}", i),
            i,
        )
        .await;
    }

    mount_export_stubs(&server, "ABC").await;
    mount_issue_creation(&server, "ABC-1").await;

    // Sprint A is created first (folder ordering), Sprint B second.
    Mock::given(method("POST"))
        .and(path("/rest/agile/1.0/sprint"))
        .and(body_partial_json(json!({
            "name": "Sprint A",
            "originBoardId": 42
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 101,
            "name": "Sprint A",
            "state": "future"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/rest/agile/1.0/sprint"))
        .and(body_partial_json(json!({ "name": "Sprint B" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 102,
            "name": "Sprint B",
            "state": "future"
        })))
        .expect(1)
        .mount(&server)
        .await;

    // Only the sprint with issues gets a move call, and it is batched.
    Mock::given(method("POST"))
        .and(path("/rest/agile/1.0/sprint/101/issue"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/rest/agile/1.0/sprint/102/issue"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let body = json!({
        "jiraCredentials": jira_credentials(&server),
        "projectKey": "ABC",
        "createNewProject": false,
        "statusMappings": [status_mapping(&status, Some("1"))],
        "sprintFolderId": folder.id.to_string()
    });

    let (code, response) = post_json(
        app,
        &format!(
            "/api/workspace/{}/jira/export-sprint-folder",
            workspace.short_id
        ),
        &body,
    )
    .await;

    assert_eq!(code, StatusCode::OK, "response: {}", response);
    assert_eq!(response["success"], json!(true));
    assert_eq!(response["data"]["tasksExported"], json!(3));
    assert_eq!(response["data"]["tasksFailed"], json!(0));
    assert_eq!(response["data"]["sprintsCreated"], json!(2));
    assert_eq!(response["data"]["boardCreated"], json!(true));
    assert_eq!(response["data"]["filterCreated"], json!(true));
    assert_eq!(response["data"]["projectKey"], json!("ABC"));

    let created = response["data"]["createdSprints"].as_array().unwrap();
    assert_eq!(created.len(), 2);
    assert_eq!(created[0]["name"], json!("Sprint A"));
    assert_eq!(created[0]["jiraSprintId"], json!(101));
    assert_eq!(created[0]["issuesMoved"], json!(3));
    assert_eq!(created[1]["name"], json!("Sprint B"));
    assert_eq!(created[1]["issuesMoved"], json!(0));
}

#[tokio::test]
async fn test_sprint_export_clears_project_assignment() {
    let (app, pool) = test_router().await;
    let server = MockServer::start().await;

    let workspace = seed_workspace(&pool, "acme").await;
    let space = seed_space(&pool, workspace.id).await;
    let project = seed_project(&pool, workspace.id, Some(space.id)).await;
    let folder = seed_sprint_folder(&pool, space.id).await;
    let sprint = seed_sprint(&pool, folder.id, "Sprint 1", 0).await;
    let status = seed_status(&pool, workspace.id, "To Do", 0).await;

    // A task can carry a stale project assignment alongside its sprint.
    // Export through the sprint path must drop it so the issue lives on
    // the board only.
    let mut task = Task::new(workspace.id, status.id, "Carried over".to_string());
    task.sprint_id = Some(sprint.id);
    task.project_id = Some(project.id);
    task.created_at = Utc::now();
    task.updated_at = task.created_at;
    TaskRepository::create(&pool, &task).await.unwrap();

    mount_export_stubs(&server, "ABC").await;
    mount_issue_creation(&server, "ABC-1").await;

    Mock::given(method("POST"))
        .and(path("/rest/agile/1.0/sprint"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 101,
            "name": "Sprint 1",
            "state": "future"
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/rest/agile/1.0/sprint/101/issue"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let body = json!({
        "jiraCredentials": jira_credentials(&server),
        "projectKey": "ABC",
        "createNewProject": false,
        "statusMappings": [status_mapping(&status, None)],
        "sprintFolderId": folder.id.to_string()
    });

    let (code, response) = post_json(
        app,
        &format!(
            "/api/workspace/{}/jira/export-sprint-folder",
            workspace.short_id
        ),
        &body,
    )
    .await;
    assert_eq!(code, StatusCode::OK, "response: {}", response);

    let task = TaskRepository::find_by_id(&pool, task.id)
        .await
        .unwrap()
        .unwrap();
    assert!(task.project_id.is_none());
    assert_eq!(task.sprint_id, Some(sprint.id));
    assert!(task.external_id.is_some());
}

#[tokio::test]
async fn test_sprint_creation_failure_does_not_fail_export() {
    let (app, pool) = test_router().await;
    let server = MockServer::start().await;

    let workspace = seed_workspace(&pool, "acme").await;
    let space = seed_space(&pool, workspace.id).await;
    let folder = seed_sprint_folder(&pool, space.id).await;
    let sprint = seed_sprint(&pool, folder.id, "Sprint 1", 0).await;
    let status = seed_status(&pool, workspace.id, "To Do", 0).await;
    seed_sprint_task(&pool, workspace.id, sprint.id, status.id, "Task", 0).await;

    mount_export_stubs(&server, "ABC").await;
    mount_issue_creation(&server, "ABC-1").await;

    Mock::given(method("POST"))
        .and(path("/rest/agile/1.0/sprint"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "errorMessages": ["Board does not support sprints"]
        })))
        .mount(&server)
        .await;

    let body = json!({
        "jiraCredentials": jira_credentials(&server),
        "projectKey": "ABC",
        "createNewProject": false,
        "statusMappings": [status_mapping(&status, None)],
        "sprintFolderId": folder.id.to_string()
    });

    let (code, response) = post_json(
        app,
        &format!(
            "/api/workspace/{}/jira/export-sprint-folder",
            workspace.short_id
        ),
        &body,
    )
    .await;

    // Issues made it across even though the sprint itself could not be
    // recreated remotely.
    assert_eq!(code, StatusCode::OK, "response: {}", response);
    assert_eq!(response["data"]["tasksExported"], json!(1));
    assert_eq!(response["data"]["sprintsCreated"], json!(0));
    assert!(response["data"]["createdSprints"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_sprint_folder_must_belong_to_workspace() {
    let (app, pool) = test_router().await;
    let server = MockServer::start().await;

    let workspace = seed_workspace(&pool, "acme").await;
    let other = seed_workspace(&pool, "other").await;
    let other_space = seed_space(&pool, other.id).await;
    let foreign_folder = seed_sprint_folder(&pool, other_space.id).await;
    let status = seed_status(&pool, workspace.id, "To Do", 0).await;

    let body = json!({
        "jiraCredentials": jira_credentials(&server),
        "projectKey": "ABC",
        "createNewProject": false,
        "statusMappings": [status_mapping(&status, None)],
        "sprintFolderId": foreign_folder.id.to_string()
    });

    let (code, response) = post_json(
        app,
        &format!(
            "/api/workspace/{}/jira/export-sprint-folder",
            workspace.short_id
        ),
        &body,
    )
    .await;

    assert_eq!(code, StatusCode::NOT_FOUND);
    assert_eq!(response["error"]["code"], json!("NOT_FOUND"));
}

#[tokio::test]
async fn test_sprint_folder_with_no_tasks_is_rejected() {
    let (app, pool) = test_router().await;
    let server = MockServer::start().await;

    let workspace = seed_workspace(&pool, "acme").await;
    let space = seed_space(&pool, workspace.id).await;
    let folder = seed_sprint_folder(&pool, space.id).await;
    seed_sprint(&pool, folder.id, "Sprint 1", 0).await;
    let status = seed_status(&pool, workspace.id, "To Do", 0).await;

    let body = json!({
        "jiraCredentials": jira_credentials(&server),
        "projectKey": "ABC",
        "createNewProject": false,
        "statusMappings": [status_mapping(&status, None)],
        "sprintFolderId": folder.id.to_string()
    });

    let (code, response) = post_json(
        app,
        &format!(
            "/api/workspace/{}/jira/export-sprint-folder",
            workspace.short_id
        ),
        &body,
    )
    .await;

    assert_eq!(code, StatusCode::BAD_REQUEST);
    assert_eq!(response["error"]["code"], json!("BAD_REQUEST"));
}
