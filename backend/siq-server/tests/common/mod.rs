#![allow(dead_code)]

//! Test infrastructure for siq-server API tests

use siq_core::{
    Profile, Project, Space, Sprint, SprintFolder, Status, Task, TaskPriority, TeamMember,
    Workspace,
};
use siq_db::{
    ProfileRepository, ProjectRepository, SpaceRepository, SprintFolderRepository,
    SprintRepository, StatusRepository, TaskRepository, TeamMemberRepository, WorkspaceRepository,
};
use siq_server::app_state::AppState;
use siq_server::build_router;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{Duration, Utc};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use sqlx::SqlitePool;
use tower::ServiceExt;
use uuid::Uuid;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Create a test pool with in-memory SQLite
pub async fn create_test_pool() -> SqlitePool {
    let pool = SqlitePool::connect(":memory:")
        .await
        .expect("Failed to create test database");

    siq_db::migrate(&pool).await.expect("Failed to run migrations");

    pool
}

/// Create AppState for testing. The filter retry delay is zeroed so
/// collision tests run without real sleeps.
pub async fn create_test_app_state() -> AppState {
    let pool = create_test_pool().await;
    let jira = siq_config::JiraConfig {
        filter_retry_delay_secs: 0,
        ..Default::default()
    };

    AppState { pool, jira }
}

pub async fn test_router() -> (Router, SqlitePool) {
    let state = create_test_app_state().await;
    let pool = state.pool.clone();
    (build_router(state), pool)
}

// =============================================================================
// Fixtures
// =============================================================================

pub async fn seed_workspace(pool: &SqlitePool, short_id: &str) -> Workspace {
    let workspace = Workspace::new(short_id.to_string(), format!("{} workspace", short_id));
    WorkspaceRepository::create(pool, &workspace)
        .await
        .expect("Failed to create test workspace");
    workspace
}

pub async fn seed_space(pool: &SqlitePool, workspace_id: Uuid) -> Space {
    let space = Space::new(workspace_id, "Engineering".to_string());
    SpaceRepository::create(pool, &space)
        .await
        .expect("Failed to create test space");
    space
}

pub async fn seed_project(pool: &SqlitePool, workspace_id: Uuid, space_id: Option<Uuid>) -> Project {
    let project = Project::new(workspace_id, space_id, "Web App".to_string());
    ProjectRepository::create(pool, &project)
        .await
        .expect("Failed to create test project");
    project
}

pub async fn seed_status(pool: &SqlitePool, workspace_id: Uuid, name: &str, position: i32) -> Status {
    let status = Status::new(workspace_id, name.to_string(), position);
    StatusRepository::create(pool, &status)
        .await
        .expect("Failed to create test status");
    status
}

pub async fn seed_profile(pool: &SqlitePool, jira_account_id: Option<&str>) -> Profile {
    let mut profile = Profile::new("member@example.com".to_string(), "Member".to_string());
    profile.jira_account_id = jira_account_id.map(String::from);
    ProfileRepository::create(pool, &profile)
        .await
        .expect("Failed to create test profile");
    profile
}

pub async fn seed_team_member(
    pool: &SqlitePool,
    workspace_id: Uuid,
    jira_account_id: Option<&str>,
) -> TeamMember {
    let mut member = TeamMember::new(
        workspace_id,
        "guest@example.com".to_string(),
        "Guest".to_string(),
    );
    member.jira_account_id = jira_account_id.map(String::from);
    TeamMemberRepository::create(pool, &member)
        .await
        .expect("Failed to create test team member");
    member
}

pub async fn seed_sprint_folder(pool: &SqlitePool, space_id: Uuid) -> SprintFolder {
    let folder = SprintFolder::new(space_id, "Q3 Sprints".to_string());
    SprintFolderRepository::create(pool, &folder)
        .await
        .expect("Failed to create test sprint folder");
    folder
}

pub async fn seed_sprint(pool: &SqlitePool, folder_id: Uuid, name: &str, offset_secs: i64) -> Sprint {
    let mut sprint = Sprint::new(folder_id, name.to_string(), None, None, None);
    sprint.created_at = Utc::now() + Duration::seconds(offset_secs);
    SprintRepository::create(pool, &sprint)
        .await
        .expect("Failed to create test sprint");
    sprint
}

/// Create a task under a project. `offset_secs` staggers created_at so
/// export ordering is deterministic.
pub async fn seed_project_task(
    pool: &SqlitePool,
    workspace_id: Uuid,
    project_id: Uuid,
    status_id: Uuid,
    name: &str,
    offset_secs: i64,
) -> Task {
    let mut task = Task::new(workspace_id, status_id, name.to_string());
    task.project_id = Some(project_id);
    task.priority = TaskPriority::Medium;
    task.created_at = Utc::now() + Duration::seconds(offset_secs);
    task.updated_at = task.created_at;
    TaskRepository::create(pool, &task)
        .await
        .expect("Failed to create test task");
    task
}

/// Create a task inside a sprint.
pub async fn seed_sprint_task(
    pool: &SqlitePool,
    workspace_id: Uuid,
    sprint_id: Uuid,
    status_id: Uuid,
    name: &str,
    offset_secs: i64,
) -> Task {
    let mut task = Task::new(workspace_id, status_id, name.to_string());
    task.sprint_id = Some(sprint_id);
    task.created_at = Utc::now() + Duration::seconds(offset_secs);
    task.updated_at = task.created_at;
    TaskRepository::create(pool, &task)
        .await
        .expect("Failed to create test task");
    task
}

// =============================================================================
// Jira stubs
// =============================================================================

/// Mount the happy-path remote surface every export touches: no saved
/// filters, filter/board creation succeeds, the project has a Story issue
/// type, standard priorities, no story-points field, one To Do status.
pub async fn mount_export_stubs(server: &MockServer, project_key: &str) {
    Mock::given(method("GET"))
        .and(path("/rest/api/2/filter/my"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/api/2/filter"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "777",
            "name": "export filter",
            "jql": format!("project = {} ORDER BY created DESC", project_key)
        })))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/agile/1.0/board"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 42,
            "name": format!("{} Scrum Board", project_key),
            "type": "scrum"
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/rest/api/2/project/{}", project_key)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "10000",
            "key": project_key,
            "name": "Web App",
            "issueTypes": [
                { "id": "10001", "name": "Story", "subtask": false },
                { "id": "10002", "name": "Task", "subtask": false }
            ]
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/api/2/priority"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "1", "name": "Highest" },
            { "id": "2", "name": "High" },
            { "id": "3", "name": "Medium" },
            { "id": "4", "name": "Low" },
            { "id": "5", "name": "Lowest" }
        ])))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/api/2/field"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/rest/api/2/issue/[A-Z0-9-]+/transitions$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "transitions": [] })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/rest/api/2/project/{}/statuses", project_key)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": "10001",
                "name": "Story",
                "statuses": [
                    {
                        "id": "1",
                        "name": "To Do",
                        "statusCategory": { "key": "new", "name": "To Do", "colorName": "blue-gray" }
                    },
                    {
                        "id": "3",
                        "name": "Done",
                        "statusCategory": { "key": "done", "name": "Done", "colorName": "green" }
                    }
                ]
            }
        ])))
        .mount(server)
        .await;
}

/// Mount an always-succeeding create-issue stub returning the given key.
pub async fn mount_issue_creation(server: &MockServer, issue_key: &str) {
    Mock::given(method("POST"))
        .and(path("/rest/api/2/issue"))
        .respond_with(issue_created(issue_key, "10100"))
        .mount(server)
        .await;
}

pub fn issue_created(key: &str, id: &str) -> ResponseTemplate {
    ResponseTemplate::new(201).set_body_json(json!({ "id": id, "key": key }))
}

// =============================================================================
// Request helpers
// =============================================================================

pub fn jira_credentials(server: &MockServer) -> Value {
    json!({
        "jira_domain": server.uri(),
        "jira_email": "dev@example.com",
        "jira_api_token": "token-123"
    })
}

pub fn status_mapping(status: &Status, jira_status_id: Option<&str>) -> Value {
    json!({
        "localStatusId": status.id.to_string(),
        "localStatusName": status.name,
        "jiraStatusId": jira_status_id,
        "jiraStatusName": jira_status_id.map(|_| "To Do")
    })
}

/// POST a JSON body with a valid X-User-Id header and decode the response.
pub async fn post_json(app: Router, uri: &str, body: &Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .header("X-User-Id", Uuid::new_v4().to_string())
        .body(Body::from(body.to_string()))
        .expect("Failed to build request");

    let response = app.oneshot(request).await.expect("Request failed");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, body)
}
