#![allow(dead_code)]

//! Shared fixtures for repository tests

use siq_core::{Project, Space, Sprint, SprintFolder, Status, Task, Workspace};
use siq_db::{
    ProjectRepository, SpaceRepository, SprintFolderRepository, SprintRepository,
    StatusRepository, TaskRepository, WorkspaceRepository,
};

use sqlx::SqlitePool;

/// Create a migrated in-memory pool
pub async fn create_test_pool() -> SqlitePool {
    let pool = SqlitePool::connect(":memory:")
        .await
        .expect("Failed to create test database");

    siq_db::migrate(&pool).await.expect("Failed to migrate");

    pool
}

pub async fn seed_workspace(pool: &SqlitePool) -> Workspace {
    let workspace = Workspace::new("wrk-1".to_string(), "Acme".to_string());
    WorkspaceRepository::create(pool, &workspace)
        .await
        .expect("Failed to create workspace");
    workspace
}

pub async fn seed_space(pool: &SqlitePool, workspace: &Workspace) -> Space {
    let space = Space::new(workspace.id, "Product".to_string());
    SpaceRepository::create(pool, &space)
        .await
        .expect("Failed to create space");
    space
}

pub async fn seed_project(pool: &SqlitePool, workspace: &Workspace) -> Project {
    let project = Project::new(workspace.id, None, "Launch".to_string());
    ProjectRepository::create(pool, &project)
        .await
        .expect("Failed to create project");
    project
}

pub async fn seed_status(pool: &SqlitePool, workspace: &Workspace, name: &str) -> Status {
    let status = Status::new(workspace.id, name.to_string(), 0);
    StatusRepository::create(pool, &status)
        .await
        .expect("Failed to create status");
    status
}

pub async fn seed_sprint_folder(pool: &SqlitePool, space: &Space) -> SprintFolder {
    let folder = SprintFolder::new(space.id, "Q3 Sprints".to_string());
    SprintFolderRepository::create(pool, &folder)
        .await
        .expect("Failed to create sprint folder");
    folder
}

pub async fn seed_sprint(pool: &SqlitePool, folder: &SprintFolder, name: &str) -> Sprint {
    let sprint = Sprint::new(folder.id, name.to_string(), None, None, None);
    SprintRepository::create(pool, &sprint)
        .await
        .expect("Failed to create sprint");
    sprint
}

pub async fn seed_task(
    pool: &SqlitePool,
    workspace: &Workspace,
    status: &Status,
    name: &str,
) -> Task {
    let task = Task::new(workspace.id, status.id, name.to_string());
    TaskRepository::create(pool, &task)
        .await
        .expect("Failed to create task");
    task
}
