//! SqliteWorkspaceServerRepository integration tests

use mcpcatalog_core::{
    Conflict, Entry, EntryRepository, Transport, WorkspaceServer, WorkspaceServerRepository,
};
use mcpcatalog_storage::{SqliteEntryRepository, SqliteWorkspaceServerRepository};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use tests::{db::TestDatabase, fixtures};
use uuid::Uuid;

async fn repos() -> (SqliteEntryRepository, SqliteWorkspaceServerRepository) {
    let db = TestDatabase::in_memory().shared();
    let entries = SqliteEntryRepository::new(Arc::clone(&db));
    let servers = SqliteWorkspaceServerRepository::new(db);

    // Installs reference their entry
    for new in [fixtures::github(), fixtures::paddle(), fixtures::fetch()] {
        entries.create(&Entry::from_new(new)).await.unwrap();
    }

    (entries, servers)
}

fn resolved_github() -> Transport {
    Transport::stdio("npx", ["-y", "@modelcontextprotocol/server-github"])
        .with_env("GITHUB_PERSONAL_ACCESS_TOKEN", "ghp_secret")
}

#[tokio::test]
async fn test_install_and_get() {
    let (_, servers) = repos().await;
    let workspace_id = Uuid::new_v4();
    let server = WorkspaceServer::new(workspace_id, "github", resolved_github());

    servers.install(&server).await.expect("Failed to install");

    let loaded = servers
        .get(&workspace_id, "github")
        .await
        .unwrap()
        .expect("server missing");
    assert_eq!(loaded.id, server.id);
    assert_eq!(loaded.transport, resolved_github());
    assert!(loaded.enabled);

    assert!(servers.get(&Uuid::new_v4(), "github").await.unwrap().is_none());
}

#[tokio::test]
async fn test_disabled_flag_persists() {
    let (_, servers) = repos().await;
    let workspace_id = Uuid::new_v4();
    let server = WorkspaceServer::new(workspace_id, "fetch", Transport::stdio("uvx", ["mcp-server-fetch"]))
        .with_enabled(false);
    servers.install(&server).await.unwrap();

    let loaded = servers.get(&workspace_id, "fetch").await.unwrap().unwrap();
    assert!(!loaded.enabled);
}

#[tokio::test]
async fn test_install_twice_in_same_workspace_fails() {
    let (_, servers) = repos().await;
    let workspace_id = Uuid::new_v4();

    servers
        .install(&WorkspaceServer::new(workspace_id, "github", resolved_github()))
        .await
        .unwrap();
    let err = servers
        .install(&WorkspaceServer::new(workspace_id, "github", resolved_github()))
        .await
        .unwrap_err();
    assert!(err.is::<Conflict>(), "{err:?}");

    // A different workspace may install the same entry
    servers
        .install(&WorkspaceServer::new(Uuid::new_v4(), "github", resolved_github()))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_install_unknown_entry_fails() {
    let (_, servers) = repos().await;
    let server = WorkspaceServer::new(Uuid::new_v4(), "nonexistent", resolved_github());
    let err = servers.install(&server).await.unwrap_err();
    assert!(!err.is::<Conflict>());
}

#[tokio::test]
async fn test_list_for_workspace_sorted() {
    let (_, servers) = repos().await;
    let workspace_id = Uuid::new_v4();
    let other_workspace = Uuid::new_v4();

    for name in ["paddle", "github", "fetch"] {
        servers
            .install(&WorkspaceServer::new(workspace_id, name, Transport::stdio("npx", [name])))
            .await
            .unwrap();
    }
    servers
        .install(&WorkspaceServer::new(other_workspace, "github", resolved_github()))
        .await
        .unwrap();

    let listed = servers.list_for_workspace(&workspace_id).await.unwrap();
    let names: Vec<_> = listed.iter().map(|s| s.entry_name.as_str()).collect();
    assert_eq!(names, vec!["fetch", "github", "paddle"]);

    assert_eq!(servers.list_for_workspace(&other_workspace).await.unwrap().len(), 1);
    assert!(servers.list_for_workspace(&Uuid::new_v4()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_uninstall() {
    let (_, servers) = repos().await;
    let workspace_id = Uuid::new_v4();
    let server = WorkspaceServer::new(workspace_id, "github", resolved_github());
    servers.install(&server).await.unwrap();

    servers.uninstall(&server.id).await.unwrap();
    assert!(servers.get(&workspace_id, "github").await.unwrap().is_none());

    // Uninstalling again is a no-op
    servers.uninstall(&server.id).await.unwrap();
}

#[tokio::test]
async fn test_deleting_entry_cascades_to_installs() {
    let (entries, servers) = repos().await;
    let workspace_id = Uuid::new_v4();
    servers
        .install(&WorkspaceServer::new(workspace_id, "github", resolved_github()))
        .await
        .unwrap();
    servers
        .install(&WorkspaceServer::new(workspace_id, "fetch", Transport::stdio("uvx", ["mcp-server-fetch"])))
        .await
        .unwrap();

    assert!(entries.delete("github").await.unwrap());

    let remaining = servers.list_for_workspace(&workspace_id).await.unwrap();
    let names: Vec<_> = remaining.iter().map(|s| s.entry_name.as_str()).collect();
    assert_eq!(names, vec!["fetch"]);
}
