//! SqliteEntryRepository integration tests

use mcpcatalog_core::{
    Conflict, Entry, EntryRepository, NewEntry, Pagination, Parameter, ParameterScope, Transport,
};
use mcpcatalog_storage::SqliteEntryRepository;
use pretty_assertions::assert_eq;
use std::sync::Arc;
use tests::{db::TestDatabase, fixtures};
use tokio::sync::Mutex;

fn repo() -> SqliteEntryRepository {
    SqliteEntryRepository::new(TestDatabase::in_memory().shared())
}

#[tokio::test]
async fn test_entry_create_and_get() {
    let repo = repo();
    let entry = Entry::from_new(fixtures::github());

    repo.create(&entry).await.expect("Failed to create entry");

    let loaded = repo.get("github").await.unwrap().expect("entry missing");
    assert_eq!(loaded.id, entry.id);
    assert_eq!(loaded.title, "GitHub");
    assert_eq!(loaded.transport, entry.transport);
    assert_eq!(loaded.parameters.len(), 1);
    assert_eq!(loaded.parameters[0].name, "GITHUB_PERSONAL_ACCESS_TOKEN");
    assert_eq!(loaded.parameters[0].scope, ParameterScope::Env);
    assert_eq!(loaded.parameters[0].description, "<YOUR_TOKEN>");
}

#[tokio::test]
async fn test_entry_get_missing() {
    let repo = repo();
    assert!(repo.get("nonexistent").await.unwrap().is_none());
}

#[tokio::test]
async fn test_entry_duplicate_name_rejected() {
    let repo = repo();
    repo.create(&Entry::from_new(fixtures::github())).await.unwrap();

    let err = repo
        .create(&Entry::from_new(fixtures::github()))
        .await
        .unwrap_err();
    assert!(err.is::<Conflict>(), "{err:?}");
}

#[tokio::test]
async fn test_entry_http_transport_round_trips() {
    let repo = repo();
    let entry = Entry::from_new(fixtures::linear());
    repo.create(&entry).await.unwrap();

    let loaded = repo.get("linear").await.unwrap().unwrap();
    assert_eq!(loaded.transport.url(), Some("https://mcp.linear.app/sse"));
    assert_eq!(
        loaded.parameters,
        vec![Parameter::env("linear-api-key", "Personal API key")]
    );
}

#[tokio::test]
async fn test_entry_update() {
    let repo = repo();
    let mut entry = Entry::from_new(fixtures::fetch());
    repo.create(&entry).await.unwrap();
    assert!(entry.parameters.is_empty());

    entry.set_transport(
        Transport::stdio("uvx", ["mcp-server-fetch"]).with_env("USER_AGENT", "your-user-agent"),
        None,
    );
    entry.readme = Some("# Fetch".to_string());
    repo.update(&entry).await.unwrap();

    let loaded = repo.get("fetch").await.unwrap().unwrap();
    assert_eq!(loaded.readme.as_deref(), Some("# Fetch"));
    assert_eq!(loaded.parameters.len(), 1);
    assert_eq!(loaded.parameters[0].name, "USER_AGENT");
}

#[tokio::test]
async fn test_entry_update_missing_fails() {
    let repo = repo();
    let entry = Entry::from_new(fixtures::fetch());
    assert!(repo.update(&entry).await.is_err());
}

#[tokio::test]
async fn test_entry_delete() {
    let repo = repo();
    repo.create(&Entry::from_new(fixtures::github())).await.unwrap();

    assert!(repo.delete("github").await.unwrap());
    assert!(!repo.delete("github").await.unwrap());
    assert!(repo.get("github").await.unwrap().is_none());
}

#[tokio::test]
async fn test_entry_list_paginated_by_name() {
    let repo = repo();
    for new in [
        fixtures::paddle(),
        fixtures::github(),
        fixtures::notion(),
        fixtures::linear(),
        fixtures::fetch(),
    ] {
        repo.create(&Entry::from_new(new)).await.unwrap();
    }

    let first = repo.list(&Pagination::new(1, 2), None).await.unwrap();
    assert_eq!(first.total, 5);
    assert_eq!(first.total_pages(), 3);
    let names: Vec<_> = first.items.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["fetch", "github"]);

    let last = repo.list(&Pagination::new(3, 2), None).await.unwrap();
    let names: Vec<_> = last.items.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["paddle"]);

    let beyond = repo.list(&Pagination::new(9, 2), None).await.unwrap();
    assert!(beyond.items.is_empty());
    assert_eq!(beyond.total, 5);
}

#[tokio::test]
async fn test_entry_list_query_matches_name_or_title() {
    let repo = repo();
    repo.create(&Entry::from_new(fixtures::github())).await.unwrap();
    repo.create(&Entry::from_new(fixtures::paddle())).await.unwrap();
    repo.create(&Entry::from_new(fixtures::notion())).await.unwrap();

    // Title match, case-insensitive
    let page = repo.list(&Pagination::default(), Some("BILLING")).await.unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].name, "paddle");

    let page = repo.list(&Pagination::default(), Some("git")).await.unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].name, "github");

    // Blank query lists everything
    let page = repo.list(&Pagination::default(), Some("  ")).await.unwrap();
    assert_eq!(page.total, 3);
}

#[tokio::test]
async fn test_entry_list_query_treats_wildcards_literally() {
    let repo = repo();
    repo.create(&Entry::from_new(fixtures::github())).await.unwrap();
    repo.create(&Entry::from_new(
        NewEntry::new("my_server", Transport::stdio("my-server", Vec::<String>::new())),
    ))
    .await
    .unwrap();

    let page = repo.list(&Pagination::default(), Some("_")).await.unwrap();
    let names: Vec<_> = page.items.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["my_server"]);

    let page = repo.list(&Pagination::default(), Some("%")).await.unwrap();
    assert_eq!(page.total, 0);
}

#[tokio::test]
async fn test_entry_persists_across_reopen() {
    let test_db = TestDatabase::new();
    let path = test_db.db_path().to_path_buf();
    let db = Arc::new(Mutex::new(test_db.db));

    let repo = SqliteEntryRepository::new(Arc::clone(&db));
    repo.create(&Entry::from_new(fixtures::notion())).await.unwrap();
    drop(repo);
    drop(db);

    let reopened = mcpcatalog_storage::Database::open(&path).unwrap();
    let repo = SqliteEntryRepository::new(Arc::new(Mutex::new(reopened)));
    let loaded = repo.get("notion").await.unwrap().unwrap();
    assert_eq!(loaded.parameters.len(), 1);
    assert_eq!(loaded.parameters[0].name, "OPENAPI_MCP_HEADERS");
}
