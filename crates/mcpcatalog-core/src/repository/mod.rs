//! Repository traits for data access
//!
//! These traits define the interface for catalog storage without specifying
//! the implementation (SQLite, in-memory, etc.)

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Entry, WorkspaceServer};

/// Result type for repository operations
pub type RepoResult<T> = anyhow::Result<T>;

/// Insert rejected because a row with the same key already exists.
///
/// Stores return it inside the `anyhow::Error` so callers can tell a
/// duplicate apart from a storage failure with `err.is::<Conflict>()`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0} already exists")]
pub struct Conflict(pub String);

pub const DEFAULT_PER_PAGE: u32 = 20;
pub const MAX_PER_PAGE: u32 = 100;

/// 1-based page request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
}

impl Pagination {
    /// Clamp to a valid request: page >= 1, 1 <= per_page <= MAX_PER_PAGE
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.clamp(1, MAX_PER_PAGE),
        }
    }

    /// Row offset of the first item on this page
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.per_page)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, DEFAULT_PER_PAGE)
    }
}

/// One page of results plus the total count across all pages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64, pagination: &Pagination) -> Self {
        Self {
            items,
            total,
            page: pagination.page,
            per_page: pagination.per_page,
        }
    }

    pub fn total_pages(&self) -> u64 {
        if self.per_page == 0 {
            return 0;
        }
        self.total.div_ceil(u64::from(self.per_page))
    }
}

/// Catalog entry repository
#[async_trait]
pub trait EntryRepository: Send + Sync {
    /// List entries ordered by name. `query` filters by a case-insensitive
    /// substring of name or title.
    async fn list(&self, pagination: &Pagination, query: Option<&str>) -> RepoResult<Page<Entry>>;

    /// Get an entry by its unique name
    async fn get(&self, name: &str) -> RepoResult<Option<Entry>>;

    /// Fails with [`Conflict`] when the name is taken
    async fn create(&self, entry: &Entry) -> RepoResult<()>;

    async fn update(&self, entry: &Entry) -> RepoResult<()>;

    /// Delete an entry; returns whether it existed
    async fn delete(&self, name: &str) -> RepoResult<bool>;
}

/// Installed-server repository, one row per (workspace, entry)
#[async_trait]
pub trait WorkspaceServerRepository: Send + Sync {
    async fn list_for_workspace(&self, workspace_id: &Uuid) -> RepoResult<Vec<WorkspaceServer>>;

    async fn get(&self, workspace_id: &Uuid, entry_name: &str) -> RepoResult<Option<WorkspaceServer>>;

    /// Fails with [`Conflict`] when the entry is already in the workspace
    async fn install(&self, server: &WorkspaceServer) -> RepoResult<()>;

    async fn uninstall(&self, id: &Uuid) -> RepoResult<()>;
}

/// Source of README content during enrichment.
///
/// Implementations typically fetch from the entry's homepage or repository;
/// `Ok(None)` means there is no README to record.
#[async_trait]
pub trait ReadmeSource: Send + Sync {
    async fn fetch_readme(&self, entry: &Entry) -> RepoResult<Option<String>>;
}
