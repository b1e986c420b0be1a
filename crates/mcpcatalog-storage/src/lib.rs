//! McpCatalog Storage Layer
//!
//! SQLite implementations of the core repository traits.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                 CatalogAppService                    │
//! ├──────────────────────────────────────────────────────┤
//! │               Repository Traits                      │
//! │   (EntryRepository, WorkspaceServerRepository)       │
//! ├──────────────────────────────────────────────────────┤
//! │            SQLite Implementations                    │
//! │ (SqliteEntryRepository, SqliteWorkspaceServerRepo..) │
//! ├──────────────────────────────────────────────────────┤
//! │                   Database                           │
//! │          (SQLite + numbered migrations)              │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! ```rust,ignore
//! use mcpcatalog_storage::{Database, SqliteEntryRepository};
//! use std::sync::Arc;
//! use tokio::sync::Mutex;
//!
//! let db = Arc::new(Mutex::new(Database::open(&path)?));
//! let entries = SqliteEntryRepository::new(db.clone());
//! ```

mod database;
mod repositories;

pub use database::Database;
pub use repositories::*;

/// Default database file name.
pub const DATABASE_FILE: &str = "mcpcatalog.db";

/// Get the default database path for the current platform.
pub fn default_database_path() -> Option<std::path::PathBuf> {
    dirs::data_local_dir().map(|p| p.join("mcpcatalog").join(DATABASE_FILE))
}
