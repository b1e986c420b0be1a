//! SQLite implementation of EntryRepository.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use mcpcatalog_core::{Conflict, Entry, EntryRepository, Page, Pagination};
use rusqlite::{params, OptionalExtension};
use tokio::sync::Mutex;
use uuid::Uuid;

use super::{is_unique_violation, json_column, parse_datetime};
use crate::Database;

/// SQLite-backed catalog entries. Transport and parameters are stored as JSON.
pub struct SqliteEntryRepository {
    db: Arc<Mutex<Database>>,
}

impl SqliteEntryRepository {
    pub fn new(db: Arc<Mutex<Database>>) -> Self {
        Self { db }
    }

    const SELECT_COLUMNS: &'static str = "id, name, title, description, homepage, repository, readme,
         transport, parameters, created_at, updated_at";

    fn map_row(row: &rusqlite::Row) -> rusqlite::Result<Entry> {
        let id: String = row.get(0)?;
        let transport: String = row.get(7)?;
        let parameters: String = row.get(8)?;
        let created_at: String = row.get(9)?;
        let updated_at: String = row.get(10)?;

        Ok(Entry {
            id: Uuid::parse_str(&id).unwrap_or_else(|_| Uuid::new_v4()),
            name: row.get(1)?,
            title: row.get(2)?,
            description: row.get(3)?,
            homepage: row.get(4)?,
            repository: row.get(5)?,
            readme: row.get(6)?,
            transport: json_column(7, &transport)?,
            parameters: json_column(8, &parameters)?,
            created_at: parse_datetime(&created_at),
            updated_at: parse_datetime(&updated_at),
        })
    }

    /// `LIKE` pattern for a case-insensitive substring match
    fn like_pattern(query: &str) -> String {
        let escaped = query
            .to_lowercase()
            .replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_");
        format!("%{}%", escaped)
    }
}

#[async_trait]
impl EntryRepository for SqliteEntryRepository {
    async fn list(&self, pagination: &Pagination, query: Option<&str>) -> Result<Page<Entry>> {
        let db = self.db.lock().await;
        let conn = db.connection();

        let pattern = query
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(Self::like_pattern);
        let filter = "WHERE (?1 IS NULL OR lower(name) LIKE ?1 ESCAPE '\\' OR lower(title) LIKE ?1 ESCAPE '\\')";

        let total: i64 = conn.query_row(
            &format!("SELECT COUNT(*) FROM entries {}", filter),
            params![pattern],
            |row| row.get(0),
        )?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM entries {} ORDER BY name ASC LIMIT ?2 OFFSET ?3",
            Self::SELECT_COLUMNS,
            filter
        ))?;

        let entries = stmt
            .query_map(
                params![
                    pattern,
                    i64::from(pagination.per_page),
                    pagination.offset() as i64
                ],
                Self::map_row,
            )?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(entries, total as u64, pagination))
    }

    async fn get(&self, name: &str) -> Result<Option<Entry>> {
        let db = self.db.lock().await;
        let conn = db.connection();

        let entry = conn
            .query_row(
                &format!("SELECT {} FROM entries WHERE name = ?1", Self::SELECT_COLUMNS),
                [name],
                Self::map_row,
            )
            .optional()?;

        Ok(entry)
    }

    async fn create(&self, entry: &Entry) -> Result<()> {
        let db = self.db.lock().await;
        let conn = db.connection();

        conn.execute(
            "INSERT INTO entries (id, name, title, description, homepage, repository, readme,
                                  transport, parameters, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                entry.id.to_string(),
                entry.name,
                entry.title,
                entry.description,
                entry.homepage,
                entry.repository,
                entry.readme,
                serde_json::to_string(&entry.transport)?,
                serde_json::to_string(&entry.parameters)?,
                entry.created_at.to_rfc3339(),
                entry.updated_at.to_rfc3339(),
            ],
        )
        .map_err(|e| {
            if is_unique_violation(&e) {
                anyhow::Error::new(Conflict(format!("entry '{}'", entry.name)))
            } else {
                anyhow::Error::new(e).context(format!("Failed to insert entry '{}'", entry.name))
            }
        })?;

        Ok(())
    }

    async fn update(&self, entry: &Entry) -> Result<()> {
        let db = self.db.lock().await;
        let conn = db.connection();

        let updated = conn.execute(
            "UPDATE entries SET title = ?2, description = ?3, homepage = ?4, repository = ?5,
                    readme = ?6, transport = ?7, parameters = ?8, updated_at = ?9
             WHERE name = ?1",
            params![
                entry.name,
                entry.title,
                entry.description,
                entry.homepage,
                entry.repository,
                entry.readme,
                serde_json::to_string(&entry.transport)?,
                serde_json::to_string(&entry.parameters)?,
                entry.updated_at.to_rfc3339(),
            ],
        )?;

        if updated == 0 {
            anyhow::bail!("Entry '{}' does not exist", entry.name);
        }

        Ok(())
    }

    async fn delete(&self, name: &str) -> Result<bool> {
        let db = self.db.lock().await;
        let conn = db.connection();

        let deleted = conn.execute("DELETE FROM entries WHERE name = ?1", [name])?;

        Ok(deleted > 0)
    }
}
