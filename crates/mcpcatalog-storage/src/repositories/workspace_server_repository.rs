//! SQLite implementation of WorkspaceServerRepository.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use mcpcatalog_core::{Conflict, WorkspaceServer, WorkspaceServerRepository};
use rusqlite::{params, OptionalExtension};
use tokio::sync::Mutex;
use uuid::Uuid;

use super::{is_unique_violation, json_column, parse_datetime};
use crate::Database;

/// SQLite-backed workspace installs. Rows cascade away with their entry.
pub struct SqliteWorkspaceServerRepository {
    db: Arc<Mutex<Database>>,
}

impl SqliteWorkspaceServerRepository {
    pub fn new(db: Arc<Mutex<Database>>) -> Self {
        Self { db }
    }

    const SELECT_COLUMNS: &'static str =
        "id, workspace_id, entry_name, transport, enabled, created_at, updated_at";

    fn map_row(row: &rusqlite::Row) -> rusqlite::Result<WorkspaceServer> {
        let id: String = row.get(0)?;
        let workspace_id: String = row.get(1)?;
        let transport: String = row.get(3)?;
        let created_at: String = row.get(5)?;
        let updated_at: String = row.get(6)?;

        Ok(WorkspaceServer {
            id: Uuid::parse_str(&id).unwrap_or_else(|_| Uuid::new_v4()),
            workspace_id: Uuid::parse_str(&workspace_id).map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, Box::new(e))
            })?,
            entry_name: row.get(2)?,
            transport: json_column(3, &transport)?,
            enabled: row.get(4)?,
            created_at: parse_datetime(&created_at),
            updated_at: parse_datetime(&updated_at),
        })
    }
}

#[async_trait]
impl WorkspaceServerRepository for SqliteWorkspaceServerRepository {
    async fn list_for_workspace(&self, workspace_id: &Uuid) -> Result<Vec<WorkspaceServer>> {
        let db = self.db.lock().await;
        let conn = db.connection();

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM workspace_servers WHERE workspace_id = ?1 ORDER BY entry_name ASC",
            Self::SELECT_COLUMNS
        ))?;

        let servers = stmt
            .query_map([workspace_id.to_string()], Self::map_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(servers)
    }

    async fn get(&self, workspace_id: &Uuid, entry_name: &str) -> Result<Option<WorkspaceServer>> {
        let db = self.db.lock().await;
        let conn = db.connection();

        let server = conn
            .query_row(
                &format!(
                    "SELECT {} FROM workspace_servers WHERE workspace_id = ?1 AND entry_name = ?2",
                    Self::SELECT_COLUMNS
                ),
                params![workspace_id.to_string(), entry_name],
                Self::map_row,
            )
            .optional()?;

        Ok(server)
    }

    async fn install(&self, server: &WorkspaceServer) -> Result<()> {
        let db = self.db.lock().await;
        let conn = db.connection();

        conn.execute(
            "INSERT INTO workspace_servers (id, workspace_id, entry_name, transport, enabled, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                server.id.to_string(),
                server.workspace_id.to_string(),
                server.entry_name,
                serde_json::to_string(&server.transport)?,
                server.enabled,
                server.created_at.to_rfc3339(),
                server.updated_at.to_rfc3339(),
            ],
        )
        .map_err(|e| {
            if is_unique_violation(&e) {
                anyhow::Error::new(Conflict(format!(
                    "'{}' in workspace {}",
                    server.entry_name, server.workspace_id
                )))
            } else {
                anyhow::Error::new(e).context(format!(
                    "Failed to install '{}' into workspace {}",
                    server.entry_name, server.workspace_id
                ))
            }
        })?;

        Ok(())
    }

    async fn uninstall(&self, id: &Uuid) -> Result<()> {
        let db = self.db.lock().await;
        let conn = db.connection();

        conn.execute(
            "DELETE FROM workspace_servers WHERE id = ?1",
            [id.to_string()],
        )?;

        Ok(())
    }
}
