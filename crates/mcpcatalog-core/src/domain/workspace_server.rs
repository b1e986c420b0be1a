//! WorkspaceServer entity - a catalog entry installed into a workspace

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Transport;

/// An entry installed into a workspace.
///
/// Holds the *resolved* transport produced by substitution. It is owned by
/// the workspace from here on; the catalog entry it came from is never
/// touched by an install.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceServer {
    /// Unique installation ID
    pub id: Uuid,

    /// Workspace this server is installed in
    pub workspace_id: Uuid,

    /// Catalog entry name it was installed from
    pub entry_name: String,

    /// Concrete transport with all placeholders filled in
    pub transport: Transport,

    /// Whether the gateway should start this server
    pub enabled: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WorkspaceServer {
    /// Servers are enabled on install; the gateway may disable them later.
    pub fn new(workspace_id: Uuid, entry_name: impl Into<String>, transport: Transport) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            workspace_id,
            entry_name: entry_name.into(),
            transport,
            enabled: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}
