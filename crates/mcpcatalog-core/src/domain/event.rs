//! Catalog Events
//!
//! Emitted by `CatalogAppService` after a successful change. Consumers
//! (API notifications, audit logging, re-indexing) subscribe through the
//! event bus and decide which events they care about.
//!
//! Events serialize with a `type` field containing the snake_case variant name:
//! ```json
//! { "type": "entry_imported", "entry_name": "github", "parameter_count": 1 }
//! ```

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::TransportType;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CatalogEvent {
    // ════════════════════════════════════════════════════════════════════════
    // CATALOG ENTRIES
    // ════════════════════════════════════════════════════════════════════════
    /// A new entry was added to the catalog
    EntryImported {
        entry_name: String,
        transport_type: TransportType,
        parameter_count: usize,
    },

    /// An entry's transport template or parameters changed
    EntryUpdated {
        entry_name: String,
        parameter_count: usize,
    },

    /// Enrichment refreshed README and parameters
    EntryEnriched {
        entry_name: String,
        readme_found: bool,
        parameter_count: usize,
    },

    EntryDeleted {
        entry_name: String,
    },

    // ════════════════════════════════════════════════════════════════════════
    // WORKSPACE INSTALLS
    // ════════════════════════════════════════════════════════════════════════
    /// A resolved server was added to a workspace
    ServerInstalled {
        workspace_id: Uuid,
        entry_name: String,
        transport_type: TransportType,
    },

    ServerUninstalled {
        workspace_id: Uuid,
        entry_name: String,
    },
}

impl CatalogEvent {
    /// Get the event type name (for logging/filtering)
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::EntryImported { .. } => "entry_imported",
            Self::EntryUpdated { .. } => "entry_updated",
            Self::EntryEnriched { .. } => "entry_enriched",
            Self::EntryDeleted { .. } => "entry_deleted",
            Self::ServerInstalled { .. } => "server_installed",
            Self::ServerUninstalled { .. } => "server_uninstalled",
        }
    }

    /// Catalog entry this event concerns
    pub fn entry_name(&self) -> &str {
        match self {
            Self::EntryImported { entry_name, .. }
            | Self::EntryUpdated { entry_name, .. }
            | Self::EntryEnriched { entry_name, .. }
            | Self::EntryDeleted { entry_name }
            | Self::ServerInstalled { entry_name, .. }
            | Self::ServerUninstalled { entry_name, .. } => entry_name,
        }
    }

    /// Workspace this event concerns, if any
    pub fn workspace_id(&self) -> Option<Uuid> {
        match self {
            Self::ServerInstalled { workspace_id, .. }
            | Self::ServerUninstalled { workspace_id, .. } => Some(*workspace_id),
            _ => None,
        }
    }
}
