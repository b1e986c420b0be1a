//! Catalog Application Service
//!
//! Entry ingestion, enrichment, and installation into workspaces.
//!
//! Extraction runs when an entry is imported or its template changes, and the
//! result is persisted with the entry. Substitution runs once per install
//! against those persisted parameters.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::{CatalogEvent, Entry, NewEntry, Parameter, Transport, WorkspaceServer};
use crate::event_bus::EventSender;
use crate::repository::{
    Conflict, EntryRepository, Page, Pagination, ReadmeSource, WorkspaceServerRepository,
};
use crate::templating::TemplateError;

/// Errors surfaced to the API layer
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog entry '{0}' not found")]
    NotFound(String),

    #[error("catalog entry '{0}' already exists")]
    AlreadyExists(String),

    #[error("'{entry_name}' is already installed in workspace {workspace_id}")]
    AlreadyInstalled { workspace_id: Uuid, entry_name: String },

    #[error("'{entry_name}' is not installed in workspace {workspace_id}")]
    NotInstalled { workspace_id: Uuid, entry_name: String },

    #[error("invalid entry: {0}")]
    InvalidEntry(String),

    /// Caller input problem (e.g. a required parameter without a value)
    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Repository(#[from] anyhow::Error),
}

impl CatalogError {
    /// True when the caller sent bad input rather than the service failing
    pub fn is_client_error(&self) -> bool {
        !matches!(self, CatalogError::Repository(_))
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Application service for the catalog and workspace installs
pub struct CatalogAppService {
    entry_repo: Arc<dyn EntryRepository>,
    server_repo: Arc<dyn WorkspaceServerRepository>,
    readme_source: Option<Arc<dyn ReadmeSource>>,
    event_sender: EventSender,
}

impl CatalogAppService {
    pub fn new(
        entry_repo: Arc<dyn EntryRepository>,
        server_repo: Arc<dyn WorkspaceServerRepository>,
        readme_source: Option<Arc<dyn ReadmeSource>>,
        event_sender: EventSender,
    ) -> Self {
        Self {
            entry_repo,
            server_repo,
            readme_source,
            event_sender,
        }
    }

    /// List catalog entries, optionally filtered
    pub async fn list(&self, pagination: &Pagination, query: Option<&str>) -> CatalogResult<Page<Entry>> {
        Ok(self.entry_repo.list(pagination, query).await?)
    }

    pub async fn get(&self, name: &str) -> CatalogResult<Entry> {
        self.entry_repo
            .get(name)
            .await?
            .ok_or_else(|| CatalogError::NotFound(name.to_string()))
    }

    /// Import a new entry, extracting parameters unless declared by hand
    ///
    /// Emits: `EntryImported`
    pub async fn import(&self, new: NewEntry) -> CatalogResult<Entry> {
        let entry = Entry::from_new(new);
        entry.validate().map_err(CatalogError::InvalidEntry)?;

        if self.entry_repo.get(&entry.name).await?.is_some() {
            return Err(CatalogError::AlreadyExists(entry.name));
        }

        // A concurrent import can still win between the check and the insert
        self.entry_repo.create(&entry).await.map_err(|e| {
            if e.is::<Conflict>() {
                CatalogError::AlreadyExists(entry.name.clone())
            } else {
                CatalogError::Repository(e)
            }
        })?;

        info!(
            entry = %entry.name,
            transport = %entry.transport.transport_type(),
            parameters = entry.parameters.len(),
            "[CatalogAppService] Imported entry"
        );

        self.event_sender.emit(CatalogEvent::EntryImported {
            entry_name: entry.name.clone(),
            transport_type: entry.transport.transport_type(),
            parameter_count: entry.parameters.len(),
        });

        Ok(entry)
    }

    /// Replace an entry's transport template
    ///
    /// Emits: `EntryUpdated`
    pub async fn update_transport(
        &self,
        name: &str,
        transport: Transport,
        parameters: Option<Vec<Parameter>>,
    ) -> CatalogResult<Entry> {
        let mut entry = self.get(name).await?;
        entry.set_transport(transport, parameters);
        entry.validate().map_err(CatalogError::InvalidEntry)?;

        self.entry_repo.update(&entry).await?;

        info!(
            entry = %entry.name,
            parameters = entry.parameters.len(),
            "[CatalogAppService] Updated transport template"
        );

        self.event_sender.emit(CatalogEvent::EntryUpdated {
            entry_name: entry.name.clone(),
            parameter_count: entry.parameters.len(),
        });

        Ok(entry)
    }

    /// Refresh README and parameters for an entry.
    ///
    /// A failing README source is logged and the entry keeps its previous
    /// README; parameters are still recomputed.
    ///
    /// Emits: `EntryEnriched`
    pub async fn enrich(&self, name: &str) -> CatalogResult<Entry> {
        let mut entry = self.get(name).await?;

        let mut readme_found = false;
        if let Some(ref source) = self.readme_source {
            match source.fetch_readme(&entry).await {
                Ok(Some(readme)) => {
                    entry.readme = Some(readme);
                    readme_found = true;
                }
                Ok(None) => {}
                Err(e) => {
                    warn!(
                        entry = %entry.name,
                        error = %e,
                        "[CatalogAppService] README fetch failed"
                    );
                }
            }
        }

        entry.refresh_parameters();
        self.entry_repo.update(&entry).await?;

        info!(
            entry = %entry.name,
            readme_found,
            parameters = entry.parameters.len(),
            "[CatalogAppService] Enriched entry"
        );

        self.event_sender.emit(CatalogEvent::EntryEnriched {
            entry_name: entry.name.clone(),
            readme_found,
            parameter_count: entry.parameters.len(),
        });

        Ok(entry)
    }

    /// Remove an entry (workspace installs are dropped by the store)
    ///
    /// Emits: `EntryDeleted`
    pub async fn delete(&self, name: &str) -> CatalogResult<()> {
        if !self.entry_repo.delete(name).await? {
            return Err(CatalogError::NotFound(name.to_string()));
        }

        info!(entry = name, "[CatalogAppService] Deleted entry");

        self.event_sender.emit(CatalogEvent::EntryDeleted {
            entry_name: name.to_string(),
        });

        Ok(())
    }

    /// Resolve an entry's transport without installing it
    pub async fn preview(&self, name: &str, values: &HashMap<String, String>) -> CatalogResult<Transport> {
        let entry = self.get(name).await?;
        Ok(entry.resolve(values)?)
    }

    /// Resolve an entry with the user's values and install it into a workspace
    ///
    /// Emits: `ServerInstalled`
    pub async fn install(
        &self,
        workspace_id: Uuid,
        name: &str,
        values: &HashMap<String, String>,
    ) -> CatalogResult<WorkspaceServer> {
        let entry = self.get(name).await?;

        if self.server_repo.get(&workspace_id, name).await?.is_some() {
            return Err(CatalogError::AlreadyInstalled {
                workspace_id,
                entry_name: name.to_string(),
            });
        }

        let transport = entry.resolve(values)?;
        let server = WorkspaceServer::new(workspace_id, &entry.name, transport);
        self.server_repo.install(&server).await.map_err(|e| {
            if e.is::<Conflict>() {
                CatalogError::AlreadyInstalled {
                    workspace_id,
                    entry_name: entry.name.clone(),
                }
            } else {
                CatalogError::Repository(e)
            }
        })?;

        info!(
            workspace_id = %workspace_id,
            entry = %entry.name,
            transport = %server.transport.transport_type(),
            "[CatalogAppService] Installed server"
        );

        self.event_sender.emit(CatalogEvent::ServerInstalled {
            workspace_id,
            entry_name: entry.name.clone(),
            transport_type: server.transport.transport_type(),
        });

        Ok(server)
    }

    /// Emits: `ServerUninstalled`
    pub async fn uninstall(&self, workspace_id: Uuid, name: &str) -> CatalogResult<()> {
        let server = self
            .server_repo
            .get(&workspace_id, name)
            .await?
            .ok_or_else(|| CatalogError::NotInstalled {
                workspace_id,
                entry_name: name.to_string(),
            })?;

        self.server_repo.uninstall(&server.id).await?;

        info!(
            workspace_id = %workspace_id,
            entry = name,
            "[CatalogAppService] Uninstalled server"
        );

        self.event_sender.emit(CatalogEvent::ServerUninstalled {
            workspace_id,
            entry_name: name.to_string(),
        });

        Ok(())
    }

    pub async fn list_installed(&self, workspace_id: Uuid) -> CatalogResult<Vec<WorkspaceServer>> {
        Ok(self.server_repo.list_for_workspace(&workspace_id).await?)
    }
}
