//! Catalog API server
//!
//! Routing plus a self-contained server that wires SQLite storage, the event
//! bus, and `CatalogAppService` together.

mod error;
mod handlers;

pub use error::{ApiError, ErrorBody};
pub use handlers::AppState;

use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};
use mcpcatalog_core::{
    CatalogAppService, EntryRepository, EventBus, ReadmeSource, WorkspaceServerRepository,
};
use mcpcatalog_storage::{Database, SqliteEntryRepository, SqliteWorkspaceServerRepository};
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::{ApiConfig, AuditLogger};

/// Build the API router over an application service
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/api/entries",
            get(handlers::list_entries).post(handlers::create_entry),
        )
        .route(
            "/api/entries/{name}",
            get(handlers::get_entry).delete(handlers::delete_entry),
        )
        .route(
            "/api/entries/{name}/transport",
            put(handlers::update_transport),
        )
        .route("/api/entries/{name}/enrich", post(handlers::enrich_entry))
        .route("/api/entries/{name}/preview", post(handlers::preview_entry))
        .route(
            "/api/workspaces/{workspace_id}/servers",
            get(handlers::list_servers).post(handlers::install_server),
        )
        .route(
            "/api/workspaces/{workspace_id}/servers/{name}",
            axum::routing::delete(handlers::uninstall_server),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// API server with its storage and services
pub struct ApiServer {
    config: ApiConfig,
    state: AppState,
    event_bus: EventBus,
}

impl ApiServer {
    /// Open the configured database and wire up services.
    pub fn open(config: ApiConfig, readme_source: Option<Arc<dyn ReadmeSource>>) -> anyhow::Result<Self> {
        let db_path = config.database_path()?.clone();
        let db = Arc::new(Mutex::new(Database::open(&db_path)?));
        info!("[Api] Using database at {:?}", db_path);

        let entries: Arc<dyn EntryRepository> = Arc::new(SqliteEntryRepository::new(db.clone()));
        let servers: Arc<dyn WorkspaceServerRepository> =
            Arc::new(SqliteWorkspaceServerRepository::new(db));

        let event_bus = EventBus::new();
        let catalog = CatalogAppService::new(entries, servers, readme_source, event_bus.sender());

        Ok(Self {
            config,
            state: AppState {
                catalog: Arc::new(catalog),
            },
            event_bus,
        })
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    pub fn router(&self) -> Router {
        router(self.state.clone())
    }

    /// Serve until `shutdown` resolves
    pub async fn run<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let addr = self.config.addr()?;
        AuditLogger::start(self.event_bus.subscribe());

        let listener = tokio::net::TcpListener::bind(addr).await?;
        info!("[Api] Listening on http://{}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("[Api] Server stopped");
        Ok(())
    }
}
