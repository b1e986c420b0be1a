//! McpCatalog API
//!
//! HTTP surface over `CatalogAppService`:
//! - Browse and search catalog entries (paginated)
//! - Import, enrich, and delete entries
//! - Preview and install resolved transports into workspaces
//! - Audit log of catalog events

pub mod audit;
pub mod config;
pub mod logging;
pub mod server;

pub use audit::AuditLogger;
pub use config::{ApiConfig, ConfigError};
pub use server::{router, ApiError, ApiServer, AppState};
