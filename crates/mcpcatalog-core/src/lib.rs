//! # McpCatalog Core Library
//!
//! Domain model, parameter templating, and catalog services for McpCatalog.
//!
//! ## Modules
//!
//! - `domain` - Core entities (Transport, Parameter, Entry, WorkspaceServer) and events
//! - `templating` - Placeholder extraction and substitution over transport templates
//! - `repository` - Data access traits
//! - `application` - Application services with event emission
//! - `event_bus` - Central event distribution system

pub mod application;
pub mod domain;
pub mod event_bus;
pub mod repository;
pub mod templating;

// Re-export commonly used types
pub use domain::*;
pub use repository::*;
pub use templating::{extract_parameters, substitute_parameters, TemplateError};

pub use application::{CatalogAppService, CatalogError, CatalogResult};
pub use event_bus::{EventBus, EventReceiver, EventSender};
