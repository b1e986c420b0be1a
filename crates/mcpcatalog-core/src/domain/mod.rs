//! Domain entities, value objects, and events
//!
//! - Templates: `Transport`, `Parameter`
//! - Entities: `Entry` (catalog record), `WorkspaceServer` (installed, resolved transport)
//! - Events: `CatalogEvent`

mod entry;
mod event;
mod parameter;
mod transport;
mod workspace_server;

pub use entry::*;
pub use event::CatalogEvent;
pub use parameter::*;
pub use transport::*;
pub use workspace_server::WorkspaceServer;
