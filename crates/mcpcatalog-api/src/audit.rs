//! Audit log consumer
//!
//! Subscribes to the catalog event bus and writes one structured `tracing`
//! line per change, so catalog edits and workspace installs show up in the
//! console and the rolling log file.

use mcpcatalog_core::{CatalogEvent, EventReceiver};
use tokio::task::JoinHandle;
use tracing::info;

pub struct AuditLogger;

impl AuditLogger {
    /// Spawn the consumer. The task ends when every sender is gone and
    /// yields the number of events it recorded.
    pub fn start(mut receiver: EventReceiver) -> JoinHandle<u64> {
        tokio::spawn(async move {
            info!("[Audit] Started listening for catalog events");

            let mut recorded = 0;
            while let Some(event) = receiver.recv().await {
                Self::record(&event);
                recorded += 1;
            }

            info!(recorded, "[Audit] Event channel closed");
            recorded
        })
    }

    fn record(event: &CatalogEvent) {
        match event.workspace_id() {
            Some(workspace_id) => info!(
                event_type = event.type_name(),
                entry = event.entry_name(),
                workspace_id = %workspace_id,
                "[Audit] Workspace changed"
            ),
            None => info!(
                event_type = event.type_name(),
                entry = event.entry_name(),
                "[Audit] Catalog changed"
            ),
        }
    }
}
