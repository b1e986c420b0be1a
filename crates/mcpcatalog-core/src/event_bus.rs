//! Event Bus - catalog event distribution
//!
//! Application services publish [`CatalogEvent`]s here after every successful
//! change. Consumers such as the API's audit log subscribe independently.
//!
//! ```ignore
//! let bus = EventBus::new();
//! let sender = bus.sender();
//! let mut audit = bus.subscribe();
//!
//! sender.emit(CatalogEvent::EntryDeleted { entry_name: "github".into() });
//!
//! while let Some(event) = audit.recv().await { ... }
//! ```

use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::CatalogEvent;

/// Default channel capacity for the event bus
const DEFAULT_CAPACITY: usize = 256;

/// Broadcast hub; every subscriber receives its own copy of each event.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<CatalogEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(DEFAULT_CAPACITY);
        Self { sender }
    }

    /// Get a sender for emitting events
    pub fn sender(&self) -> EventSender {
        EventSender::new(self.sender.clone())
    }

    /// Subscribe to events emitted from now on
    pub fn subscribe(&self) -> EventReceiver {
        EventReceiver::new(self.sender.subscribe())
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Cheaply cloneable handle used by services to publish events
#[derive(Clone)]
pub struct EventSender {
    sender: broadcast::Sender<CatalogEvent>,
}

impl EventSender {
    fn new(sender: broadcast::Sender<CatalogEvent>) -> Self {
        Self { sender }
    }

    /// Emit an event.
    ///
    /// Returns the number of receivers; 0 just means nobody is listening.
    pub fn emit(&self, event: CatalogEvent) -> usize {
        let type_name = event.type_name();
        match self.sender.send(event) {
            Ok(count) => {
                debug!(
                    event_type = type_name,
                    receivers = count,
                    "[EventBus] Emitted event"
                );
                count
            }
            Err(_) => {
                debug!(event_type = type_name, "[EventBus] No receivers for event");
                0
            }
        }
    }
}

/// Receiving end for one consumer
pub struct EventReceiver {
    receiver: broadcast::Receiver<CatalogEvent>,
}

impl EventReceiver {
    fn new(receiver: broadcast::Receiver<CatalogEvent>) -> Self {
        Self { receiver }
    }

    /// Receive the next event, skipping over lag.
    ///
    /// Returns `None` once the channel is closed.
    pub async fn recv(&mut self) -> Option<CatalogEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(
                        skipped_events = skipped,
                        "[EventBus] Receiver lagged, skipped {} events", skipped
                    );
                }
                Err(broadcast::error::RecvError::Closed) => {
                    debug!("[EventBus] Channel closed");
                    return None;
                }
            }
        }
    }

    /// Non-blocking receive
    pub fn try_recv(&mut self) -> Option<CatalogEvent> {
        match self.receiver.try_recv() {
            Ok(event) => Some(event),
            Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                warn!(
                    skipped_events = skipped,
                    "[EventBus] Receiver lagged on try_recv"
                );
                self.receiver.try_recv().ok()
            }
            Err(_) => None,
        }
    }
}
