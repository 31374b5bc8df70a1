use ldp_fusion_common::{Event, EventService};
use tokio::sync::broadcast;
use tracing::trace;

/// Publishes events on a tokio broadcast channel.
///
/// Subscribers that fall behind by more than the capacity of the channel miss the oldest events.
#[derive(Debug)]
pub struct BroadcastEventService {
    sender: broadcast::Sender<Event>,
}

impl Default for BroadcastEventService {
    fn default() -> Self {
        Self::new(1024)
    }
}

impl BroadcastEventService {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Returns a receiver for all events emitted from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.sender.subscribe()
    }
}

impl EventService for BroadcastEventService {
    fn emit(&self, event: Event) {
        let identifier = event.identifier.clone();
        match self.sender.send(event) {
            Ok(receivers) => trace!(%identifier, receivers, "Emitted event"),
            Err(_) => trace!(%identifier, "Dropped event without subscribers"),
        }
    }
}

/// Discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopEventService;

impl EventService for NoopEventService {
    fn emit(&self, _event: Event) {}
}
