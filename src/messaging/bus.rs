/// Event bus for pub/sub messaging
///
/// Lets observers of the scoreboard follow changes without touching the state.
/// Clones share one subscriber list.
use std::sync::Arc;

use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::RwLock;

use super::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(usize);

#[derive(Default)]
struct Registry {
    next_id: usize,
    senders: Vec<(SubscriberId, Sender<Event>)>,
}

#[derive(Clone, Default)]
pub struct EventBus {
    registry: Arc<RwLock<Registry>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new receiver; every event published afterwards reaches it
    pub fn subscribe(&self) -> (Receiver<Event>, SubscriberId) {
        let (tx, rx) = unbounded();

        let mut registry = self.registry.write();
        let id = SubscriberId(registry.next_id);
        registry.next_id += 1;
        registry.senders.push((id, tx));

        (rx, id)
    }

    pub fn unsubscribe(&self, id: SubscriberId) {
        self.registry.write().senders.retain(|(sid, _)| *sid != id);
    }

    /// Deliver `event` to every subscriber. Subscribers whose receiver was
    /// dropped are forgotten.
    pub fn publish(&self, event: Event) {
        tracing::debug!("Event: {}", event.description());

        let closed: Vec<SubscriberId> = self
            .registry
            .read()
            .senders
            .iter()
            .filter(|(_, tx)| tx.send(event.clone()).is_err())
            .map(|(id, _)| *id)
            .collect();

        if !closed.is_empty() {
            tracing::trace!("Dropping {} closed subscribers", closed.len());
            self.registry
                .write()
                .senders
                .retain(|(id, _)| !closed.contains(id));
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.registry.read().senders.len()
    }
}
