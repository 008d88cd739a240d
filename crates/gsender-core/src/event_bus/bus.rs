//! Record-change bus
//!
//! Each store owns one bus and every write through the store, or through a
//! service on top of it, announces itself here. Listeners come in two
//! forms: synchronous handlers filtered by category, which run on the
//! writing thread, and broadcast receivers for tokio tasks.

use parking_lot::RwLock;
use tokio::sync::broadcast;

use super::events::{AppEvent, EventCategory};

/// Broadcast buffer; slow receivers lag past this many changes
const CHANNEL_CAPACITY: usize = 256;

/// Which changes a handler wants
#[derive(Debug, Clone, Default)]
pub enum EventFilter {
    /// Every change.
    #[default]
    All,
    /// Changes in any of these categories.
    Categories(Vec<EventCategory>),
}

impl EventFilter {
    pub fn matches(&self, event: &AppEvent) -> bool {
        match self {
            EventFilter::All => true,
            EventFilter::Categories(categories) => categories.contains(&event.category()),
        }
    }
}

type ChangeHandler = Box<dyn Fn(&AppEvent) + Send + Sync>;

/// Fan-out of record changes
pub struct EventBus {
    sender: broadcast::Sender<AppEvent>,
    handlers: RwLock<Vec<(EventFilter, ChangeHandler)>>,
}

impl EventBus {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            sender,
            handlers: RwLock::new(Vec::new()),
        }
    }

    /// Announce a change.
    ///
    /// Returns how many handlers and receivers saw it; zero is not an error.
    pub fn publish(&self, event: AppEvent) -> usize {
        tracing::trace!(category = %event.category(), "{}", event.description());

        let mut handled = 0;
        for (filter, handler) in self.handlers.read().iter() {
            if filter.matches(&event) {
                handler(&event);
                handled += 1;
            }
        }

        handled + self.sender.send(event).unwrap_or(0)
    }

    /// Run `handler` for every matching change.
    ///
    /// The handler runs on the publishing thread and must not publish on
    /// this bus itself.
    pub fn subscribe<F>(&self, filter: EventFilter, handler: F)
    where
        F: Fn(&AppEvent) + Send + Sync + 'static,
    {
        self.handlers.write().push((filter, Box::new(handler)));
        tracing::debug!("Change handler added");
    }

    /// Receiver for polling changes from a tokio task
    pub fn receiver(&self) -> broadcast::Receiver<AppEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("handlers", &self.handlers.read().len())
            .field("receivers", &self.sender.receiver_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event_bus::events::{ConfigEvent, MacroEvent};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn macro_created(id: &str) -> AppEvent {
        AppEvent::Macro(MacroEvent::Created { id: id.to_string() })
    }

    #[test]
    fn test_publish_with_nobody_listening() {
        let bus = EventBus::new();
        assert_eq!(bus.publish(macro_created("m1")), 0);
    }

    #[test]
    fn test_handlers_filter_by_category() {
        let bus = EventBus::new();
        let macro_count = Arc::new(AtomicUsize::new(0));
        let config_count = Arc::new(AtomicUsize::new(0));

        let mc = macro_count.clone();
        bus.subscribe(EventFilter::Categories(vec![EventCategory::Macro]), move |_| {
            mc.fetch_add(1, Ordering::SeqCst);
        });
        let cc = config_count.clone();
        bus.subscribe(EventFilter::Categories(vec![EventCategory::Config]), move |_| {
            cc.fetch_add(1, Ordering::SeqCst);
        });

        assert_eq!(bus.publish(macro_created("m1")), 1);
        bus.publish(AppEvent::Config(ConfigEvent::Changed {
            key: "macros".to_string(),
        }));
        bus.publish(macro_created("m2"));

        assert_eq!(macro_count.load(Ordering::SeqCst), 2);
        assert_eq!(config_count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_receiver_counts_as_listener() {
        let bus = EventBus::new();
        let mut receiver = bus.receiver();

        assert_eq!(bus.publish(macro_created("m1")), 1);

        match receiver.try_recv() {
            Ok(AppEvent::Macro(MacroEvent::Created { id })) => assert_eq!(id, "m1"),
            other => panic!("Wrong event received: {:?}", other),
        }
    }
}
