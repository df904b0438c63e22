//! In-process publish/subscribe event bus.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::events::{DomainEvent, EventHandler, EventKind, EventPublisher};

/// Synchronous, in-process event bus.
///
/// Subscriptions are registered during composition (`&mut self`); afterwards
/// the registry is read-only, so dispatch needs no synchronization. Only the
/// retained event history sits behind a lock.
///
/// Delivery is in-band: `publish` awaits every handler before returning, in
/// registration order, kind-specific handlers before catch-all handlers. A
/// failing handler is logged and never stops later handlers nor reaches the
/// publisher.
#[derive(Default)]
pub struct InMemoryEventBus {
    handlers_by_kind: HashMap<EventKind, Vec<Arc<dyn EventHandler>>>,
    catch_all_handlers: Vec<Arc<dyn EventHandler>>,
    history: Mutex<Vec<DomainEvent>>,
}

impl InMemoryEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for one event kind, or for every event when
    /// `kind` is `None`.
    pub fn subscribe(&mut self, handler: Arc<dyn EventHandler>, kind: Option<EventKind>) {
        match kind {
            Some(kind) => self
                .handlers_by_kind
                .entry(kind)
                .or_default()
                .push(handler),
            None => self.catch_all_handlers.push(handler),
        }
    }

    /// Retained history of published events. Inspection hook for tests, not
    /// part of the business contract.
    pub fn events(&self) -> Vec<DomainEvent> {
        self.history.lock().clone()
    }

    /// Clear the retained history.
    pub fn clear_events(&self) {
        self.history.lock().clear();
    }

    async fn dispatch(&self, handler: &Arc<dyn EventHandler>, event: &DomainEvent) {
        if let Err(error) = handler.handle(event).await {
            tracing::error!(
                handler = handler.name(),
                event_kind = %event.kind(),
                event_id = %event.event_id,
                %error,
                "event handler failed"
            );
        }
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventBus {
    async fn publish(&self, event: DomainEvent) {
        self.history.lock().push(event.clone());

        if let Some(handlers) = self.handlers_by_kind.get(&event.kind()) {
            for handler in handlers {
                self.dispatch(handler, &event).await;
            }
        }

        for handler in &self.catch_all_handlers {
            self.dispatch(handler, &event).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::domain::events::EventPayload;

    /// Records its invocation order in a shared log; optionally fails.
    struct RecordingHandler {
        label: &'static str,
        log: Arc<Mutex<Vec<&'static str>>>,
        fail: bool,
    }

    #[async_trait]
    impl EventHandler for RecordingHandler {
        fn name(&self) -> &'static str {
            self.label
        }

        async fn handle(&self, _event: &DomainEvent) -> anyhow::Result<()> {
            self.log.lock().push(self.label);
            if self.fail {
                anyhow::bail!("simulated handler failure");
            }
            Ok(())
        }
    }

    fn created_event() -> DomainEvent {
        DomainEvent::new(
            Some(1),
            EventPayload::UserCreated {
                username: "alice".to_string(),
                email: "alice@example.com".to_string(),
            },
        )
    }

    #[tokio::test]
    async fn test_failing_handler_does_not_stop_later_handlers() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut bus = InMemoryEventBus::new();

        bus.subscribe(
            Arc::new(RecordingHandler {
                label: "first",
                log: log.clone(),
                fail: true,
            }),
            Some(EventKind::UserCreated),
        );
        bus.subscribe(
            Arc::new(RecordingHandler {
                label: "second",
                log: log.clone(),
                fail: false,
            }),
            Some(EventKind::UserCreated),
        );
        bus.subscribe(
            Arc::new(RecordingHandler {
                label: "catch_all",
                log: log.clone(),
                fail: false,
            }),
            None,
        );

        bus.publish(created_event()).await;

        // All three ran exactly once, kind-specific before catch-all,
        // in registration order
        assert_eq!(*log.lock(), vec!["first", "second", "catch_all"]);
    }

    #[tokio::test]
    async fn test_kind_filtering_skips_unrelated_handlers() {
        let counter = Arc::new(AtomicUsize::new(0));

        struct CountingHandler(Arc<AtomicUsize>);

        #[async_trait]
        impl EventHandler for CountingHandler {
            fn name(&self) -> &'static str {
                "counting"
            }

            async fn handle(&self, _event: &DomainEvent) -> anyhow::Result<()> {
                self.0.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        }

        let mut bus = InMemoryEventBus::new();
        bus.subscribe(
            Arc::new(CountingHandler(counter.clone())),
            Some(EventKind::PasswordChanged),
        );

        bus.publish(created_event()).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);

        bus.publish(DomainEvent::new(
            Some(1),
            EventPayload::PasswordChanged { user_id: 1 },
        ))
        .await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_history_retains_and_clears_events() {
        let bus = InMemoryEventBus::new();

        bus.publish(created_event()).await;
        bus.publish(DomainEvent::new(
            Some(1),
            EventPayload::UserActivated { user_id: 1 },
        ))
        .await;

        let events = bus.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].kind(), EventKind::UserCreated);
        assert_eq!(events[1].kind(), EventKind::UserActivated);

        bus.clear_events();
        assert!(bus.events().is_empty());
    }
}
