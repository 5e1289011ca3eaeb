use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::Result;

/// A reaction to a published domain event.
///
/// Handlers receive the payload by reference and must not assume any fields
/// beyond what the event's `topics` documentation promises.
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// Stable handler name, used in failure reports and logs.
    fn name(&self) -> &str;

    /// React to one event occurrence.
    async fn handle(&self, payload: &Value) -> Result<()>;
}

/// A handler failure surfaced by [`EventBus::publish`].
///
/// Failures never propagate to the publisher as an `Err`; they are collected
/// here so the publisher can log them and continue.
#[derive(Debug, Clone)]
pub struct HandlerFailure {
    /// Event name that was being dispatched
    pub event: String,
    /// Name of the handler that failed
    pub handler: String,
    /// Rendered error message
    pub message: String,
}

impl fmt::Display for HandlerFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "handler '{}' failed on '{}': {}",
            self.handler, self.event, self.message
        )
    }
}

/// Accumulates subscriptions before the bus is frozen.
///
/// Registration order per event name is preserved and becomes the dispatch
/// order.
#[derive(Default)]
pub struct EventBusBuilder {
    subscribers: HashMap<String, Vec<Arc<dyn EventHandler>>>,
}

impl EventBusBuilder {
    /// Register `handler` for `event`. Multiple handlers per event are
    /// allowed; each event's handlers run in registration order.
    #[must_use]
    pub fn subscribe(mut self, event: impl Into<String>, handler: Arc<dyn EventHandler>) -> Self {
        self.subscribers.entry(event.into()).or_default().push(handler);
        self
    }

    /// Freeze the registry. There is no unsubscribe path and no registration
    /// after this point.
    #[must_use]
    pub fn build(self) -> EventBus {
        EventBus {
            subscribers: self.subscribers,
        }
    }
}

/// Immutable event dispatcher, constructed at the composition root and
/// injected into services.
#[derive(Default)]
pub struct EventBus {
    subscribers: HashMap<String, Vec<Arc<dyn EventHandler>>>,
}

impl EventBus {
    /// Start a new registration phase.
    #[must_use]
    pub fn builder() -> EventBusBuilder {
        EventBusBuilder::default()
    }

    /// Dispatch `payload` to every handler registered for `event`, in
    /// registration order, awaiting each in turn.
    ///
    /// No registered handlers is a no-op, not an error. A failing handler
    /// never stops dispatch of the remaining handlers: its failure is
    /// recorded and returned.
    pub async fn publish(&self, event: &str, payload: Value) -> Vec<HandlerFailure> {
        let Some(handlers) = self.subscribers.get(event) else {
            return Vec::new();
        };

        let mut failures = Vec::new();
        for handler in handlers {
            if let Err(e) = handler.handle(&payload).await {
                failures.push(HandlerFailure {
                    event: event.to_string(),
                    handler: handler.name().to_string(),
                    message: e.to_string(),
                });
            }
        }
        failures
    }

    /// Number of handlers registered for `event`.
    #[must_use]
    pub fn handler_count(&self, event: &str) -> usize {
        self.subscribers.get(event).map_or(0, Vec::len)
    }

    /// Total handlers across all events, for health reporting.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.values().map(Vec::len).sum()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut events: Vec<_> = self
            .subscribers
            .iter()
            .map(|(name, handlers)| (name.as_str(), handlers.len()))
            .collect();
        events.sort_unstable();
        f.debug_struct("EventBus").field("events", &events).finish()
    }
}
