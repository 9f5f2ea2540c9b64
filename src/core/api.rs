//! # Publisher and subscriber views.
//!
//! Producers usually only need to publish and consumers only need to subscribe.
//! [`EventPublisher`] and [`EventSubscriber`] are the object-safe halves of
//! [`EventBus`]; hand out `Arc<dyn EventPublisher>` / `Arc<dyn EventSubscriber>`
//! to keep modules decoupled from the full bus.
//!
//! ```rust
//! use std::sync::Arc;
//! use eventvisor::{Event, EventBus, EventPublisher, IntoEvent};
//!
//! #[derive(Debug)]
//! struct Shutdown;
//! impl Event for Shutdown {}
//!
//! async fn notify(publisher: Arc<dyn EventPublisher>) {
//!     let _ = publisher.publish(vec![Shutdown.into_event()]).await;
//! }
//! ```

use async_trait::async_trait;

use crate::core::bus::EventBus;
use crate::decorators::Decorator;
use crate::error::PublishError;
use crate::events::{Event, EventRef};
use crate::handlers::HandlerRef;

/// Publishing half of the bus.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Dispatches `events`; see [`EventBus::publish`].
    async fn publish(&self, events: Vec<EventRef>) -> Result<(), PublishError>;
}

/// Subscribing half of the bus.
pub trait EventSubscriber: Send + Sync {
    /// See [`EventBus::subscribe`].
    fn subscribe(&self, sample: &dyn Event, handlers: Vec<HandlerRef>);

    /// See [`EventBus::subscribe_all`].
    fn subscribe_all(&self, handlers: Vec<HandlerRef>);

    /// See [`EventBus::use_decorator`].
    fn use_decorator(&self, decorator: Decorator);
}

#[async_trait]
impl EventPublisher for EventBus {
    async fn publish(&self, events: Vec<EventRef>) -> Result<(), PublishError> {
        EventBus::publish(self, events).await
    }
}

impl EventSubscriber for EventBus {
    fn subscribe(&self, sample: &dyn Event, handlers: Vec<HandlerRef>) {
        EventBus::subscribe(self, sample, handlers);
    }

    fn subscribe_all(&self, handlers: Vec<HandlerRef>) {
        EventBus::subscribe_all(self, handlers);
    }

    fn use_decorator(&self, decorator: Decorator) {
        EventBus::use_decorator(self, decorator);
    }
}
