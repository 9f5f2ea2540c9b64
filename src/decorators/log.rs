//! # LogLayer: tracing decorator
//!
//! Wraps every handler subscribed after it with a `tracing` record per call.
//! Use it for debugging or as a template for metrics decorators.
//!
//! ## Example output (fmt subscriber)
//! ```text
//! DEBUG eventvisor::decorators::log: handled handler="audit" event="app::OrderPlaced" elapsed=41µs
//! WARN  eventvisor::decorators::log: handler failed handler="audit" event="app::OrderPlaced" error=handler failed: boom
//! ```

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::decorators::Decorator;
use crate::error::HandlerError;
use crate::events::EventRef;
use crate::handlers::{Handle, HandlerRef};

/// Tracing decorator.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogLayer;

impl LogLayer {
    /// Construct a new [`LogLayer`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Returns the layer as a [`Decorator`] for `EventBus::use_decorator`.
    pub fn decorator(self) -> Decorator {
        Decorator::new("log", |inner| Arc::new(Logged { inner }) as HandlerRef)
    }
}

impl From<LogLayer> for Decorator {
    fn from(layer: LogLayer) -> Self {
        layer.decorator()
    }
}

struct Logged {
    inner: HandlerRef,
}

#[async_trait]
impl Handle for Logged {
    async fn handle(&self, event: EventRef) -> Result<(), HandlerError> {
        let name = event.name();
        let started = Instant::now();
        let res = self.inner.handle(event).await;
        match &res {
            Ok(()) => debug!(
                handler = self.inner.name(),
                event = %name,
                elapsed = ?started.elapsed(),
                "handled"
            ),
            Err(e) => warn!(
                handler = self.inner.name(),
                event = %name,
                error = %e,
                "handler failed"
            ),
        }
        res
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
