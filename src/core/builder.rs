use crate::core::bus::EventBus;
use crate::core::config::BusConfig;
use crate::core::failure::{FailureHook, HandlerFailure};
use crate::decorators::Decorator;
use crate::error::SetupError;

use std::sync::Arc;

/// Builder for constructing an [`EventBus`] with optional features.
pub struct EventBusBuilder {
    cfg: BusConfig,
    decorators: Vec<Decorator>,
    on_failure: Option<FailureHook>,
}

impl EventBusBuilder {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: BusConfig) -> Self {
        Self {
            cfg,
            decorators: Vec::new(),
            on_failure: None,
        }
    }

    /// Registers a decorator before any subscription can happen.
    ///
    /// Same ordering as [`EventBus::use_decorator`]: the first one added is outermost.
    pub fn with_decorator(mut self, decorator: impl Into<Decorator>) -> Self {
        self.decorators.push(decorator.into());
        self
    }

    /// Sets a callback for handler failures.
    ///
    /// Handler errors and panics never reach the publisher; this is the only
    /// place they are observable besides the `warn!` log record.
    pub fn on_failure<F>(mut self, hook: F) -> Self
    where
        F: Fn(&HandlerFailure) + Send + Sync + 'static,
    {
        self.on_failure = Some(Arc::new(hook));
        self
    }

    /// Builds the bus.
    ///
    /// Must be called from within a tokio runtime.
    pub fn build(self) -> Result<EventBus, SetupError> {
        EventBus::from_parts(self.cfg, self.decorators, self.on_failure)
    }
}
