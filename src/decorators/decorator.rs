//! # Handler decorators.
//!
//! A [`Decorator`] turns a handler into another handler: typically a wrapper
//! that does some work (logging, metrics, rewriting the event) and then
//! delegates to the inner one.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::handlers::HandlerRef;

type WrapFn = dyn Fn(HandlerRef) -> HandlerRef + Send + Sync;

/// Named `HandlerRef -> HandlerRef` transformation.
///
/// Cheap to clone.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use async_trait::async_trait;
/// use eventvisor::{Decorator, EventRef, Handle, HandlerError, HandlerRef};
///
/// struct Timed(HandlerRef);
///
/// #[async_trait]
/// impl Handle for Timed {
///     async fn handle(&self, event: EventRef) -> Result<(), HandlerError> {
///         let started = std::time::Instant::now();
///         let res = self.0.handle(event).await;
///         let _elapsed = started.elapsed();
///         res
///     }
///
///     fn name(&self) -> &str { self.0.name() }
/// }
///
/// let timed = Decorator::new("timed", |inner| Arc::new(Timed(inner)) as HandlerRef);
/// assert_eq!(timed.name(), "timed");
/// ```
#[derive(Clone)]
pub struct Decorator {
    name: Cow<'static, str>,
    wrap: Arc<WrapFn>,
}

impl Decorator {
    /// Creates a decorator from a wrapping function.
    pub fn new<F>(name: impl Into<Cow<'static, str>>, wrap: F) -> Self
    where
        F: Fn(HandlerRef) -> HandlerRef + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            wrap: Arc::new(wrap),
        }
    }

    /// Decorator name (for logs).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Wraps `handler`.
    pub fn wrap(&self, handler: HandlerRef) -> HandlerRef {
        (self.wrap)(handler)
    }
}

impl fmt::Debug for Decorator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Decorator").field("name", &self.name).finish()
    }
}
