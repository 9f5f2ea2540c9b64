//! # Handler abstraction.
//!
//! [`Handle`] is the extension point for consuming events. The shared handle
//! type is [`HandlerRef`], an `Arc<dyn Handle>` that the registry stores and the
//! worker pool invokes.
//!
//! ## Contract
//! - Called from a pool worker; the publisher never waits for it.
//! - Returned errors (and panics) are logged and forwarded to the bus failure
//!   hook, never to the publisher.
//! - The same handler may be registered several times; it is then invoked once
//!   per registration.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::HandlerError;
use crate::events::EventRef;

/// Contract for event handlers.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use eventvisor::{Event, EventRef, Handle, HandlerError};
///
/// #[derive(Debug)]
/// struct Ping;
/// impl Event for Ping {}
///
/// struct Pong;
///
/// #[async_trait]
/// impl Handle for Pong {
///     async fn handle(&self, event: EventRef) -> Result<(), HandlerError> {
///         if event.is::<Ping>() {
///             return Ok(());
///         }
///         Err(HandlerError::fail("unexpected event"))
///     }
///
///     fn name(&self) -> &str { "pong" }
/// }
/// ```
#[async_trait]
pub trait Handle: Send + Sync + 'static {
    /// Handles a single event.
    async fn handle(&self, event: EventRef) -> Result<(), HandlerError>;

    /// Human-readable name (for logs and failure reports).
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Shared reference to a handler.
pub type HandlerRef = Arc<dyn Handle>;
