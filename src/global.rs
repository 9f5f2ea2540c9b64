//! # Process-wide bus.
//!
//! Opt-in convenience layer for code that cannot thread an [`EventBus`] through
//! its call graph. [`setup`] installs the process bus; the accessors return views
//! of it.
//!
//! ## Rules
//! - Accessing the bus before [`setup`] is a programming error and **panics**.
//!   Use [`try_event_bus`] where absence is expected.
//! - Calling [`setup`] again replaces the process bus. The previous bus is not
//!   released; clones held elsewhere keep working.
//!
//! ```rust
//! use eventvisor::global;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let bus = global::setup(8)?;
//!     let publisher = global::publisher();
//!     publisher.publish(Vec::new()).await?;
//!     bus.release();
//!     Ok(())
//! }
//! ```

use std::sync::Arc;

use parking_lot::{RwLock, const_rwlock};
use tracing::debug;

use crate::core::{BusConfig, EventBus, EventPublisher, EventSubscriber};
use crate::error::SetupError;

static BUS: RwLock<Option<EventBus>> = const_rwlock(None);

/// Builds a bus with `pool_capacity` workers and installs it as the process bus.
pub fn setup(pool_capacity: usize) -> Result<EventBus, SetupError> {
    setup_with(BusConfig::with_capacity(pool_capacity))
}

/// Builds a bus from `cfg` and installs it as the process bus.
pub fn setup_with(cfg: BusConfig) -> Result<EventBus, SetupError> {
    let bus = EventBus::builder(cfg).build()?;
    if BUS.write().replace(bus.clone()).is_some() {
        debug!("process event bus replaced");
    }
    Ok(bus)
}

/// Returns the process bus, or `None` before [`setup`].
pub fn try_event_bus() -> Option<EventBus> {
    BUS.read().clone()
}

/// Returns the process bus.
///
/// # Panics
/// If [`setup`] has not been called.
pub fn event_bus() -> EventBus {
    match try_event_bus() {
        Some(bus) => bus,
        None => panic!("event bus is not set up yet; call eventvisor::global::setup first"),
    }
}

/// Publishing view of the process bus.
///
/// # Panics
/// If [`setup`] has not been called.
pub fn publisher() -> Arc<dyn EventPublisher> {
    Arc::new(event_bus())
}

/// Subscribing view of the process bus.
///
/// # Panics
/// If [`setup`] has not been called.
pub fn subscriber() -> Arc<dyn EventSubscriber> {
    Arc::new(event_bus())
}
