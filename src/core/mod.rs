//! Dispatcher core: configuration, worker pool, registry and the bus itself.
//!
//! Internal modules:
//! - [`config`]: bus and pool settings;
//! - [`pool`]: bounded worker pool (submit/release);
//! - [`registry`]: handlers by event identity;
//! - [`bus`]: registration and fire-and-forget dispatch;
//! - [`builder`]: bus construction;
//! - [`api`]: publisher/subscriber views;
//! - [`failure`]: handler failure reports.

mod api;
mod builder;
mod bus;
mod config;
mod failure;
mod pool;
mod registry;

pub use api::{EventPublisher, EventSubscriber};
pub use builder::EventBusBuilder;
pub use bus::EventBus;
pub use config::BusConfig;
pub use failure::{FailureHook, HandlerFailure};
pub use pool::WorkerPool;
