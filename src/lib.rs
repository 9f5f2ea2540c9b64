//! # eventvisor
//!
//! **Eventvisor** is an in-process publish/subscribe event dispatcher for Rust.
//!
//! Producers publish typed events; independently registered handlers consume
//! them concurrently on a bounded worker pool. Publishers never wait for
//! handlers: `publish` returns as soon as every task has been accepted.
//! The crate is meant as a decoupling layer inside one process (domain events
//! between modules), not as a distributed message bus.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!  use_decorator(D)            subscribe(sample, [H])          subscribe_all([W])
//!        │                            │                               │
//!        ▼                            ▼                               │
//! ┌────────────────┐  apply   ┌────────────────┐                      │
//! │ DecoratorChain │────────► │ D(H) (frozen)  │                      │
//! └────────────────┘          └───────┬────────┘                      │
//!                                     ▼                               ▼
//! ┌───────────────────────────────────────────────────────────────────────┐
//! │  Registry:  EventName ──► [handlers]      "*" ──► [wildcard handlers] │
//! └───────────────────────────────────┬───────────────────────────────────┘
//!                                     │ lookup(name) = specific ++ wildcard
//! publish([e1, e2]) ─► resolve(e) ────┘
//!                                     │ one task per (event, handler)
//!                                     ▼
//! ┌───────────────────────────────────────────────────────────────────────┐
//! │  WorkerPool (capacity N, semaphore + task tracker)                    │
//! └──────┬──────────────────┬──────────────────┬──────────────────────────┘
//!        ▼                  ▼                  ▼
//!    handler.handle     handler.handle     handler.handle
//!        │ Err / panic
//!        └──► warn! + failure hook (never returned to the publisher)
//! ```
//!
//! ### Lifecycle
//! ```text
//! EventBus::new(capacity) ──► Ready ──► release() ──► Released (terminal)
//!                                          └─ publish() ─► Err(PublishError::Released)
//! ```
//!
//! ## Features
//! | Area              | Description                                                       | Key types / traits                         |
//! |-------------------|-------------------------------------------------------------------|--------------------------------------------|
//! | **Events**        | Typed events with explicit or type-path identity.                 | [`Event`], [`EventName`], [`IntoEvent`]    |
//! | **Handlers**      | Async handlers as traits or closures.                             | [`Handle`], [`HandlerFn`], [`HandlerRef`]  |
//! | **Decorators**    | Middleware applied at subscription time.                          | [`Decorator`], [`DecoratorChain`]          |
//! | **Dispatch**      | Fire-and-forget publish over a bounded pool.                      | [`EventBus`], [`WorkerPool`]               |
//! | **Views**         | Object-safe publisher/subscriber halves.                          | [`EventPublisher`], [`EventSubscriber`]    |
//! | **Errors**        | Typed setup/submit/handler/release errors.                        | [`PublishError`], [`HandlerError`]         |
//! | **Configuration** | Pool capacity, blocking policy, release grace.                    | [`BusConfig`]                              |
//!
//! ## Optional features
//! - `logging` (default): exports the [`LogLayer`] tracing decorator.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::time::Duration;
//! use eventvisor::{Event, EventBus, EventRef, HandlerError, HandlerFn, HandlerRef};
//!
//! #[derive(Debug, Default, Clone)]
//! struct UserCreated { email: String }
//! impl Event for UserCreated {}
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let bus = EventBus::new(4)?;
//!
//!     let welcome: HandlerRef = HandlerFn::arc("welcome", |ev: EventRef| async move {
//!         if let Some(user) = ev.downcast_ref::<UserCreated>() {
//!             println!("welcome {}", user.email);
//!         }
//!         Ok::<_, HandlerError>(())
//!     });
//!     bus.subscribe(&UserCreated::default(), [welcome]);
//!
//!     // Value and Arc forms reach the same handlers.
//!     bus.publish([UserCreated { email: "a@example.com".into() }]).await?;
//!     bus.publish([Arc::new(UserCreated { email: "b@example.com".into() })]).await?;
//!
//!     bus.release_timeout(Duration::from_secs(1)).await?;
//!     Ok(())
//! }
//! ```
mod core;
mod decorators;
mod error;
mod events;
mod handlers;

pub mod global;

// ---- Public re-exports ----

pub use crate::core::{
    BusConfig, EventBus, EventBusBuilder, EventPublisher, EventSubscriber, FailureHook,
    HandlerFailure, WorkerPool,
};
pub use decorators::{Decorator, DecoratorChain};
pub use error::{HandlerError, PublishError, ReleaseError, SetupError, SubmitError};
pub use events::{AsAny, Event, EventName, EventRef, IntoEvent};
pub use handlers::{Handle, HandlerFn, HandlerRef};

// Optional: expose the built-in tracing decorator.
// Enable with: `--features logging` (on by default)
#[cfg(feature = "logging")]
pub use decorators::LogLayer;
