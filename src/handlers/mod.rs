//! # Event handlers.
//!
//! - [`Handle`] - trait for implementing async event handlers
//! - [`HandlerFn`] - closure-backed handler
//! - [`HandlerRef`] - shared reference to a handler (`Arc<dyn Handle>`)

mod handler;
mod handler_fn;

pub use handler::{Handle, HandlerRef};
pub use handler_fn::HandlerFn;
