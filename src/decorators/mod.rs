//! # Handler decorators (middleware).
//!
//! Decorators wrap handlers with cross-cutting behavior without touching the
//! handlers themselves. They are applied once, when a handler is subscribed.
//!
//! ## Architecture
//! ```text
//! use_decorator(D1) ──► DecoratorChain [D1]
//! use_decorator(D2) ──► DecoratorChain [D2, D1]
//!
//! subscribe(T, H)   ──► chain.apply(H) = D1(D2(H)) ──► Registry[T]
//!
//! publish(T)        ──► D1.handle ──► D2.handle ──► H.handle
//! ```
//!
//! - [`Decorator`] named wrapping function
//! - [`DecoratorChain`] ordered list with insert-at-front semantics
//! - [`LogLayer`] built-in tracing decorator (feature `logging`)

mod chain;
mod decorator;
#[cfg(feature = "logging")]
mod log;

pub use chain::DecoratorChain;
pub use decorator::Decorator;
#[cfg(feature = "logging")]
pub use log::LogLayer;
