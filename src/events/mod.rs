//! Events: identity and the publishable forms accepted by the bus.
//!
//! ## Contents
//! - [`Event`], [`EventRef`] the event contract and its shared, type-erased form
//! - [`EventName`] canonical identity (plus the reserved wildcard)
//! - [`IntoEvent`] value / `Arc` normalization used by `publish`

mod event;
mod name;

pub(crate) use event::resolve;
pub use event::{AsAny, Event, EventRef, IntoEvent};
pub use name::EventName;
