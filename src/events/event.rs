//! # Events and identity resolution.
//!
//! An [`Event`] is any `Send + Sync + Debug + 'static` value. Its identity is
//! returned by [`Event::name`]; the default is the fully-qualified type path,
//! so two types that share a bare name in different modules never collide.
//! Types that need a stable, explicit identity override `name`.
//!
//! Events enter the bus through [`IntoEvent`]: a plain value and the same value
//! behind an `Arc` resolve to the same [`EventName`] and are delivered to
//! handlers as an [`EventRef`] whose concrete type is the event itself.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use eventvisor::{Event, EventName, IntoEvent};
//!
//! #[derive(Debug)]
//! struct OrderPlaced { id: u64 }
//! impl Event for OrderPlaced {}
//!
//! #[derive(Debug)]
//! struct UserCreated;
//! impl Event for UserCreated {
//!     fn name(&self) -> EventName { EventName::from("users.created") }
//! }
//!
//! let by_value = OrderPlaced { id: 1 }.into_event();
//! let by_arc = Arc::new(OrderPlaced { id: 2 }).into_event();
//! assert_eq!(by_value.name(), by_arc.name());
//! assert_eq!(by_arc.downcast_ref::<OrderPlaced>().map(|e| e.id), Some(2));
//! assert_eq!(UserCreated.name().as_str(), "users.created");
//! ```

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use super::name::EventName;

/// Shared, type-erased event as seen by handlers.
pub type EventRef = Arc<dyn Event>;

/// Upcast helper so `dyn Event` can be downcast to its concrete type.
#[doc(hidden)]
pub trait AsAny {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A domain occurrence that can be published on the bus.
pub trait Event: AsAny + Send + Sync + fmt::Debug + 'static {
    /// Canonical identity used to route this event to handlers.
    ///
    /// Defaults to the fully-qualified type path of the implementor.
    fn name(&self) -> EventName {
        EventName::of::<Self>()
    }
}

impl dyn Event {
    /// Returns the event as `&E` if its concrete type is `E`.
    pub fn downcast_ref<E: Event>(&self) -> Option<&E> {
        self.as_any().downcast_ref::<E>()
    }

    /// True if the concrete type of the event is `E`.
    pub fn is<E: Event>(&self) -> bool {
        self.as_any().is::<E>()
    }
}

/// Conversion of publishable forms into an [`EventRef`].
///
/// Implemented for every event value `E`, for `Arc<E>` (the indirection is
/// stripped: handlers see `E`, never `Arc<E>`), and for an existing [`EventRef`].
pub trait IntoEvent {
    /// Converts `self` into a shared event.
    fn into_event(self) -> EventRef;
}

impl<E: Event> IntoEvent for E {
    fn into_event(self) -> EventRef {
        Arc::new(self)
    }
}

impl<E: Event> IntoEvent for Arc<E> {
    fn into_event(self) -> EventRef {
        self
    }
}

impl IntoEvent for EventRef {
    fn into_event(self) -> EventRef {
        self
    }
}

/// Resolves identity and strips indirection in one step.
pub(crate) fn resolve(event: impl IntoEvent) -> (EventName, EventRef) {
    let event = event.into_event();
    (event.name(), event)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Alpha {
        msg: String,
    }
    impl Event for Alpha {}

    #[derive(Debug)]
    struct Renamed;
    impl Event for Renamed {
        fn name(&self) -> EventName {
            EventName::from("custom.renamed")
        }
    }

    #[test]
    fn value_and_arc_resolve_to_same_identity() {
        let (by_value, _) = resolve(Alpha { msg: "x".into() });
        let (by_arc, ev) = resolve(Arc::new(Alpha { msg: "y".into() }));
        assert_eq!(by_value, by_arc);
        assert_eq!(by_value, EventName::of::<Alpha>());
        assert!(ev.is::<Alpha>());
        assert_eq!(
            ev.downcast_ref::<Alpha>(),
            Some(&Alpha { msg: "y".into() })
        );
    }

    #[test]
    fn erased_event_keeps_identity() {
        let erased: EventRef = Arc::new(Alpha { msg: "z".into() });
        let (name, ev) = resolve(erased);
        assert_eq!(name, EventName::of::<Alpha>());
        assert!(ev.is::<Alpha>());
    }

    #[test]
    fn explicit_name_overrides_type_path() {
        let (name, _) = resolve(Renamed);
        assert_eq!(name.as_str(), "custom.renamed");
    }
}
