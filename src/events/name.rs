//! # Event identity.
//!
//! [`EventName`] is the registry key under which handlers are stored.
//! One name is reserved: [`EventName::WILDCARD`] (`"*"`) matches every event.

use std::borrow::Cow;
use std::fmt;

/// Canonical identity of an event type.
///
/// Cheap to clone for `'static` names (the common case).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventName(Cow<'static, str>);

impl EventName {
    /// Reserved identity for catch-all subscriptions.
    pub const WILDCARD: EventName = EventName(Cow::Borrowed("*"));

    /// Creates a name from any string.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    /// Fully-qualified type path of `E`, e.g. `my_app::orders::OrderPlaced`.
    ///
    /// ```
    /// use eventvisor::EventName;
    ///
    /// struct Ping;
    /// assert!(EventName::of::<Ping>().as_str().ends_with("::Ping"));
    /// ```
    pub fn of<E: ?Sized>() -> Self {
        Self(Cow::Borrowed(std::any::type_name::<E>()))
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for the reserved wildcard identity.
    pub fn is_wildcard(&self) -> bool {
        self.0 == "*"
    }
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for EventName {
    fn from(s: &'static str) -> Self {
        Self(Cow::Borrowed(s))
    }
}

impl From<String> for EventName {
    fn from(s: String) -> Self {
        Self(Cow::Owned(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod billing {
        pub struct Created;
    }
    mod shipping {
        pub struct Created;
    }

    #[test]
    fn same_bare_name_in_different_modules_does_not_collide() {
        let a = EventName::of::<billing::Created>();
        let b = EventName::of::<shipping::Created>();
        assert_ne!(a, b);
        assert!(a.as_str().ends_with("billing::Created"));
        assert!(b.as_str().ends_with("shipping::Created"));
    }

    #[test]
    fn wildcard_is_reserved() {
        assert!(EventName::WILDCARD.is_wildcard());
        assert!(EventName::from("*").is_wildcard());
        assert!(!EventName::from("orders.placed").is_wildcard());
        assert_eq!(EventName::new(String::from("x")), EventName::from("x"));
    }
}
