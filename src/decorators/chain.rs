//! # Ordered decorator list.
//!
//! [`DecoratorChain`] holds the decorators registered through
//! `EventBus::use_decorator` and applies them to handlers at subscription time.
//!
//! ## Rules
//! - **Insert at front**: `push` places the new decorator at index 0.
//! - **Fold front to back**: `apply` wraps the handler with index 0 first, then
//!   index 1 around that, and so on. The decorator registered *first* therefore
//!   ends up *outermost*, the most recent one sits directly around the handler.
//! - **Snapshot**: `apply` reads the list once; later pushes never reach handlers
//!   that were already wrapped.
//!
//! ```text
//! push(D1); push(D2)        list = [D2, D1]
//! apply(H)                  D1( D2( H ) )
//! call                      D1 → D2 → H
//! ```

use std::collections::VecDeque;

use parking_lot::RwLock;

use super::Decorator;
use crate::handlers::HandlerRef;

/// Thread-safe ordered decorator list.
#[derive(Debug, Default)]
pub struct DecoratorChain {
    layers: RwLock<VecDeque<Decorator>>,
}

impl DecoratorChain {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `decorator` at the front of the list.
    pub fn push(&self, decorator: Decorator) {
        self.layers.write().push_front(decorator);
    }

    /// Copy of the current list, front first.
    pub fn snapshot(&self) -> Vec<Decorator> {
        self.layers.read().iter().cloned().collect()
    }

    /// Wraps `handler` with every decorator currently in the list.
    pub fn apply(&self, handler: HandlerRef) -> HandlerRef {
        self.snapshot()
            .iter()
            .fold(handler, |inner, decorator| decorator.wrap(inner))
    }

    /// Number of registered decorators.
    pub fn len(&self) -> usize {
        self.layers.read().len()
    }

    /// True if no decorator is registered.
    pub fn is_empty(&self) -> bool {
        self.layers.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use parking_lot::Mutex;

    use super::*;
    use crate::error::HandlerError;
    use crate::events::{Event, EventRef, IntoEvent};
    use crate::handlers::{Handle, HandlerFn};

    #[derive(Debug)]
    struct Ping;
    impl Event for Ping {}

    type Trace = Arc<Mutex<Vec<String>>>;

    struct Layer {
        label: &'static str,
        trace: Trace,
        inner: HandlerRef,
    }

    #[async_trait]
    impl Handle for Layer {
        async fn handle(&self, event: EventRef) -> Result<(), HandlerError> {
            self.trace.lock().push(self.label.to_string());
            self.inner.handle(event).await
        }
    }

    fn layer(label: &'static str, trace: &Trace) -> Decorator {
        let trace = Arc::clone(trace);
        Decorator::new(label, move |inner| {
            Arc::new(Layer {
                label,
                trace: Arc::clone(&trace),
                inner,
            }) as HandlerRef
        })
    }

    fn recorder(trace: &Trace) -> HandlerRef {
        let trace = Arc::clone(trace);
        HandlerFn::arc("handler", move |_ev: EventRef| {
            let trace = Arc::clone(&trace);
            async move {
                trace.lock().push("handler".to_string());
                Ok::<_, HandlerError>(())
            }
        })
    }

    #[tokio::test]
    async fn first_pushed_is_outermost() {
        let trace: Trace = Arc::default();
        let chain = DecoratorChain::new();
        chain.push(layer("d1", &trace));
        chain.push(layer("d2", &trace));

        let names: Vec<String> = chain.snapshot().iter().map(|d| d.name().to_string()).collect();
        assert_eq!(names, vec!["d2", "d1"]);

        let h = chain.apply(recorder(&trace));
        h.handle(Ping.into_event()).await.unwrap();
        assert_eq!(*trace.lock(), vec!["d1", "d2", "handler"]);
    }

    #[tokio::test]
    async fn apply_uses_list_at_call_time() {
        let trace: Trace = Arc::default();
        let chain = DecoratorChain::new();
        let before = chain.apply(recorder(&trace));
        chain.push(layer("late", &trace));
        assert_eq!(chain.len(), 1);

        before.handle(Ping.into_event()).await.unwrap();
        assert_eq!(*trace.lock(), vec!["handler"]);
    }

    #[test]
    fn empty_chain_returns_same_handler() {
        let trace: Trace = Arc::default();
        let chain = DecoratorChain::new();
        let h = recorder(&trace);
        let wrapped = chain.apply(Arc::clone(&h));
        assert!(chain.is_empty());
        assert!(Arc::ptr_eq(&h, &wrapped));
    }
}
