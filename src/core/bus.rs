//! # EventBus: registration and fire-and-forget dispatch.
//!
//! The [`EventBus`] owns the handler [`Registry`], the [`DecoratorChain`] and the
//! [`WorkerPool`]. It is cheap to clone; all clones share the same state.
//!
//! ## Dispatch
//! ```text
//! publish([e1, e2])
//!   for each event (call order):
//!     resolve(event) ──► (EventName, EventRef)       value or Arc, same identity
//!     registry.lookup(name) ──► [h1, h2, *w1]        specific, then wildcard
//!     for each handler:
//!       pool.submit(run_handler(h, event)) ──┐
//!         └─ Err ─► return PublishError       │ (already submitted tasks keep running)
//!                                             ▼
//!                                   worker: h.handle(event)
//!                                     ├─ Ok    ─► done
//!                                     ├─ Err   ─► warn! + failure hook
//!                                     └─ panic ─► caught ─► warn! + failure hook
//! ```
//!
//! ## Rules
//! - `publish` returns once every task was **accepted**, not when handlers finish.
//! - `subscribe` wraps handlers with the decorators registered **so far**.
//! - `subscribe_all` registers wildcard handlers **without** decoration.
//! - After `release` every `publish` fails; registry and decorators are kept.

use std::fmt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use tracing::{debug, trace, warn};

use crate::core::builder::EventBusBuilder;
use crate::core::config::BusConfig;
use crate::core::failure::{FailureHook, HandlerFailure, panic_message};
use crate::core::pool::WorkerPool;
use crate::core::registry::Registry;
use crate::decorators::{Decorator, DecoratorChain};
use crate::error::{HandlerError, PublishError, ReleaseError, SetupError};
use crate::events::{Event, EventName, EventRef, IntoEvent, resolve};
use crate::handlers::HandlerRef;

/// In-process publish/subscribe dispatcher.
///
/// # Example
/// ```rust
/// use eventvisor::{Event, EventBus, EventRef, HandlerError, HandlerFn, HandlerRef};
///
/// #[derive(Debug, Default)]
/// struct OrderPlaced { id: u64 }
/// impl Event for OrderPlaced {}
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let bus = EventBus::new(4)?;
///
///     bus.subscribe(
///         &OrderPlaced::default(),
///         [HandlerFn::arc("mailer", |ev: EventRef| async move {
///             let order = ev.downcast_ref::<OrderPlaced>().map(|o| o.id);
///             assert_eq!(order, Some(7));
///             Ok::<_, HandlerError>(())
///         }) as HandlerRef],
///     );
///
///     bus.publish([OrderPlaced { id: 7 }]).await?;
///     bus.release_timeout(std::time::Duration::from_secs(1)).await?;
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct EventBus {
    inner: Arc<Inner>,
}

struct Inner {
    cfg: BusConfig,
    registry: Registry,
    decorators: DecoratorChain,
    pool: WorkerPool,
    on_failure: Option<FailureHook>,
}

impl EventBus {
    /// Creates a bus whose pool runs at most `pool_capacity` handlers at once.
    ///
    /// Fails for a capacity of `0` or when called outside a tokio runtime.
    pub fn new(pool_capacity: usize) -> Result<Self, SetupError> {
        Self::builder(BusConfig::with_capacity(pool_capacity)).build()
    }

    /// Returns a builder for the full configuration.
    pub fn builder(cfg: BusConfig) -> EventBusBuilder {
        EventBusBuilder::new(cfg)
    }

    pub(crate) fn from_parts(
        cfg: BusConfig,
        decorators: Vec<Decorator>,
        on_failure: Option<FailureHook>,
    ) -> Result<Self, SetupError> {
        let pool = WorkerPool::new(&cfg)?;
        let chain = DecoratorChain::new();
        for decorator in decorators {
            chain.push(decorator);
        }
        debug!(capacity = cfg.pool_capacity, nonblocking = cfg.nonblocking, "event bus ready");

        Ok(Self {
            inner: Arc::new(Inner {
                cfg,
                registry: Registry::new(),
                decorators: chain,
                pool,
                on_failure,
            }),
        })
    }

    // ---- Subscriber side ----

    /// Registers `handlers` for events with the identity of `sample`.
    ///
    /// Each handler is wrapped with the decorators registered up to this call.
    /// An `Arc`-held sample resolves to the same identity: pass `&*arc`.
    pub fn subscribe(&self, sample: &dyn Event, handlers: impl IntoIterator<Item = HandlerRef>) {
        let name = sample.name();
        self.warn_if_released(&name);

        let handlers: Vec<HandlerRef> = handlers
            .into_iter()
            .map(|h| self.inner.decorators.apply(h))
            .collect();
        debug!(event = %name, handlers = handlers.len(), "subscribed");
        self.inner.registry.register(name, handlers);
    }

    /// Registers `handlers` for every event.
    ///
    /// Wildcard handlers are **not** wrapped by the decorator chain.
    pub fn subscribe_all(&self, handlers: impl IntoIterator<Item = HandlerRef>) {
        self.warn_if_released(&EventName::WILDCARD);

        let handlers: Vec<HandlerRef> = handlers.into_iter().collect();
        debug!(handlers = handlers.len(), "subscribed to all events");
        self.inner.registry.register(EventName::WILDCARD, handlers);
    }

    /// Adds a decorator for handlers subscribed **after** this call.
    ///
    /// Decorators registered earlier end up outermost: with `use_decorator(d1)`
    /// then `use_decorator(d2)`, a later handler `h` runs as `d1 → d2 → h`.
    pub fn use_decorator(&self, decorator: impl Into<Decorator>) {
        let decorator = decorator.into();
        debug!(decorator = decorator.name(), "decorator added");
        self.inner.decorators.push(decorator);
    }

    fn warn_if_released(&self, name: &EventName) {
        if self.is_released() {
            warn!(event = %name, "subscribing on a released bus; handlers will never run");
        }
    }

    // ---- Publisher side ----

    /// Dispatches `events` to their handlers.
    ///
    /// Returns once every (event, handler) task was accepted by the pool. The first
    /// rejected submission aborts the call; tasks submitted before it keep running
    /// and the rest of the call is abandoned.
    pub async fn publish<I>(&self, events: I) -> Result<(), PublishError>
    where
        I: IntoIterator,
        I::Item: IntoEvent,
    {
        if self.is_released() {
            return Err(PublishError::Released);
        }

        for event in events {
            let (name, event) = resolve(event);
            for handler in self.inner.registry.lookup(&name) {
                let task = run_handler(
                    Arc::clone(&handler),
                    Arc::clone(&event),
                    name.clone(),
                    self.inner.on_failure.clone(),
                );
                if let Err(source) = self.inner.pool.submit(task).await {
                    return Err(PublishError::Submit {
                        event: name,
                        handler: handler.name().to_string(),
                        source,
                    });
                }
            }
        }
        Ok(())
    }

    // ---- Lifecycle ----

    /// Releases the worker pool. Idempotent.
    ///
    /// Running handlers finish on their own; every later `publish` fails.
    pub fn release(&self) {
        self.inner.pool.release();
    }

    /// Releases the pool and waits up to `grace` for running handlers.
    pub async fn release_timeout(&self, grace: Duration) -> Result<(), ReleaseError> {
        self.inner.pool.release_timeout(grace).await
    }

    /// Releases the pool and waits for the configured [`BusConfig::release_grace`].
    pub async fn release_gracefully(&self) -> Result<(), ReleaseError> {
        match self.inner.cfg.default_grace() {
            Some(grace) => self.release_timeout(grace).await,
            None => {
                self.release();
                Ok(())
            }
        }
    }

    /// True once the bus was released.
    pub fn is_released(&self) -> bool {
        self.inner.pool.is_released()
    }

    // ---- Introspection ----

    /// Number of handlers registered for the identity of `sample` (wildcard excluded).
    pub fn handler_count(&self, sample: &dyn Event) -> usize {
        self.inner.registry.len(&sample.name())
    }

    /// Sorted identities that have handlers (including the wildcard).
    pub fn identities(&self) -> Vec<EventName> {
        self.inner.registry.identities()
    }

    /// Number of registered decorators.
    pub fn decorator_count(&self) -> usize {
        self.inner.decorators.len()
    }

    /// The underlying worker pool (capacity and load).
    pub fn pool(&self) -> &WorkerPool {
        &self.inner.pool
    }

    /// The configuration this bus was built with.
    pub fn config(&self) -> &BusConfig {
        &self.inner.cfg
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("cfg", &self.inner.cfg)
            .field("identities", &self.identities())
            .field("decorators", &self.decorator_count())
            .field("released", &self.is_released())
            .finish()
    }
}

/// Runs one handler on a pool worker, reporting failures and panics.
async fn run_handler(
    handler: HandlerRef,
    event: EventRef,
    name: EventName,
    on_failure: Option<FailureHook>,
) {
    trace!(handler = handler.name(), event = %name, "dispatching");

    let error = match AssertUnwindSafe(handler.handle(event)).catch_unwind().await {
        Ok(Ok(())) => return,
        Ok(Err(e)) => e,
        Err(payload) => HandlerError::Panicked {
            info: panic_message(&*payload),
        },
    };

    warn!(
        handler = handler.name(),
        event = %name,
        error = %error,
        label = error.as_label(),
        "handler failed"
    );
    if let Some(hook) = on_failure {
        hook(&HandlerFailure {
            event: name,
            handler: handler.name().to_string(),
            error,
        });
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use tokio::sync::mpsc;

    use super::*;
    use crate::handlers::HandlerFn;

    #[derive(Debug, Default)]
    struct Alpha;
    impl Event for Alpha {}

    #[derive(Debug, Default)]
    struct Beta;
    impl Event for Beta {}

    fn counting(counter: &Arc<AtomicUsize>, done: &mpsc::UnboundedSender<()>) -> HandlerRef {
        let counter = Arc::clone(counter);
        let done = done.clone();
        HandlerFn::arc("counting", move |_ev: EventRef| {
            let counter = Arc::clone(&counter);
            let done = done.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                let _ = done.send(());
                Ok::<_, HandlerError>(())
            }
        })
    }

    #[tokio::test]
    async fn handler_registered_twice_runs_twice() {
        let bus = EventBus::new(2).unwrap();
        let counter = Arc::new(AtomicUsize::new(0));
        let (tx, mut rx) = mpsc::unbounded_channel();
        let h = counting(&counter, &tx);

        bus.subscribe(&Alpha, [Arc::clone(&h), h]);
        assert_eq!(bus.handler_count(&Alpha), 2);

        bus.publish([Alpha]).await.unwrap();
        rx.recv().await.unwrap();
        rx.recv().await.unwrap();
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn unmatched_event_is_a_no_op() {
        let bus = EventBus::new(1).unwrap();
        let counter = Arc::new(AtomicUsize::new(0));
        let (tx, _rx) = mpsc::unbounded_channel();
        bus.subscribe(&Alpha, [counting(&counter, &tx)]);

        bus.publish([Beta]).await.unwrap();
        bus.release_timeout(Duration::from_secs(5)).await.unwrap();
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn capacity_beyond_pool_limit_is_a_setup_error() {
        let err = EventBus::new(usize::MAX).unwrap_err();
        assert_eq!(
            err,
            SetupError::InvalidCapacity {
                capacity: usize::MAX
            }
        );
        assert_eq!(err.as_label(), "setup_invalid_capacity");
    }

    #[test]
    fn handlers_run_on_the_publishers_runtime() {
        let build_rt = || {
            tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap()
        };

        let first = build_rt();
        let bus = first.block_on(async { EventBus::new(1) }).unwrap();
        let counter = Arc::new(AtomicUsize::new(0));
        let (tx, mut rx) = mpsc::unbounded_channel();
        bus.subscribe(&Alpha, [counting(&counter, &tx)]);
        drop(first);

        let second = build_rt();
        second.block_on(async {
            bus.publish([Alpha]).await.unwrap();
            tokio::time::timeout(Duration::from_secs(5), rx.recv())
                .await
                .unwrap()
                .unwrap();
        });
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn publish_without_runtime_is_rejected() {
        let rt = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();
        let bus = rt.block_on(async { EventBus::new(1) }).unwrap();
        let counter = Arc::new(AtomicUsize::new(0));
        let (tx, _rx) = mpsc::unbounded_channel();
        bus.subscribe(&Alpha, [counting(&counter, &tx)]);

        let err = futures::executor::block_on(bus.publish([Alpha])).unwrap_err();
        assert_eq!(err.submit_error(), crate::error::SubmitError::NoRuntime);
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn publish_after_release_fails_even_without_handlers() {
        let bus = EventBus::new(1).unwrap();
        bus.release();
        assert_eq!(bus.publish([Beta]).await, Err(PublishError::Released));
        assert_eq!(
            bus.publish(Vec::<EventRef>::new()).await,
            Err(PublishError::Released)
        );
    }

    #[tokio::test]
    async fn failures_and_panics_reach_the_hook() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let bus = EventBus::builder(BusConfig::with_capacity(2))
            .on_failure(move |f: &HandlerFailure| {
                let _ = tx.send(f.clone());
            })
            .build()
            .unwrap();

        bus.subscribe(
            &Alpha,
            [HandlerFn::arc("failing", |_ev: EventRef| async {
                Err::<(), _>(HandlerError::fail("boom"))
            }) as HandlerRef],
        );
        bus.subscribe(
            &Beta,
            [HandlerFn::arc("panicking", |_ev: EventRef| async {
                if true {
                    panic!("kaboom");
                }
                Ok::<_, HandlerError>(())
            }) as HandlerRef],
        );

        bus.publish([Alpha]).await.unwrap();
        let failure = rx.recv().await.unwrap();
        assert_eq!(failure.event, EventName::of::<Alpha>());
        assert_eq!(failure.handler, "failing");
        assert_eq!(failure.error, HandlerError::fail("boom"));

        bus.publish([Beta]).await.unwrap();
        let failure = rx.recv().await.unwrap();
        assert_eq!(failure.handler, "panicking");
        assert_eq!(
            failure.error,
            HandlerError::Panicked {
                info: "kaboom".into()
            }
        );
    }

    #[tokio::test]
    async fn nonblocking_saturation_aborts_publish() {
        let bus = EventBus::builder(BusConfig {
            nonblocking: true,
            ..BusConfig::with_capacity(1)
        })
        .build()
        .unwrap();
        let gate = Arc::new(tokio::sync::Notify::new());
        let g = Arc::clone(&gate);
        bus.subscribe(
            &Alpha,
            [HandlerFn::arc("blocking", move |_ev: EventRef| {
                let g = Arc::clone(&g);
                async move {
                    g.notified().await;
                    Ok::<_, HandlerError>(())
                }
            }) as HandlerRef],
        );

        let err = bus.publish([Alpha, Alpha]).await.unwrap_err();
        assert!(matches!(
            err,
            PublishError::Submit {
                ref handler,
                source: crate::error::SubmitError::Full,
                ..
            } if handler == "blocking"
        ));
        assert_eq!(bus.pool().running(), 1);

        gate.notify_one();
        bus.release_timeout(Duration::from_secs(5)).await.unwrap();
    }

    #[tokio::test]
    async fn release_gracefully_uses_configured_grace() {
        let bus = EventBus::builder(BusConfig {
            release_grace: Duration::from_millis(20),
            ..BusConfig::with_capacity(1)
        })
        .build()
        .unwrap();
        bus.subscribe(
            &Alpha,
            [HandlerFn::arc("stuck", |_ev: EventRef| async {
                std::future::pending::<()>().await;
                Ok::<_, HandlerError>(())
            }) as HandlerRef],
        );
        bus.publish([Alpha]).await.unwrap();

        let err = bus.release_gracefully().await.unwrap_err();
        assert_eq!(err.as_label(), "release_grace_exceeded");
        assert!(bus.is_released());
    }
}
