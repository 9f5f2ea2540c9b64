//! # Bounded worker pool.
//!
//! [`WorkerPool`] runs submitted futures on the submitter's tokio runtime with
//! at most `capacity` of them in flight. It is the only execution facility the
//! bus uses.
//!
//! ## Architecture
//! ```text
//! submit(task)
//!     │
//!     ├─► no current runtime        ─► Err(NoRuntime)
//!     ├─► released?                 ─► Err(Released)
//!     ├─► try_acquire permit ── ok ─► tracker.spawn(task + permit)
//!     │        │ no permits
//!     │        ├─► nonblocking      ─► Err(Full)
//!     │        ├─► waiters >= max   ─► Err(Overloaded)
//!     │        └─► acquire().await  ─► tracker.spawn(task + permit)
//!     │                 └─ closed   ─► Err(Released)
//!     ▼
//! permit dropped when the task finishes → next waiter proceeds
//! ```
//!
//! ## Rules
//! - **Bounded**: never more than `capacity` tasks executing at once.
//! - **Fire-and-forget**: `submit` returns once the task is accepted, not when it finishes.
//! - **Caller's runtime**: tasks are spawned on the runtime `submit` is called from,
//!   so a bus outlives the runtime it was built in.
//! - **Release**: idempotent; stops accepting work, already accepted tasks keep running.
//! - **Drain**: [`WorkerPool::release_timeout`] waits for accepted tasks up to a grace period.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::{OwnedSemaphorePermit, Semaphore, TryAcquireError};
use tokio_util::task::TaskTracker;
use tracing::debug;

use crate::core::config::BusConfig;
use crate::error::{ReleaseError, SetupError, SubmitError};

/// Fixed-capacity executor with submit/release semantics.
#[derive(Debug)]
pub struct WorkerPool {
    capacity: usize,
    nonblocking: bool,
    max_blocking: Option<usize>,
    permits: Arc<Semaphore>,
    tracker: TaskTracker,
    waiting: AtomicUsize,
}

/// Decrements the waiter count even if the waiting future is dropped.
struct WaitGuard<'a>(&'a AtomicUsize);

impl Drop for WaitGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}

impl WorkerPool {
    /// Creates a pool from the bus configuration.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(cfg: &BusConfig) -> Result<Self, SetupError> {
        if cfg.pool_capacity == 0 || cfg.pool_capacity > Semaphore::MAX_PERMITS {
            return Err(SetupError::InvalidCapacity {
                capacity: cfg.pool_capacity,
            });
        }
        Handle::try_current().map_err(|_| SetupError::NoRuntime)?;

        Ok(Self {
            capacity: cfg.pool_capacity,
            nonblocking: cfg.nonblocking,
            max_blocking: cfg.blocking_limit(),
            permits: Arc::new(Semaphore::new(cfg.pool_capacity)),
            tracker: TaskTracker::new(),
            waiting: AtomicUsize::new(0),
        })
    }

    /// Submits a task, waiting for a free worker unless the pool is non-blocking.
    pub async fn submit<F>(&self, task: F) -> Result<(), SubmitError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let runtime = current_runtime()?;
        let permit = match self.permits.clone().try_acquire_owned() {
            Ok(permit) => permit,
            Err(TryAcquireError::Closed) => return Err(SubmitError::Released),
            Err(TryAcquireError::NoPermits) if self.nonblocking => return Err(SubmitError::Full),
            Err(TryAcquireError::NoPermits) => self.wait_for_permit().await?,
        };
        self.spawn(task, permit, &runtime);
        Ok(())
    }

    /// Submits a task without waiting; fails with [`SubmitError::Full`] when saturated.
    pub fn try_submit<F>(&self, task: F) -> Result<(), SubmitError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let runtime = current_runtime()?;
        let permit = self
            .permits
            .clone()
            .try_acquire_owned()
            .map_err(|e| match e {
                TryAcquireError::Closed => SubmitError::Released,
                TryAcquireError::NoPermits => SubmitError::Full,
            })?;
        self.spawn(task, permit, &runtime);
        Ok(())
    }

    async fn wait_for_permit(&self) -> Result<OwnedSemaphorePermit, SubmitError> {
        let waiting = self.waiting.fetch_add(1, Ordering::AcqRel);
        let _guard = WaitGuard(&self.waiting);
        if let Some(max) = self.max_blocking {
            if waiting >= max {
                return Err(SubmitError::Overloaded { waiting });
            }
        }
        self.permits
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| SubmitError::Released)
    }

    fn spawn<F>(&self, task: F, permit: OwnedSemaphorePermit, runtime: &Handle)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.tracker.spawn_on(
            async move {
                let _permit = permit;
                task.await;
            },
            runtime,
        );
    }

    /// Stops accepting tasks. Idempotent.
    ///
    /// Accepted tasks keep running; submitters waiting for a worker fail with
    /// [`SubmitError::Released`].
    pub fn release(&self) {
        if self.permits.is_closed() {
            return;
        }
        self.permits.close();
        self.tracker.close();
        debug!(running = self.running(), "worker pool released");
    }

    /// Releases the pool and waits up to `grace` for accepted tasks to finish.
    pub async fn release_timeout(&self, grace: Duration) -> Result<(), ReleaseError> {
        self.release();
        match tokio::time::timeout(grace, self.tracker.wait()).await {
            Ok(()) => Ok(()),
            Err(_) => Err(ReleaseError::GraceExceeded {
                grace,
                running: self.running(),
            }),
        }
    }

    /// True once [`release`](Self::release) was called.
    pub fn is_released(&self) -> bool {
        self.permits.is_closed()
    }

    /// Maximum number of concurrently executing tasks.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of accepted tasks that have not finished yet.
    pub fn running(&self) -> usize {
        self.tracker.len()
    }

    /// Number of idle workers (`0` once released).
    pub fn free(&self) -> usize {
        if self.is_released() {
            0
        } else {
            self.permits.available_permits()
        }
    }

    /// Number of submitters currently waiting for a worker.
    pub fn waiting(&self) -> usize {
        self.waiting.load(Ordering::Acquire)
    }
}

fn current_runtime() -> Result<Handle, SubmitError> {
    Handle::try_current().map_err(|_| SubmitError::NoRuntime)
}
