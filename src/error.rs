//! Error types used by the event bus, its worker pool and handlers.
//!
//! This module defines the error taxonomy of the dispatcher:
//!
//! - [`SetupError`]: the bus (or its pool) could not be created.
//! - [`SubmitError`]: the worker pool refused a task.
//! - [`PublishError`]: `publish` aborted because a submission was refused.
//! - [`HandlerError`]: a handler failed (never surfaced to the publisher).
//! - [`ReleaseError`]: draining the pool did not finish within the grace period.
//!
//! All types provide helper methods (`as_label`, `as_message`) for logs/metrics.

use std::time::Duration;
use thiserror::Error;

use crate::events::EventName;

/// # Errors produced while building a bus.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SetupError {
    /// The requested pool capacity cannot be satisfied.
    #[error(
        "invalid worker pool capacity {capacity}; must be in 1..={}",
        tokio::sync::Semaphore::MAX_PERMITS
    )]
    InvalidCapacity {
        /// The rejected capacity.
        capacity: usize,
    },

    /// The bus was built outside of a tokio runtime.
    #[error("no tokio runtime available to run handlers")]
    NoRuntime,
}

impl SetupError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use eventvisor::SetupError;
    ///
    /// let err = SetupError::InvalidCapacity { capacity: 0 };
    /// assert_eq!(err.as_label(), "setup_invalid_capacity");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            SetupError::InvalidCapacity { .. } => "setup_invalid_capacity",
            SetupError::NoRuntime => "setup_no_runtime",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            SetupError::InvalidCapacity { capacity } => format!("invalid capacity: {capacity}"),
            SetupError::NoRuntime => "no runtime".to_string(),
        }
    }
}

/// # Errors produced by the worker pool on submission.
#[non_exhaustive]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitError {
    /// The pool was released and accepts no more work.
    #[error("worker pool released")]
    Released,

    /// All workers are busy and the pool is configured as non-blocking.
    #[error("worker pool full")]
    Full,

    /// The submitter is not running inside a tokio runtime.
    #[error("no tokio runtime available to run the task")]
    NoRuntime,

    /// Too many submitters are already waiting for a free worker.
    #[error("worker pool overloaded: {waiting} submitters waiting")]
    Overloaded {
        /// Number of submitters waiting when the task was refused.
        waiting: usize,
    },
}

impl SubmitError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            SubmitError::Released => "submit_released",
            SubmitError::Full => "submit_full",
            SubmitError::NoRuntime => "submit_no_runtime",
            SubmitError::Overloaded { .. } => "submit_overloaded",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            SubmitError::Released => "pool released".to_string(),
            SubmitError::Full => "pool full".to_string(),
            SubmitError::NoRuntime => "no runtime".to_string(),
            SubmitError::Overloaded { waiting } => format!("overloaded: waiting={waiting}"),
        }
    }
}

/// # Error returned by `publish`.
///
/// Only submission failures reach the publisher. The remaining events and
/// handlers of the aborted call are not submitted; tasks accepted before the
/// failure keep running.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PublishError {
    /// The bus was released before the call; nothing was submitted.
    #[error("event bus released")]
    Released,

    /// The pool refused the task for `handler` on `event`.
    #[error("failed to dispatch '{event}' to handler '{handler}': {source}")]
    Submit {
        /// Identity of the event being dispatched.
        event: EventName,
        /// Name of the handler whose task was refused.
        handler: String,
        /// Pool rejection.
        #[source]
        source: SubmitError,
    },
}

impl PublishError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            PublishError::Released => SubmitError::Released.as_label(),
            PublishError::Submit { source, .. } => source.as_label(),
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            PublishError::Released => "bus released".to_string(),
            PublishError::Submit {
                event,
                handler,
                source,
            } => format!("event={event} handler={handler}: {}", source.as_message()),
        }
    }

    /// Returns the underlying pool rejection.
    pub fn submit_error(&self) -> SubmitError {
        match self {
            PublishError::Released => SubmitError::Released,
            PublishError::Submit { source, .. } => *source,
        }
    }
}

/// # Errors produced by handler execution.
///
/// These are reported to logs and to the bus failure hook, never to the publisher.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HandlerError {
    /// Handler returned an error.
    #[error("handler failed: {error}")]
    Failed {
        /// The underlying error message.
        error: String,
    },

    /// Handler panicked; the panic was caught by the worker.
    #[error("handler panicked: {info}")]
    Panicked {
        /// Panic payload, if it was a string.
        info: String,
    },
}

impl HandlerError {
    /// Shorthand for [`HandlerError::Failed`].
    ///
    /// # Example
    /// ```
    /// use eventvisor::HandlerError;
    ///
    /// let err = HandlerError::fail("boom");
    /// assert_eq!(err.as_label(), "handler_failed");
    /// assert_eq!(err.to_string(), "handler failed: boom");
    /// ```
    pub fn fail(error: impl Into<String>) -> Self {
        HandlerError::Failed {
            error: error.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            HandlerError::Failed { .. } => "handler_failed",
            HandlerError::Panicked { .. } => "handler_panicked",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            HandlerError::Failed { error } => format!("error: {error}"),
            HandlerError::Panicked { info } => format!("panic: {info}"),
        }
    }
}

/// # Errors produced while releasing the bus.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReleaseError {
    /// In-flight handlers did not finish within the grace period.
    #[error("release timeout {grace:?} exceeded; {running} handler tasks still running")]
    GraceExceeded {
        /// The grace duration that was waited.
        grace: Duration,
        /// Number of tasks still running when the wait gave up.
        running: usize,
    },
}

impl ReleaseError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            ReleaseError::GraceExceeded { .. } => "release_grace_exceeded",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            ReleaseError::GraceExceeded { grace, running } => {
                format!("grace exceeded after {grace:?}; running={running}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publish_error_exposes_submit_source() {
        let err = PublishError::Submit {
            event: EventName::new("orders::Placed"),
            handler: "audit".into(),
            source: SubmitError::Released,
        };
        assert_eq!(err.submit_error(), SubmitError::Released);
        assert_eq!(err.as_label(), "submit_released");
        assert_eq!(
            err.to_string(),
            "failed to dispatch 'orders::Placed' to handler 'audit': worker pool released"
        );
    }

    #[test]
    fn labels_are_stable() {
        assert_eq!(SubmitError::Full.as_label(), "submit_full");
        assert_eq!(
            SubmitError::Overloaded { waiting: 3 }.as_message(),
            "overloaded: waiting=3"
        );
        let err = ReleaseError::GraceExceeded {
            grace: Duration::from_millis(5),
            running: 2,
        };
        assert_eq!(err.as_label(), "release_grace_exceeded");
    }
}
