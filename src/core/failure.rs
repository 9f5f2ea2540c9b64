//! # Handler failure reports.
//!
//! Handler errors never reach the publisher. The worker logs them and, if the
//! bus was built with [`EventBusBuilder::on_failure`](crate::EventBusBuilder::on_failure),
//! hands a [`HandlerFailure`] to the hook.
//!
//! The hook runs on the worker task right after the handler returns; keep it cheap
//! (push into a channel, bump a counter).

use std::sync::Arc;

use crate::error::HandlerError;
use crate::events::EventName;

/// One failed handler invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HandlerFailure {
    /// Identity of the event being handled.
    pub event: EventName,
    /// Name of the handler that failed.
    pub handler: String,
    /// What went wrong.
    pub error: HandlerError,
}

/// Callback invoked for every handler failure.
pub type FailureHook = Arc<dyn Fn(&HandlerFailure) + Send + Sync>;

/// Extracts a readable message from a panic payload.
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
