//! # Bus configuration.
//!
//! Provides [`BusConfig`] centralized settings for the event bus and its pool.
//!
//! ## Sentinel values
//! - `max_blocking = 0` → unlimited waiting submitters
//! - `release_grace = 0s` → `EventBus::release_gracefully` does not wait

use std::time::Duration;

/// Configuration for an [`EventBus`](crate::EventBus).
///
/// ## Field semantics
/// - `pool_capacity`: maximum number of handler tasks running at once (`1..=Semaphore::MAX_PERMITS`)
/// - `nonblocking`: reject instead of wait when every worker is busy
/// - `max_blocking`: cap on submitters waiting for a worker (`0` = unlimited)
/// - `release_grace`: default drain window for graceful release (`0s` = no wait)
///
/// ## Notes
/// All fields are public for flexibility. Prefer the helper accessors to avoid
/// sprinkling sentinel checks (`0`) across the codebase.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BusConfig {
    /// Maximum number of handler tasks executing concurrently.
    ///
    /// Valid range is `1..=tokio::sync::Semaphore::MAX_PERMITS`; anything else is
    /// rejected with [`SetupError::InvalidCapacity`](crate::SetupError::InvalidCapacity).
    pub pool_capacity: usize,

    /// Submission policy when every worker is busy.
    ///
    /// - `false` = `publish` waits for a free worker
    /// - `true` = `publish` fails with [`SubmitError::Full`](crate::SubmitError::Full)
    pub nonblocking: bool,

    /// Maximum number of submitters allowed to wait for a worker.
    ///
    /// - `0` = unlimited
    /// - `n > 0` = the `n+1`-th waiter fails with
    ///   [`SubmitError::Overloaded`](crate::SubmitError::Overloaded)
    ///
    /// Ignored when `nonblocking` is set.
    pub max_blocking: usize,

    /// Default grace period used by `EventBus::release_gracefully`.
    pub release_grace: Duration,
}

impl BusConfig {
    /// Creates a config with the given pool capacity and defaults elsewhere.
    pub fn with_capacity(pool_capacity: usize) -> Self {
        Self {
            pool_capacity,
            ..Self::default()
        }
    }

    /// Returns the waiter cap as an `Option`.
    ///
    /// - `None` → unlimited
    /// - `Some(n)` → at most `n` waiting submitters
    #[inline]
    pub fn blocking_limit(&self) -> Option<usize> {
        if self.max_blocking == 0 {
            None
        } else {
            Some(self.max_blocking)
        }
    }

    /// Returns the default release grace as an `Option`.
    #[inline]
    pub fn default_grace(&self) -> Option<Duration> {
        if self.release_grace == Duration::ZERO {
            None
        } else {
            Some(self.release_grace)
        }
    }
}

impl Default for BusConfig {
    /// Default configuration:
    ///
    /// - `pool_capacity = 64`
    /// - `nonblocking = false` (publishers wait for a worker)
    /// - `max_blocking = 0` (unlimited waiters)
    /// - `release_grace = 0s` (no drain wait)
    fn default() -> Self {
        Self {
            pool_capacity: 64,
            nonblocking: false,
            max_blocking: 0,
            release_grace: Duration::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinels_map_to_none() {
        let cfg = BusConfig::default();
        assert_eq!(cfg.blocking_limit(), None);
        assert_eq!(cfg.default_grace(), None);

        let cfg = BusConfig {
            max_blocking: 4,
            release_grace: Duration::from_secs(1),
            ..BusConfig::with_capacity(2)
        };
        assert_eq!(cfg.pool_capacity, 2);
        assert_eq!(cfg.blocking_limit(), Some(4));
        assert_eq!(cfg.default_grace(), Some(Duration::from_secs(1)));
    }
}
