//! Bounded polling for elements and page state.
//!
//! Single-page apps re-render after every interaction, so an action that
//! changes the page waits for the effect to settle before returning. Every
//! wait is bounded: exceeding the timeout surfaces as an error, never a hang.

use std::time::{Duration, Instant};

use tracing::trace;

use crate::locator::{LocatorOptions, DEFAULT_POLL_INTERVAL_MS, DEFAULT_TIMEOUT_MS};
use crate::result::{BddError, BddResult};

/// Options for wait operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitOptions {
    /// Timeout in milliseconds
    pub timeout_ms: u64,
    /// Polling interval in milliseconds
    pub poll_interval_ms: u64,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl WaitOptions {
    /// Create new wait options with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set timeout in milliseconds
    #[must_use]
    pub const fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set polling interval in milliseconds
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval_ms: u64) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    /// Get timeout as Duration
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Get poll interval as Duration
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl From<&LocatorOptions> for WaitOptions {
    fn from(options: &LocatorOptions) -> Self {
        Self {
            timeout_ms: options.timeout.as_millis() as u64,
            poll_interval_ms: options.poll_interval.as_millis() as u64,
        }
    }
}

/// Poll `attempt` until it yields a value or the timeout elapses.
///
/// `attempt` runs at least once. `Ok(None)` means "not yet"; an `Err` stops
/// polling immediately and is returned as-is.
pub fn poll<T, F>(options: &WaitOptions, mut attempt: F) -> BddResult<T>
where
    F: FnMut() -> BddResult<Option<T>>,
{
    let start = Instant::now();
    let mut attempts = 0_u32;
    loop {
        attempts += 1;
        if let Some(value) = attempt()? {
            trace!(attempts, elapsed_ms = start.elapsed().as_millis() as u64, "wait satisfied");
            return Ok(value);
        }
        if start.elapsed() >= options.timeout() {
            return Err(BddError::Timeout {
                ms: options.timeout_ms,
            });
        }
        std::thread::sleep(options.poll_interval());
    }
}

/// Wait for a predicate to become true
pub fn wait_until<F>(options: &WaitOptions, mut predicate: F) -> BddResult<()>
where
    F: FnMut() -> BddResult<bool>,
{
    poll(options, || Ok(predicate()?.then_some(())))
}
