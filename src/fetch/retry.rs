//! Retry policy and attempt reporting.

use std::time::Duration;

use super::RequestError;

/// Configuration for fixed-delay retry behavior.
///
/// The delay is the same before every retry; there is no backoff.
///
/// # Defaults
///
/// - `max_retries`: 5
/// - `delay`: 1 second
///
/// # Example
///
/// ```
/// use data_go_kr::fetch::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::new()
///     .with_max_retries(2)
///     .with_delay(Duration::from_millis(500));
///
/// assert_eq!(policy.max_attempts(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Number of retries after the initial attempt.
    pub max_retries: u32,

    /// Delay before each retry.
    pub delay: Duration,
}

impl RetryPolicy {
    /// Default number of retries.
    pub const DEFAULT_MAX_RETRIES: u32 = 5;

    /// Default delay between attempts (1 second).
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(1000);

    /// Creates a new retry policy with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_retries: Self::DEFAULT_MAX_RETRIES,
            delay: Self::DEFAULT_DELAY,
        }
    }

    /// Sets the number of retries after the initial attempt.
    #[must_use]
    pub const fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Sets the delay between attempts.
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Total number of attempts, including the initial one.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new()
    }
}

/// Receives progress notifications from the retry loop.
pub trait RetryReporter {
    /// Called after every failed attempt, before deciding whether to retry.
    fn attempt_failed(&mut self, attempt: u32, error: &RequestError);

    /// Called after the delay, right before retry `retry` of `max_retries`.
    fn retrying(&mut self, retry: u32, max_retries: u32);
}

/// Reporter that prints failures and retry progress to standard error.
///
/// Each error message is printed on its own line, followed by a
/// `Retry <n>/<max>` line before every retry.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrReporter;

impl RetryReporter for StderrReporter {
    fn attempt_failed(&mut self, _attempt: u32, error: &RequestError) {
        eprintln!("{error}");
    }

    fn retrying(&mut self, retry: u32, max_retries: u32) {
        eprintln!("\nRetry {retry}/{max_retries}");
    }
}
