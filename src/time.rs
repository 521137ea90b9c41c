//! Sleep abstraction for testability.
//!
//! This module provides a [`Sleeper`] trait that allows injecting instant
//! sleepers in tests while using the tokio timer in production.

use std::time::Duration;

/// Abstraction over async sleeping.
///
/// The retry loop waits between attempts through this trait, so tests can
/// run the full loop without real delays.
///
/// # Example
///
/// ```
/// use data_go_kr::time::{InstantSleeper, Sleeper};
/// use std::time::Duration;
///
/// # async fn example() {
/// InstantSleeper.sleep(Duration::from_secs(60)).await; // returns immediately
/// # }
/// ```
pub trait Sleeper: Send + Sync {
    /// Waits for the given duration.
    fn sleep(&self, duration: Duration) -> impl std::future::Future<Output = ()> + Send;
}

/// Production sleeper backed by [`tokio::time::sleep`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Sleeper that returns immediately.
///
/// Intended for tests; a retry loop driven by this sleeper never waits.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantSleeper;

impl Sleeper for InstantSleeper {
    async fn sleep(&self, _duration: Duration) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[tokio::test]
    async fn instant_sleeper_does_not_wait() {
        let start = Instant::now();
        InstantSleeper.sleep(Duration::from_secs(3600)).await;

        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test]
    async fn tokio_sleeper_waits_at_least_duration() {
        let start = Instant::now();
        TokioSleeper.sleep(Duration::from_millis(20)).await;

        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn sleepers_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TokioSleeper>();
        assert_send_sync::<InstantSleeper>();
    }

    #[test]
    fn sleepers_are_default() {
        fn assert_default<T: Default>() {}
        assert_default::<TokioSleeper>();
        assert_default::<InstantSleeper>();
    }
}
