//! Sleep abstraction for testability.
//!
//! This module provides a [`Sleeper`] trait that allows injecting a
//! no-op or recording sleeper in tests while using tokio's timer in
//! production. Rate-limit backoff is the only place the crate waits.

use std::time::Duration;

/// Abstraction over an asynchronous sleep.
///
/// Implementations must yield to the runtime rather than block the
/// worker thread.
///
/// # Example
///
/// ```
/// use discord_hook::time::{InstantSleeper, Sleeper};
/// use std::time::Duration;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// InstantSleeper.sleep(Duration::from_secs(3600)).await; // returns immediately
/// # }
/// ```
pub trait Sleeper: Send + Sync {
    /// Suspends the current task for `duration`.
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
/// Useful in tests that exercise retry loops without real delays.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantSleeper;

impl Sleeper for InstantSleeper {
    async fn sleep(&self, _duration: Duration) {}
}
