//! Rate-limit backoff policy for webhook deliveries.

use std::time::Duration;

use serde::Deserialize;

/// Configuration for how the delivery loop reacts to HTTP 429.
///
/// On a rate-limited response the loop waits for the server-prescribed
/// `retry_after` (read from the JSON body) and resends the same body.
/// When the server gives no usable value, `default_wait` is used.
///
/// # Defaults
///
/// - `default_wait`: 1 second
/// - `max_retries`: `None` (retry for as long as the server rate limits)
///
/// # Example
///
/// ```
/// use discord_hook::webhook::RateLimitPolicy;
/// use std::time::Duration;
///
/// // Unbounded retries, 1s fallback wait
/// let policy = RateLimitPolicy::default();
///
/// // Give up after 5 rate-limited retries
/// let capped = RateLimitPolicy::new()
///     .with_max_retries(5)
///     .with_default_wait(Duration::from_millis(500));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitPolicy {
    /// Wait used when the 429 body carries no usable `retry_after`.
    pub default_wait: Duration,

    /// Maximum number of retries after rate-limited attempts.
    ///
    /// `None` retries indefinitely.
    pub max_retries: Option<u32>,
}

impl RateLimitPolicy {
    /// Default fallback wait (1 second).
    pub const DEFAULT_WAIT: Duration = Duration::from_secs(1);

    /// Creates a policy with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            default_wait: Self::DEFAULT_WAIT,
            max_retries: None,
        }
    }

    /// Sets the fallback wait.
    ///
    /// Zero is accepted (useful in tests) but creates a tight loop
    /// against a server that omits `retry_after`.
    #[must_use]
    pub const fn with_default_wait(mut self, wait: Duration) -> Self {
        self.default_wait = wait;
        self
    }

    /// Caps the number of retries after rate-limited attempts.
    ///
    /// A value of 0 means a single 429 fails the send.
    #[must_use]
    pub const fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = Some(max_retries);
        self
    }

    /// Removes any retry cap.
    #[must_use]
    pub const fn unbounded(mut self) -> Self {
        self.max_retries = None;
        self
    }

    /// Returns true if another attempt is allowed after `retries`
    /// rate-limited retries have already been made.
    #[must_use]
    pub const fn allows_retry(&self, retries: u32) -> bool {
        match self.max_retries {
            Some(max) => retries < max,
            None => true,
        }
    }

    /// Computes how long to wait given a 429 response body.
    #[must_use]
    pub fn wait_for(&self, body: &[u8]) -> Duration {
        parse_retry_after(body).unwrap_or(self.default_wait)
    }
}

impl Default for RateLimitPolicy {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Deserialize)]
struct RateLimitBody {
    retry_after: Option<f64>,
}

/// Extracts `retry_after` (seconds, possibly fractional) from a 429 body.
///
/// The value is truncated to millisecond precision. Returns `None` when
/// the body is not JSON, the field is missing or not a number, or the
/// value is not a positive finite duration of at least one millisecond.
#[must_use]
pub fn parse_retry_after(body: &[u8]) -> Option<Duration> {
    let secs = serde_json::from_slice::<RateLimitBody>(body)
        .ok()?
        .retry_after?;

    if !secs.is_finite() || secs <= 0.0 {
        return None;
    }

    // Float-to-int `as` saturates, so absurdly large values stay finite.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let millis = (secs * 1000.0) as u64;

    (millis > 0).then(|| Duration::from_millis(millis))
}
