//! Client configuration.

use std::time::Duration;

use super::RateLimitPolicy;

/// Configuration for a webhook client.
///
/// Passed by value when the client is built. The endpoint URL is supplied
/// separately and cannot change afterwards.
///
/// # Defaults
///
/// - no default username or avatar
/// - no proxy
/// - `timeout`: 30 seconds per request
/// - `rate_limit`: [`RateLimitPolicy::default`] (unbounded, 1s fallback)
///
/// # Example
///
/// ```
/// use discord_hook::webhook::WebhookOptions;
/// use std::time::Duration;
///
/// let options = WebhookOptions::new()
///     .with_username("Example Bot")
///     .with_avatar_url("https://cdn.example.com/avatar.png")
///     .with_timeout(Duration::from_secs(10));
///
/// assert_eq!(options.username.as_deref(), Some("Example Bot"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookOptions {
    /// Display name used when a payload does not set one
    pub username: Option<String>,

    /// Avatar URL used when a payload does not set one
    pub avatar_url: Option<String>,

    /// Outbound proxy for every request, retries included
    pub proxy: Option<url::Url>,

    /// Per-request timeout
    pub timeout: Duration,

    /// Reaction to HTTP 429
    pub rate_limit: RateLimitPolicy,
}

impl WebhookOptions {
    /// Default request timeout (30 seconds).
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Creates options with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            username: None,
            avatar_url: None,
            proxy: None,
            timeout: Self::DEFAULT_TIMEOUT,
            rate_limit: RateLimitPolicy::new(),
        }
    }

    /// Sets the default display name.
    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Sets the default avatar URL.
    #[must_use]
    pub fn with_avatar_url(mut self, avatar_url: impl Into<String>) -> Self {
        self.avatar_url = Some(avatar_url.into());
        self
    }

    /// Routes all requests through the given proxy.
    #[must_use]
    pub fn with_proxy(mut self, proxy: url::Url) -> Self {
        self.proxy = Some(proxy);
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the rate-limit policy.
    #[must_use]
    pub const fn with_rate_limit(mut self, policy: RateLimitPolicy) -> Self {
        self.rate_limit = policy;
        self
    }
}

impl Default for WebhookOptions {
    fn default() -> Self {
        Self::new()
    }
}
