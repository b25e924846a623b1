//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::time::Duration;

/// Default per-request timeout in seconds.
pub const TIMEOUT_SECS: u64 = 30;

/// Default wait in milliseconds when a 429 response has no usable `retry_after`.
pub const RATE_LIMIT_DEFAULT_WAIT_MS: u64 = 1000;

/// Default output path for the `init` subcommand.
pub const CONFIG_FILE: &str = "discord-hook.toml";

/// Default request timeout as Duration.
#[must_use]
pub const fn timeout() -> Duration {
    Duration::from_secs(TIMEOUT_SECS)
}

/// Default rate-limit fallback wait as Duration.
#[must_use]
pub const fn rate_limit_default_wait() -> Duration {
    Duration::from_millis(RATE_LIMIT_DEFAULT_WAIT_MS)
}
