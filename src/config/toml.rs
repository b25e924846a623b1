//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Webhook configuration section
    #[serde(default)]
    pub webhook: WebhookSection,

    /// Rate-limit handling section
    #[serde(default)]
    pub rate_limit: RateLimitSection,
}

/// Webhook configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WebhookSection {
    /// Webhook URL
    pub url: Option<String>,

    /// Default display name
    pub username: Option<String>,

    /// Default avatar URL
    pub avatar_url: Option<String>,

    /// Proxy URL for every request
    pub proxy: Option<String>,

    /// Request timeout in seconds
    pub timeout: Option<u64>,
}

/// Rate-limit handling section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RateLimitSection {
    /// Maximum number of rate-limited retries (absent = unbounded)
    pub max_retries: Option<u32>,

    /// Wait in milliseconds when the server gives no usable `retry_after`
    pub default_wait_ms: Option<u64>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# discord-hook Configuration File

[webhook]
# Webhook URL (required, can be overridden by --url)
# url = "https://discord.com/api/webhooks/<id>/<token>"

# Display name and avatar used when a message does not set its own
# username = "Status Bot"
# avatar_url = "https://cdn.example.com/avatar.png"

# Proxy for every request, retries included
# proxy = "http://proxy.example.com:8080"

# Request timeout in seconds (default: 30)
timeout = 30

[rate_limit]
# Give up after this many rate-limited retries (default: retry until accepted)
# max_retries = 10

# Wait in milliseconds when a 429 response has no usable retry_after (default: 1000)
# default_wait_ms = 1000
"#
    .to_string()
}
