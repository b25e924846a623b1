//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use url::Url;

use crate::message::{Embed, EmbedAuthor, EmbedField, EmbedFooter, MAX_COLOR, MessagePayload};
use crate::webhook::{RateLimitPolicy, WebhookOptions};

use super::cli::Cli;
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// Fully validated configuration ready for use by the application.
///
/// This struct represents a complete, validated configuration where all
/// required fields are present and all values have been validated.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
/// The function validates all inputs and returns errors for invalid configurations.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Webhook URL (required)
    pub url: Url,

    /// Client options: identity, transport and rate-limit handling
    pub options: WebhookOptions,

    /// The message to send
    pub payload: MessagePayload,

    /// File to attach, if any
    pub file: Option<PathBuf>,

    /// Dry-run mode (print the message instead of sending it)
    pub dry_run: bool,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file_str = self
            .file
            .as_ref()
            .map_or_else(|| "none".to_string(), |p| p.display().to_string());

        let rate_limit_str = self
            .options
            .rate_limit
            .max_retries
            .map_or_else(|| "unbounded".to_string(), |max| format!("{max} retries"));

        write!(
            f,
            "Config {{ url: {}, username: {}, proxy: {}, timeout: {}s, rate_limit: {}/{}ms, \
             file: {}, embeds: {}, dry_run: {} }}",
            redact_url(&self.url),
            self.options.username.as_deref().unwrap_or("none"),
            if self.options.proxy.is_some() { "set" } else { "none" },
            self.options.timeout.as_secs(),
            rate_limit_str,
            self.options.rate_limit.default_wait.as_millis(),
            file_str,
            self.payload.embeds.len(),
            self.dry_run,
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The URL is missing or invalid
    /// - The proxy URL is invalid
    /// - Duration values are zero
    /// - An embed color or field is malformed
    /// - The message has no content, no embed and no file
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let url = Self::resolve_url(cli, toml)?;
        let options = Self::build_options(cli, toml)?;
        let payload = Self::build_payload(cli)?;
        let file = cli.file.clone();

        if payload.is_empty() && file.is_none() {
            return Err(ConfigError::missing(
                field::MESSAGE,
                "Use --content, --file, or an embed option such as --title",
            ));
        }

        Ok(Self {
            url,
            options,
            payload,
            file,
            dry_run: cli.dry_run,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    fn resolve_url(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Url, ConfigError> {
        // CLI takes precedence
        let url_str = cli
            .url
            .as_deref()
            .or_else(|| toml.and_then(|t| t.webhook.url.as_deref()))
            .ok_or_else(|| {
                ConfigError::missing(field::URL, "Use --url or set webhook.url in config file")
            })?;

        let url = Url::parse(url_str).map_err(|e| ConfigError::InvalidUrl {
            url: url_str.to_string(),
            reason: e.to_string(),
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl {
                url: url_str.to_string(),
                reason: format!("unsupported scheme '{}', expected http or https", url.scheme()),
            });
        }

        Ok(url)
    }

    fn build_options(cli: &Cli, toml: Option<&TomlConfig>) -> Result<WebhookOptions, ConfigError> {
        let webhook = toml.map(|t| &t.webhook);
        let mut options = WebhookOptions::new()
            .with_timeout(Self::resolve_timeout(cli, toml)?)
            .with_rate_limit(Self::build_rate_limit(cli, toml)?);

        let username = cli
            .username
            .as_deref()
            .or_else(|| webhook.and_then(|w| w.username.as_deref()))
            .filter(|name| !name.is_empty());
        if let Some(username) = username {
            options = options.with_username(username);
        }

        let avatar_url = cli
            .avatar_url
            .as_deref()
            .or_else(|| webhook.and_then(|w| w.avatar_url.as_deref()))
            .filter(|url| !url.is_empty());
        if let Some(avatar_url) = avatar_url {
            options = options.with_avatar_url(avatar_url);
        }

        if let Some(proxy) = Self::resolve_proxy(cli, toml)? {
            options = options.with_proxy(proxy);
        }

        Ok(options)
    }

    fn resolve_timeout(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Duration, ConfigError> {
        // Priority: CLI explicit > TOML > default
        let seconds = cli
            .timeout
            .or_else(|| toml.and_then(|t| t.webhook.timeout))
            .unwrap_or(defaults::TIMEOUT_SECS);

        if seconds == 0 {
            return Err(ConfigError::InvalidDuration {
                field: "timeout",
                reason: "must be greater than 0".to_string(),
            });
        }

        Ok(Duration::from_secs(seconds))
    }

    fn resolve_proxy(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Option<Url>, ConfigError> {
        let Some(proxy_str) = cli
            .proxy
            .as_deref()
            .or_else(|| toml.and_then(|t| t.webhook.proxy.as_deref()))
        else {
            return Ok(None);
        };

        let proxy = Url::parse(proxy_str).map_err(|e| ConfigError::InvalidProxy {
            url: proxy_str.to_string(),
            reason: e.to_string(),
        })?;

        if !matches!(proxy.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidProxy {
                url: proxy_str.to_string(),
                reason: format!("unsupported scheme '{}'", proxy.scheme()),
            });
        }

        Ok(Some(proxy))
    }

    fn build_rate_limit(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<RateLimitPolicy, ConfigError> {
        let rate_limit = toml.map(|t| &t.rate_limit);

        let max_retries = cli
            .max_rate_limit_retries
            .or_else(|| rate_limit.and_then(|r| r.max_retries));

        let default_wait_ms = rate_limit
            .and_then(|r| r.default_wait_ms)
            .unwrap_or(defaults::RATE_LIMIT_DEFAULT_WAIT_MS);

        if default_wait_ms == 0 {
            return Err(ConfigError::InvalidDuration {
                field: "rate_limit.default_wait_ms",
                reason: "must be greater than 0".to_string(),
            });
        }

        let policy =
            RateLimitPolicy::new().with_default_wait(Duration::from_millis(default_wait_ms));

        Ok(match max_retries {
            Some(max) => policy.with_max_retries(max),
            None => policy,
        })
    }

    fn build_payload(cli: &Cli) -> Result<MessagePayload, ConfigError> {
        let mut payload = MessagePayload::new().with_tts(cli.tts);

        if let Some(ref content) = cli.content {
            payload = payload.with_content(content.clone());
        }

        if cli.has_embed() {
            payload = payload.with_embed(Self::build_embed(cli)?);
        }

        Ok(payload)
    }

    fn build_embed(cli: &Cli) -> Result<Embed, ConfigError> {
        let mut embed = Embed::new();

        if let Some(ref title) = cli.title {
            embed = embed.with_title(title.clone());
        }
        if let Some(ref description) = cli.description {
            embed = embed.with_description(description.clone());
        }
        if let Some(ref url) = cli.embed_url {
            embed = embed.with_url(url.clone());
        }
        if let Some(ref color) = cli.color {
            embed = embed.with_color(parse_color(color)?);
        }
        if let Some(ref author) = cli.author {
            embed = embed.with_author(EmbedAuthor::new(author.clone()));
        }

        // Plain fields first, then inline ones, each in the order given
        for raw in &cli.fields {
            embed = embed.with_field(parse_field(raw)?);
        }
        for raw in &cli.inline_fields {
            embed = embed.with_field(parse_field(raw)?.inline());
        }

        if let Some(ref image) = cli.image_url {
            embed = embed.with_image(image.clone());
        }
        if let Some(ref thumbnail) = cli.thumbnail_url {
            embed = embed.with_thumbnail(thumbnail.clone());
        }
        if let Some(ref footer) = cli.footer {
            embed = embed.with_footer(EmbedFooter::new(footer.clone()));
        }
        if let Some(ref timestamp) = cli.timestamp {
            embed = embed.with_timestamp(timestamp.clone());
        }

        Ok(embed)
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

// Helper functions

/// Hides the last path segment, which carries the webhook token.
fn redact_url(url: &Url) -> String {
    let mut redacted = url.clone();
    redacted.set_query(None);

    let path = url.path().trim_end_matches('/');
    if let Some((head, _)) = path.rsplit_once('/').filter(|(_, tail)| !tail.is_empty()) {
        redacted.set_path(&format!("{head}/***"));
    }

    redacted.to_string()
}

fn parse_color(s: &str) -> Result<u32, ConfigError> {
    let trimmed = s.trim();
    let parsed = if let Some(hex) = trimmed.strip_prefix('#') {
        u32::from_str_radix(hex, 16)
    } else if let Some(hex) = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        u32::from_str_radix(hex, 16)
    } else {
        trimmed.parse::<u32>()
    };

    let color = parsed.map_err(|e| ConfigError::InvalidColor {
        value: s.to_string(),
        reason: e.to_string(),
    })?;

    if color > MAX_COLOR {
        return Err(ConfigError::InvalidColor {
            value: s.to_string(),
            reason: format!("must be at most {MAX_COLOR:#08x}"),
        });
    }

    Ok(color)
}

fn parse_field(s: &str) -> Result<EmbedField, ConfigError> {
    let invalid = || ConfigError::InvalidField {
        value: s.to_string(),
    };

    let (name, value) = s.split_once('=').ok_or_else(invalid)?;
    let (name, value) = (name.trim(), value.trim());

    if name.is_empty() || value.is_empty() {
        return Err(invalid());
    }

    Ok(EmbedField::new(name, value))
}
