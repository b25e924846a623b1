//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// discord-hook: send messages to a chat channel webhook
///
/// Posts text, rich embeds, and file attachments to a webhook URL,
/// waiting out rate limits as the server prescribes.
#[derive(Debug, Parser)]
#[command(name = "discord-hook")]
#[command(version, about, long_about = None)]
#[allow(clippy::struct_excessive_bools)] // CLI flags are naturally boolean
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Webhook URL (required for sending)
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Path to configuration file
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Display name to post as, unless the message sets one
    #[arg(long)]
    pub username: Option<String>,

    /// Avatar image URL to post with, unless the message sets one
    #[arg(long = "avatar-url")]
    pub avatar_url: Option<String>,

    /// Proxy URL for every request
    #[arg(long)]
    pub proxy: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Give up after this many rate-limited retries (default: retry until accepted)
    #[arg(long = "max-rate-limit-retries")]
    pub max_rate_limit_retries: Option<u32>,

    /// Message text
    #[arg(long, short = 'm')]
    pub content: Option<String>,

    /// Read the message aloud with text-to-speech
    #[arg(long)]
    pub tts: bool,

    /// File to attach
    #[arg(long, short)]
    pub file: Option<PathBuf>,

    /// Embed title
    #[arg(long)]
    pub title: Option<String>,

    /// Embed description
    #[arg(long)]
    pub description: Option<String>,

    /// URL the embed title links to
    #[arg(long = "embed-url")]
    pub embed_url: Option<String>,

    /// Embed color as '#rrggbb', '0xrrggbb', or a decimal number
    #[arg(long)]
    pub color: Option<String>,

    /// Embed field in 'Name=Value' format (can be specified multiple times)
    #[arg(long = "field", value_name = "NAME=VALUE")]
    pub fields: Vec<String>,

    /// Inline embed field in 'Name=Value' format (can be specified multiple times)
    #[arg(long = "inline-field", value_name = "NAME=VALUE")]
    pub inline_fields: Vec<String>,

    /// Embed footer text
    #[arg(long)]
    pub footer: Option<String>,

    /// Embed timestamp (ISO-8601)
    #[arg(long)]
    pub timestamp: Option<String>,

    /// Embed image URL
    #[arg(long = "image-url")]
    pub image_url: Option<String>,

    /// Embed thumbnail URL
    #[arg(long = "thumbnail-url")]
    pub thumbnail_url: Option<String>,

    /// Embed author name
    #[arg(long)]
    pub author: Option<String>,

    /// Print the message JSON instead of sending it
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose logging
    #[arg(long, short)]
    pub verbose: bool,
}

/// Subcommands for discord-hook
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = super::defaults::CONFIG_FILE)]
        output: PathBuf,
    },
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Some(Command::Init { .. }))
    }

    /// Returns true if any embed option was given.
    #[must_use]
    pub fn has_embed(&self) -> bool {
        self.title.is_some()
            || self.description.is_some()
            || self.embed_url.is_some()
            || self.color.is_some()
            || !self.fields.is_empty()
            || !self.inline_fields.is_empty()
            || self.footer.is_some()
            || self.timestamp.is_some()
            || self.image_url.is_some()
            || self.thumbnail_url.is_some()
            || self.author.is_some()
    }
}
