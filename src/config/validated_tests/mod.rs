//! Tests for validated configuration.

use super::ConfigError;
use super::cli::Cli;
use super::toml::TomlConfig;
use super::validated::ValidatedConfig;

const URL: &str = "https://discord.com/api/webhooks/123/secret-token";

/// Helper to create CLI args from a slice
fn cli(args: &[&str]) -> Cli {
    let mut full_args = vec!["discord-hook"];
    full_args.extend(args);
    Cli::parse_from_iter(full_args)
}

/// Helper to create CLI args with a URL and message content already set
fn cli_with_message(args: &[&str]) -> Cli {
    let mut full_args = vec!["--url", URL, "--content", "hello"];
    full_args.extend(args);
    cli(&full_args)
}

/// Helper to parse TOML config
fn toml(content: &str) -> TomlConfig {
    TomlConfig::parse(content).unwrap()
}
