//! Tests for TOML configuration parsing.

use super::toml::{TomlConfig, default_config_template};

mod parsing {
    use super::*;

    #[test]
    fn parse_minimal_config() {
        let toml = r#"
            [webhook]
            url = "https://discord.com/api/webhooks/1/abc"
        "#;

        let config = TomlConfig::parse(toml).unwrap();
        assert_eq!(
            config.webhook.url.as_deref(),
            Some("https://discord.com/api/webhooks/1/abc")
        );
        assert!(config.webhook.username.is_none());
        assert!(config.rate_limit.max_retries.is_none());
    }

    #[test]
    fn parse_full_webhook_section() {
        let toml = r#"
            [webhook]
            url = "https://discord.com/api/webhooks/1/abc"
            username = "Status Bot"
            avatar_url = "https://cdn.example.com/avatar.png"
            proxy = "http://proxy.example.com:8080"
            timeout = 45
        "#;

        let config = TomlConfig::parse(toml).unwrap();
        let webhook = &config.webhook;

        assert_eq!(webhook.username.as_deref(), Some("Status Bot"));
        assert_eq!(
            webhook.avatar_url.as_deref(),
            Some("https://cdn.example.com/avatar.png")
        );
        assert_eq!(webhook.proxy.as_deref(), Some("http://proxy.example.com:8080"));
        assert_eq!(webhook.timeout, Some(45));
    }

    #[test]
    fn parse_rate_limit_section() {
        let toml = r"
            [rate_limit]
            max_retries = 10
            default_wait_ms = 500
        ";

        let config = TomlConfig::parse(toml).unwrap();

        assert_eq!(config.rate_limit.max_retries, Some(10));
        assert_eq!(config.rate_limit.default_wait_ms, Some(500));
    }

    #[test]
    fn parse_empty_config() {
        let config = TomlConfig::parse("").unwrap();

        assert!(config.webhook.url.is_none());
        assert!(config.webhook.timeout.is_none());
        assert!(config.rate_limit.default_wait_ms.is_none());
    }

    #[test]
    fn reject_unknown_fields() {
        let toml = r#"
            [webhook]
            url = "https://example.com"
            method = "PUT"
        "#;

        assert!(TomlConfig::parse(toml).is_err());
    }

    #[test]
    fn reject_unknown_sections() {
        let toml = r"
            [retry]
            max_attempts = 3
        ";

        assert!(TomlConfig::parse(toml).is_err());
    }

    #[test]
    fn reject_wrong_types() {
        let toml = r#"
            [webhook]
            timeout = "thirty"
        "#;

        assert!(TomlConfig::parse(toml).is_err());
    }
}

mod default_template {
    use super::*;

    #[test]
    fn template_is_valid_toml() {
        let template = default_config_template();
        let result = TomlConfig::parse(&template);

        assert!(result.is_ok(), "Template should be valid TOML: {result:?}");
    }

    #[test]
    fn template_contains_all_sections() {
        let template = default_config_template();

        assert!(template.contains("[webhook]"));
        assert!(template.contains("[rate_limit]"));
    }

    #[test]
    fn template_documents_every_key() {
        let template = default_config_template();

        for key in [
            "url",
            "username",
            "avatar_url",
            "proxy",
            "timeout",
            "max_retries",
            "default_wait_ms",
        ] {
            assert!(template.contains(key), "Template should mention {key}");
        }
    }

    #[test]
    fn template_sets_default_timeout() {
        let config = TomlConfig::parse(&default_config_template()).unwrap();
        assert_eq!(config.webhook.timeout, Some(30));
    }
}

mod file_loading {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;
    use crate::config::ConfigError;

    #[test]
    fn load_valid_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            [webhook]
            url = "https://discord.com/api/webhooks/1/abc"
            "#
        )
        .unwrap();

        let config = TomlConfig::load(file.path()).unwrap();
        assert!(config.webhook.url.is_some());
    }

    #[test]
    fn load_nonexistent_file_returns_error() {
        let result = TomlConfig::load(std::path::Path::new("nonexistent_12345.toml"));
        assert!(matches!(result, Err(ConfigError::FileRead { .. })));
    }

    #[test]
    fn load_invalid_toml_file_returns_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "this is not valid toml [[[").unwrap();

        let result = TomlConfig::load(file.path());
        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }
}
