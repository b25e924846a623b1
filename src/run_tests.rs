//! Tests for the run module.

use super::*;

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use discord_hook::config::Cli;
use discord_hook::time::InstantSleeper;
use discord_hook::webhook::{HttpRequest, HttpResponse};

const URL: &str = "https://discord.com/api/webhooks/1/token";

fn config(args: &[&str]) -> ValidatedConfig {
    let mut full_args = vec!["discord-hook", "--url", URL];
    full_args.extend(args);
    ValidatedConfig::from_raw(&Cli::parse_from_iter(full_args), None).unwrap()
}

/// Replays a fixed status for every request and counts calls.
#[derive(Debug)]
struct StatusClient {
    statuses: Mutex<Vec<http::StatusCode>>,
    calls: AtomicUsize,
}

impl StatusClient {
    fn new(statuses: Vec<http::StatusCode>) -> Self {
        Self {
            statuses: Mutex::new(statuses),
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl HttpClient for StatusClient {
    async fn request(&self, _req: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let status = self.statuses.lock().unwrap().remove(0);
        Ok(HttpResponse::new(status, http::HeaderMap::new(), vec![]))
    }
}

fn webhook(statuses: Vec<http::StatusCode>) -> HttpWebhook<StatusClient, InstantSleeper> {
    let url = url::Url::parse(URL).unwrap();
    HttpWebhook::new(StatusClient::new(statuses), url).with_sleeper(InstantSleeper)
}

mod run_error {
    use super::*;

    #[test]
    fn cancelled_maps_to_interrupted() {
        let error = RunError::from(WebhookError::Cancelled);
        assert!(matches!(error, RunError::Interrupted));
        assert_eq!(
            error.to_string(),
            "Interrupted before the message was delivered"
        );
    }

    #[test]
    fn payload_error_is_unwrapped() {
        let error = RunError::from(WebhookError::Payload(PayloadError::FileAccess {
            path: "missing.txt".into(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        }));

        assert!(matches!(error, RunError::Payload(_)));
        assert!(error.to_string().starts_with("Failed to read attachment"));
    }

    #[test]
    fn status_error_is_delivery_failure() {
        let error = RunError::from(WebhookError::Status {
            status: http::StatusCode::NOT_FOUND,
            body: None,
        });

        assert!(matches!(error, RunError::Delivery(_)));
        assert!(error.to_string().contains("404 Not Found"));
    }
}

mod create_webhook {
    use super::*;

    #[test]
    fn creates_webhook_with_url_and_identity() {
        let config = config(&["-m", "hi", "--username", "Bot", "--max-rate-limit-retries", "3"]);
        let webhook = create_webhook(&config).unwrap();

        assert_eq!(webhook.url().as_str(), URL);
        assert_eq!(webhook.username(), Some("Bot"));
        assert_eq!(webhook.rate_limit().max_retries, Some(3));
    }

    #[test]
    fn creates_webhook_with_proxy() {
        let config = config(&["-m", "hi", "--proxy", "http://127.0.0.1:3128"]);
        assert!(create_webhook(&config).is_ok());
    }
}

mod deliver {
    use super::*;

    #[tokio::test]
    async fn sends_once_on_success() {
        let webhook = webhook(vec![http::StatusCode::NO_CONTENT]);
        let result = deliver(&webhook, &config(&["-m", "hi"]), &CancellationToken::new()).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn retries_through_rate_limit() {
        let webhook = webhook(vec![
            http::StatusCode::TOO_MANY_REQUESTS,
            http::StatusCode::TOO_MANY_REQUESTS,
            http::StatusCode::OK,
        ]);

        deliver(&webhook, &config(&["-m", "hi"]), &CancellationToken::new())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn status_failure_is_reported() {
        let webhook = webhook(vec![http::StatusCode::UNAUTHORIZED]);
        let result = deliver(&webhook, &config(&["-m", "hi"]), &CancellationToken::new()).await;

        assert!(matches!(result, Err(RunError::Delivery(_))));
    }

    #[tokio::test]
    async fn cancelled_token_sends_nothing() {
        let client = StatusClient::new(vec![http::StatusCode::OK]);
        let webhook = HttpWebhook::new(client, url::Url::parse(URL).unwrap())
            .with_sleeper(InstantSleeper);
        let token = CancellationToken::new();
        token.cancel();

        let result = deliver(&webhook, &config(&["-m", "hi"]), &token).await;

        assert!(matches!(result, Err(RunError::Interrupted)));
    }

    #[tokio::test]
    async fn missing_attachment_is_payload_error() {
        let webhook = webhook(vec![http::StatusCode::OK]);
        let config = config(&["-f", "/definitely/not/here.txt"]);

        let result = deliver(&webhook, &config, &CancellationToken::new()).await;

        assert!(matches!(result, Err(RunError::Payload(_))));
    }
}

mod preview {
    use super::*;
    use std::io::Write;

    #[test]
    fn preview_includes_default_identity() {
        let config = config(&["-m", "hi", "--username", "Bot"]);
        let json: serde_json::Value = serde_json::from_str(&preview(&config).unwrap()).unwrap();

        assert_eq!(json, serde_json::json!({"content": "hi", "username": "Bot"}));
    }

    #[test]
    fn preview_omits_empty_username() {
        let config = config(&["-m", "hi", "--username", ""]);
        assert_eq!(
            preview(&config).unwrap(),
            serde_json::to_string_pretty(&serde_json::json!({"content": "hi"})).unwrap()
        );
    }

    #[test]
    fn preview_keeps_embed() {
        let config = config(&["--title", "Report", "--inline-field", "Users=1,234"]);
        let json: serde_json::Value = serde_json::from_str(&preview(&config).unwrap()).unwrap();

        assert_eq!(json["embeds"][0]["title"], "Report");
        assert_eq!(json["embeds"][0]["fields"][0]["inline"], true);
    }

    #[test]
    fn preview_reads_attachment() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"log line").unwrap();
        let config = config(&["-f", file.path().to_str().unwrap()]);

        assert_eq!(preview(&config).unwrap(), "{}");
    }

    #[test]
    fn preview_reports_missing_attachment() {
        let config = config(&["-f", "/definitely/not/here.txt"]);
        assert!(matches!(preview(&config), Err(RunError::Payload(_))));
    }
}
