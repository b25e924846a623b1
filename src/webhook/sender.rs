//! Webhook sender trait and HTTP implementation.

use std::path::Path;

use http::HeaderValue;
use http::header::{CONTENT_TYPE, USER_AGENT};
use tokio_util::sync::CancellationToken;

use super::{
    HttpClient, HttpError, HttpRequest, MultipartBody, RateLimitPolicy, ReqwestClient,
    WebhookError, WebhookOptions, build_body,
};
use crate::message::{Embed, MessagePayload};
use crate::time::{Sleeper, TokioSleeper};

/// User agent sent with every delivery attempt.
pub const USER_AGENT_STRING: &str = concat!("discord-hook/", env!("CARGO_PKG_VERSION"));

/// Trait for delivering messages to a webhook endpoint.
///
/// This abstraction allows callers to swap in mocks and enables
/// decorating delivery with their own concerns.
///
/// # Implementation Notes
///
/// Implementations absorb rate limiting internally. Only terminal
/// failures are returned.
pub trait WebhookSender: Send + Sync {
    /// Delivers a message, optionally with a file attachment.
    ///
    /// # Errors
    ///
    /// Returns [`WebhookError`] if the body cannot be built or the
    /// endpoint does not accept the message.
    fn send(
        &self,
        payload: &MessagePayload,
        file: Option<&Path>,
    ) -> impl std::future::Future<Output = Result<(), WebhookError>> + Send;
}

/// HTTP-based webhook client that honors server rate limits.
///
/// Each send builds one multipart body and POSTs it to the configured URL.
/// A 429 response puts the send to sleep for the server's `retry_after`
/// and then resends the identical body; 2xx ends the send successfully;
/// any other status or a transport failure ends it with an error.
///
/// The client holds no per-send state, so one instance can serve many
/// concurrent sends.
///
/// # Type Parameters
///
/// - `H`: The HTTP client implementation
/// - `S`: The sleeper used for backoff (defaults to [`TokioSleeper`])
///
/// # Example
///
/// ```no_run
/// use discord_hook::webhook::{HttpWebhook, WebhookOptions};
/// use url::Url;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let webhook = HttpWebhook::from_options(
///     Url::parse("https://discord.com/api/webhooks/1/token")?,
///     WebhookOptions::new().with_username("Example Bot"),
/// )?;
///
/// webhook.send_message("Hello from Rust").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct HttpWebhook<H, S = TokioSleeper> {
    client: H,
    sleeper: S,
    url: url::Url,
    username: Option<String>,
    avatar_url: Option<String>,
    rate_limit: RateLimitPolicy,
}

impl<H> HttpWebhook<H, TokioSleeper> {
    /// Creates a webhook client with default settings.
    ///
    /// No default identity, default rate-limit policy, and
    /// [`TokioSleeper`] for backoff.
    #[must_use]
    pub fn new(client: H, url: url::Url) -> Self {
        Self {
            client,
            sleeper: TokioSleeper,
            url,
            username: None,
            avatar_url: None,
            rate_limit: RateLimitPolicy::default(),
        }
    }
}

impl HttpWebhook<ReqwestClient, TokioSleeper> {
    /// Creates a reqwest-backed webhook client from options.
    ///
    /// The options' timeout and proxy configure the transport; the
    /// identity and rate-limit settings configure the sender.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::ClientBuild`] if the transport cannot be built.
    pub fn from_options(url: url::Url, options: WebhookOptions) -> Result<Self, HttpError> {
        let client = ReqwestClient::configured(options.timeout, options.proxy.as_ref())?;
        Ok(Self::new(client, url).with_options(options))
    }
}

impl<H, S> HttpWebhook<H, S> {
    /// Sets a custom sleeper for backoff delays.
    ///
    /// This is primarily useful for testing to avoid actual delays.
    #[must_use]
    pub fn with_sleeper<S2>(self, sleeper: S2) -> HttpWebhook<H, S2> {
        HttpWebhook {
            client: self.client,
            sleeper,
            url: self.url,
            username: self.username,
            avatar_url: self.avatar_url,
            rate_limit: self.rate_limit,
        }
    }

    /// Applies the identity and rate-limit settings from `options`.
    ///
    /// Transport settings (timeout, proxy) belong to the HTTP client and
    /// are not touched here.
    #[must_use]
    pub fn with_options(mut self, options: WebhookOptions) -> Self {
        self.username = options.username;
        self.avatar_url = options.avatar_url;
        self.rate_limit = options.rate_limit;
        self
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

    /// Sets the rate-limit policy.
    #[must_use]
    pub const fn with_rate_limit(mut self, policy: RateLimitPolicy) -> Self {
        self.rate_limit = policy;
        self
    }

    /// Returns the configured URL.
    #[must_use]
    pub const fn url(&self) -> &url::Url {
        &self.url
    }

    /// Returns the default display name.
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Returns the default avatar URL.
    #[must_use]
    pub fn avatar_url(&self) -> Option<&str> {
        self.avatar_url.as_deref()
    }

    /// Returns the configured rate-limit policy.
    #[must_use]
    pub const fn rate_limit(&self) -> &RateLimitPolicy {
        &self.rate_limit
    }
}

/// Result of a single delivery attempt that did not fail terminally.
enum AttemptOutcome {
    Delivered,
    RateLimited(std::time::Duration),
}

impl<H: HttpClient, S: Sleeper> HttpWebhook<H, S> {
    /// Sends a plain text message.
    ///
    /// # Errors
    ///
    /// See [`WebhookSender::send`].
    pub async fn send_message(&self, content: impl Into<String>) -> Result<(), WebhookError> {
        self.send(&MessagePayload::text(content), None).await
    }

    /// Sends a single embed.
    ///
    /// # Errors
    ///
    /// See [`WebhookSender::send`].
    pub async fn send_embed(&self, embed: Embed) -> Result<(), WebhookError> {
        self.send(&MessagePayload::new().with_embed(embed), None)
            .await
    }

    /// Sends a single embed with a file attachment.
    ///
    /// # Errors
    ///
    /// See [`WebhookSender::send`].
    pub async fn send_embed_with_file(
        &self,
        embed: Embed,
        file: impl AsRef<Path>,
    ) -> Result<(), WebhookError> {
        self.send(&MessagePayload::new().with_embed(embed), Some(file.as_ref()))
            .await
    }

    /// Sends a file with no text or embeds.
    ///
    /// # Errors
    ///
    /// See [`WebhookSender::send`].
    pub async fn send_file(&self, file: impl AsRef<Path>) -> Result<(), WebhookError> {
        self.send(&MessagePayload::new(), Some(file.as_ref())).await
    }

    /// Sends a caller-built payload.
    ///
    /// # Errors
    ///
    /// See [`WebhookSender::send`].
    pub async fn send_payload(&self, payload: &MessagePayload) -> Result<(), WebhookError> {
        self.send(payload, None).await
    }

    /// Sends a caller-built payload with a file attachment.
    ///
    /// # Errors
    ///
    /// See [`WebhookSender::send`].
    pub async fn send_payload_with_file(
        &self,
        payload: &MessagePayload,
        file: impl AsRef<Path>,
    ) -> Result<(), WebhookError> {
        self.send(payload, Some(file.as_ref())).await
    }

    /// Sends a message unless `cancel` fires first.
    ///
    /// Cancellation interrupts an in-flight request or a rate-limit wait.
    ///
    /// # Errors
    ///
    /// Returns [`WebhookError::Cancelled`] if the token is cancelled before
    /// the send completes, otherwise the same errors as
    /// [`WebhookSender::send`].
    pub async fn send_cancellable(
        &self,
        payload: &MessagePayload,
        file: Option<&Path>,
        cancel: &CancellationToken,
    ) -> Result<(), WebhookError> {
        if cancel.is_cancelled() {
            return Err(WebhookError::Cancelled);
        }

        let body = self.prepare(payload, file)?;

        tokio::select! {
            biased;
            () = cancel.cancelled() => Err(WebhookError::Cancelled),
            result = self.deliver(&body) => result,
        }
    }

    /// Fills in the default identity and encodes the multipart body.
    fn prepare(
        &self,
        payload: &MessagePayload,
        file: Option<&Path>,
    ) -> Result<MultipartBody, WebhookError> {
        let payload = payload
            .clone()
            .or_identity(self.username.as_deref(), self.avatar_url.as_deref());

        if payload.is_empty() && file.is_none_or(|p| p.as_os_str().is_empty()) {
            tracing::warn!("Sending a message with no content, embeds, or attachment");
        }

        build_body(&payload, file).map_err(WebhookError::from)
    }

    /// Builds the request shared by every attempt of one send.
    fn build_request(&self, body: &MultipartBody) -> Result<HttpRequest, HttpError> {
        let content_type = HeaderValue::from_str(body.content_type())
            .map_err(|e| HttpError::InvalidHeader(e.to_string()))?;

        Ok(HttpRequest::post(self.url.clone())
            .with_header(CONTENT_TYPE, content_type)
            .with_header(USER_AGENT, HeaderValue::from_static(USER_AGENT_STRING))
            .with_body(body.body().clone()))
    }

    /// Executes a single attempt.
    async fn attempt(&self, request: &HttpRequest) -> Result<AttemptOutcome, WebhookError> {
        let response = self.client.request(request.clone()).await?;

        if response.is_success() {
            return Ok(AttemptOutcome::Delivered);
        }

        if response.is_rate_limited() {
            return Ok(AttemptOutcome::RateLimited(
                self.rate_limit.wait_for(&response.body),
            ));
        }

        Err(WebhookError::Status {
            status: response.status,
            body: response.body_text().map(ToString::to_string),
        })
    }

    /// Posts a pre-built body, waiting out rate limits.
    ///
    /// Every attempt sends the same bytes. Without a retry cap in the
    /// rate-limit policy this keeps retrying for as long as the server
    /// answers 429.
    ///
    /// # Errors
    ///
    /// - [`WebhookError::Transport`] on connection failure or timeout
    /// - [`WebhookError::Status`] on any status other than 2xx and 429
    /// - [`WebhookError::RateLimitExhausted`] when a retry cap is exceeded
    pub async fn deliver(&self, body: &MultipartBody) -> Result<(), WebhookError> {
        let request = self.build_request(body)?;
        let mut retries: u32 = 0;

        loop {
            let attempt = retries.saturating_add(1);
            tracing::debug!(attempt, bytes = body.len(), "Posting webhook message");

            match self.attempt(&request).await? {
                AttemptOutcome::Delivered => {
                    tracing::debug!(attempts = attempt, "Webhook message delivered");
                    return Ok(());
                }
                AttemptOutcome::RateLimited(wait) => {
                    if !self.rate_limit.allows_retry(retries) {
                        return Err(WebhookError::RateLimitExhausted { attempts: attempt });
                    }

                    tracing::warn!(
                        wait_ms = u64::try_from(wait.as_millis()).unwrap_or(u64::MAX),
                        "Webhook is rate limited, waiting before retry"
                    );
                    self.sleeper.sleep(wait).await;
                    retries = retries.saturating_add(1);
                }
            }
        }
    }
}

impl<H: HttpClient, S: Sleeper> WebhookSender for HttpWebhook<H, S> {
    async fn send(&self, payload: &MessagePayload, file: Option<&Path>) -> Result<(), WebhookError> {
        let body = self.prepare(payload, file)?;
        self.deliver(&body).await
    }
}
