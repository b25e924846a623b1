//! Application execution logic.
//!
//! This module turns a validated configuration into a single webhook
//! delivery, or a printed preview in dry-run mode.

use thiserror::Error;
use tokio::signal;
use tokio_util::sync::CancellationToken;

use discord_hook::config::ValidatedConfig;
use discord_hook::message::MessagePayload;
use discord_hook::time::Sleeper;
use discord_hook::webhook::{
    HttpClient, HttpError, HttpWebhook, PayloadError, ReqwestClient, WebhookError, build_body,
};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Failed to create the HTTP client.
    #[error("Failed to create HTTP client: {0}")]
    ClientCreation(#[source] HttpError),

    /// The message or its attachment could not be prepared.
    #[error(transparent)]
    Payload(#[from] PayloadError),

    /// The webhook rejected the message or could not be reached.
    #[error("Delivery failed: {0}")]
    Delivery(#[source] WebhookError),

    /// A shutdown signal arrived before the message was accepted.
    #[error("Interrupted before the message was delivered")]
    Interrupted,
}

impl From<WebhookError> for RunError {
    fn from(error: WebhookError) -> Self {
        match error {
            WebhookError::Payload(e) => Self::Payload(e),
            WebhookError::Cancelled => Self::Interrupted,
            other => Self::Delivery(other),
        }
    }
}

/// Executes a single delivery.
///
/// In dry-run mode the attachment is still read and encoded, so a missing
/// file is reported without touching the network.
///
/// # Errors
///
/// Returns an error if:
/// - The HTTP client cannot be built (e.g. invalid proxy)
/// - The attachment cannot be read
/// - The webhook answers with a non-success status
/// - A shutdown signal arrives first
///
/// # Coverage Note
///
/// This function is excluded from coverage because it requires a real
/// async runtime with signal handling.
#[cfg(not(tarpaulin_include))]
pub async fn execute(config: ValidatedConfig) -> Result<(), RunError> {
    if config.dry_run {
        tracing::info!("Dry-run mode enabled - the message will be printed, not sent");
        println!("{}", preview(&config)?);
        return Ok(());
    }

    let webhook = create_webhook(&config)?;

    let shutdown = CancellationToken::new();
    let guard = shutdown.clone();
    let watcher = tokio::spawn(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, stopping...");
        guard.cancel();
    });

    let result = deliver(&webhook, &config, &shutdown).await;
    watcher.abort();
    result
}

/// Creates the HTTP webhook sender from configuration.
fn create_webhook(config: &ValidatedConfig) -> Result<HttpWebhook<ReqwestClient>, RunError> {
    HttpWebhook::from_options(config.url.clone(), config.options.clone())
        .map_err(RunError::ClientCreation)
}

/// Sends the configured message, logging the outcome.
async fn deliver<H, S>(
    webhook: &HttpWebhook<H, S>,
    config: &ValidatedConfig,
    shutdown: &CancellationToken,
) -> Result<(), RunError>
where
    H: HttpClient,
    S: Sleeper,
{
    if let Some(ref file) = config.file {
        tracing::debug!("Attaching {}", file.display());
    }

    webhook
        .send_cancellable(&config.payload, config.file.as_deref(), shutdown)
        .await?;

    tracing::info!("Message delivered");
    Ok(())
}

/// Renders the message exactly as it would be sent, default identity included.
///
/// Builds the full multipart body so attachment problems surface here too.
fn preview(config: &ValidatedConfig) -> Result<String, RunError> {
    let payload = effective_payload(config);
    let body = build_body(&payload, config.file.as_deref())?;

    if let Some(ref file) = config.file {
        tracing::info!(
            "Would attach {} ({} byte request body)",
            file.display(),
            body.len()
        );
    }

    serde_json::to_string_pretty(&payload)
        .map_err(|e| RunError::Payload(PayloadError::Serialization(e)))
}

fn effective_payload(config: &ValidatedConfig) -> MessagePayload {
    config.payload.clone().or_identity(
        config.options.username.as_deref(),
        config.options.avatar_url.as_deref(),
    )
}

/// Waits for a shutdown signal (Ctrl+C or SIGTERM).
///
/// If a handler cannot be installed, that signal is never reported.
///
/// Excluded from coverage - requires OS signal handling.
#[cfg(not(tarpaulin_include))]
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
