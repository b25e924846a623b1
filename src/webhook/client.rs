//! Production HTTP client implementation using reqwest.

use std::time::Duration;

use super::{HttpClient, HttpError, HttpRequest, HttpResponse};

/// Production HTTP client using reqwest.
///
/// A thin wrapper around `reqwest::Client` that implements the
/// [`HttpClient`] trait. Timeout and proxy are fixed when the client is
/// built and apply to every request made through it, retries included.
///
/// # Example
///
/// ```no_run
/// use discord_hook::webhook::{ReqwestClient, HttpClient, HttpRequest};
/// use std::time::Duration;
/// use url::Url;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let proxy = Url::parse("http://proxy.example.com:8080")?;
/// let client = ReqwestClient::configured(Duration::from_secs(30), Some(&proxy))?;
/// let url = Url::parse("https://discord.com/api/webhooks/1/token")?;
/// let response = client.request(HttpRequest::post(url)).await?;
/// println!("Status: {}", response.status);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    inner: reqwest::Client,
}

impl ReqwestClient {
    /// Creates a new HTTP client with reqwest's default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: reqwest::Client::new(),
        }
    }

    /// Creates an HTTP client with a request timeout and optional proxy.
    ///
    /// When `proxy` is set, all requests are routed through it regardless
    /// of scheme.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::ClientBuild`] if the proxy URL is unusable or
    /// the TLS backend cannot be initialized.
    pub fn configured(timeout: Duration, proxy: Option<&url::Url>) -> Result<Self, HttpError> {
        let mut builder = reqwest::Client::builder().timeout(timeout);

        if let Some(proxy) = proxy {
            let proxy = reqwest::Proxy::all(proxy.as_str())
                .map_err(|e| HttpError::ClientBuild(Box::new(e)))?;
            builder = builder.proxy(proxy);
        }

        builder
            .build()
            .map(Self::from_client)
            .map_err(|e| HttpError::ClientBuild(Box::new(e)))
    }

    /// Creates an HTTP client from an existing reqwest client.
    ///
    /// Useful when you need custom configuration (TLS, pooling, etc.).
    #[must_use]
    pub const fn from_client(client: reqwest::Client) -> Self {
        Self { inner: client }
    }
}

impl Default for ReqwestClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient for ReqwestClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let mut builder = self.inner.request(req.method, req.url.as_str());

        for (name, value) in &req.headers {
            builder = builder.header(name, value);
        }

        if let Some(body) = req.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                HttpError::Timeout
            } else if e.is_builder() {
                HttpError::InvalidUrl(e.to_string())
            } else {
                HttpError::Connection(Box::new(e))
            }
        })?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    HttpError::Timeout
                } else {
                    HttpError::Connection(Box::new(e))
                }
            })?
            .to_vec();

        Ok(HttpResponse::new(status, headers, body))
    }
}
