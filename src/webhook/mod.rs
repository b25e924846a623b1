//! Webhook layer for delivering messages to a chat channel endpoint.
//!
//! This module provides types and traits for:
//! - Encoding a message and attachment as multipart ([`build_body`], [`MultipartBody`])
//! - Building HTTP requests ([`HttpRequest`])
//! - Handling HTTP responses ([`HttpResponse`])
//! - Abstracting HTTP clients ([`HttpClient`])
//! - Production HTTP client implementation ([`ReqwestClient`])
//! - Delivery with rate-limit backoff ([`WebhookSender`], [`HttpWebhook`])
//! - Client and backoff configuration ([`WebhookOptions`], [`RateLimitPolicy`])

mod client;
mod error;
mod http;
mod multipart;
mod options;
mod rate_limit;
mod sender;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use client::ReqwestClient;
pub use error::{HttpError, PayloadError, WebhookError};
pub use http::{HttpClient, HttpRequest, HttpResponse};
pub use multipart::{FILE_FIELD, MultipartBody, PAYLOAD_FIELD, build_body};
pub use options::WebhookOptions;
pub use rate_limit::{RateLimitPolicy, parse_retry_after};
pub use sender::{HttpWebhook, USER_AGENT_STRING, WebhookSender};
