//! discord-hook: a chat channel webhook client
//!
//! A library for posting messages (text, rich embeds, file attachments)
//! to a single webhook endpoint, waiting out HTTP 429 rate limits for
//! exactly as long as the server asks.

pub mod config;
pub mod message;
pub mod time;
pub mod webhook;
