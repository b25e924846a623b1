//! The top-level message document.

use serde::Serialize;

use super::Embed;

/// A message to deliver through a webhook.
///
/// At least one of `content`, `embeds`, or an attached file should be
/// present for a send to be meaningful. This is not enforced here; the
/// sender logs a warning when it is asked to deliver an empty message.
///
/// # Example
///
/// ```
/// use discord_hook::message::{Embed, MessagePayload};
///
/// let payload = MessagePayload::new()
///     .with_content("Nightly build finished")
///     .with_username("CI")
///     .with_embed(Embed::new().with_title("Summary"));
///
/// let json = serde_json::to_string(&payload).unwrap();
/// assert!(json.contains(r#""username":"CI""#));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MessagePayload {
    /// Plain text body
    #[serde(skip_serializing_if = "crate::message::is_unset")]
    pub content: Option<String>,

    /// Display name override
    #[serde(skip_serializing_if = "crate::message::is_unset")]
    pub username: Option<String>,

    /// Avatar image URL override
    #[serde(skip_serializing_if = "crate::message::is_unset")]
    pub avatar_url: Option<String>,

    /// Text-to-speech flag (serialized only when set)
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub tts: bool,

    /// Embed cards, rendered in order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub embeds: Vec<Embed>,
}

impl MessagePayload {
    /// Creates an empty payload.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a payload carrying only text content.
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self::new().with_content(content)
    }

    /// Sets the text content.
    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Sets the display name override.
    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Sets the avatar URL override.
    #[must_use]
    pub fn with_avatar_url(mut self, avatar_url: impl Into<String>) -> Self {
        self.avatar_url = Some(avatar_url.into());
        self
    }

    /// Sets the text-to-speech flag.
    #[must_use]
    pub const fn with_tts(mut self, tts: bool) -> Self {
        self.tts = tts;
        self
    }

    /// Appends an embed.
    #[must_use]
    pub fn with_embed(mut self, embed: Embed) -> Self {
        self.embeds.push(embed);
        self
    }

    /// Fills `username` and `avatar_url` from the given defaults where
    /// this payload leaves them unset or empty.
    #[must_use]
    pub fn or_identity(mut self, username: Option<&str>, avatar_url: Option<&str>) -> Self {
        if super::is_unset(&self.username) {
            self.username = username.map(ToString::to_string);
        }
        if super::is_unset(&self.avatar_url) {
            self.avatar_url = avatar_url.map(ToString::to_string);
        }
        self
    }

    /// Returns true if the payload carries neither content nor embeds.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.as_deref().is_none_or(str::is_empty) && self.embeds.is_empty()
    }

    /// Serializes the payload to its JSON document.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails, which does not happen for
    /// values built through this crate's types.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
