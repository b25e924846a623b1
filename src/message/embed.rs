//! Embed card types.

use serde::Serialize;

/// Largest valid embed color (`0xFFFFFF`, interpreted as RGB).
pub const MAX_COLOR: u32 = 0x00FF_FFFF;

/// A rich card attached to a message.
///
/// All fields are optional. Use the `with_*` builders to populate them:
///
/// ```
/// use discord_hook::message::{Embed, EmbedField};
///
/// let embed = Embed::new()
///     .with_title("Deployment")
///     .with_description("Version 1.2.3 is live")
///     .with_color(0x2ecc71)
///     .with_field(EmbedField::new("Environment", "Production").inline());
///
/// assert_eq!(embed.fields.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Embed {
    /// Card title
    #[serde(skip_serializing_if = "crate::message::is_unset")]
    pub title: Option<String>,

    /// Link target of the title
    #[serde(skip_serializing_if = "crate::message::is_unset")]
    pub url: Option<String>,

    /// Body text
    #[serde(skip_serializing_if = "crate::message::is_unset")]
    pub description: Option<String>,

    /// Sidebar color as `0xRRGGBB`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,

    /// Author line shown above the title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<EmbedAuthor>,

    /// Name/value pairs, rendered in order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<EmbedField>,

    /// Large image
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<EmbedMedia>,

    /// Small image in the top-right corner
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<EmbedMedia>,

    /// Footer line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<EmbedFooter>,

    /// ISO-8601 timestamp shown next to the footer
    #[serde(skip_serializing_if = "crate::message::is_unset")]
    pub timestamp: Option<String>,
}

impl Embed {
    /// Creates an empty embed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the title link.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the color.
    ///
    /// Only the low 24 bits are kept, so the stored value is always
    /// within `0..=`[`MAX_COLOR`].
    #[must_use]
    pub const fn with_color(mut self, color: u32) -> Self {
        self.color = Some(color & MAX_COLOR);
        self
    }

    /// Sets the author line.
    #[must_use]
    pub fn with_author(mut self, author: EmbedAuthor) -> Self {
        self.author = Some(author);
        self
    }

    /// Appends a field.
    #[must_use]
    pub fn with_field(mut self, field: EmbedField) -> Self {
        self.fields.push(field);
        self
    }

    /// Sets the large image URL.
    #[must_use]
    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image = Some(EmbedMedia::new(url));
        self
    }

    /// Sets the thumbnail URL.
    #[must_use]
    pub fn with_thumbnail(mut self, url: impl Into<String>) -> Self {
        self.thumbnail = Some(EmbedMedia::new(url));
        self
    }

    /// Sets the footer.
    #[must_use]
    pub fn with_footer(mut self, footer: EmbedFooter) -> Self {
        self.footer = Some(footer);
        self
    }

    /// Sets the timestamp (ISO-8601, e.g. `2024-01-01T12:00:00Z`).
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }
}

/// A name/value pair inside an embed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedField {
    /// Field heading
    pub name: String,

    /// Field body
    pub value: String,

    /// Layout hint: render side by side with neighboring inline fields.
    ///
    /// Always serialized, even when `false`.
    pub inline: bool,
}

impl EmbedField {
    /// Creates a full-width field.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            inline: false,
        }
    }

    /// Marks the field as inline.
    #[must_use]
    pub const fn inline(mut self) -> Self {
        self.inline = true;
        self
    }
}

/// Author line of an embed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedAuthor {
    pub name: String,

    #[serde(skip_serializing_if = "crate::message::is_unset")]
    pub url: Option<String>,

    #[serde(skip_serializing_if = "crate::message::is_unset")]
    pub icon_url: Option<String>,
}

impl EmbedAuthor {
    /// Creates an author line with just a name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: None,
            icon_url: None,
        }
    }

    /// Sets the link target of the author name.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Sets the author icon.
    #[must_use]
    pub fn with_icon_url(mut self, icon_url: impl Into<String>) -> Self {
        self.icon_url = Some(icon_url.into());
        self
    }
}

/// Footer line of an embed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedFooter {
    pub text: String,

    #[serde(skip_serializing_if = "crate::message::is_unset")]
    pub icon_url: Option<String>,
}

impl EmbedFooter {
    /// Creates a footer with just text.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            icon_url: None,
        }
    }

    /// Sets the footer icon.
    #[must_use]
    pub fn with_icon_url(mut self, icon_url: impl Into<String>) -> Self {
        self.icon_url = Some(icon_url.into());
        self
    }
}

/// Image or thumbnail reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedMedia {
    pub url: String,
}

impl EmbedMedia {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}
