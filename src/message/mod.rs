//! Message data model for webhook deliveries.
//!
//! This module provides:
//! - The top-level message document ([`MessagePayload`])
//! - Rich embed cards ([`Embed`]) and their parts ([`EmbedField`],
//!   [`EmbedAuthor`], [`EmbedFooter`], [`EmbedMedia`])
//!
//! # Serialization
//!
//! Every optional field that is left unset is omitted from the JSON document
//! entirely; it is never emitted as `null` or an empty string. An optional
//! text field set to `""` counts as unset. Empty `embeds` and `fields` lists
//! are omitted as well. The one exception is [`EmbedField::inline`], which
//! always serializes.

mod embed;
mod payload;

#[cfg(test)]
mod embed_tests;

pub use embed::{Embed, EmbedAuthor, EmbedField, EmbedFooter, EmbedMedia, MAX_COLOR};
pub use payload::MessagePayload;

/// Returns true for optional text that is absent or empty.
#[allow(clippy::ref_option)]
fn is_unset(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(str::is_empty)
}
