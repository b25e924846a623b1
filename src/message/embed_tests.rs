//! Tests for embed types and their JSON shape.

use super::{Embed, EmbedAuthor, EmbedField, EmbedFooter, MAX_COLOR};
use serde_json::{Value, json};

fn to_value(embed: &Embed) -> Value {
    serde_json::to_value(embed).unwrap()
}

mod serialization {
    use super::*;

    #[test]
    fn empty_embed_serializes_to_empty_object() {
        assert_eq!(to_value(&Embed::new()), json!({}));
    }

    #[test]
    fn unset_fields_are_omitted_not_null() {
        let embed = Embed::new().with_title("Only title");
        let json = serde_json::to_string(&embed).unwrap();

        assert_eq!(json, r#"{"title":"Only title"}"#);
        assert!(!json.contains("null"));
    }

    #[test]
    fn full_embed_serializes_every_part() {
        let embed = Embed::new()
            .with_title("Complete")
            .with_url("https://github.com")
            .with_description("All the things")
            .with_color(0x00e7_4c3c)
            .with_author(
                EmbedAuthor::new("GitHub")
                    .with_url("https://github.com")
                    .with_icon_url("https://github.com/favicon.ico"),
            )
            .with_field(EmbedField::new("Inline", "yes").inline())
            .with_field(EmbedField::new("Wide", "no"))
            .with_image("https://example.com/image.png")
            .with_thumbnail("https://example.com/thumb.png")
            .with_footer(EmbedFooter::new("Footer").with_icon_url("https://example.com/f.png"))
            .with_timestamp("2024-01-01T12:00:00Z");

        assert_eq!(
            to_value(&embed),
            json!({
                "title": "Complete",
                "url": "https://github.com",
                "description": "All the things",
                "color": 0x00e7_4c3c,
                "author": {
                    "name": "GitHub",
                    "url": "https://github.com",
                    "icon_url": "https://github.com/favicon.ico"
                },
                "fields": [
                    {"name": "Inline", "value": "yes", "inline": true},
                    {"name": "Wide", "value": "no", "inline": false}
                ],
                "image": {"url": "https://example.com/image.png"},
                "thumbnail": {"url": "https://example.com/thumb.png"},
                "footer": {"text": "Footer", "icon_url": "https://example.com/f.png"},
                "timestamp": "2024-01-01T12:00:00Z"
            })
        );
    }

    #[test]
    fn author_without_optional_links_has_only_name() {
        let embed = Embed::new().with_author(EmbedAuthor::new("Someone"));
        assert_eq!(to_value(&embed), json!({"author": {"name": "Someone"}}));
    }

    #[test]
    fn footer_without_icon_has_only_text() {
        let embed = Embed::new().with_footer(EmbedFooter::new("CI/CD Pipeline"));
        assert_eq!(to_value(&embed), json!({"footer": {"text": "CI/CD Pipeline"}}));
    }

    #[test]
    fn empty_strings_are_omitted() {
        let embed = Embed::new()
            .with_title("")
            .with_url("")
            .with_description("")
            .with_timestamp("")
            .with_author(EmbedAuthor::new("Someone").with_url("").with_icon_url(""))
            .with_footer(EmbedFooter::new("Footer").with_icon_url(""));

        assert_eq!(
            to_value(&embed),
            json!({"author": {"name": "Someone"}, "footer": {"text": "Footer"}})
        );
    }

    #[test]
    fn empty_fields_list_is_omitted() {
        let json = serde_json::to_string(&Embed::new().with_description("d")).unwrap();
        assert!(!json.contains("fields"));
    }

    #[test]
    fn zero_color_is_still_serialized_when_set() {
        let embed = Embed::new().with_color(0);
        assert_eq!(to_value(&embed), json!({"color": 0}));
    }
}

mod field {
    use super::*;

    #[test]
    fn new_field_is_not_inline() {
        let field = EmbedField::new("Name", "Value");
        assert!(!field.inline);
    }

    #[test]
    fn inline_flag_always_serializes() {
        let json = serde_json::to_string(&EmbedField::new("a", "b")).unwrap();
        assert_eq!(json, r#"{"name":"a","value":"b","inline":false}"#);
    }

    #[test]
    fn inline_builder_sets_flag() {
        assert!(EmbedField::new("a", "b").inline().inline);
    }

    #[test]
    fn fields_keep_insertion_order() {
        let embed = Embed::new()
            .with_field(EmbedField::new("first", "1"))
            .with_field(EmbedField::new("second", "2"))
            .with_field(EmbedField::new("third", "3"));

        let names: Vec<_> = embed.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["first", "second", "third"]);
    }
}

mod color {
    use super::*;

    #[test]
    fn color_within_range_is_kept() {
        let embed = Embed::new().with_color(0x0034_98db);
        assert_eq!(embed.color, Some(0x0034_98db));
    }

    #[test]
    fn max_color_is_kept() {
        assert_eq!(Embed::new().with_color(MAX_COLOR).color, Some(MAX_COLOR));
    }

    #[test]
    fn color_is_masked_to_24_bits() {
        let embed = Embed::new().with_color(0xFF12_3456);
        assert_eq!(embed.color, Some(0x0012_3456));
    }
}
