//! HTML Tag Definitions
//!
//! The handful of per-tag parsing rules a fragment parser needs: void elements
//! never have children or end tags, raw-text elements swallow markup until their
//! end tag.

use once_cell::sync::Lazy;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagContentType {
    RawText,
    EscapableRawText,
    ParsableData,
}

#[derive(Debug, Clone)]
pub struct HtmlTagDefinition {
    pub is_void: bool,
    pub content_type: TagContentType,
}

impl HtmlTagDefinition {
    const fn new() -> Self {
        HtmlTagDefinition {
            is_void: false,
            content_type: TagContentType::ParsableData,
        }
    }

    const fn void() -> Self {
        HtmlTagDefinition {
            is_void: true,
            content_type: TagContentType::ParsableData,
        }
    }

    const fn with_content_type(content_type: TagContentType) -> Self {
        HtmlTagDefinition {
            is_void: false,
            content_type,
        }
    }
}

static DEFAULT_TAG_DEFINITION: HtmlTagDefinition = HtmlTagDefinition::new();

static TAG_DEFINITIONS: Lazy<HashMap<&'static str, HtmlTagDefinition>> = Lazy::new(|| {
    let mut map = HashMap::new();
    for name in [
        "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
        "source", "track", "wbr",
    ] {
        map.insert(name, HtmlTagDefinition::void());
    }
    map.insert(
        "script",
        HtmlTagDefinition::with_content_type(TagContentType::RawText),
    );
    map.insert(
        "style",
        HtmlTagDefinition::with_content_type(TagContentType::RawText),
    );
    map.insert(
        "textarea",
        HtmlTagDefinition::with_content_type(TagContentType::EscapableRawText),
    );
    map.insert(
        "title",
        HtmlTagDefinition::with_content_type(TagContentType::EscapableRawText),
    );
    map
});

/// Tag definitions are looked up case-insensitively; unknown tags (including
/// custom elements) get the default definition.
pub fn get_html_tag_definition(tag_name: &str) -> &'static HtmlTagDefinition {
    let lower = tag_name.to_ascii_lowercase();
    TAG_DEFINITIONS
        .get(lower.as_str())
        .unwrap_or(&DEFAULT_TAG_DEFINITION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_void_elements() {
        assert!(get_html_tag_definition("input").is_void);
        assert!(get_html_tag_definition("BR").is_void);
        assert!(!get_html_tag_definition("div").is_void);
        assert!(!get_html_tag_definition("my-element").is_void);
    }

    #[test]
    fn test_raw_text_elements() {
        assert_eq!(
            get_html_tag_definition("script").content_type,
            TagContentType::RawText
        );
        assert_eq!(
            get_html_tag_definition("span").content_type,
            TagContentType::ParsableData
        );
    }
}
