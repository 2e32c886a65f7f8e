//! Tag classification tables that drive the parser's recovery rules.

use crate::tokenizer::helpers::names_match;

/// Elements that never have content or a closing tag.
pub const VOID_ELEMENTS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Block-level elements whose start tag implicitly ends an open `<p>`.
pub const PARAGRAPH_CLOSING_TAGS: [&str; 26] = [
    "address",
    "article",
    "aside",
    "blockquote",
    "div",
    "dl",
    "fieldset",
    "footer",
    "form",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "header",
    "hgroup",
    "hr",
    "main",
    "nav",
    "ol",
    "p",
    "pre",
    "section",
    "table",
    "ul",
];

/// Whether `name` is a void element, ignoring case.
#[must_use]
pub fn is_void_element(name: &str) -> bool {
    VOID_ELEMENTS.iter().any(|void| names_match(void, name))
}

/// Whether opening `name` closes an open paragraph, ignoring case.
#[must_use]
pub fn is_paragraph_closing_tag(name: &str) -> bool {
    PARAGRAPH_CLOSING_TAGS
        .iter()
        .any(|tag| names_match(tag, name))
}
