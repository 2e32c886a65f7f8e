//! Scanning primitives for the lexer.
//!
//! Every scanner takes a byte offset and answers with the offset just past
//! what it recognised, or `None` without consuming anything. Rules are then
//! tried in priority order from the same offset, which gives the grammar its
//! first-match, backtracking behaviour without any shared mutable cursor.

use super::attribute::HtmlAttribute;
use super::core::Lexer;

/// Case-insensitive name comparison used for tags and dispatch.
///
/// ASCII names take the fast path; anything else falls back to full
/// lowercase folding.
pub(crate) fn names_match(a: &str, b: &str) -> bool {
    if a.is_ascii() && b.is_ascii() {
        a.eq_ignore_ascii_case(b)
    } else {
        a.to_lowercase() == b.to_lowercase()
    }
}

/// First character of a tag or attribute name.
fn is_name_start(c: char) -> bool {
    c.is_alphabetic()
}

/// Any later character of a tag or attribute name.
fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '-' | '_' | ':')
}

/// Characters allowed in an unquoted attribute value.
fn is_unquoted_value_char(c: char) -> bool {
    !c.is_whitespace() && !matches!(c, '<' | '>' | '\'' | '"' | '=' | '`')
}

// =============================================================================
// Input Helpers
// =============================================================================

impl Lexer<'_> {
    /// The character starting at `pos`, if any.
    pub(super) fn char_at(&self, pos: usize) -> Option<char> {
        self.input.get(pos..).and_then(|rest| rest.chars().next())
    }

    /// True if the byte at `pos` is the ASCII character `expected`.
    pub(super) fn byte_is(&self, pos: usize, expected: u8) -> bool {
        self.input.as_bytes().get(pos) == Some(&expected)
    }

    /// Match an ASCII literal at `pos`, ignoring case.
    pub(super) fn literal_ignore_case(&self, pos: usize, literal: &str) -> Option<usize> {
        let end = pos + literal.len();
        let candidate = self.input.as_bytes().get(pos..end)?;
        candidate
            .eq_ignore_ascii_case(literal.as_bytes())
            .then_some(end)
    }

    /// Consume characters while `accept` holds; may consume nothing.
    pub(super) fn take_while(&self, pos: usize, accept: impl Fn(char) -> bool) -> usize {
        let rest = self.input.get(pos..).unwrap_or_default();
        rest.char_indices()
            .find(|&(_, c)| !accept(c))
            .map_or(self.input.len(), |(offset, _)| pos + offset)
    }

    /// Skip optional whitespace.
    pub(super) fn skip_whitespace(&self, pos: usize) -> usize {
        self.take_while(pos, char::is_whitespace)
    }

    /// Find the first case-insensitive occurrence of an ASCII `needle` at or after `pos`.
    pub(super) fn find_ignore_case(&self, pos: usize, needle: &str) -> Option<usize> {
        let bytes = self.input.as_bytes();
        let needle = needle.as_bytes();
        let last = bytes.len().checked_sub(needle.len())?;
        (pos..=last).find(|&at| bytes[at..at + needle.len()].eq_ignore_ascii_case(needle))
    }
}

// =============================================================================
// Name and Attribute Scanners
// =============================================================================

impl Lexer<'_> {
    /// A letter followed by letters, digits, `-`, `_` or `:`.
    pub(super) fn scan_name(&self, pos: usize) -> Option<usize> {
        let first = self.char_at(pos)?;
        if !is_name_start(first) {
            return None;
        }
        Some(self.take_while(pos + first.len_utf8(), is_name_char))
    }

    /// `'...'` or `"..."`; returns the inner text and the offset past the closing quote.
    fn scan_quoted(&self, pos: usize, quote: u8) -> Option<(&str, usize)> {
        if !self.byte_is(pos, quote) {
            return None;
        }
        let body_start = pos + 1;
        let body_len = self.input.get(body_start..)?.find(char::from(quote))?;
        let body_end = body_start + body_len;
        Some((&self.input[body_start..body_end], body_end + 1))
    }

    /// An attribute value: quoted with either quote style, or an unquoted
    /// (possibly empty) run. Never fails.
    fn scan_attribute_value(&self, pos: usize) -> (&str, usize) {
        self.scan_quoted(pos, b'"')
            .or_else(|| self.scan_quoted(pos, b'\''))
            .unwrap_or_else(|| {
                let end = self.take_while(pos, is_unquoted_value_char);
                (&self.input[pos..end], end)
            })
    }

    /// `name`, `name=value`, with optional whitespace around `=`.
    ///
    /// Trailing whitespace after a bare name is consumed too, so callers need
    /// not require whitespace between attributes.
    pub(super) fn scan_attribute(&self, pos: usize) -> Option<(HtmlAttribute, usize)> {
        let name_end = self.scan_name(pos)?;
        let key = &self.input[pos..name_end];
        let after_name = self.skip_whitespace(name_end);

        if !self.byte_is(after_name, b'=') {
            return Some((HtmlAttribute::valueless(key), after_name));
        }

        let value_start = self.skip_whitespace(after_name + 1);
        let (value, end) = self.scan_attribute_value(value_start);
        Some((HtmlAttribute::with_value(key, value), end))
    }
}
