use core::fmt;
use core::hash::{Hash, Hasher};
use core::ops::Range;

use serde::Serialize;
use strum_macros::{AsRefStr, Display, EnumString};

use super::attribute::HtmlAttribute;
use super::helpers::names_match;

/// The five lexical shapes a piece of markup can take.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr, Serialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum FragmentKind {
    /// `<name attr=value>` or `<name/>`
    Open,
    /// `</name>`
    Close,
    /// `<!--text-->`
    Comment,
    /// Character data, including stray `<` characters.
    Text,
    /// `<!doctype text>`
    Doctype,
}

/// Byte offsets delimiting the exact source text of a fragment.
///
/// Slicing the source with every emitted fragment's trivia, in order,
/// reproduces the source exactly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Trivia {
    /// Offset of the first byte.
    pub start: usize,
    /// Offset one past the last byte.
    pub end: usize,
}

impl Trivia {
    /// Create a span. `start` must not exceed `end`.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "trivia start must be <= end");
        Self { start, end }
    }

    /// A zero-length span anchored at `offset`.
    ///
    /// Used for closing tags the parser invents; they exist at a point in
    /// the source but own none of its bytes.
    #[must_use]
    pub const fn at(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    /// Number of source bytes covered.
    #[must_use]
    pub const fn len(self) -> usize {
        self.end - self.start
    }

    /// True for spans covering no source bytes.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.start == self.end
    }

    /// The span as a `Range`, ready for slicing.
    #[must_use]
    pub const fn range(self) -> Range<usize> {
        self.start..self.end
    }

    /// The source text this span covers.
    ///
    /// Returns an empty string if the span does not fit `source`.
    #[must_use]
    pub fn slice(self, source: &str) -> &str {
        source.get(self.range()).unwrap_or_default()
    }
}

/// One lexical unit of an HTML document.
///
/// `value` holds the tag name for open and close tags, the body of a
/// comment, the raw characters of a text run, or whatever follows the
/// `<!doctype` keyword and its whitespace.
///
/// Equality and hashing look only at what the fragment *means*: kind, value,
/// self-closing flag, and the attribute sequence. Two fragments lexed from
/// different positions, or from different documents, compare equal when that
/// content matches.
#[derive(Debug, Clone, Serialize)]
pub struct Fragment {
    kind: FragmentKind,
    value: String,
    self_closing: bool,
    attributes: Vec<HtmlAttribute>,
    trivia: Trivia,
}

impl Fragment {
    fn new(kind: FragmentKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
            self_closing: false,
            attributes: Vec::new(),
            trivia: Trivia::default(),
        }
    }

    /// An open tag. Trivia is empty until set with [`Fragment::with_trivia`].
    #[must_use]
    pub fn open_tag(
        name: impl Into<String>,
        self_closing: bool,
        attributes: Vec<HtmlAttribute>,
    ) -> Self {
        Self {
            self_closing,
            attributes,
            ..Self::new(FragmentKind::Open, name)
        }
    }

    /// A close tag.
    #[must_use]
    pub fn close_tag(name: impl Into<String>) -> Self {
        Self::new(FragmentKind::Close, name)
    }

    /// A comment; `text` excludes the `<!--` and `-->` delimiters.
    #[must_use]
    pub fn comment(text: impl Into<String>) -> Self {
        Self::new(FragmentKind::Comment, text)
    }

    /// A run of character data.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(FragmentKind::Text, text)
    }

    /// A doctype declaration.
    #[must_use]
    pub fn doctype(text: impl Into<String>) -> Self {
        Self::new(FragmentKind::Doctype, text)
    }

    /// Attach source offsets.
    #[must_use]
    pub const fn with_trivia(mut self, trivia: Trivia) -> Self {
        self.trivia = trivia;
        self
    }

    /// Which kind of markup this is.
    #[must_use]
    pub const fn kind(&self) -> FragmentKind {
        self.kind
    }

    /// Tag name, comment body, text run, or doctype text.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// True for open tags written with a trailing `/`.
    #[must_use]
    pub const fn is_self_closing(&self) -> bool {
        self.self_closing
    }

    /// All attributes in source order, duplicates included.
    #[must_use]
    pub fn attributes(&self) -> &[HtmlAttribute] {
        &self.attributes
    }

    /// Where this fragment came from in the source.
    #[must_use]
    pub const fn trivia(&self) -> Trivia {
        self.trivia
    }

    /// The exact source text of this fragment.
    #[must_use]
    pub fn source_text<'s>(&self, source: &'s str) -> &'s str {
        self.trivia.slice(source)
    }

    /// Case-insensitive tag name check. Always false for non-tag fragments.
    #[must_use]
    pub fn is_named(&self, name: &str) -> bool {
        matches!(self.kind, FragmentKind::Open | FragmentKind::Close)
            && names_match(&self.value, name)
    }

    /// True for open tags, optionally restricted to one tag name.
    #[must_use]
    pub fn is_open(&self, name: Option<&str>) -> bool {
        self.kind == FragmentKind::Open && name.is_none_or(|name| self.is_named(name))
    }

    /// True for close tags, optionally restricted to one tag name.
    #[must_use]
    pub fn is_close(&self, name: Option<&str>) -> bool {
        self.kind == FragmentKind::Close && name.is_none_or(|name| self.is_named(name))
    }

    /// Look up an attribute by exact key. With duplicates, the last wins.
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&HtmlAttribute> {
        self.attributes.iter().rev().find(|attr| attr.key() == key)
    }

    /// Mutable access to the attribute [`Fragment::attribute`] would return.
    ///
    /// Only the value can be changed (see [`HtmlAttribute::set_value`]).
    /// After mutating, render the fragment with `to_string()` instead of
    /// copying its source span.
    pub fn attribute_mut(&mut self, key: &str) -> Option<&mut HtmlAttribute> {
        self.attributes.iter_mut().rev().find(|attr| attr.key() == key)
    }

    /// Whether an attribute with this exact key exists.
    #[must_use]
    pub fn has_attribute(&self, key: &str) -> bool {
        self.attribute(key).is_some()
    }

    /// The value of `key`, or `default` when the attribute is absent.
    ///
    /// A present but valueless attribute yields `None`, not `default`.
    #[must_use]
    pub fn attribute_value<'a>(&'a self, key: &str, default: Option<&'a str>) -> Option<&'a str> {
        self.attribute(key).map_or(default, HtmlAttribute::value)
    }

    /// Whether `key` is present with a value equal to `value`, ignoring ASCII case.
    #[must_use]
    pub fn has_attribute_value(&self, key: &str, value: &str) -> bool {
        self.attribute(key)
            .and_then(HtmlAttribute::value)
            .is_some_and(|actual| actual.eq_ignore_ascii_case(value))
    }

    /// Like [`Fragment::has_attribute_value`], but only ever true for open tags.
    #[must_use]
    pub fn attribute_is(&self, key: &str, value: &str) -> bool {
        self.kind == FragmentKind::Open && self.has_attribute_value(key, value)
    }

    /// A close tag with this fragment's name, positioned nowhere.
    #[must_use]
    pub fn as_close_fragment(&self) -> Self {
        Self::close_tag(self.value.clone())
    }
}

impl PartialEq for Fragment {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.self_closing == other.self_closing
            && self.value == other.value
            && self.attributes == other.attributes
    }
}

impl Eq for Fragment {}

impl Hash for Fragment {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
        self.value.hash(state);
        self.self_closing.hash(state);
        self.attributes.hash(state);
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            FragmentKind::Open => {
                write!(f, "<{}", self.value)?;
                for attr in &self.attributes {
                    write!(f, " {attr}")?;
                }
                if self.self_closing {
                    f.write_str("/")?;
                }
                f.write_str(">")
            }
            FragmentKind::Close => write!(f, "</{}>", self.value),
            FragmentKind::Comment => write!(f, "<!--{}-->", self.value),
            FragmentKind::Text => f.write_str(&self.value),
            FragmentKind::Doctype => write!(f, "<!DOCTYPE {}>", self.value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_ignores_trivia() {
        let a = Fragment::text("hi").with_trivia(Trivia::new(0, 2));
        let b = Fragment::text("hi").with_trivia(Trivia::new(10, 12));
        assert_eq!(a, b);
    }

    #[test]
    fn test_equality_compares_both_operands() {
        assert_ne!(Fragment::close_tag("a"), Fragment::close_tag("b"));
        assert_ne!(
            Fragment::open_tag("a", true, Vec::new()),
            Fragment::open_tag("a", false, Vec::new())
        );
    }

    #[test]
    fn test_is_named_only_applies_to_tags() {
        assert!(Fragment::open_tag("DIV", false, Vec::new()).is_named("div"));
        assert!(Fragment::close_tag("div").is_named("Div"));
        assert!(!Fragment::text("div").is_named("div"));
        assert!(!Fragment::comment("div").is_named("div"));
    }

    #[test]
    fn test_trivia_slice_out_of_range_is_empty() {
        assert_eq!(Trivia::new(2, 40).slice("short"), "");
        assert_eq!(Trivia::new(1, 3).slice("short"), "ho");
    }

    #[test]
    fn test_kind_parses_case_insensitively() {
        assert_eq!("OPEN".parse::<FragmentKind>(), Ok(FragmentKind::Open));
        assert_eq!(FragmentKind::Doctype.to_string(), "doctype");
    }

    #[test]
    fn test_display_open_tag() {
        let fragment = Fragment::open_tag(
            "img",
            true,
            vec![
                HtmlAttribute::with_value("alt", "x"),
                HtmlAttribute::valueless("hidden"),
            ],
        );
        assert_eq!(fragment.to_string(), "<img alt=\"x\" hidden/>");
    }

    #[test]
    fn test_display_doctype() {
        assert_eq!(Fragment::doctype("html").to_string(), "<!DOCTYPE html>");
    }
}
