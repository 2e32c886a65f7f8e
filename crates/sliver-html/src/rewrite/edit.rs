use core::ops::Range;

use strum_macros::{Display, EnumString};

use super::spans::{ElementSpan, element_spans};
use super::within::{Placement, within_element};
use crate::parser::{DomEvent, parse};
use crate::tokenizer::{Fragment, FragmentKind};

/// Which part of a matched element an operation addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Scope {
    /// The element including its own tags.
    #[default]
    Outer,
    /// Only the content between its tags.
    Inner,
}

/// How [`wrap_elements`] places the wrapper around a matched element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum WrapMode {
    /// Wrap the element's content, inside its own tags.
    Inner,
    /// Wrap the whole element.
    #[default]
    Outer,
    /// Swap the element's own tags for the wrapper.
    Replace,
}

/// Apply non-overlapping edits, given in document order, to `source`.
fn splice(source: &str, edits: Vec<(Range<usize>, String)>) -> String {
    let mut out = String::with_capacity(source.len());
    let mut cursor = 0;
    for (range, text) in edits {
        debug_assert!(range.start >= cursor, "edits must not overlap");
        out.push_str(&source[cursor..range.start]);
        out.push_str(&text);
        cursor = range.end;
    }
    out.push_str(&source[cursor..]);
    out
}

/// Replace each element selected by `predicate` with `replacement`.
///
/// With [`Scope::Inner`] only the content is replaced and the element's own
/// tags stay; matched void or self-closing tags are left alone. Every byte
/// outside the replaced ranges is copied from `source` unchanged.
///
/// # Example
/// ```
/// use sliver_html::rewrite::{replace_elements, Scope};
///
/// let html = "<div><nav id=main>old</nav><p>keep</p></div>";
/// let out = replace_elements(html, |f| f.attribute_is("id", "main"), "<nav>new</nav>", Scope::Outer);
/// assert_eq!(out, "<div><nav>new</nav><p>keep</p></div>");
/// ```
pub fn replace_elements<P>(source: &str, predicate: P, replacement: &str, scope: Scope) -> String
where
    P: FnMut(&Fragment) -> bool,
{
    let edits = element_spans(source, predicate)
        .into_iter()
        .filter_map(|span| match scope {
            Scope::Outer => Some(span.outer),
            Scope::Inner => span.inner,
        })
        .map(|range| (range, replacement.to_owned()))
        .collect();
    splice(source, edits)
}

/// Source text of each element selected by `predicate`, in document order.
///
/// With [`Scope::Inner`], elements without content yield an empty string.
pub fn extract_elements<'s, P>(source: &'s str, predicate: P, scope: Scope) -> Vec<&'s str>
where
    P: FnMut(&Fragment) -> bool,
{
    element_spans(source, predicate)
        .into_iter()
        .map(|ElementSpan { outer, inner }| match scope {
            Scope::Outer => &source[outer],
            Scope::Inner => inner.map_or("", |inner| &source[inner]),
        })
        .collect()
}

/// The text content of each element selected by `predicate`.
///
/// Text runs nested anywhere inside a match are concatenated; tags and
/// comments contribute nothing.
pub fn extract_text<P>(source: &str, predicate: P) -> Vec<String>
where
    P: FnMut(&Fragment) -> bool,
{
    let mut texts = Vec::new();
    let mut current = String::new();

    for placed in within_element(parse(source), predicate) {
        match (placed.placement, &placed.event) {
            (Placement::Enter, _) => current.clear(),
            (Placement::Inside, DomEvent::Child(fragment))
                if fragment.kind() == FragmentKind::Text =>
            {
                current.push_str(fragment.value());
            }
            (Placement::Exit, _) => texts.push(core::mem::take(&mut current)),
            (Placement::Whole, DomEvent::Child(fragment)) => {
                let text = if fragment.kind() == FragmentKind::Text {
                    fragment.value().to_owned()
                } else {
                    String::new()
                };
                texts.push(text);
            }
            _ => {}
        }
    }
    texts
}

/// Surround each element selected by `predicate` with generated markup.
///
/// `open` and `close` are called once per match, in document order, so
/// they can number or otherwise vary the wrapper. In [`WrapMode::Inner`]
/// mode, matches without content are skipped and the callbacks are not
/// called for them.
///
/// # Example
/// ```
/// use sliver_html::rewrite::{wrap_elements, WrapMode};
///
/// let mut n = 0;
/// let out = wrap_elements(
///     "<ul><li>a</li><li>b</li></ul>",
///     |f| f.is_named("li"),
///     || {
///         n += 1;
///         format!("<span id=t{n}>")
///     },
///     || "</span>".to_owned(),
///     WrapMode::Inner,
/// );
/// assert_eq!(out, "<ul><li><span id=t1>a</span></li><li><span id=t2>b</span></li></ul>");
/// ```
pub fn wrap_elements<P, O, C>(
    source: &str,
    predicate: P,
    mut open: O,
    mut close: C,
    mode: WrapMode,
) -> String
where
    P: FnMut(&Fragment) -> bool,
    O: FnMut() -> String,
    C: FnMut() -> String,
{
    let mut edits = Vec::new();

    for ElementSpan { outer, inner } in element_spans(source, predicate) {
        match (mode, inner) {
            (WrapMode::Outer, _) => {
                edits.push((outer.start..outer.start, open()));
                edits.push((outer.end..outer.end, close()));
            }
            (WrapMode::Inner, Some(inner)) => {
                edits.push((inner.start..inner.start, open()));
                edits.push((inner.end..inner.end, close()));
            }
            (WrapMode::Inner, None) => {}
            (WrapMode::Replace, Some(inner)) => {
                edits.push((outer.start..inner.start, open()));
                edits.push((inner.end..outer.end, close()));
            }
            (WrapMode::Replace, None) => {
                let mut wrapper = open();
                wrapper.push_str(&close());
                edits.push((outer, wrapper));
            }
        }
    }
    splice(source, edits)
}
