use serde::Serialize;
use strum_macros::{AsRefStr, Display};

use crate::tokenizer::Fragment;

/// What a [`DomEvent`] does to the implied element nesting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum DomEventKind {
    /// A leaf under the current element.
    Child,
    /// An element that following events nest inside.
    Push,
    /// The end of the most recently pushed element.
    Pop,
}

/// One step of the implied DOM.
///
/// A consumer that keeps a stack of `Push` fragments, popping on `Pop`, sees
/// a properly nested tree no matter how broken the source was.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "fragment", rename_all = "lowercase")]
pub enum DomEvent {
    /// Text, comment, doctype, void or self-closing tag, or a closing tag
    /// that matched nothing.
    Child(Fragment),
    /// An open tag that starts a new element.
    Push(Fragment),
    /// Closes the innermost open element.
    ///
    /// Carries the closing tag the source actually contained, a closing tag
    /// the parser invented (with an empty trivia span), or `None` when the
    /// element was closed implicitly. Serializers render the last two as a
    /// canonical `</name>` for the element being closed.
    Pop(Option<Fragment>),
}

impl DomEvent {
    /// The event's kind without its payload.
    #[must_use]
    pub const fn kind(&self) -> DomEventKind {
        match self {
            Self::Child(_) => DomEventKind::Child,
            Self::Push(_) => DomEventKind::Push,
            Self::Pop(_) => DomEventKind::Pop,
        }
    }

    /// The fragment carried by the event, if any.
    #[must_use]
    pub const fn fragment(&self) -> Option<&Fragment> {
        match self {
            Self::Child(fragment) | Self::Push(fragment) | Self::Pop(Some(fragment)) => {
                Some(fragment)
            }
            Self::Pop(None) => None,
        }
    }

    /// True for a `Pop` whose closing tag was not present in the source.
    #[must_use]
    pub fn is_implicit_pop(&self) -> bool {
        matches!(self, Self::Pop(close) if close.as_ref().is_none_or(|f| f.trivia().is_empty()))
    }
}
