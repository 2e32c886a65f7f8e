//! Surgical rewriting of matched elements.
//!
//! Matching runs over the parser's event stream, but every edit is applied
//! to the original text by byte offset. Markup outside a matched element is
//! never re-rendered, so invalid or oddly formatted HTML elsewhere in the
//! document comes through byte-for-byte.
//!
//! Finding nothing is not an error: the source comes back unchanged and
//! extraction returns an empty list.

/// Replace, extract and wrap operations.
pub mod edit;
/// Byte ranges of matched elements.
pub mod spans;
/// Classifying events as inside or outside matched elements.
pub mod within;

pub use edit::{Scope, WrapMode, extract_elements, extract_text, replace_elements, wrap_elements};
pub use spans::{ElementSpan, element_spans};
pub use within::{Placement, PlacedEvent, WithinElement, within_element};
