//! Lenient structural parser producing push/child/pop events.

/// The event-producing parser.
pub mod core;
/// Void and paragraph-closing tag tables.
pub mod elements;
/// Event types emitted by the parser.
pub mod event;

pub use self::core::{LexedDomParser, parse, parse_fragments};
pub use elements::{is_paragraph_closing_tag, is_void_element};
pub use event::{DomEvent, DomEventKind};
