//! Lossless, lenient HTML lexing and structural parsing.
//!
//! # Scope
//!
//! This crate implements a two-stage pipeline:
//!
//! - **Lexer** ([`tokenizer`]) - splits arbitrary, possibly malformed text
//!   into open tag, close tag, text, comment and doctype fragments. Every
//!   fragment records its exact byte span, so the spans of all fragments
//!   concatenate back into the input. `<script>` bodies are raw text.
//!
//! - **Structural parser** ([`parser`]) - replays fragments through a
//!   single stack of open elements and yields balanced push/child/pop
//!   events, applying the common HTML inference rules: void elements,
//!   optional `</p>` and `</li>`, and recovery from closing tags that match
//!   nothing or close several elements at once.
//!
//! On top of the events sit optional consumers: [`serialize`] renders them
//! back to HTML, [`tree`] builds a node tree, and [`rewrite`] extracts,
//! replaces or wraps matched elements while leaving every other byte alone.
//!
//! # Not Implemented
//!
//! - HTML5 tree construction quirks (tables, foster parenting, formatting
//!   element reconstruction)
//! - Encoding sniffing and character reference decoding
//! - Validation or whitespace normalisation

/// Structural parser producing balanced element events.
pub mod parser;
/// Replace, extract and wrap matched elements by byte offset.
pub mod rewrite;
/// Rendering fragments and events back to text.
pub mod serialize;
/// Lossless fragment lexer.
pub mod tokenizer;
/// Optional tree materialization.
pub mod tree;

pub use parser::{DomEvent, DomEventKind, LexedDomParser, parse, parse_fragments};
pub use tokenizer::{Fragment, FragmentKind, HtmlAttribute, Lexer, Trivia, read};
pub use tree::{Node, build_tree, print_tree};
