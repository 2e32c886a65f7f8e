//! Lossless HTML lexer.
//!
//! Splits text into [`Fragment`]s whose [`Trivia`] spans tile the input
//! exactly, so any run of fragments can be turned back into the original
//! bytes by slicing.

/// Key/value attribute storage for open tags.
pub mod attribute;
/// The lexer itself and its grammar rules.
pub mod core;
/// Fragment, fragment kind, and source span types.
pub mod fragment;
/// Scanning primitives shared by the grammar rules.
pub(crate) mod helpers;

pub use self::core::{Lexer, read};
pub use attribute::HtmlAttribute;
pub use fragment::{Fragment, FragmentKind, Trivia};
