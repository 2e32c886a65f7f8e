//! Common utilities for the sliver HTML toolkit.
//!
//! This crate provides shared infrastructure used by the lexer, the parser
//! and the CLI:
//! - **Warning System** - deduplicated, colored reports of markup recovery

pub mod warning;
