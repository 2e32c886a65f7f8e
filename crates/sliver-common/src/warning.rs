//! Recovery warnings with colored terminal output.
//!
//! Lenient parsing never fails; instead it recovers and keeps going. Each
//! recovery (a stray `<`, an unmatched closing tag, an element closed by end
//! of input) is reported through a [`Warnings`] owned by the lexer or parser
//! run that hit it.
//!
//! Deduplication is keyed on a fixed message category, never on text taken
//! from the document, so a run records at most one entry per category and
//! the record is dropped with the run. Only the quiet switch is global.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

/// ANSI color codes for terminal output
const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

/// When set, warnings are still recorded but never printed.
static QUIET: AtomicBool = AtomicBool::new(false);

/// Per-run warning record for one component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warnings {
    component: &'static str,
    /// Categories already reported, in first-seen order.
    seen: Vec<&'static str>,
}

impl Warnings {
    /// An empty record for `component` (e.g. `"Lexer"`).
    #[must_use]
    pub const fn new(component: &'static str) -> Self {
        Self {
            component,
            seen: Vec::new(),
        }
    }

    /// Warn about a recovered piece of markup (prints once per category)
    ///
    /// `detail` is printed after the category the first time it is seen and
    /// is never stored. Returns `true` if `category` was new for this run.
    ///
    /// # Example
    /// ```
    /// use sliver_common::warning::{Warnings, set_quiet};
    ///
    /// set_quiet(true);
    /// let mut warnings = Warnings::new("Parser");
    /// assert!(warnings.warn_once("closing tag matches no open element", "</b>"));
    /// assert!(!warnings.warn_once("closing tag matches no open element", "</i>"));
    /// ```
    pub fn warn_once(&mut self, category: &'static str, detail: impl fmt::Display) -> bool {
        if self.seen.contains(&category) {
            return false;
        }
        self.seen.push(category);

        if !is_quiet() {
            eprintln!(
                "{YELLOW}[sliver {}] ⚠ {category} ({detail}){RESET}",
                self.component
            );
        }
        true
    }

    /// Categories reported so far, in the order they first occurred.
    pub fn categories(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.seen.iter().copied()
    }
}

/// Silence (or re-enable) printing of warnings for the whole process.
pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

/// Returns whether warnings are currently silenced.
#[must_use]
pub fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warn_once_deduplicates_by_category() {
        set_quiet(true);
        let mut warnings = Warnings::new("Test");
        assert!(warnings.warn_once("duplicate check", "first"));
        assert!(!warnings.warn_once("duplicate check", "second"));
        assert!(warnings.warn_once("other check", "first"));
        assert_eq!(
            warnings.categories().collect::<Vec<_>>(),
            ["duplicate check", "other check"]
        );
    }

    #[test]
    fn test_details_never_grow_the_record() {
        set_quiet(true);
        let mut warnings = Warnings::new("Test");
        for n in 0..10_000 {
            let _ = warnings.warn_once("stray", format_args!("</q{n}>"));
        }
        assert_eq!(warnings.categories().count(), 1);
    }

    #[test]
    fn test_runs_do_not_share_records() {
        set_quiet(true);
        let mut first = Warnings::new("Test");
        let mut second = Warnings::new("Test");
        assert!(first.warn_once("shared category", 1));
        assert!(second.warn_once("shared category", 2));
    }

    #[test]
    fn test_quiet_flag_round_trips() {
        set_quiet(true);
        assert!(is_quiet());
    }
}
