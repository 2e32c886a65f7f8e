//! Command-line element selectors.
//!
//! A deliberately small syntax, one simple selector per argument:
//!
//! | selector        | matches                                   |
//! |-----------------|-------------------------------------------|
//! | `*`             | any open tag                              |
//! | `nav`           | open tags named `nav` (case-insensitive)  |
//! | `nav#main`      | ... with `id` equal to `main`             |
//! | `div.note`      | ... whose `class` list contains `note`    |
//! | `a[href]`       | ... that carry an `href` attribute        |
//! | `a[rel=nofollow]` | ... whose `rel` equals `nofollow`       |
//!
//! The tag may be omitted before `#`, `.` or `[`: `#main` means `*#main`.

use std::str::FromStr;

use sliver_html::Fragment;
use thiserror::Error;

/// Why a selector string was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatcherError {
    /// Nothing to match on.
    #[error("empty selector")]
    Empty,
    /// A `#`, `.` or `[` with nothing after it.
    #[error("missing name after '{0}' in selector")]
    MissingName(char),
    /// `[key=value` without the closing bracket.
    #[error("unterminated attribute filter '[{0}'")]
    Unterminated(String),
    /// A character that cannot start a selector part.
    #[error("unexpected character '{0}' in selector")]
    Unexpected(char),
}

/// One attribute condition of a selector.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Condition {
    Id(String),
    Class(String),
    Present(String),
    Equals(String, String),
}

impl Condition {
    fn holds(&self, fragment: &Fragment) -> bool {
        match self {
            Self::Id(id) => fragment.attribute_is("id", id),
            Self::Class(class) => fragment
                .attribute_value("class", None)
                .is_some_and(|classes| classes.split_whitespace().any(|c| c == class)),
            Self::Present(key) => fragment.has_attribute(key),
            Self::Equals(key, value) => fragment.attribute_is(key, value),
        }
    }
}

/// A parsed selector, usable as a rewrite predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementMatcher {
    /// `None` matches every tag name.
    tag: Option<String>,
    conditions: Vec<Condition>,
}

impl ElementMatcher {
    /// True if `fragment` is an open tag this selector accepts.
    pub fn matches(&self, fragment: &Fragment) -> bool {
        fragment.is_open(self.tag.as_deref())
            && self.conditions.iter().all(|condition| condition.holds(fragment))
    }
}

/// Length of the name at the start of `s`: anything up to the next
/// selector punctuation.
fn name_len(s: &str) -> usize {
    s.find(['#', '.', '[', ']', '=']).unwrap_or(s.len())
}

impl FromStr for ElementMatcher {
    type Err = MatcherError;

    fn from_str(selector: &str) -> Result<Self, Self::Err> {
        let selector = selector.trim();
        if selector.is_empty() {
            return Err(MatcherError::Empty);
        }

        let (tag, mut rest) = if let Some(rest) = selector.strip_prefix('*') {
            (None, rest)
        } else {
            let len = name_len(selector);
            let tag = (len > 0).then(|| selector[..len].to_owned());
            (tag, &selector[len..])
        };

        let mut conditions = Vec::new();
        while let Some(marker) = rest.chars().next() {
            let after = &rest[marker.len_utf8()..];
            match marker {
                '#' | '.' => {
                    let len = name_len(after);
                    if len == 0 {
                        return Err(MatcherError::MissingName(marker));
                    }
                    let name = after[..len].to_owned();
                    conditions.push(if marker == '#' {
                        Condition::Id(name)
                    } else {
                        Condition::Class(name)
                    });
                    rest = &after[len..];
                }
                '[' => {
                    let Some(close) = after.find(']') else {
                        return Err(MatcherError::Unterminated(after.to_owned()));
                    };
                    let body = &after[..close];
                    let (key, value) = match body.split_once('=') {
                        Some((key, value)) => (key.trim(), Some(value.trim().trim_matches(['"', '\'']))),
                        None => (body.trim(), None),
                    };
                    if key.is_empty() {
                        return Err(MatcherError::MissingName('['));
                    }
                    let condition = match value {
                        Some(value) => Condition::Equals(key.to_owned(), value.to_owned()),
                        None => Condition::Present(key.to_owned()),
                    };
                    conditions.push(condition);
                    rest = &after[close + 1..];
                }
                other => return Err(MatcherError::Unexpected(other)),
            }
        }

        Ok(Self { tag, conditions })
    }
}
