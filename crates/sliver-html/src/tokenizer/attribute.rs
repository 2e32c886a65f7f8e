use core::fmt;

use serde::Serialize;

/// A single `key` or `key=value` pair on an open tag.
///
/// Keys keep the casing they had in the source and are matched exactly.
/// A missing value (`None`) is a boolean attribute such as `disabled`; it is
/// distinct from an empty value (`Some("")`) written as `disabled=""`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct HtmlAttribute {
    key: String,
    value: Option<String>,
}

impl HtmlAttribute {
    /// Create an attribute with an optional value.
    #[must_use]
    pub fn new(key: impl Into<String>, value: Option<String>) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }

    /// Create a `key="value"` attribute.
    #[must_use]
    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(key, Some(value.into()))
    }

    /// Create a valueless attribute such as `disabled`.
    #[must_use]
    pub fn valueless(key: impl Into<String>) -> Self {
        Self::new(key, None)
    }

    /// The attribute name as written in the source.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The attribute value, or `None` for a valueless attribute.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Overwrite the value in place.
    ///
    /// This is the one sanctioned mutation of an emitted fragment: rewrite
    /// the value, then render the owning [`Fragment`](super::Fragment) with
    /// its `Display` impl in place of the original source span. Clones taken
    /// before the call keep the old value.
    pub fn set_value(&mut self, value: Option<String>) {
        self.value = value;
    }
}

impl fmt::Display for HtmlAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{}=\"{value}\"", self.key),
            None => f.write_str(&self.key),
        }
    }
}
