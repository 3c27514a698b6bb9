//! Newtype ID for type-safe catalog item references.
//!
//! The catalog API keys items by an opaque string (`_id` in most payloads,
//! `id` in a few). `BookId` wraps that string so cart and wishlist lookups
//! cannot accidentally mix it up with titles or other string fields.

use serde::{Deserialize, Serialize};

/// Identity of a catalog item.
///
/// Identity is the sole equality key for items: two books are "the same"
/// iff their `BookId` values match, regardless of any other field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(String);

impl BookId {
    /// Create a new ID from a string value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the underlying string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for BookId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for BookId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for BookId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<BookId> for String {
    fn from(id: BookId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_is_by_value() {
        assert_eq!(BookId::new("abc123"), BookId::from("abc123"));
        assert_ne!(BookId::new("abc123"), BookId::new("abc124"));
    }

    #[test]
    fn test_serde_transparent() {
        let id: BookId = serde_json::from_str("\"64f0c2\"").expect("valid id");
        assert_eq!(id.as_str(), "64f0c2");
        assert_eq!(serde_json::to_string(&id).expect("serialize"), "\"64f0c2\"");
    }
}
