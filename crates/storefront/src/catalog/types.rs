//! Domain types for the catalog API.
//!
//! The remote API is not uniform: field names vary between payloads
//! (`_id` vs `id`, `cover_image` vs `image`), genre arrives as either a
//! bare string or an object, and prices show up as numbers or formatted
//! strings at the root, under `cost`, or nested in `details`. These types
//! deserialize leniently - aliases, defaults, untagged unions - so that a
//! single struct absorbs every observed shape.

use pustaka_core::{BookId, RawPrice, format_grouped};
use serde::{Deserialize, Deserializer, Serialize};

/// A catalog entry.
///
/// Every field except identity defaults when absent from the payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    /// Identity; the sole equality key.
    #[serde(alias = "_id")]
    pub id: BookId,

    #[serde(default)]
    pub title: String,

    /// Cover image URL; the API has used several names for this field.
    #[serde(
        default,
        alias = "image",
        alias = "coverImage",
        alias = "cover_image_url",
        alias = "cover"
    )]
    pub cover_image: Option<String>,

    /// Genre, as either a bare string or a `{name, ...}` object.
    #[serde(default, alias = "category")]
    pub genre: Option<Genre>,

    #[serde(default)]
    pub author: Option<Author>,

    #[serde(default, alias = "description")]
    pub summary: Option<String>,

    /// Root-level price, when the payload carries one.
    #[serde(default)]
    pub price: Option<RawPrice>,

    /// Legacy field seen on some list payloads.
    #[serde(default)]
    pub cost: Option<RawPrice>,

    /// Root-level detail fields; some payloads flatten these instead of
    /// nesting them under `details`. The detail fetch back-fills them
    /// into [`Book::details`].
    #[serde(default, deserialize_with = "lenient_string")]
    pub isbn: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub total_pages: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub published_date: Option<String>,

    #[serde(default)]
    pub details: BookDetails,
}

impl Book {
    /// Extract a normalized price for this book.
    ///
    /// Precedence: `details.price`, then `price`, then `cost`, else 0.
    /// The first populated field wins; fields are never summed. Blank
    /// text does not count as populated.
    #[must_use]
    pub fn price_value(&self) -> i64 {
        [
            self.details.price.as_ref(),
            self.price.as_ref(),
            self.cost.as_ref(),
        ]
        .into_iter()
        .flatten()
        .find(|raw| raw.is_populated())
        .map_or(0, RawPrice::normalize)
    }

    /// Price formatted with thousands separators, without a currency
    /// symbol.
    #[must_use]
    pub fn display_price(&self) -> String {
        format_grouped(self.price_value())
    }

    /// Genre name, when one is present in any shape.
    #[must_use]
    pub fn genre_name(&self) -> Option<&str> {
        self.genre.as_ref().map(Genre::name)
    }
}

/// Genre as returned by the API: a bare string or a `{name}` object.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Genre {
    Name(String),
    Tagged {
        #[serde(default)]
        name: String,
        #[serde(default)]
        url: Option<String>,
    },
}

impl Genre {
    /// The display name regardless of wire shape.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Name(name) | Self::Tagged { name, .. } => name,
        }
    }
}

/// Book author.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Author {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
}

/// Nested detail map carried by detail payloads.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookDetails {
    #[serde(default)]
    pub price: Option<RawPrice>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub isbn: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub total_pages: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub published_date: Option<String>,
}

/// One page of catalog results.
#[derive(Debug, Clone, Default)]
pub struct BookPage {
    pub books: Vec<Book>,
    /// Page count from server metadata, when the envelope carried any.
    pub total_pages: Option<u32>,
}

/// Named search criteria; only populated values are sent to the API.
#[derive(Debug, Clone, Default)]
pub struct BookFilters {
    pub keyword: Option<String>,
    pub genre: Option<String>,
    pub year: Option<String>,
    pub sort: Option<String>,
    pub page: Option<u32>,
}

impl BookFilters {
    /// Shorthand for a keyword-only search.
    #[must_use]
    pub fn keyword(keyword: impl Into<String>) -> Self {
        Self {
            keyword: Some(keyword.into()),
            ..Self::default()
        }
    }

    /// Serialize the populated criteria as query pairs.
    ///
    /// Blank strings are treated as absent, matching the rule that only
    /// truthy values reach the query string.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        for (key, value) in [
            ("keyword", self.keyword.as_deref()),
            ("genre", self.genre.as_deref()),
            ("year", self.year.as_deref()),
            ("sort", self.sort.as_deref()),
        ] {
            if let Some(value) = value
                && !value.trim().is_empty()
            {
                pairs.push((key, value.to_string()));
            }
        }
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        pairs
    }
}

/// Accept a string, number, or null where the API is inconsistent about
/// the type (e.g. `total_pages` arrives both as `320` and `"320"`).
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
