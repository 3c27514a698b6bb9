//! Envelope normalization for catalog API responses.
//!
//! The backend wraps payloads in several envelope shapes, apparently
//! depending on deployment vintage: a bare array, `{books: [...]}`,
//! `{data: [...]}`, or `{data: {books: [...]}}`; detail responses show
//! the same drift around a single object. Each known shape is a variant
//! of an untagged union, and one exhaustive `match` per payload kind
//! applies the same precedence everywhere. Unknown shapes collapse to
//! the documented empty result, never to an error.

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use super::types::{Book, BookPage};

// =============================================================================
// List envelopes
// =============================================================================

/// Known wrappers around a list of books.
///
/// Variant order is the precedence order: serde tries untagged variants
/// top to bottom.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListEnvelope {
    /// `{books: [...], totalPages?, pagination?}`
    Books {
        books: Vec<Value>,
        #[serde(
            default,
            rename = "totalPages",
            alias = "total_pages",
            alias = "total_page"
        )]
        total_pages: Option<u32>,
        #[serde(default)]
        pagination: Option<PageMeta>,
    },
    /// `{data: [...]}` or `{data: {books: [...]}}`
    Data { data: DataSection },
    /// Bare array.
    Bare(Vec<Value>),
    /// Anything else; normalizes to an empty page.
    Unknown(Value),
}

/// The `data` wrapper, itself seen in two shapes.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DataSection {
    Bare(Vec<Value>),
    Books {
        books: Vec<Value>,
        #[serde(
            default,
            rename = "totalPages",
            alias = "total_pages",
            alias = "total_page"
        )]
        total_pages: Option<u32>,
    },
    Unknown(Value),
}

/// Pagination metadata block, when the envelope carries one.
#[derive(Debug, Default, Deserialize)]
struct PageMeta {
    #[serde(
        default,
        rename = "totalPages",
        alias = "total_pages",
        alias = "total_page"
    )]
    total_pages: Option<u32>,
}

/// Normalize any list-shaped response body into a [`BookPage`].
pub(crate) fn book_page(body: Value) -> BookPage {
    // Unknown(Value) makes the untagged union total over all JSON.
    let envelope: ListEnvelope =
        serde_json::from_value(body).unwrap_or_else(|_| ListEnvelope::Unknown(Value::Null));

    match envelope {
        ListEnvelope::Books {
            books,
            total_pages,
            pagination,
        } => BookPage {
            books: parse_books(books),
            total_pages: total_pages.or_else(|| pagination.and_then(|p| p.total_pages)),
        },
        ListEnvelope::Data {
            data: DataSection::Bare(books),
        }
        | ListEnvelope::Bare(books) => BookPage {
            books: parse_books(books),
            total_pages: None,
        },
        ListEnvelope::Data {
            data: DataSection::Books { books, total_pages },
        } => BookPage {
            books: parse_books(books),
            total_pages,
        },
        ListEnvelope::Data {
            data: DataSection::Unknown(other),
        }
        | ListEnvelope::Unknown(other) => {
            warn!(shape = %value_kind(&other), "unrecognized list envelope, returning empty page");
            BookPage::default()
        }
    }
}

/// Parse raw entries, dropping malformed ones instead of failing the page.
fn parse_books(entries: Vec<Value>) -> Vec<Book> {
    entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value::<Book>(entry) {
            Ok(book) => Some(book),
            Err(error) => {
                warn!(%error, "dropping malformed catalog entry");
                None
            }
        })
        .collect()
}

// =============================================================================
// Detail envelopes
// =============================================================================

/// Known wrappers around a single book object.
///
/// Precedence: `data.book`, then `data`, then `book`, then the raw body.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DetailEnvelope {
    DataBook { data: DataBook },
    Data { data: Value },
    Book { book: Value },
    Raw(Value),
}

#[derive(Debug, Deserialize)]
struct DataBook {
    book: Value,
}

/// Normalize a detail-shaped response body into a single [`Book`].
///
/// Returns `None` when no variant yields an entry with an identity.
/// Root-level `isbn`/`total_pages`/`published_date`/`price` fields are
/// back-filled into `details` so callers can rely on `details.*`
/// uniformly; already-populated detail fields are never overwritten.
pub(crate) fn book_detail(body: Value) -> Option<Book> {
    let envelope: DetailEnvelope =
        serde_json::from_value(body).unwrap_or_else(|_| DetailEnvelope::Raw(Value::Null));

    let payload = match envelope {
        DetailEnvelope::DataBook { data } => data.book,
        DetailEnvelope::Data { data } => data,
        DetailEnvelope::Book { book } => book,
        DetailEnvelope::Raw(raw) => raw,
    };

    match serde_json::from_value::<Book>(payload) {
        Ok(mut book) => {
            backfill_details(&mut book);
            Some(book)
        }
        Err(error) => {
            warn!(%error, "detail payload did not contain a usable book");
            None
        }
    }
}

/// Copy root-level detail fields into the nested `details` map when the
/// map lacks them.
fn backfill_details(book: &mut Book) {
    if book.details.isbn.is_none() {
        book.details.isbn = book.isbn.clone();
    }
    if book.details.total_pages.is_none() {
        book.details.total_pages = book.total_pages.clone();
    }
    if book.details.published_date.is_none() {
        book.details.published_date = book.published_date.clone();
    }
    if book.details.price.is_none() {
        book.details.price = book.price.clone();
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
