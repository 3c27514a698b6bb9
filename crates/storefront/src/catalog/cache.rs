//! Cache types for catalog API responses.

use super::types::{Book, BookPage};

/// Cached value types.
#[derive(Debug, Clone)]
pub(crate) enum CacheValue {
    Page(BookPage),
    Detail(Box<Book>),
}
