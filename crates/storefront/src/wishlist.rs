//! In-memory wishlist.
//!
//! An insertion-ordered set of items, unique by identity, with the same
//! per-session lifecycle as the cart. Presentation uses the membership
//! test to render a "liked" state on catalog cards.

use pustaka_core::BookId;

use crate::catalog::types::Book;

/// Insertion-ordered set of [`Book`], unique by identity.
#[derive(Debug, Clone, Default)]
pub struct WishlistStore {
    books: Vec<Book>,
}

impl WishlistStore {
    /// Create an empty wishlist.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item. Idempotent: a second add with the same identity
    /// is a no-op.
    pub fn add(&mut self, book: Book) {
        if self.contains(&book.id) {
            return;
        }
        self.books.push(book);
    }

    /// Delete by identity. No-op if absent.
    pub fn remove(&mut self, id: &BookId) {
        self.books.retain(|book| &book.id != id);
    }

    /// Membership test by identity.
    #[must_use]
    pub fn contains(&self, id: &BookId) -> bool {
        self.books.iter().any(|book| &book.id == id)
    }

    /// Items in insertion order.
    #[must_use]
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn iter(&self) -> impl Iterator<Item = &Book> {
        self.books.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.books.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}

impl<'a> IntoIterator for &'a WishlistStore {
    type Item = &'a Book;
    type IntoIter = std::slice::Iter<'a, Book>;

    fn into_iter(self) -> Self::IntoIter {
        self.books.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(id: &str) -> Book {
        serde_json::from_value(serde_json::json!({"_id": id})).expect("book deserializes")
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut wishlist = WishlistStore::new();
        wishlist.add(book("b1"));
        wishlist.add(book("b1"));
        wishlist.add(book("b1"));
        assert_eq!(wishlist.len(), 1);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut wishlist = WishlistStore::new();
        wishlist.add(book("b2"));
        wishlist.add(book("b1"));
        wishlist.add(book("b3"));
        let ids: Vec<&str> = wishlist.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["b2", "b1", "b3"]);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut wishlist = WishlistStore::new();
        wishlist.add(book("b1"));
        wishlist.remove(&BookId::new("missing"));
        assert_eq!(wishlist.len(), 1);

        wishlist.remove(&BookId::new("b1"));
        assert!(wishlist.is_empty());
        assert!(!wishlist.contains(&BookId::new("b1")));
    }
}
