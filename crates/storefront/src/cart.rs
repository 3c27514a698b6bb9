//! In-memory shopping cart.
//!
//! The cart is per-session state: created empty, mutated only through
//! the methods here in direct response to user actions, and gone when
//! the session ends. Lines are ordered and unique by item identity;
//! every operation is a total, synchronous function over the current
//! state, so no mutation can be left half-applied.

use pustaka_core::BookId;

use crate::catalog::types::Book;

/// One cart entry: an item snapshot, a quantity, and a selection flag.
///
/// The book is captured by value when added; later changes to backing
/// catalog data do not retroactively alter the line.
#[derive(Debug, Clone)]
pub struct CartLine {
    pub book: Book,
    /// Always >= 1; a requested quantity of 0 deletes the line instead.
    pub quantity: u32,
    /// Used for partial checkout.
    pub selected: bool,
}

impl CartLine {
    /// Subtotal for this line: normalized price times quantity.
    #[must_use]
    pub fn subtotal(&self) -> i64 {
        self.book.price_value() * i64::from(self.quantity)
    }
}

/// Ordered collection of [`CartLine`], unique by item identity.
#[derive(Debug, Clone, Default)]
pub struct CartStore {
    lines: Vec<CartLine>,
}

impl CartStore {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of an item.
    ///
    /// If a line with the same identity exists, its quantity is
    /// incremented; otherwise a new selected line with quantity 1 is
    /// appended. No two lines ever share an identity.
    pub fn add(&mut self, book: Book) {
        if let Some(line) = self.line_mut(&book.id) {
            line.quantity += 1;
            return;
        }
        self.lines.push(CartLine {
            book,
            quantity: 1,
            selected: true,
        });
    }

    /// Delete the line with the given identity. No-op if absent.
    pub fn remove(&mut self, id: &BookId) {
        self.lines.retain(|line| &line.book.id != id);
    }

    /// Set the quantity on the matching line.
    ///
    /// A quantity of 0 removes the line. No-op if the identity is
    /// absent.
    pub fn set_quantity(&mut self, id: &BookId, quantity: u32) {
        if quantity == 0 {
            self.remove(id);
            return;
        }
        if let Some(line) = self.line_mut(id) {
            line.quantity = quantity;
        }
    }

    /// Flip the selection flag on the matching line. No-op if absent.
    pub fn toggle_selected(&mut self, id: &BookId) {
        if let Some(line) = self.line_mut(id) {
            line.selected = !line.selected;
        }
    }

    /// All-or-nothing selection toggle.
    ///
    /// If every line is currently selected, deselects all; otherwise
    /// selects all.
    pub fn toggle_select_all(&mut self) {
        let all_selected = self.lines.iter().all(|line| line.selected);
        for line in &mut self.lines {
            line.selected = !all_selected;
        }
    }

    /// Sum of all quantities, selected and unselected.
    #[must_use]
    pub fn total_item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Lines currently marked for checkout.
    pub fn selected_lines(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.iter().filter(|line| line.selected)
    }

    /// Total over selected lines of normalized price times quantity.
    #[must_use]
    pub fn selected_total(&self) -> i64 {
        self.selected_lines().map(CartLine::subtotal).sum()
    }

    /// All lines, in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn line_mut(&mut self, id: &BookId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| &line.book.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(id: &str, price: i64) -> Book {
        serde_json::from_value(serde_json::json!({"_id": id, "price": price}))
            .expect("book deserializes")
    }

    #[test]
    fn test_add_same_identity_increments_quantity() {
        let mut cart = CartStore::new();
        cart.add(book("b1", 10_000));
        cart.add(book("b1", 10_000));

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].quantity, 2);
        assert_eq!(cart.total_item_count(), 2);
    }

    #[test]
    fn test_new_lines_start_selected() {
        let mut cart = CartStore::new();
        cart.add(book("b1", 10_000));
        assert!(cart.lines()[0].selected);
        assert_eq!(cart.lines()[0].quantity, 1);
    }

    #[test]
    fn test_set_quantity_zero_removes() {
        let mut cart = CartStore::new();
        cart.add(book("b1", 10_000));
        cart.set_quantity(&BookId::new("b1"), 0);
        assert!(cart.is_empty());

        // Absent-id operations are no-ops, not errors.
        cart.remove(&BookId::new("b1"));
        cart.set_quantity(&BookId::new("b1"), 3);
        cart.toggle_selected(&BookId::new("b1"));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_updates_line() {
        let mut cart = CartStore::new();
        cart.add(book("b1", 10_000));
        cart.set_quantity(&BookId::new("b1"), 5);
        assert_eq!(cart.lines()[0].quantity, 5);
        assert_eq!(cart.total_item_count(), 5);
    }

    #[test]
    fn test_toggle_select_all_is_all_or_nothing() {
        let mut cart = CartStore::new();
        cart.add(book("b1", 1));
        cart.add(book("b2", 1));
        cart.add(book("b3", 1));
        cart.toggle_selected(&BookId::new("b1"));
        cart.toggle_selected(&BookId::new("b2"));
        // 1 of 3 selected -> select all
        cart.toggle_select_all();
        assert!(cart.lines().iter().all(|line| line.selected));
        // all selected -> deselect all
        cart.toggle_select_all();
        assert!(cart.lines().iter().all(|line| !line.selected));
    }

    #[test]
    fn test_selected_total_counts_selected_only() {
        let mut cart = CartStore::new();
        cart.add(book("b1", 50_000));
        cart.add(book("b2", 30_000));
        cart.set_quantity(&BookId::new("b1"), 2);
        cart.toggle_selected(&BookId::new("b2"));

        assert_eq!(cart.selected_lines().count(), 1);
        assert_eq!(cart.selected_total(), 100_000);
        assert_eq!(cart.total_item_count(), 3);
    }

    #[test]
    fn test_line_snapshot_uses_details_precedence() {
        let mut cart = CartStore::new();
        let snapshot: Book = serde_json::from_value(serde_json::json!({
            "_id": "b1",
            "details": {"price": "50,000"},
            "price": 99
        }))
        .expect("book deserializes");
        cart.add(snapshot);
        assert_eq!(cart.selected_total(), 50_000);
    }
}
