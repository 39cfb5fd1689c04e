//! The shopping cart.
//!
//! Carts live in the session, one per signed-in user, for the lifetime of
//! that session. Lines keep insertion order so the cart page stays stable
//! across re-renders, and at most one line exists per shoe.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use shoeworld_core::ShoeId;

use crate::shoeworld::Shoe;

/// One cart line: a shoe and how many pairs of it.
///
/// Carries a snapshot of the shoe's display fields so the cart page renders
/// without refetching the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    pub shoe_id: ShoeId,
    pub name: String,
    pub brand: String,
    pub size: String,
    pub color: String,
    /// Unit price at the time the line was added.
    pub price: Decimal,
    pub quantity: u32,
}

impl CartLine {
    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// An ordered shopping cart.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// The lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add one pair of a shoe.
    ///
    /// An existing line for the same shoe gains quantity instead of a
    /// duplicate line appearing at the end.
    pub fn add(&mut self, shoe: &Shoe) {
        if let Some(line) = self.line_mut(shoe.id) {
            line.quantity = line.quantity.saturating_add(1);
            return;
        }

        self.lines.push(CartLine {
            shoe_id: shoe.id,
            name: shoe.name.clone(),
            brand: shoe.brand.clone(),
            size: shoe.size.clone(),
            color: shoe.color.clone(),
            price: shoe.price,
            quantity: 1,
        });
    }

    /// Increase a line's quantity by one. Unknown ids are ignored.
    pub fn increase(&mut self, shoe_id: ShoeId) {
        if let Some(line) = self.line_mut(shoe_id) {
            line.quantity = line.quantity.saturating_add(1);
        }
    }

    /// Decrease a line's quantity by one; at quantity 1 the line is removed.
    /// Unknown ids are ignored.
    pub fn decrease(&mut self, shoe_id: ShoeId) {
        let Some(index) = self.lines.iter().position(|line| line.shoe_id == shoe_id) else {
            return;
        };

        match self.lines.get_mut(index) {
            Some(line) if line.quantity > 1 => line.quantity -= 1,
            _ => {
                self.lines.remove(index);
            }
        }
    }

    /// Remove a line entirely. Unknown ids are ignored.
    pub fn remove(&mut self, shoe_id: ShoeId) {
        self.lines.retain(|line| line.shoe_id != shoe_id);
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Quantity of a given shoe in the cart, if present.
    ///
    /// Drives the per-card quantity controls on the product grid.
    #[must_use]
    pub fn line_quantity(&self, shoe_id: ShoeId) -> Option<u32> {
        self.lines
            .iter()
            .find(|line| line.shoe_id == shoe_id)
            .map(|line| line.quantity)
    }

    /// Total number of pairs across all lines. Shown on the nav badge.
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Sum of line totals, in exact decimal arithmetic.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    fn line_mut(&mut self, shoe_id: ShoeId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.shoe_id == shoe_id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use shoeworld_core::ShoeCategory;

    use super::*;

    fn shoe(id: i32, name: &str, price: &str) -> Shoe {
        Shoe {
            id: ShoeId::new(id),
            name: name.to_string(),
            brand: "Testbrand".to_string(),
            price: price.parse().unwrap(),
            size: "10".to_string(),
            stock: 5,
            color: "black".to_string(),
            category: ShoeCategory::Casual,
            image: None,
            attributes: None,
            created_at: None,
        }
    }

    #[test]
    fn test_add_new_lines_keep_insertion_order() {
        let mut cart = Cart::new();
        cart.add(&shoe(1, "Runner", "99.99"));
        cart.add(&shoe(2, "Loafer", "59.99"));
        cart.add(&shoe(3, "Oxford", "149.99"));

        let names: Vec<_> = cart.lines().iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, ["Runner", "Loafer", "Oxford"]);
    }

    #[test]
    fn test_add_same_shoe_bumps_quantity() {
        let mut cart = Cart::new();
        cart.add(&shoe(1, "Runner", "99.99"));
        cart.add(&shoe(2, "Loafer", "59.99"));
        cart.add(&shoe(1, "Runner", "99.99"));

        assert_eq!(cart.lines().len(), 2);
        assert_eq!(cart.line_quantity(ShoeId::new(1)), Some(2));
        // The bumped line stays where it was inserted
        assert_eq!(cart.lines()[0].name, "Runner");
    }

    #[test]
    fn test_increase() {
        let mut cart = Cart::new();
        cart.add(&shoe(1, "Runner", "99.99"));
        cart.increase(ShoeId::new(1));
        cart.increase(ShoeId::new(1));

        assert_eq!(cart.line_quantity(ShoeId::new(1)), Some(3));
    }

    #[test]
    fn test_increase_unknown_is_noop() {
        let mut cart = Cart::new();
        cart.add(&shoe(1, "Runner", "99.99"));
        cart.increase(ShoeId::new(42));

        assert_eq!(cart.total_quantity(), 1);
    }

    #[test]
    fn test_decrease_above_one() {
        let mut cart = Cart::new();
        cart.add(&shoe(1, "Runner", "99.99"));
        cart.increase(ShoeId::new(1));
        cart.decrease(ShoeId::new(1));

        assert_eq!(cart.line_quantity(ShoeId::new(1)), Some(1));
    }

    #[test]
    fn test_decrease_at_one_removes_line() {
        let mut cart = Cart::new();
        cart.add(&shoe(1, "Runner", "99.99"));
        cart.add(&shoe(2, "Loafer", "59.99"));
        cart.decrease(ShoeId::new(1));

        assert_eq!(cart.line_quantity(ShoeId::new(1)), None);
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].name, "Loafer");
    }

    #[test]
    fn test_decrease_unknown_is_noop() {
        let mut cart = Cart::new();
        cart.add(&shoe(1, "Runner", "99.99"));
        cart.decrease(ShoeId::new(42));

        assert_eq!(cart.lines().len(), 1);
    }

    #[test]
    fn test_remove() {
        let mut cart = Cart::new();
        cart.add(&shoe(1, "Runner", "99.99"));
        cart.increase(ShoeId::new(1));
        cart.add(&shoe(2, "Loafer", "59.99"));
        cart.remove(ShoeId::new(1));

        assert_eq!(cart.line_quantity(ShoeId::new(1)), None);
        assert_eq!(cart.total_quantity(), 1);
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add(&shoe(1, "Runner", "99.99"));
        cart.add(&shoe(2, "Loafer", "59.99"));
        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.subtotal(), Decimal::ZERO);
    }

    #[test]
    fn test_total_quantity_sums_pairs_not_lines() {
        let mut cart = Cart::new();
        cart.add(&shoe(1, "Runner", "99.99"));
        cart.increase(ShoeId::new(1));
        cart.increase(ShoeId::new(1));
        cart.add(&shoe(2, "Loafer", "59.99"));

        assert_eq!(cart.lines().len(), 2);
        assert_eq!(cart.total_quantity(), 4);
    }

    #[test]
    fn test_subtotal_is_exact() {
        let mut cart = Cart::new();
        cart.add(&shoe(1, "Runner", "99.99"));
        cart.increase(ShoeId::new(1));
        cart.increase(ShoeId::new(1));
        cart.add(&shoe(2, "Loafer", "0.10"));
        cart.increase(ShoeId::new(2));

        // 3 * 99.99 + 2 * 0.10 = 300.17, with no float drift
        assert_eq!(cart.subtotal(), "300.17".parse::<Decimal>().unwrap());
    }

    #[test]
    fn test_line_total() {
        let mut cart = Cart::new();
        cart.add(&shoe(1, "Runner", "33.33"));
        cart.increase(ShoeId::new(1));

        assert_eq!(
            cart.lines()[0].line_total(),
            "66.66".parse::<Decimal>().unwrap()
        );
    }

    #[test]
    fn test_serde_roundtrip() {
        let mut cart = Cart::new();
        cart.add(&shoe(1, "Runner", "99.99"));
        cart.increase(ShoeId::new(1));

        let json = serde_json::to_string(&cart).unwrap();
        let back: Cart = serde_json::from_str(&json).unwrap();

        assert_eq!(back.total_quantity(), 2);
        assert_eq!(back.subtotal(), cart.subtotal());
    }
}
