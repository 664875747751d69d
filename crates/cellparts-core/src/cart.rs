//! # Cart Module
//!
//! The point-of-sale cart used by the Sales page.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        POS Cart Lifecycle                               │
//! │                                                                         │
//! │   empty ──add──► lines ──add/increment/decrement/remove──► lines        │
//! │     ▲                         │                                         │
//! │     │                         │ decrement on qty 1 removes the line     │
//! │     │                         ▼                                         │
//! │     └──────────clear (finalize)──────── lines                           │
//! │                                                                         │
//! │   total = Σ unit_price × quantity   (integer centavos)                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Lines are keyed by product id and kept in insertion order. A sale is not
//! persisted anywhere; finalizing simply empties the cart.

use serde::{Deserialize, Serialize};

use crate::catalog::CatalogProduct;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY};

// =============================================================================
// Cart Line
// =============================================================================

/// One product in the cart with its quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: i64,
    /// Name frozen at the time the line was added.
    pub name: String,
    pub unit_price: Money,
    pub quantity: i64,
}

impl CartLine {
    /// Price × quantity for this line.
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// Point-of-sale cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one unit of a product.
    ///
    /// Creates a line with quantity 1, or increments the existing line.
    ///
    /// ## Example
    /// ```rust
    /// use cellparts_core::cart::Cart;
    /// use cellparts_core::catalog::pos_catalog;
    ///
    /// let catalog = pos_catalog();
    /// let mut cart = Cart::new();
    /// cart.add(&catalog[0]).unwrap();
    /// cart.add(&catalog[0]).unwrap();
    /// assert_eq!(cart.lines()[0].quantity, 2);
    /// ```
    pub fn add(&mut self, product: &CatalogProduct) -> CoreResult<()> {
        if self.line_index(product.id).is_some() {
            return self.increment(product.id);
        }

        if self.lines.len() >= MAX_CART_ITEMS {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_ITEMS,
            });
        }

        self.lines.push(CartLine {
            product_id: product.id,
            name: product.name.clone(),
            unit_price: product.price,
            quantity: 1,
        });
        Ok(())
    }

    /// Adds one unit to an existing line.
    pub fn increment(&mut self, product_id: i64) -> CoreResult<()> {
        let index = self
            .line_index(product_id)
            .ok_or(CoreError::NotInCart(product_id))?;
        let line = &mut self.lines[index];

        let requested = line.quantity + 1;
        if requested > MAX_ITEM_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested,
                max: MAX_ITEM_QUANTITY,
            });
        }
        line.quantity = requested;
        Ok(())
    }

    /// Removes one unit. The line disappears when its last unit is removed.
    pub fn decrement(&mut self, product_id: i64) -> CoreResult<()> {
        let index = self
            .line_index(product_id)
            .ok_or(CoreError::NotInCart(product_id))?;

        if self.lines[index].quantity <= 1 {
            self.lines.remove(index);
        } else {
            self.lines[index].quantity -= 1;
        }
        Ok(())
    }

    /// Removes a whole line regardless of quantity.
    pub fn remove(&mut self, product_id: i64) -> CoreResult<CartLine> {
        let index = self
            .line_index(product_id)
            .ok_or(CoreError::NotInCart(product_id))?;
        Ok(self.lines.remove(index))
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Quantity of a product currently in the cart (0 when absent).
    pub fn quantity_of(&self, product_id: i64) -> i64 {
        self.line_index(product_id)
            .map(|i| self.lines[i].quantity)
            .unwrap_or(0)
    }

    /// Σ unit_price × quantity.
    pub fn total(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Number of distinct lines.
    pub fn item_count(&self) -> usize {
        self.lines.len()
    }

    /// Number of units across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn line_index(&self, product_id: i64) -> Option<usize> {
        self.lines
            .iter()
            .position(|line| line.product_id == product_id)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::pos_catalog;

    fn product(id: i64, cents: i64) -> CatalogProduct {
        CatalogProduct {
            id,
            name: format!("Produto {}", id),
            price: Money::from_cents(cents),
            category: "Teste".to_string(),
        }
    }

    #[test]
    fn test_add_creates_then_increments() {
        let mut cart = Cart::new();
        let cabo = product(5, 2990);

        cart.add(&cabo).unwrap();
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.quantity_of(5), 1);

        cart.add(&cabo).unwrap();
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.quantity_of(5), 2);
    }

    #[test]
    fn test_total_is_price_times_quantity() {
        let catalog = pos_catalog();
        let mut cart = Cart::new();

        // Capinha iPhone 14 (89.90) x2, Carregador (45.00) x1
        cart.add(&catalog[0]).unwrap();
        cart.add(&catalog[0]).unwrap();
        cart.add(&catalog[1]).unwrap();

        assert_eq!(cart.total(), Money::from_cents(8990 * 2 + 4500));
        assert_eq!(cart.total_quantity(), 3);
    }

    #[test]
    fn test_decrement_last_unit_removes_line() {
        let mut cart = Cart::new();
        cart.add(&product(1, 100)).unwrap();
        cart.add(&product(2, 200)).unwrap();
        cart.increment(2).unwrap();

        cart.decrement(2).unwrap();
        assert_eq!(cart.quantity_of(2), 1);

        cart.decrement(1).unwrap();
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.lines()[0].product_id, 2);
        assert_eq!(cart.total(), Money::from_cents(200));
    }

    #[test]
    fn test_remove_whole_line() {
        let mut cart = Cart::new();
        cart.add(&product(1, 100)).unwrap();
        cart.increment(1).unwrap();

        let removed = cart.remove(1).unwrap();
        assert_eq!(removed.quantity, 2);
        assert!(cart.is_empty());
        assert!(cart.total().is_zero());
    }

    #[test]
    fn test_operations_on_missing_line_fail() {
        let mut cart = Cart::new();
        assert!(matches!(cart.increment(9), Err(CoreError::NotInCart(9))));
        assert!(matches!(cart.decrement(9), Err(CoreError::NotInCart(9))));
        assert!(matches!(cart.remove(9), Err(CoreError::NotInCart(9))));
    }

    #[test]
    fn test_quantity_limit() {
        let mut cart = Cart::new();
        let item = product(1, 100);
        cart.add(&item).unwrap();
        for _ in 1..MAX_ITEM_QUANTITY {
            cart.increment(1).unwrap();
        }
        assert_eq!(cart.quantity_of(1), MAX_ITEM_QUANTITY);
        assert!(matches!(
            cart.add(&item),
            Err(CoreError::QuantityTooLarge { requested: 1000, .. })
        ));
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add(&product(1, 100)).unwrap();
        cart.clear();
        assert!(cart.is_empty());
    }
}
