//! # Sales Page (POS)
//!
//! Counter sales from the fixed catalog.
//!
//! ## Cart Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  catalog (search by name)                                               │
//! │       │ add                                                             │
//! │       ▼                                                                 │
//! │  Cart ── increment / decrement / remove ──► total = Σ price × qty       │
//! │       │                                                                 │
//! │       ▼ finalize                                                        │
//! │  empty?  ──yes──► error toast, cart untouched                           │
//! │       │ no                                                              │
//! │       └────────► success toast, cart cleared                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A finished sale is not written anywhere; the screen only confirms it.

use tracing::{info, warn};

use cellparts_core::catalog::{pos_catalog, CatalogProduct};
use cellparts_core::filter::filter_catalog;
use cellparts_core::{Cart, CoreError, Money, Toast, ToastVariant};

use crate::error::{AppError, AppResult};
use crate::state::ToastLog;

#[derive(Debug)]
pub struct SalesPage {
    toasts: ToastLog,
    catalog: Vec<CatalogProduct>,
    search: String,
    cart: Cart,
}

impl SalesPage {
    pub fn new(toasts: ToastLog) -> Self {
        SalesPage {
            toasts,
            catalog: pos_catalog(),
            search: String::new(),
            cart: Cart::new(),
        }
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
    }

    /// Catalog entries matching the search.
    pub fn visible_products(&self) -> Vec<&CatalogProduct> {
        filter_catalog(&self.catalog, &self.search)
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn total(&self) -> Money {
        self.cart.total()
    }

    /// Whether "Finalizar Venda" is enabled.
    pub fn can_finalize(&self) -> bool {
        !self.cart.is_empty()
    }

    /// Puts one unit of a catalog product in the cart.
    pub fn add_to_cart(&mut self, product_id: i64) -> AppResult<()> {
        let product = self
            .catalog
            .iter()
            .find(|p| p.id == product_id)
            .ok_or_else(|| AppError::Unavailable(format!("Produto {} fora do catálogo", product_id)))?;

        match self.cart.add(product) {
            Ok(()) => {
                self.toasts
                    .push(Toast::new("Produto adicionado ao carrinho", ToastVariant::Success));
                Ok(())
            }
            Err(err) => Err(self.reject(err)),
        }
    }

    pub fn increment(&mut self, product_id: i64) -> AppResult<()> {
        self.cart.increment(product_id).map_err(|err| self.reject(err))
    }

    /// Takes one unit off; the last unit takes the line with it.
    pub fn decrement(&mut self, product_id: i64) -> AppResult<()> {
        self.cart.decrement(product_id).map_err(AppError::from)
    }

    /// Drops the whole line.
    pub fn remove_from_cart(&mut self, product_id: i64) -> AppResult<()> {
        self.cart.remove(product_id)?;
        self.toasts.push(Toast::new("Produto removido", ToastVariant::Info));
        Ok(())
    }

    /// Confirms the sale and empties the cart.
    ///
    /// ## Returns
    /// The amount charged, or an error when the cart is empty.
    pub fn finalize(&mut self) -> AppResult<Money> {
        if self.cart.is_empty() {
            let message = "Adicione produtos ao carrinho";
            self.toasts.push(Toast::new(message, ToastVariant::Destructive));
            return Err(AppError::Unavailable(message.to_string()));
        }

        let total = self.cart.total();
        info!(
            lines = self.cart.item_count(),
            units = self.cart.total_quantity(),
            total = %total,
            "Sale finalized"
        );
        self.toasts
            .push(Toast::new("Venda finalizada com sucesso!", ToastVariant::Success));
        self.cart.clear();
        Ok(total)
    }

    fn reject(&self, err: CoreError) -> AppError {
        warn!(error = %err, "Cart change rejected");
        self.toasts.push(Toast::destructive("Carrinho", err.to_string()));
        AppError::from(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_total_and_line_removal() {
        let toasts = ToastLog::new();
        let mut page = SalesPage::new(toasts.clone());

        page.add_to_cart(1).unwrap(); // 89.90
        page.add_to_cart(1).unwrap();
        page.add_to_cart(5).unwrap(); // 29.90
        assert_eq!(page.total(), Money::from_cents(2 * 8990 + 2990));

        page.decrement(5).unwrap();
        assert_eq!(page.cart().item_count(), 1);
        assert_eq!(page.total(), Money::from_cents(17980));
        assert_eq!(toasts.last().unwrap().title, "Produto adicionado ao carrinho");
    }

    #[test]
    fn test_finalize_empty_cart_is_rejected() {
        let toasts = ToastLog::new();
        let mut page = SalesPage::new(toasts.clone());

        assert!(!page.can_finalize());
        assert!(page.finalize().is_err());
        let toast = toasts.last().unwrap();
        assert_eq!(toast.title, "Adicione produtos ao carrinho");
        assert!(toast.is_destructive());
    }

    #[test]
    fn test_finalize_clears_cart() {
        let toasts = ToastLog::new();
        let mut page = SalesPage::new(toasts.clone());
        page.add_to_cart(4).unwrap();

        assert_eq!(page.finalize().unwrap(), Money::from_cents(15990));
        assert!(page.cart().is_empty());
        assert_eq!(toasts.last().unwrap().title, "Venda finalizada com sucesso!");
    }

    #[test]
    fn test_search_and_remove() {
        let toasts = ToastLog::new();
        let mut page = SalesPage::new(toasts.clone());

        page.set_search("  CABO ");
        let visible = page.visible_products();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].name, "Cabo USB-C 2m");
        let id = visible[0].id;

        page.add_to_cart(id).unwrap();
        page.remove_from_cart(5).unwrap();
        assert!(page.cart().is_empty());
        assert_eq!(toasts.last().unwrap().variant, ToastVariant::Info);
        assert!(page.remove_from_cart(5).is_err());
    }
}
