//! Customer view: "my orders" and the product shelf.

use cellparts_core::badge::{Badge, Tone};
use cellparts_core::filter::filter_by_name;
use cellparts_core::{Money, Toast, ToastVariant};

use crate::state::ToastLog;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShelfProduct {
    pub id: i64,
    pub name: &'static str,
    pub price: Money,
    pub category: &'static str,
    pub image: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerOrder {
    pub id: &'static str,
    /// `in_transit`, `delivered`, anything else reads as pending.
    pub status: &'static str,
    pub items: &'static str,
    pub total: Money,
    pub eta: &'static str,
}

impl CustomerOrder {
    pub fn badge(&self) -> Badge {
        match self.status {
            "in_transit" => Badge::new("Em Trânsito", Tone::Info),
            "delivered" => Badge::new("Entregue", Tone::Success),
            _ => Badge::new("Pendente", Tone::Muted),
        }
    }
}

#[derive(Debug)]
pub struct CustomerPage {
    toasts: ToastLog,
    search: String,
    shelf: Vec<ShelfProduct>,
    orders: Vec<CustomerOrder>,
}

impl CustomerPage {
    pub fn new(toasts: ToastLog) -> Self {
        let shelf = vec![
            ShelfProduct {
                id: 1,
                name: "Capinha iPhone 14",
                price: Money::from_cents(8990),
                category: "Acessórios",
                image: "📱",
            },
            ShelfProduct {
                id: 2,
                name: "Carregador Tipo-C",
                price: Money::from_cents(4500),
                category: "Carregadores",
                image: "🔌",
            },
            ShelfProduct {
                id: 3,
                name: "Fone Bluetooth",
                price: Money::from_cents(15990),
                category: "Áudio",
                image: "🎧",
            },
            ShelfProduct {
                id: 4,
                name: "Película Xiaomi",
                price: Money::from_cents(3500),
                category: "Películas",
                image: "🛡️",
            },
        ];
        let orders = vec![
            CustomerOrder {
                id: "#1234",
                status: "in_transit",
                items: "3 produtos",
                total: Money::from_cents(23480),
                eta: "15 min",
            },
            CustomerOrder {
                id: "#1233",
                status: "delivered",
                items: "1 produto",
                total: Money::from_cents(8990),
                eta: "Entregue",
            },
        ];

        CustomerPage {
            toasts,
            search: String::new(),
            shelf,
            orders,
        }
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Shelf products whose name contains the search term.
    pub fn products(&self) -> Vec<&ShelfProduct> {
        filter_by_name(&self.shelf, &self.search, |p| p.name)
    }

    pub fn my_orders(&self) -> &[CustomerOrder] {
        &self.orders
    }

    /// "Pedir" on a shelf product. Returns false for an unknown id.
    pub fn order(&self, product_id: i64) -> bool {
        match self.shelf.iter().find(|p| p.id == product_id) {
            Some(product) => {
                self.toasts.push(Toast::new(
                    format!("{} adicionado ao carrinho!", product.name),
                    ToastVariant::Success,
                ));
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_toasts_product_name() {
        let toasts = ToastLog::new();
        let page = CustomerPage::new(toasts.clone());

        assert!(page.order(3));
        assert_eq!(toasts.last().unwrap().title, "Fone Bluetooth adicionado ao carrinho!");
        assert!(!page.order(99));
        assert_eq!(toasts.len(), 1);
    }

    #[test]
    fn test_search_and_badges() {
        let mut page = CustomerPage::new(ToastLog::new());
        page.set_search("película");
        assert_eq!(page.products().len(), 1);
        page.set_search("  FONE ");
        assert_eq!(page.products()[0].id, 3);
        page.set_search("");
        assert_eq!(page.products().len(), 4);

        let labels: Vec<_> = page.my_orders().iter().map(|o| o.badge().label).collect();
        assert_eq!(labels, ["Em Trânsito", "Entregue"]);
    }
}
