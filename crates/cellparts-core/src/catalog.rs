//! # Catalog Module
//!
//! The fixed product list the point-of-sale screen sells from. It is not
//! backed by the `products` table.

use serde::{Deserialize, Serialize};

use crate::money::Money;

/// A product as shown on the POS catalog grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogProduct {
    pub id: i64,
    pub name: String,
    pub price: Money,
    pub category: String,
}

impl CatalogProduct {
    fn new(id: i64, name: &str, cents: i64, category: &str) -> Self {
        CatalogProduct {
            id,
            name: name.to_string(),
            price: Money::from_cents(cents),
            category: category.to_string(),
        }
    }
}

/// The six products sold at the counter.
pub fn pos_catalog() -> Vec<CatalogProduct> {
    vec![
        CatalogProduct::new(1, "Capinha iPhone 14", 8990, "Acessórios"),
        CatalogProduct::new(2, "Carregador Tipo-C 20W", 4500, "Carregadores"),
        CatalogProduct::new(3, "Película Xiaomi", 3500, "Películas"),
        CatalogProduct::new(4, "Fone Bluetooth TWS", 15990, "Áudio"),
        CatalogProduct::new(5, "Cabo USB-C 2m", 2990, "Cabos"),
        CatalogProduct::new(6, "Suporte Veicular", 3990, "Acessórios"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_unique_ids() {
        let catalog = pos_catalog();
        assert_eq!(catalog.len(), 6);
        let mut ids: Vec<i64> = catalog.iter().map(|p| p.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), 6);
        assert_eq!(catalog[3].price.to_string(), "R$ 159.90");
    }
}
