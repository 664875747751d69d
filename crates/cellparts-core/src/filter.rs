//! # Search Filters
//!
//! Case-insensitive substring filters used by the list pages.
//!
//! ```text
//! query "cab"  ──normalize──►  "cab"
//!                                 │
//!    ┌────────────────────────────┼─────────────────────────────┐
//!    ▼                            ▼                             ▼
//! Products: name | sku    Orders: customer | id    Catalog: name
//! ```
//!
//! [`filter_by_name`] covers any other list searched by name alone.
//!
//! A blank query (after trimming) matches everything. Filters borrow from
//! the cached collection and never reorder it.

use crate::catalog::CatalogProduct;
use crate::types::{Order, Product, ServiceOrder};
use crate::validation::normalize_search_query;

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

fn filter_by<'a, T, F>(items: &'a [T], query: &str, matches: F) -> Vec<&'a T>
where
    F: Fn(&T, &str) -> bool,
{
    let needle = normalize_search_query(query);
    if needle.is_empty() {
        return items.iter().collect();
    }
    items.iter().filter(|item| matches(item, &needle)).collect()
}

/// Products whose name or SKU contains `query`.
///
/// ## Example
/// ```rust
/// use cellparts_core::filter::filter_products;
///
/// let products = Vec::new();
/// assert!(filter_products(&products, "cabo").is_empty());
/// ```
pub fn filter_products<'a>(products: &'a [Product], query: &str) -> Vec<&'a Product> {
    filter_by(products, query, |p, needle| {
        contains_ci(&p.name, needle) || contains_ci(&p.sku, needle)
    })
}

/// Orders whose customer or id contains `query`.
pub fn filter_orders<'a>(orders: &'a [Order], query: &str) -> Vec<&'a Order> {
    filter_by(orders, query, |o, needle| {
        contains_ci(&o.customer, needle) || contains_ci(&o.id, needle)
    })
}

/// Service orders whose customer or id contains `query`.
pub fn filter_service_orders<'a>(
    tickets: &'a [ServiceOrder],
    query: &str,
) -> Vec<&'a ServiceOrder> {
    filter_by(tickets, query, |t, needle| {
        contains_ci(&t.customer, needle) || contains_ci(&t.id, needle)
    })
}

/// Items whose name, as read by `name`, contains `query`.
///
/// ## Example
/// ```rust
/// use cellparts_core::filter::filter_by_name;
///
/// let shelf = ["Capinha iPhone 14", "Cabo USB-C"];
/// assert_eq!(filter_by_name(&shelf, "CABO", |item| *item), vec![&"Cabo USB-C"]);
/// ```
pub fn filter_by_name<'a, T, F>(items: &'a [T], query: &str, name: F) -> Vec<&'a T>
where
    F: Fn(&T) -> &str,
{
    filter_by(items, query, |item, needle| contains_ci(name(item), needle))
}

/// POS catalog entries whose name contains `query`.
pub fn filter_catalog<'a>(catalog: &'a [CatalogProduct], query: &str) -> Vec<&'a CatalogProduct> {
    filter_by_name(catalog, query, |p| &p.name)
}

// =============================================================================
// Unit Tests
// =============================================================================
