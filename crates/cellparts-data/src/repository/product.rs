//! # Product Repository
//!
//! Table operations for products.
//!
//! ## Key Operations
//! - List the catalog alphabetically
//! - Register a product (status defaults to `active`)

use std::sync::Arc;
use tracing::{debug, info};

use cellparts_core::{NewProduct, Product, ProductStatus};

use super::{fetch_all, insert};
use crate::backend::{OrderBy, TableApi};
use crate::error::DataResult;

/// Repository for the `products` table.
///
/// ## Usage
/// ```rust,ignore
/// let repo = store.products();
/// let products = repo.fetch_products().await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    api: Arc<dyn TableApi>,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(api: Arc<dyn TableApi>) -> Self {
        ProductRepository { api }
    }

    /// All products ordered by name, ascending.
    pub async fn fetch_products(&self) -> DataResult<Vec<Product>> {
        debug!("Fetching products");
        fetch_all(self.api.as_ref(), OrderBy::asc("name")).await
    }

    /// Registers a product and returns it as stored.
    ///
    /// The status is sent as given; when the caller left it out the
    /// product is registered as `active`.
    pub async fn create_product(&self, mut product: NewProduct) -> DataResult<Product> {
        product.status.get_or_insert(ProductStatus::Active);
        let payload = serde_json::to_value(&product)?;

        let created: Product = insert(self.api.as_ref(), payload).await?;
        info!(id = created.id, sku = %created.sku, "Product registered");
        Ok(created)
    }
}
