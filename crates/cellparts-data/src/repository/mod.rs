//! # Repository Module
//!
//! Typed access to the three entity tables.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Hook (apps/erp)                                                        │
//! │       │  store.products().fetch_products()                              │
//! │       ▼                                                                 │
//! │  ProductRepository   (this module: payload → JSON, JSON → Product)      │
//! │       │  api.select_all("products", name.asc)                           │
//! │       ▼                                                                 │
//! │  Arc<dyn TableApi>   (rest / sqlite / memory)                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`] - List and register products
//! - [`OrderRepository`] - List, create and re-status orders
//! - [`ServiceOrderRepository`] - List, open and re-status repair tickets

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use cellparts_core::Entity;

use crate::backend::{OrderBy, TableApi};
use crate::error::DataResult;

pub mod order;
pub mod product;
pub mod service_order;

pub use order::OrderRepository;
pub use product::ProductRepository;
pub use service_order::ServiceOrderRepository;

/// Reads a whole table and decodes every row.
pub(crate) async fn fetch_all<T: Entity>(api: &dyn TableApi, order: OrderBy) -> DataResult<Vec<T>> {
    let table = T::KIND.table();
    let rows = api.select_all(table, order).await?;
    let decoded = rows
        .into_iter()
        .map(serde_json::from_value::<T>)
        .collect::<Result<Vec<_>, _>>()?;
    debug!(table, count = decoded.len(), "Fetched rows");
    Ok(decoded)
}

/// Inserts a payload and decodes the stored row.
pub(crate) async fn insert<T: Entity>(api: &dyn TableApi, payload: Value) -> DataResult<T> {
    let row = api.insert_one(T::KIND.table(), payload).await?;
    Ok(serde_json::from_value(row)?)
}

/// Patches a row by id and decodes the stored row.
pub(crate) async fn update<T: Entity, P: Serialize>(
    api: &dyn TableApi,
    id: &str,
    patch: &P,
) -> DataResult<T> {
    let patch = serde_json::to_value(patch)?;
    let row = api.update_by_id(T::KIND.table(), id, patch).await?;
    Ok(serde_json::from_value(row)?)
}
