//! # cellparts-data: Table API Access for CellParts ERP
//!
//! Every read and write the ERP performs goes through this crate.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      cellparts-data                                     │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                          Store                                    │  │
//! │  │   products()        orders()         service_orders()             │  │
//! │  └──────┬──────────────────┬──────────────────┬─────────────────────┘  │
//! │         ▼                  ▼                  ▼                         │
//! │  ProductRepository  OrderRepository  ServiceOrderRepository             │
//! │         └──────────────────┼──────────────────┘                         │
//! │                            ▼                                            │
//! │                   Arc<dyn TableApi>                                     │
//! │          ┌─────────────────┼─────────────────┐                          │
//! │          ▼                 ▼                 ▼                          │
//! │    RestTableApi     SqliteTableApi    MemoryTableApi                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`backend`] - The `TableApi` trait and its implementations
//! - [`repository`] - Typed per-entity operations
//! - [`config`] - Backend selection (file + environment)
//! - [`error`] - Data access errors

pub mod backend;
pub mod config;
pub mod error;
pub mod repository;

pub use backend::{MemoryTableApi, OrderBy, RestTableApi, Row, SortDirection, SqliteTableApi, TableApi};
pub use config::{BackendKind, DataConfig};
pub use error::{DataError, DataResult};
pub use repository::{OrderRepository, ProductRepository, ServiceOrderRepository};

use std::sync::Arc;

/// Shared handle over the configured backend.
///
/// Cloning is cheap; every clone talks to the same backend.
#[derive(Debug, Clone)]
pub struct Store {
    api: Arc<dyn TableApi>,
}

impl Store {
    /// Wraps a backend.
    pub fn new(api: Arc<dyn TableApi>) -> Self {
        Store { api }
    }

    /// Builds the backend described by `config`.
    pub async fn connect(config: &DataConfig) -> DataResult<(Self, Option<Arc<MemoryTableApi>>)> {
        let (api, memory) = config.connect().await?;
        Ok((Store::new(api), memory))
    }

    /// The backend in use (`rest`, `sqlite`, `memory`).
    pub fn backend_name(&self) -> &'static str {
        self.api.backend_name()
    }

    /// Returns the product repository.
    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.api.clone())
    }

    /// Returns the order repository.
    pub fn orders(&self) -> OrderRepository {
        OrderRepository::new(self.api.clone())
    }

    /// Returns the service order repository.
    pub fn service_orders(&self) -> ServiceOrderRepository {
        ServiceOrderRepository::new(self.api.clone())
    }
}
