//! # Hooks
//!
//! The read and write entry points pages use.
//!
//! ```text
//! ┌──────────────────────────────┬──────────────────────────────────────────┐
//! │ queries                      │ mutations                                │
//! ├──────────────────────────────┼──────────────────────────────────────────┤
//! │ use_products                 │ use_create_product                       │
//! │ use_orders                   │ use_create_order / use_update_order_status│
//! │ use_service_orders           │ use_create_service_order                 │
//! │                              │ use_update_service_order_status          │
//! └──────────────────────────────┴──────────────────────────────────────────┘
//! ```
//! A successful mutation invalidates the matching query key, so the next
//! `use_*` call refetches.

pub mod mutations;
pub mod queries;

pub use mutations::{
    use_create_order, use_create_product, use_create_service_order, use_update_order_status,
    use_update_service_order_status, CreateOrder, CreateProduct, CreateServiceOrder,
    MutationState, UpdateOrderStatus, UpdateServiceOrderStatus,
};
pub use queries::{use_orders, use_products, use_service_orders};
