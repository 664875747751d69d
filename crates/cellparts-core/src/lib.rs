//! # cellparts-core: Pure Business Logic for CellParts ERP
//!
//! Domain types and rules for the store: products, delivery/pickup orders,
//! repair tickets (service orders), the point-of-sale cart and the small
//! presentational descriptors the pages render. Zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       CellParts ERP Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 apps/erp (pages + hooks)                        │   │
//! │  │   Products ──► Orders ──► Service Orders ──► POS ──► Delivery   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ cellparts-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │   Cart    │  │   forms   │  │   │
//! │  │   │  Order    │  │  R$ 0.00  │  │ CartLine  │  │ FormErrors│  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌──────────────┐              │   │
//! │  │   │  filter   │  │   badge   │  │ notification │              │   │
//! │  │   └───────────┘  └───────────┘  └──────────────┘              │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                cellparts-data (Table API access)                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Entities (Product, Order, ServiceOrder) and their payloads
//! - [`money`] - Money type with integer centavos
//! - [`error`] - Domain error types
//! - [`validation`] - Form validation with inline field errors
//! - [`cart`] - Point-of-sale cart
//! - [`catalog`] - Static POS catalog
//! - [`filter`] - Case-insensitive search filters
//! - [`badge`] - Status badge descriptors
//! - [`notification`] - Toast descriptors
//!
//! ## Example Usage
//!
//! ```rust
//! use cellparts_core::money::Money;
//!
//! let price = Money::from_cents(8990);
//! assert_eq!(price.to_string(), "R$ 89.90");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod badge;
pub mod cart;
pub mod catalog;
pub mod error;
pub mod filter;
pub mod money;
pub mod notification;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartLine};
pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use notification::{Toast, ToastVariant};
pub use types::*;
pub use validation::FormErrors;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// How long a fetched collection is served from cache before a refetch.
pub const STALE_TIME_SECS: u64 = 60;

/// Maximum distinct lines allowed in the POS cart.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single line in the POS cart.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Products with stock below this are highlighted in the product list.
pub const LOW_STOCK_HIGHLIGHT: i64 = 10;
