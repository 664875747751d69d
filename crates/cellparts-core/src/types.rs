//! # Domain Types
//!
//! The three server-persisted entities and the payloads used to create and
//! update them.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │      Order      │   │  ServiceOrder   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (server)    │   │  id "#1234"     │   │  id "OS-001"    │       │
//! │  │  sku            │   │  customer       │   │  customer       │       │
//! │  │  price (Money)  │   │  total (Money)  │   │  device / issue │       │
//! │  │  stock          │   │  type           │   │  status         │       │
//! │  │  status         │   │  status         │   │  priority       │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  Table:   products           orders              service_orders         │
//! │  Cache:   "products"         "orders"            "service-orders"       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Open Enumerations
//! Status and priority columns are free text on the server. The known values
//! get their own variants; anything else is preserved in `Other(String)` so
//! it round-trips untouched.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::money::Money;

// =============================================================================
// Open Enumeration Macro
// =============================================================================

macro_rules! open_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
            /// A value outside the known set, kept verbatim.
            Other(String),
        }

        impl $name {
            /// The known values, in display order.
            pub fn known() -> Vec<$name> {
                vec![$( $name::$variant ),+]
            }

            /// The value as stored in the table.
            pub fn as_str(&self) -> &str {
                match self {
                    $( $name::$variant => $wire, )+
                    $name::Other(value) => value.as_str(),
                }
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                match value {
                    $( $wire => $name::$variant, )+
                    other => $name::Other(other.to_string()),
                }
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                $name::from(value.as_str())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let value = String::deserialize(deserializer)?;
                Ok($name::from(value))
            }
        }
    };
}

open_enum! {
    /// Stocking state of a product, set explicitly by whoever registers it.
    ///
    /// Never derived from `stock` by the client.
    pub enum ProductStatus {
        Active => "active",
        Low => "low",
        Critical => "critical",
    }
}

open_enum! {
    /// Fulfillment progress of an order.
    ///
    /// ```text
    /// pending ──► ready (pickup) ──────┐
    ///    │                             ├──► completed
    ///    └──────► in_transit (delivery)┘
    /// ```
    /// Transitions are not enforced; staff pick the new status directly.
    pub enum OrderStatus {
        Pending => "pending",
        Ready => "ready",
        InTransit => "in_transit",
        Completed => "completed",
    }
}

open_enum! {
    /// Progress of a repair ticket.
    pub enum ServiceStatus {
        Waiting => "waiting",
        InProgress => "in_progress",
        Completed => "completed",
    }
}

open_enum! {
    /// Urgency of a repair ticket.
    pub enum Priority {
        High => "high",
        Medium => "medium",
        Low => "low",
    }
}

impl Default for ProductStatus {
    fn default() -> Self {
        ProductStatus::Active
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

impl Default for ServiceStatus {
    fn default() -> Self {
        ServiceStatus::Waiting
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

// =============================================================================
// Order Type
// =============================================================================

/// How an order reaches the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    #[default]
    Delivery,
    Pickup,
}

impl OrderType {
    /// The value as stored in the table.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Delivery => "delivery",
            OrderType::Pickup => "pickup",
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "delivery" | "entrega" => Ok(OrderType::Delivery),
            "pickup" | "retirada" => Ok(OrderType::Pickup),
            other => Err(format!("unknown order type: '{}'", other)),
        }
    }
}

// =============================================================================
// Entity Kind
// =============================================================================

/// The three entity collections the store keeps on the table API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Products,
    Orders,
    ServiceOrders,
}

impl EntityKind {
    /// All entity kinds.
    pub const ALL: [EntityKind; 3] = [
        EntityKind::Products,
        EntityKind::Orders,
        EntityKind::ServiceOrders,
    ];

    /// Table name on the hosted API.
    pub const fn table(&self) -> &'static str {
        match self {
            EntityKind::Products => "products",
            EntityKind::Orders => "orders",
            EntityKind::ServiceOrders => "service_orders",
        }
    }

    /// Key of the cached collection in the query client.
    pub const fn query_key(&self) -> &'static str {
        match self {
            EntityKind::Products => "products",
            EntityKind::Orders => "orders",
            EntityKind::ServiceOrders => "service-orders",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table())
    }
}

/// A server-persisted record type.
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Which collection this entity lives in.
    const KIND: EntityKind;

    /// The row identifier as text (product ids are integers on the wire).
    fn key(&self) -> String;
}

// =============================================================================
// Product
// =============================================================================

/// A product in the store inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Server-assigned identifier.
    pub id: i64,
    pub name: String,
    pub sku: String,
    pub price: Money,
    /// Units on hand.
    pub stock: i64,
    pub category: String,
    pub status: ProductStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Whether the product list should highlight the stock count.
    pub fn is_stock_highlighted(&self) -> bool {
        self.stock < crate::LOW_STOCK_HIGHLIGHT
    }
}

impl Entity for Product {
    const KIND: EntityKind = EntityKind::Products;

    fn key(&self) -> String {
        self.id.to_string()
    }
}

/// Payload for registering a product.
///
/// `status` is optional on the way in; the data-access layer fills in
/// `active` when it is missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub sku: String,
    pub price: Money,
    pub stock: i64,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ProductStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

// =============================================================================
// Order
// =============================================================================

/// A delivery or pickup order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Caller-supplied identifier, e.g. `#1234`.
    pub id: String,
    pub customer: String,
    /// Free-text summary such as "3 produtos".
    pub items: String,
    pub total: Money,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    pub status: OrderStatus,
    pub address: String,
    /// Display date as typed by staff.
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Entity for Order {
    const KIND: EntityKind = EntityKind::Orders;

    fn key(&self) -> String {
        self.id.clone()
    }
}

/// Payload for creating an order. Every field is supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOrder {
    pub id: String,
    pub customer: String,
    pub items: String,
    pub total: Money,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    pub status: OrderStatus,
    pub address: String,
    pub date: String,
}

/// Whole-field replacement of an order's status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderStatusUpdate {
    pub id: String,
    pub status: OrderStatus,
}

// =============================================================================
// Service Order
// =============================================================================

/// A repair ticket for a customer device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceOrder {
    /// Caller-supplied identifier, e.g. `OS-001`.
    pub id: String,
    pub customer: String,
    pub device: String,
    pub issue: String,
    pub status: ServiceStatus,
    pub priority: Priority,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Entity for ServiceOrder {
    const KIND: EntityKind = EntityKind::ServiceOrders;

    fn key(&self) -> String {
        self.id.clone()
    }
}

/// Payload for opening a repair ticket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewServiceOrder {
    pub id: String,
    pub customer: String,
    pub device: String,
    pub issue: String,
    pub status: ServiceStatus,
    pub priority: Priority,
    pub date: String,
}

/// Whole-field replacement of a ticket's status and, optionally, priority.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceOrderStatusUpdate {
    pub id: String,
    pub status: ServiceStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_open_enum_round_trips_unknown_values() {
        let status: OrderStatus = serde_json::from_value(json!("on_hold")).unwrap();
        assert_eq!(status, OrderStatus::Other("on_hold".to_string()));
        assert_eq!(serde_json::to_value(&status).unwrap(), json!("on_hold"));

        let known: OrderStatus = serde_json::from_value(json!("in_transit")).unwrap();
        assert_eq!(known, OrderStatus::InTransit);
    }

    #[test]
    fn test_entity_kind_names() {
        assert_eq!(EntityKind::ServiceOrders.table(), "service_orders");
        assert_eq!(EntityKind::ServiceOrders.query_key(), "service-orders");
        assert_eq!(EntityKind::Products.query_key(), "products");
    }

    #[test]
    fn test_order_uses_type_field_on_the_wire() {
        let row = json!({
            "id": "#1234",
            "customer": "João Silva",
            "items": "3 produtos",
            "total": 234.8,
            "type": "delivery",
            "status": "pending",
            "address": "Rua das Flores, 123 - Centro",
            "date": "10/11/2025 14:30",
            "created_at": "2025-11-10T14:30:00Z"
        });
        let order: Order = serde_json::from_value(row).unwrap();
        assert_eq!(order.order_type, OrderType::Delivery);
        assert_eq!(order.total.cents(), 23480);
        assert!(order.created_at.is_some());
    }

    #[test]
    fn test_new_product_omits_missing_optionals() {
        let payload = NewProduct {
            name: "Cabo".into(),
            sku: "CAB-1".into(),
            price: Money::from_cents(1000),
            stock: 5,
            category: "Cabos".into(),
            status: None,
            description: None,
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert!(value.get("status").is_none());
        assert!(value.get("description").is_none());
        assert_eq!(value["price"], json!(10.0));
    }

    #[test]
    fn test_order_type_parsing() {
        assert_eq!("pickup".parse::<OrderType>().unwrap(), OrderType::Pickup);
        assert_eq!("Entrega".parse::<OrderType>().unwrap(), OrderType::Delivery);
        assert!("drone".parse::<OrderType>().is_err());
    }

    #[test]
    fn test_stock_highlight() {
        let product = Product {
            id: 1,
            name: "Película Xiaomi".into(),
            sku: "PEL-XI-001".into(),
            price: Money::from_cents(3500),
            stock: 9,
            category: "Películas".into(),
            status: ProductStatus::Low,
            description: None,
            created_at: None,
        };
        assert!(product.is_stock_highlighted());
    }
}
