//! # Order Repository
//!
//! Table operations for delivery and pickup orders.

use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

use cellparts_core::{NewOrder, Order, OrderStatus, OrderStatusUpdate};

use super::{fetch_all, insert, update};
use crate::backend::{OrderBy, TableApi};
use crate::error::DataResult;

#[derive(Serialize)]
struct StatusPatch<'a> {
    status: &'a OrderStatus,
}

/// Repository for the `orders` table.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    api: Arc<dyn TableApi>,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(api: Arc<dyn TableApi>) -> Self {
        OrderRepository { api }
    }

    /// All orders, newest first.
    pub async fn fetch_orders(&self) -> DataResult<Vec<Order>> {
        debug!("Fetching orders");
        fetch_all(self.api.as_ref(), OrderBy::desc("created_at")).await
    }

    /// Creates an order exactly as given.
    pub async fn create_order(&self, order: NewOrder) -> DataResult<Order> {
        let payload = serde_json::to_value(&order)?;
        let created: Order = insert(self.api.as_ref(), payload).await?;
        info!(id = %created.id, order_type = %created.order_type, "Order created");
        Ok(created)
    }

    /// Replaces the status of one order.
    pub async fn update_order_status(&self, change: OrderStatusUpdate) -> DataResult<Order> {
        let patch = StatusPatch {
            status: &change.status,
        };
        let updated: Order = update(self.api.as_ref(), &change.id, &patch).await?;
        info!(id = %updated.id, status = %updated.status, "Order status updated");
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryTableApi;
    use crate::error::DataError;
    use cellparts_core::{Money, OrderType};

    fn new_order(id: &str) -> NewOrder {
        NewOrder {
            id: id.to_string(),
            customer: "João Silva".to_string(),
            items: "3 produtos".to_string(),
            total: Money::from_cents(23480),
            order_type: OrderType::Delivery,
            status: OrderStatus::Pending,
            address: "Rua das Flores, 123 - Centro".to_string(),
            date: "10/11/2025 14:30".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_then_update_status() {
        let repo = OrderRepository::new(Arc::new(MemoryTableApi::new()));
        let created = repo.create_order(new_order("#1234")).await.unwrap();
        assert_eq!(created.id, "#1234");
        assert_eq!(created.total.cents(), 23480);

        let updated = repo
            .update_order_status(OrderStatusUpdate {
                id: "#1234".to_string(),
                status: OrderStatus::InTransit,
            })
            .await
            .unwrap();
        assert_eq!(updated.status, OrderStatus::InTransit);
        assert_eq!(updated.customer, "João Silva");
    }

    #[tokio::test]
    async fn test_newest_first() {
        let repo = OrderRepository::new(Arc::new(MemoryTableApi::new()));
        repo.create_order(new_order("#1")).await.unwrap();
        repo.create_order(new_order("#2")).await.unwrap();

        let orders = repo.fetch_orders().await.unwrap();
        assert_eq!(orders[0].id, "#2");
    }

    #[tokio::test]
    async fn test_unknown_order_is_not_found() {
        let repo = OrderRepository::new(Arc::new(MemoryTableApi::new()));
        let err = repo
            .update_order_status(OrderStatusUpdate {
                id: "#404".to_string(),
                status: OrderStatus::Ready,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DataError::NotFound { .. }));
    }
}
