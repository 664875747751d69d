//! # Query Hooks
//!
//! One hook per entity collection. Each goes through the shared
//! [`QueryClient`](crate::state::QueryClient), so repeated calls within the
//! staleness window cost nothing.

use cellparts_core::{EntityKind, Order, Product, ServiceOrder};

use crate::error::AppError;
use crate::state::{AppContext, QueryState};

/// Products, alphabetical by name.
pub async fn use_products(ctx: &AppContext) -> QueryState<Product> {
    let repo = ctx.store.products();
    ctx.queries
        .fetch(EntityKind::Products.query_key(), || async move {
            repo.fetch_products().await.map_err(AppError::from)
        })
        .await
}

/// Orders, newest first.
pub async fn use_orders(ctx: &AppContext) -> QueryState<Order> {
    let repo = ctx.store.orders();
    ctx.queries
        .fetch(EntityKind::Orders.query_key(), || async move {
            repo.fetch_orders().await.map_err(AppError::from)
        })
        .await
}

/// Repair tickets, newest first.
pub async fn use_service_orders(ctx: &AppContext) -> QueryState<ServiceOrder> {
    let repo = ctx.store.service_orders();
    ctx.queries
        .fetch(EntityKind::ServiceOrders.query_key(), || async move {
            repo.fetch_service_orders().await.map_err(AppError::from)
        })
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use cellparts_data::MemoryTableApi;
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_second_read_is_served_from_cache() {
        let memory = Arc::new(MemoryTableApi::new());
        memory
            .seed(
                "orders",
                vec![json!({
                    "id": "#1234", "customer": "João Silva", "items": "3 produtos",
                    "total": 234.8, "type": "delivery", "status": "pending",
                    "address": "Rua das Flores, 123 - Centro", "date": "10/11/2025 14:30"
                })],
            )
            .await
            .unwrap();
        let ctx = AppContext::with_api(memory.clone());

        let first = use_orders(&ctx).await;
        let second = use_orders(&ctx).await;

        assert_eq!(first.items().len(), 1);
        assert_eq!(second.items()[0].id, "#1234");
        assert_eq!(memory.request_count(), 1);
    }

    #[tokio::test]
    async fn test_error_state_carries_server_message() {
        let memory = Arc::new(MemoryTableApi::new());
        memory.fail_next_request(401, "Invalid API key");
        let ctx = AppContext::with_api(memory);

        let state = use_products(&ctx).await;
        assert!(state.is_error);
        assert_eq!(state.error.as_deref(), Some("Invalid API key"));

        // No automatic retry: the next call is a fresh attempt.
        let state = use_products(&ctx).await;
        assert!(!state.is_error);
        assert!(state.is_empty());
    }
}
