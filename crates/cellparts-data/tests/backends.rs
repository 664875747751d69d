//! Backend conformance: the memory and SQLite stores must behave alike for
//! everything the repositories rely on.

use std::sync::Arc;

use cellparts_core::{
    Money, NewOrder, NewProduct, NewServiceOrder, OrderStatus, OrderStatusUpdate, OrderType,
    Priority, ServiceOrderStatusUpdate, ServiceStatus,
};
use cellparts_data::backend::sqlite::SqliteConfig;
use cellparts_data::{DataError, MemoryTableApi, SqliteTableApi, Store, TableApi};

async fn backends() -> Vec<Arc<dyn TableApi>> {
    let sqlite = SqliteTableApi::connect(SqliteConfig::in_memory())
        .await
        .expect("in-memory sqlite");
    vec![Arc::new(MemoryTableApi::new()), Arc::new(sqlite)]
}

fn cabo() -> NewProduct {
    NewProduct {
        name: "Cabo".to_string(),
        sku: "CAB-1".to_string(),
        price: Money::from_cents(1000),
        stock: 5,
        category: "Cabos".to_string(),
        status: None,
        description: None,
    }
}

#[tokio::test]
async fn created_product_is_listed() {
    for api in backends().await {
        let store = Store::new(api);
        store.products().create_product(cabo()).await.unwrap();

        let products = store.products().fetch_products().await.unwrap();
        let found = products.iter().find(|p| p.sku == "CAB-1");
        assert!(found.is_some(), "{} backend lost the product", store.backend_name());
        assert_eq!(found.unwrap().price, Money::from_cents(1000));
    }
}

#[tokio::test]
async fn order_lifecycle() {
    for api in backends().await {
        let store = Store::new(api);
        let orders = store.orders();

        orders
            .create_order(NewOrder {
                id: "#1233".to_string(),
                customer: "Maria Santos".to_string(),
                items: "1 produto".to_string(),
                total: Money::from_cents(8990),
                order_type: OrderType::Pickup,
                status: OrderStatus::Pending,
                address: "Retirada na loja".to_string(),
                date: "10/11/2025 13:15".to_string(),
            })
            .await
            .unwrap();

        let updated = orders
            .update_order_status(OrderStatusUpdate {
                id: "#1233".to_string(),
                status: OrderStatus::Ready,
            })
            .await
            .unwrap();
        assert_eq!(updated.status, OrderStatus::Ready);

        let listed = orders.fetch_orders().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].status, OrderStatus::Ready);
        assert_eq!(listed[0].order_type, OrderType::Pickup);
    }
}

#[tokio::test]
async fn duplicate_ticket_id_is_rejected() {
    for api in backends().await {
        let store = Store::new(api);
        let ticket = NewServiceOrder {
            id: "OS-001".to_string(),
            customer: "João Silva".to_string(),
            device: "iPhone 12 Pro".to_string(),
            issue: "Troca de tela".to_string(),
            status: ServiceStatus::InProgress,
            priority: Priority::High,
            date: "10/11/2025".to_string(),
        };

        store.service_orders().create_service_order(ticket.clone()).await.unwrap();
        let err = store
            .service_orders()
            .create_service_order(ticket)
            .await
            .unwrap_err();
        assert!(matches!(err, DataError::Conflict { .. }));
        assert!(err.server_message().is_some());
    }
}

#[tokio::test]
async fn updating_missing_ticket_is_not_found() {
    for api in backends().await {
        let store = Store::new(api);
        let err = store
            .service_orders()
            .update_service_order_status(ServiceOrderStatusUpdate {
                id: "OS-999".to_string(),
                status: ServiceStatus::Completed,
                priority: Some(Priority::Low),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DataError::NotFound { .. }));
    }
}
