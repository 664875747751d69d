//! # Demo Data
//!
//! Rows loaded into the in-memory backend so a fresh start has something to
//! show: the store's sample inventory, the four orders of 10/11/2025 and the
//! five open repair tickets.

use serde_json::{json, Value};
use tracing::info;

use cellparts_core::EntityKind;
use cellparts_data::{DataResult, MemoryTableApi};

/// Sample rows for one collection, in insertion order.
pub fn sample_rows(kind: EntityKind) -> Vec<Value> {
    match kind {
        EntityKind::Products => sample_products(),
        EntityKind::Orders => sample_orders(),
        EntityKind::ServiceOrders => sample_service_orders(),
    }
}

/// Loads every collection into `memory`.
pub async fn seed_memory(memory: &MemoryTableApi) -> DataResult<()> {
    for kind in EntityKind::ALL {
        let rows = sample_rows(kind);
        let count = rows.len();
        memory.seed(kind.table(), rows).await?;
        info!(table = kind.table(), rows = count, "Loaded demo data");
    }
    Ok(())
}

fn sample_products() -> Vec<Value> {
    vec![
        json!({
            "id": 1, "name": "Capinha iPhone 14", "sku": "CAP-IP14-001", "price": 89.90,
            "stock": 45, "category": "Acessórios", "status": "active",
            "created_at": "2025-11-01T09:00:00.000000Z"
        }),
        json!({
            "id": 2, "name": "Carregador Tipo-C 20W", "sku": "CAR-TC20-002", "price": 45.00,
            "stock": 8, "category": "Carregadores", "status": "low",
            "created_at": "2025-11-01T09:05:00.000000Z"
        }),
        json!({
            "id": 3, "name": "Película Xiaomi", "sku": "PEL-XIA-003", "price": 35.00,
            "stock": 120, "category": "Películas", "status": "active",
            "created_at": "2025-11-01T09:10:00.000000Z"
        }),
        json!({
            "id": 4, "name": "Fone Bluetooth TWS", "sku": "FON-BT-004", "price": 159.90,
            "stock": 2, "category": "Áudio", "status": "critical",
            "description": "Estojo de carga com USB-C",
            "created_at": "2025-11-01T09:15:00.000000Z"
        }),
        json!({
            "id": 5, "name": "Cabo USB-C 2m", "sku": "CAB-USBC-005", "price": 29.90,
            "stock": 60, "category": "Cabos", "status": "active",
            "created_at": "2025-11-01T09:20:00.000000Z"
        }),
        json!({
            "id": 6, "name": "Suporte Veicular", "sku": "SUP-VEI-006", "price": 39.90,
            "stock": 15, "category": "Acessórios", "status": "active",
            "created_at": "2025-11-01T09:25:00.000000Z"
        }),
    ]
}

fn sample_orders() -> Vec<Value> {
    vec![
        json!({
            "id": "#1234", "customer": "João Silva", "items": "3 produtos", "total": 234.80,
            "type": "delivery", "status": "pending",
            "address": "Rua das Flores, 123 - Centro", "date": "10/11/2025 14:30",
            "created_at": "2025-11-10T14:30:00.000000Z"
        }),
        json!({
            "id": "#1233", "customer": "Maria Santos", "items": "1 produto", "total": 89.90,
            "type": "pickup", "status": "ready",
            "address": "Retirada na loja", "date": "10/11/2025 13:15",
            "created_at": "2025-11-10T13:15:00.000000Z"
        }),
        json!({
            "id": "#1232", "customer": "Pedro Costa", "items": "2 produtos", "total": 125.00,
            "type": "delivery", "status": "in_transit",
            "address": "Av. Principal, 456 - Bairro Alto", "date": "10/11/2025 11:20",
            "created_at": "2025-11-10T11:20:00.000000Z"
        }),
        json!({
            "id": "#1231", "customer": "Ana Oliveira", "items": "4 produtos", "total": 320.50,
            "type": "pickup", "status": "completed",
            "address": "Retirada na loja", "date": "10/11/2025 10:00",
            "created_at": "2025-11-10T10:00:00.000000Z"
        }),
    ]
}

fn sample_service_orders() -> Vec<Value> {
    let tickets = [
        ("OS-001", "João Silva", "iPhone 12 Pro", "Troca de tela", "in_progress", "high", "10/11/2025", "2025-11-10T09:00:00.000000Z"),
        ("OS-002", "Maria Santos", "Samsung Galaxy S21", "Bateria não carrega", "waiting", "medium", "10/11/2025", "2025-11-10T09:30:00.000000Z"),
        ("OS-003", "Pedro Costa", "Xiaomi Redmi Note 10", "Problema no botão power", "completed", "low", "09/11/2025", "2025-11-09T16:00:00.000000Z"),
        ("OS-004", "Ana Oliveira", "iPhone 13", "Câmera não funciona", "in_progress", "high", "10/11/2025", "2025-11-10T10:15:00.000000Z"),
        ("OS-005", "Carlos Ferreira", "Motorola Edge 30", "Sistema travando", "waiting", "medium", "10/11/2025", "2025-11-10T11:45:00.000000Z"),
    ];

    tickets
        .into_iter()
        .map(|(id, customer, device, issue, status, priority, date, created_at)| {
            json!({
                "id": id, "customer": customer, "device": device, "issue": issue,
                "status": status, "priority": priority, "date": date,
                "created_at": created_at
            })
        })
        .collect()
}
