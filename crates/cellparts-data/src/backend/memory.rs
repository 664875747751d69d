//! # In-Memory Table API
//!
//! A process-local stand-in for the hosted table API, used by tests and by
//! the demo binary. It follows the same row contract as the other backends
//! and counts the requests it serves so callers can assert on them.
//!
//! ```text
//! RwLock<HashMap<table, Vec<Row>>>     (Vec order = insertion order)
//!        │
//!        ├── select_all  → read lock, clone, stable sort
//!        ├── insert_one  → write lock, defaults, duplicate check, push
//!        └── update_by_id→ write lock, find, merge
//! ```

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};
use std::sync::Mutex;
use tokio::sync::RwLock;
use tracing::debug;

use super::{
    apply_insert_defaults, compare_column, into_object, merge_patch, row_id, OrderBy, Row,
    SortDirection, TableApi,
};
use crate::error::{DataError, DataResult};

/// A failure queued with [`MemoryTableApi::fail_next_request`].
#[derive(Debug, Clone)]
struct QueuedFailure {
    status: u16,
    message: String,
}

/// In-process table store.
#[derive(Debug, Default)]
pub struct MemoryTableApi {
    tables: RwLock<HashMap<String, Vec<Map<String, Value>>>>,
    requests: AtomicUsize,
    failure: Mutex<Option<QueuedFailure>>,
}

impl MemoryTableApi {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts rows with the same defaults and checks as `insert_one`,
    /// without counting them as requests.
    pub async fn seed(&self, table: &str, rows: Vec<Row>) -> DataResult<()> {
        let mut tables = self.tables.write().await;
        let stored = tables.entry(table.to_string()).or_default();
        for row in rows {
            let row = into_object(table, row)?;
            push_row(stored, table, row)?;
        }
        debug!(table, rows = stored.len(), "Seeded memory table");
        Ok(())
    }

    /// Makes the next request fail with an API error carrying `message`.
    pub fn fail_next_request(&self, status: u16, message: impl Into<String>) {
        if let Ok(mut failure) = self.failure.lock() {
            *failure = Some(QueuedFailure {
                status,
                message: message.into(),
            });
        }
    }

    /// Number of requests served (or failed) so far.
    pub fn request_count(&self) -> usize {
        self.requests.load(AtomicOrdering::SeqCst)
    }

    /// Number of rows currently stored in `table`.
    pub async fn row_count(&self, table: &str) -> usize {
        self.tables.read().await.get(table).map_or(0, Vec::len)
    }

    fn begin_request(&self) -> DataResult<()> {
        self.requests.fetch_add(1, AtomicOrdering::SeqCst);
        let queued = self.failure.lock().ok().and_then(|mut f| f.take());
        match queued {
            Some(failure) => Err(DataError::Api {
                status: failure.status,
                message: failure.message,
            }),
            None => Ok(()),
        }
    }
}

fn push_row(
    stored: &mut Vec<Map<String, Value>>,
    table: &str,
    mut row: Map<String, Value>,
) -> DataResult<Map<String, Value>> {
    apply_insert_defaults(&mut row, || next_numeric_id(stored));
    let id = row_id(&row).unwrap_or_default();
    if stored.iter().any(|existing| row_id(existing).as_deref() == Some(id.as_str())) {
        return Err(DataError::conflict(table, id));
    }
    stored.push(row.clone());
    Ok(row)
}

fn next_numeric_id(stored: &[Map<String, Value>]) -> i64 {
    stored
        .iter()
        .filter_map(|row| row.get("id").and_then(Value::as_i64))
        .max()
        .unwrap_or(0)
        + 1
}

#[async_trait]
impl TableApi for MemoryTableApi {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn select_all(&self, table: &str, order: OrderBy) -> DataResult<Vec<Row>> {
        self.begin_request()?;
        let tables = self.tables.read().await;
        let mut rows: Vec<Map<String, Value>> = tables.get(table).cloned().unwrap_or_default();
        drop(tables);

        // Reversing first keeps ties latest-first once the stable sort runs.
        if order.direction == SortDirection::Descending {
            rows.reverse();
        }
        rows.sort_by(|a, b| {
            let ord = compare_column(a.get(order.column), b.get(order.column));
            match order.direction {
                SortDirection::Ascending => ord,
                SortDirection::Descending => ord.reverse(),
            }
        });

        debug!(table, %order, count = rows.len(), "memory select");
        Ok(rows.into_iter().map(Value::Object).collect())
    }

    async fn insert_one(&self, table: &str, row: Row) -> DataResult<Row> {
        self.begin_request()?;
        let row = into_object(table, row)?;
        let mut tables = self.tables.write().await;
        let stored = tables.entry(table.to_string()).or_default();
        let inserted = push_row(stored, table, row)?;
        debug!(table, id = ?row_id(&inserted), "memory insert");
        Ok(Value::Object(inserted))
    }

    async fn update_by_id(&self, table: &str, id: &str, patch: Row) -> DataResult<Row> {
        self.begin_request()?;
        let patch = into_object(table, patch)?;
        let mut tables = self.tables.write().await;
        let row = tables
            .get_mut(table)
            .and_then(|rows| {
                rows.iter_mut()
                    .find(|row| row_id(row).as_deref() == Some(id))
            })
            .ok_or_else(|| DataError::not_found(table, id))?;

        merge_patch(row, patch);
        debug!(table, id, "memory update");
        Ok(Value::Object(row.clone()))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_insert_assigns_id_and_created_at() {
        let api = MemoryTableApi::new();
        let first = api.insert_one("products", json!({"name": "Cabo"})).await.unwrap();
        let second = api.insert_one("products", json!({"name": "Fone"})).await.unwrap();

        assert_eq!(first["id"], json!(1));
        assert_eq!(second["id"], json!(2));
        assert!(first["created_at"].is_string());
        assert_eq!(api.request_count(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_id_conflicts() {
        let api = MemoryTableApi::new();
        api.insert_one("orders", json!({"id": "#1234"})).await.unwrap();
        let err = api.insert_one("orders", json!({"id": "#1234"})).await.unwrap_err();
        assert!(matches!(err, DataError::Conflict { .. }));
        assert_eq!(api.row_count("orders").await, 1);
    }

    #[tokio::test]
    async fn test_select_sorts_with_stable_ties() {
        let api = MemoryTableApi::new();
        api.seed(
            "orders",
            vec![
                json!({"id": "a", "created_at": "2025-11-10T10:00:00Z"}),
                json!({"id": "b", "created_at": "2025-11-10T12:00:00Z"}),
                json!({"id": "c", "created_at": "2025-11-10T10:00:00Z"}),
            ],
        )
        .await
        .unwrap();

        let rows = api.select_all("orders", OrderBy::desc("created_at")).await.unwrap();
        let ids: Vec<&str> = rows.iter().map(|r| r["id"].as_str().unwrap()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);

        let rows = api.select_all("orders", OrderBy::asc("created_at")).await.unwrap();
        let ids: Vec<&str> = rows.iter().map(|r| r["id"].as_str().unwrap()).collect();
        assert_eq!(ids, vec!["a", "c", "b"]);
    }

    #[tokio::test]
    async fn test_update_merges_and_missing_row_is_not_found() {
        let api = MemoryTableApi::new();
        api.seed("orders", vec![json!({"id": "#1", "status": "pending", "customer": "Ana"})])
            .await
            .unwrap();

        let row = api
            .update_by_id("orders", "#1", json!({"status": "ready"}))
            .await
            .unwrap();
        assert_eq!(row["status"], json!("ready"));
        assert_eq!(row["customer"], json!("Ana"));

        let err = api
            .update_by_id("orders", "#9", json!({"status": "ready"}))
            .await
            .unwrap_err();
        assert!(matches!(err, DataError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_queued_failure_applies_once() {
        let api = MemoryTableApi::new();
        api.fail_next_request(503, "service unavailable");

        let err = api.select_all("products", OrderBy::asc("name")).await.unwrap_err();
        assert_eq!(err.server_message().as_deref(), Some("service unavailable"));
        assert!(api.select_all("products", OrderBy::asc("name")).await.is_ok());
        assert_eq!(api.request_count(), 2);
    }
}
