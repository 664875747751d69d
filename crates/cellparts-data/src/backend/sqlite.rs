//! # Local SQLite Table API
//!
//! A development store that mimics the hosted API on a local SQLite file.
//!
//! ## Storage Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  records                                                                │
//! │  ┌──────┬────────────┬─────────┬──────────────────────────────────────┐ │
//! │  │ seq  │ table_name │ row_id  │ body (JSON document)                 │ │
//! │  ├──────┼────────────┼─────────┼──────────────────────────────────────┤ │
//! │  │ 1    │ products   │ 1       │ {"id":1,"name":"Cabo",...}           │ │
//! │  │ 2    │ orders     │ #1234   │ {"id":"#1234","customer":...}        │ │
//! │  └──────┴────────────┴─────────┴──────────────────────────────────────┘ │
//! │                                                                         │
//! │  ORDER BY json_extract(body, '$.<column>') <dir>, seq <dir>            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## WAL Mode
//! File-backed stores run in WAL mode so the list pages can read while a
//! mutation is writing. In-memory stores use a single connection.

use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::{Row as _, SqlitePool};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

use super::{apply_insert_defaults, into_object, merge_patch, row_id, OrderBy, Row, SortDirection, TableApi};
use crate::error::{DataError, DataResult};

/// Embedded migrations from the `migrations/sqlite` directory.
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations/sqlite");

// =============================================================================
// Configuration
// =============================================================================

/// Local store configuration.
#[derive(Debug, Clone)]
pub struct SqliteConfig {
    /// Path to the SQLite file, or `:memory:`.
    pub database_path: PathBuf,

    /// Maximum number of pooled connections.
    /// Default: 5
    pub max_connections: u32,

    /// Connection timeout.
    /// Default: 30 seconds
    pub connect_timeout: Duration,
}

impl SqliteConfig {
    /// File-backed store at `path` (created if missing).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SqliteConfig {
            database_path: path.into(),
            max_connections: 5,
            connect_timeout: Duration::from_secs(30),
        }
    }

    /// Isolated in-memory store (for testing).
    pub fn in_memory() -> Self {
        SqliteConfig {
            database_path: PathBuf::from(":memory:"),
            max_connections: 1, // In-memory requires single connection
            connect_timeout: Duration::from_secs(5),
        }
    }

    fn is_in_memory(&self) -> bool {
        self.database_path.as_os_str() == ":memory:"
    }
}

// =============================================================================
// SqliteTableApi
// =============================================================================

/// Table API over a local SQLite document store.
#[derive(Debug, Clone)]
pub struct SqliteTableApi {
    pool: SqlitePool,
}

impl SqliteTableApi {
    /// Opens the store and applies pending migrations.
    pub async fn connect(config: SqliteConfig) -> DataResult<Self> {
        info!(path = %config.database_path.display(), "Opening local table store");

        let connect_options = if config.is_in_memory() {
            SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| DataError::ConnectionFailed(e.to_string()))?
        } else {
            let url = format!("sqlite://{}?mode=rwc", config.database_path.display());
            SqliteConnectOptions::from_str(&url)
                .map_err(|e| DataError::ConnectionFailed(e.to_string()))?
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
                .create_if_missing(true)
        };

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.connect_timeout)
            .connect_with(connect_options)
            .await
            .map_err(|e| DataError::ConnectionFailed(e.to_string()))?;

        MIGRATOR.run(&pool).await?;
        info!(max_connections = config.max_connections, "Local table store ready");

        Ok(SqliteTableApi { pool })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Closes the connection pool.
    pub async fn close(&self) {
        info!("Closing local table store");
        self.pool.close().await;
    }
}

fn json_path(column: &str) -> DataResult<String> {
    if column.is_empty() || !column.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(DataError::QueryFailed(format!("invalid sort column '{}'", column)));
    }
    Ok(format!("$.{}", column))
}

fn parse_body(body: &str) -> DataResult<Map<String, Value>> {
    match serde_json::from_str::<Value>(body)? {
        Value::Object(map) => Ok(map),
        other => Err(DataError::Decode(format!("stored row is not an object: {}", other))),
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.message().contains("UNIQUE constraint failed"))
}

#[async_trait]
impl TableApi for SqliteTableApi {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    async fn select_all(&self, table: &str, order: OrderBy) -> DataResult<Vec<Row>> {
        let path = json_path(order.column)?;
        let dir = match order.direction {
            SortDirection::Ascending => "ASC",
            SortDirection::Descending => "DESC",
        };
        let sql = format!(
            "SELECT body FROM records WHERE table_name = ?1 \
             ORDER BY json_extract(body, ?2) {dir}, seq {dir}"
        );

        let rows = sqlx::query(&sql)
            .bind(table)
            .bind(&path)
            .fetch_all(&self.pool)
            .await?;

        debug!(table, %order, count = rows.len(), "sqlite select");
        rows.iter()
            .map(|row| {
                let body: String = row.try_get("body")?;
                parse_body(&body).map(Value::Object)
            })
            .collect()
    }

    async fn insert_one(&self, table: &str, row: Row) -> DataResult<Row> {
        let mut row = into_object(table, row)?;
        let mut tx = self.pool.begin().await?;

        if row.get("id").map_or(true, Value::is_null) {
            let next: i64 = sqlx::query_scalar(
                "SELECT COALESCE(MAX(CAST(json_extract(body, '$.id') AS INTEGER)), 0) + 1 \
                 FROM records WHERE table_name = ?1 AND json_type(body, '$.id') = 'integer'",
            )
            .bind(table)
            .fetch_one(&mut *tx)
            .await?;
            apply_insert_defaults(&mut row, || next);
        } else {
            apply_insert_defaults(&mut row, || 0);
        }

        let id = row_id(&row).unwrap_or_default();
        let body = serde_json::to_string(&row)?;

        let result = sqlx::query("INSERT INTO records (table_name, row_id, body) VALUES (?1, ?2, ?3)")
            .bind(table)
            .bind(&id)
            .bind(&body)
            .execute(&mut *tx)
            .await;

        match result {
            Ok(_) => {}
            Err(e) if is_unique_violation(&e) => return Err(DataError::conflict(table, id)),
            Err(e) => return Err(e.into()),
        }

        tx.commit().await?;
        debug!(table, id = %id, "sqlite insert");
        Ok(Value::Object(row))
    }

    async fn update_by_id(&self, table: &str, id: &str, patch: Row) -> DataResult<Row> {
        let patch = into_object(table, patch)?;
        let mut tx = self.pool.begin().await?;

        let body: Option<String> =
            sqlx::query_scalar("SELECT body FROM records WHERE table_name = ?1 AND row_id = ?2")
                .bind(table)
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;

        let mut row = match body {
            Some(body) => parse_body(&body)?,
            None => return Err(DataError::not_found(table, id)),
        };
        merge_patch(&mut row, patch);

        sqlx::query("UPDATE records SET body = ?1 WHERE table_name = ?2 AND row_id = ?3")
            .bind(serde_json::to_string(&row)?)
            .bind(table)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        debug!(table, id, "sqlite update");
        Ok(Value::Object(row))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    async fn store() -> SqliteTableApi {
        SqliteTableApi::connect(SqliteConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_insert_select_update() {
        let api = store().await;
        api.insert_one("products", json!({"name": "Fone", "sku": "AUD-1"})).await.unwrap();
        let cabo = api.insert_one("products", json!({"name": "Cabo", "sku": "CAB-1"})).await.unwrap();
        assert_eq!(cabo["id"], json!(2));

        let rows = api.select_all("products", OrderBy::asc("name")).await.unwrap();
        let names: Vec<&str> = rows.iter().map(|r| r["name"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["Cabo", "Fone"]);

        let updated = api
            .update_by_id("products", "2", json!({"stock": 9}))
            .await
            .unwrap();
        assert_eq!(updated["stock"], json!(9));
        assert_eq!(updated["sku"], json!("CAB-1"));
    }

    #[tokio::test]
    async fn test_duplicate_and_missing_ids() {
        let api = store().await;
        api.insert_one("orders", json!({"id": "#1234"})).await.unwrap();

        let err = api.insert_one("orders", json!({"id": "#1234"})).await.unwrap_err();
        assert!(matches!(err, DataError::Conflict { .. }));

        let err = api
            .update_by_id("orders", "#9999", json!({"status": "ready"}))
            .await
            .unwrap_err();
        assert!(matches!(err, DataError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_descending_ties_are_latest_first() {
        let api = store().await;
        for id in ["a", "b"] {
            api.insert_one(
                "service_orders",
                json!({"id": id, "created_at": "2025-11-10T10:00:00.000000Z"}),
            )
            .await
            .unwrap();
        }
        let rows = api
            .select_all("service_orders", OrderBy::desc("created_at"))
            .await
            .unwrap();
        assert_eq!(rows[0]["id"], json!("b"));
    }

    #[test]
    fn test_sort_column_must_be_an_identifier() {
        assert_eq!(json_path("created_at").unwrap(), "$.created_at");
        assert!(json_path("name'); DROP TABLE records;--").is_err());
    }
}
