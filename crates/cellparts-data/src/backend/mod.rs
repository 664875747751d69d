//! # Table API Backends
//!
//! The [`TableApi`] trait is the single seam between the ERP and wherever its
//! rows live.
//!
//! ## Backends
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Arc<dyn TableApi>                                 │
//! │                              │                                          │
//! │        ┌─────────────────────┼──────────────────────┐                   │
//! │        ▼                     ▼                      ▼                   │
//! │  RestTableApi          SqliteTableApi         MemoryTableApi            │
//! │  hosted PostgREST      local dev store        tests + demo binary       │
//! │  (reqwest)             (sqlx, JSON docs)      (tokio RwLock)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Row Contract
//! Rows are JSON objects with snake_case keys. Every backend behaves like
//! the hosted API:
//! - `insert_one` fills in an integer `id` and a `created_at` timestamp
//!   when the row has none, and rejects a duplicate `id`
//! - `update_by_id` shallow-merges the patch and returns the stored row
//! - `select_all` sorts by one column; ties keep insertion order (ascending)
//!   or reverse insertion order (descending)

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::fmt;

use crate::error::{DataError, DataResult};

pub mod memory;
pub mod rest;
pub mod sqlite;

pub use memory::MemoryTableApi;
pub use rest::RestTableApi;
pub use sqlite::SqliteTableApi;

/// A table row as it travels between the ERP and the backend.
pub type Row = Value;

// =============================================================================
// Ordering
// =============================================================================

/// Sort direction for `select_all`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// PostgREST suffix (`asc` / `desc`).
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

/// The column a listing is sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderBy {
    pub column: &'static str,
    pub direction: SortDirection,
}

impl OrderBy {
    pub const fn asc(column: &'static str) -> Self {
        OrderBy {
            column,
            direction: SortDirection::Ascending,
        }
    }

    pub const fn desc(column: &'static str) -> Self {
        OrderBy {
            column,
            direction: SortDirection::Descending,
        }
    }

    /// The `order` query parameter, e.g. `created_at.desc`.
    pub fn to_param(&self) -> String {
        format!("{}.{}", self.column, self.direction.as_str())
    }
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_param())
    }
}

// =============================================================================
// TableApi Trait
// =============================================================================

/// Row-level access to the `products`, `orders` and `service_orders` tables.
#[async_trait]
pub trait TableApi: Send + Sync + fmt::Debug {
    /// Short backend name for logs (`rest`, `sqlite`, `memory`).
    fn backend_name(&self) -> &'static str;

    /// All rows of `table`, sorted by `order`.
    async fn select_all(&self, table: &str, order: OrderBy) -> DataResult<Vec<Row>>;

    /// Inserts one row and returns it as stored.
    async fn insert_one(&self, table: &str, row: Row) -> DataResult<Row>;

    /// Shallow-merges `patch` into the row with the given id and returns it.
    async fn update_by_id(&self, table: &str, id: &str, patch: Row) -> DataResult<Row>;
}

// =============================================================================
// Shared Row Helpers
// =============================================================================

/// Text form of a row's `id` column (`5` and `"#1234"` alike).
pub(crate) fn row_id(row: &Map<String, Value>) -> Option<String> {
    match row.get("id")? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Requires the row to be a JSON object.
pub(crate) fn into_object(table: &str, row: Row) -> DataResult<Map<String, Value>> {
    match row {
        Value::Object(map) => Ok(map),
        other => Err(DataError::QueryFailed(format!(
            "{} rows must be JSON objects, got {}",
            table, other
        ))),
    }
}

/// Fills in the columns the hosted API defaults on insert.
pub(crate) fn apply_insert_defaults(row: &mut Map<String, Value>, next_id: impl FnOnce() -> i64) {
    if row.get("id").map_or(true, Value::is_null) {
        row.insert("id".to_string(), Value::from(next_id()));
    }
    if row.get("created_at").map_or(true, Value::is_null) {
        row.insert("created_at".to_string(), Value::from(now_timestamp()));
    }
}

/// Current time in the format the hosted API returns for `timestamptz`.
pub(crate) fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Shallow merge of `patch` into `row`.
pub(crate) fn merge_patch(row: &mut Map<String, Value>, patch: Map<String, Value>) {
    for (key, value) in patch {
        row.insert(key, value);
    }
}

/// Compares two column values the way SQLite orders `json_extract` results:
/// null < numbers (and booleans) < text.
pub(crate) fn compare_column(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    fn rank(value: Option<&Value>) -> u8 {
        match value {
            None | Some(Value::Null) => 0,
            Some(Value::Bool(_)) | Some(Value::Number(_)) => 1,
            Some(_) => 2,
        }
    }

    fn as_number(value: &Value) -> f64 {
        match value {
            Value::Bool(b) => f64::from(u8::from(*b)),
            Value::Number(n) => n.as_f64().unwrap_or(0.0),
            _ => 0.0,
        }
    }

    match (rank(a), rank(b)) {
        (ra, rb) if ra != rb => ra.cmp(&rb),
        (0, _) => Ordering::Equal,
        (1, _) => match (a, b) {
            (Some(x), Some(y)) => as_number(x)
                .partial_cmp(&as_number(y))
                .unwrap_or(Ordering::Equal),
            _ => Ordering::Equal,
        },
        _ => match (a, b) {
            (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
            (Some(x), Some(y)) => x.to_string().cmp(&y.to_string()),
            _ => Ordering::Equal,
        },
    }
}
