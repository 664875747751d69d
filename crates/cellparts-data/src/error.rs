//! # Data Access Error Types
//!
//! Error types for table API operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  reqwest::Error / sqlx::Error / serde_json::Error                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DataError (this module) ← Adds context and categorization             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  AppError (apps/erp) ← Query error state, destructive toast            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Staff read the server message, or the hook's generic fallback         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Table API operation errors.
#[derive(Debug, Error)]
pub enum DataError {
    /// No row with the given id.
    ///
    /// ## When This Occurs
    /// - Updating an order or ticket that does not exist
    #[error("{table} row not found: {id}")]
    NotFound { table: String, id: String },

    /// A row with the same id already exists.
    ///
    /// ## When This Occurs
    /// - Creating an order with an id already in use (`#1234`)
    #[error("duplicate key value violates unique constraint \"{table}_pkey\" (id={id})")]
    Conflict { table: String, id: String },

    /// The hosted API answered with a non-success status.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The request could not be sent or completed.
    #[error("Request failed: {0}")]
    Request(String),

    /// The response body could not be decoded.
    #[error("Decode failed: {0}")]
    Decode(String),

    /// The backend could not be reached or opened.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed (local SQLite store).
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed (local SQLite store).
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Backend configuration is missing or malformed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl DataError {
    /// Creates a NotFound error.
    pub fn not_found(table: impl Into<String>, id: impl Into<String>) -> Self {
        DataError::NotFound {
            table: table.into(),
            id: id.into(),
        }
    }

    /// Creates a Conflict error.
    pub fn conflict(table: impl Into<String>, id: impl Into<String>) -> Self {
        DataError::Conflict {
            table: table.into(),
            id: id.into(),
        }
    }

    /// The message the table API itself produced, when there is one.
    ///
    /// Transport, decode and configuration failures return `None`; callers
    /// show a generic message instead.
    pub fn server_message(&self) -> Option<String> {
        match self {
            DataError::Api { message, .. } if !message.trim().is_empty() => Some(message.clone()),
            DataError::NotFound { .. } | DataError::Conflict { .. } => Some(self.to_string()),
            _ => None,
        }
    }
}

/// Convert reqwest errors to DataError.
///
/// ## Error Mapping
/// ```text
/// timeout / connect   → DataError::ConnectionFailed
/// body decode         → DataError::Decode
/// Other               → DataError::Request
/// ```
impl From<reqwest::Error> for DataError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() || err.is_connect() {
            DataError::ConnectionFailed(err.to_string())
        } else if err.is_decode() {
            DataError::Decode(err.to_string())
        } else {
            DataError::Request(err.to_string())
        }
    }
}

/// Convert sqlx errors to DataError.
///
/// Unique violations are detected by the SQLite backend itself, which
/// knows the table and id involved.
impl From<sqlx::Error> for DataError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DataError::not_found("record", "unknown"),
            sqlx::Error::Database(db_err) => DataError::QueryFailed(db_err.message().to_string()),
            sqlx::Error::PoolTimedOut => {
                DataError::ConnectionFailed("Connection pool exhausted".to_string())
            }
            sqlx::Error::PoolClosed => DataError::ConnectionFailed("Pool is closed".to_string()),
            _ => DataError::QueryFailed(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DataError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DataError::MigrationFailed(err.to_string())
    }
}

impl From<serde_json::Error> for DataError {
    fn from(err: serde_json::Error) -> Self {
        DataError::Decode(err.to_string())
    }
}

impl From<toml::de::Error> for DataError {
    fn from(err: toml::de::Error) -> Self {
        DataError::InvalidConfig(err.to_string())
    }
}

impl From<std::io::Error> for DataError {
    fn from(err: std::io::Error) -> Self {
        DataError::InvalidConfig(err.to_string())
    }
}

/// Result type for data access operations.
pub type DataResult<T> = Result<T, DataError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message_only_for_api_side_failures() {
        let api = DataError::Api {
            status: 400,
            message: "null value in column \"sku\"".to_string(),
        };
        assert_eq!(api.server_message().as_deref(), Some("null value in column \"sku\""));

        let conflict = DataError::conflict("orders", "#1234");
        assert!(conflict.server_message().unwrap().contains("orders_pkey"));

        assert_eq!(DataError::Request("timeout".into()).server_message(), None);
        assert_eq!(
            DataError::Api { status: 500, message: " ".into() }.server_message(),
            None
        );
    }

    #[test]
    fn test_json_error_maps_to_decode() {
        let err: DataError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, DataError::Decode(_)));
    }
}
