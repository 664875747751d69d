//! # Hosted REST Table API
//!
//! Talks to a PostgREST-style endpoint (Supabase) over HTTPS.
//!
//! ## Request Shapes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  select_all   GET   {base}/rest/v1/{table}?select=*&order=name.asc      │
//! │  insert_one   POST  {base}/rest/v1/{table}                              │
//! │                     Prefer: return=representation                       │
//! │  update_by_id PATCH {base}/rest/v1/{table}?id=eq.{id}                   │
//! │                     Prefer: return=representation                       │
//! │                                                                         │
//! │  Every request: apikey: {key}   Authorization: Bearer {key}            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Non-2xx responses carry a JSON body with a `message` field; that text is
//! what reaches the staff in the error toast.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Url};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error};

use super::{OrderBy, Row, TableApi};
use crate::error::{DataError, DataResult};

/// Client for the hosted table API.
#[derive(Debug, Clone)]
pub struct RestTableApi {
    client: Client,
    base_url: String,
    api_key: String,
}

impl RestTableApi {
    /// Builds a client for `base_url` authenticating with `api_key`.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let api = RestTableApi::new("https://xyz.supabase.co", key, Duration::from_secs(20))?;
    /// ```
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> DataResult<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Url::parse(&base_url)
            .map_err(|e| DataError::InvalidConfig(format!("Invalid API URL '{}': {}", base_url, e)))?;

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DataError::InvalidConfig(format!("HTTP client error: {}", e)))?;

        Ok(RestTableApi {
            client,
            base_url,
            api_key: api_key.into(),
        })
    }

    /// URL of a table endpoint with the given query parameters.
    pub fn table_url(&self, table: &str, params: &[(&str, String)]) -> DataResult<Url> {
        let mut url = Url::parse(&format!("{}/rest/v1/{}", self.base_url, table))
            .map_err(|e| DataError::InvalidConfig(format!("Invalid API URL: {}", e)))?;
        if !params.is_empty() {
            let mut qp = url.query_pairs_mut();
            for (key, value) in params {
                qp.append_pair(key, value);
            }
        }
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.client
            .request(method, url)
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
    }

    async fn send(&self, request: RequestBuilder) -> DataResult<Value> {
        let resp = request.send().await?;
        let status = resp.status();

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            error!(status = status.as_u16(), %body, "Table API request failed");
            return Err(api_error(status.as_u16(), &body));
        }

        Ok(resp.json::<Value>().await?)
    }
}

/// Extracts the `message` field from a PostgREST error body.
fn error_message(body: &str) -> Option<String> {
    let parsed: Value = serde_json::from_str(body).ok()?;
    parsed
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
        .filter(|m| !m.trim().is_empty())
}

/// Error for a non-2xx response. Without a server `message` the error
/// carries an empty one, so callers fall back to their own text.
fn api_error(status: u16, body: &str) -> DataError {
    DataError::Api {
        status,
        message: error_message(body).unwrap_or_default(),
    }
}

/// PostgREST answers writes with an array of the affected rows.
fn first_row(body: Value) -> Option<Row> {
    match body {
        Value::Array(rows) => rows.into_iter().next(),
        Value::Object(_) => Some(body),
        _ => None,
    }
}

#[async_trait]
impl TableApi for RestTableApi {
    fn backend_name(&self) -> &'static str {
        "rest"
    }

    async fn select_all(&self, table: &str, order: OrderBy) -> DataResult<Vec<Row>> {
        let url = self.table_url(
            table,
            &[("select", "*".to_string()), ("order", order.to_param())],
        )?;
        debug!(%url, "GET");

        match self.send(self.request(Method::GET, url)).await? {
            Value::Array(rows) => Ok(rows),
            other => Err(DataError::Decode(format!(
                "expected an array of {} rows, got {}",
                table, other
            ))),
        }
    }

    async fn insert_one(&self, table: &str, row: Row) -> DataResult<Row> {
        let url = self.table_url(table, &[])?;
        debug!(%url, "POST");

        let body = self
            .send(
                self.request(Method::POST, url)
                    .header("Prefer", "return=representation")
                    .json(&row),
            )
            .await?;

        first_row(body)
            .ok_or_else(|| DataError::Decode(format!("insert into {} returned no row", table)))
    }

    async fn update_by_id(&self, table: &str, id: &str, patch: Row) -> DataResult<Row> {
        let url = self.table_url(table, &[("id", format!("eq.{}", id))])?;
        debug!(%url, "PATCH");

        let body = self
            .send(
                self.request(Method::PATCH, url)
                    .header("Prefer", "return=representation")
                    .json(&patch),
            )
            .await?;

        // An empty representation means no row matched the filter.
        first_row(body).ok_or_else(|| DataError::not_found(table, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn api() -> RestTableApi {
        RestTableApi::new("https://demo.supabase.co/", "anon-key", Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_select_url() {
        let url = api()
            .table_url(
                "products",
                &[("select", "*".to_string()), ("order", OrderBy::asc("name").to_param())],
            )
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://demo.supabase.co/rest/v1/products?select=*&order=name.asc"
        );
    }

    #[test]
    fn test_update_filter_is_encoded() {
        let url = api()
            .table_url("orders", &[("id", "eq.#1234".to_string())])
            .unwrap();
        assert_eq!(url.query(), Some("id=eq.%231234"));
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let err = RestTableApi::new("not a url", "k", Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, DataError::InvalidConfig(_)));
    }

    #[test]
    fn test_error_message_extraction() {
        assert_eq!(
            error_message(r#"{"code":"23505","message":"duplicate key value"}"#).as_deref(),
            Some("duplicate key value")
        );
        assert_eq!(error_message("<html>bad gateway</html>"), None);
        assert_eq!(error_message(r#"{"message":""}"#), None);
    }

    #[test]
    fn test_api_error_without_message_has_no_server_message() {
        let err = api_error(503, "<html>Service Unavailable</html>");
        assert!(matches!(err, DataError::Api { status: 503, .. }));
        assert_eq!(err.server_message(), None);

        let err = api_error(409, r#"{"message":"duplicate key value"}"#);
        assert_eq!(err.server_message().as_deref(), Some("duplicate key value"));
    }

    #[test]
    fn test_first_row() {
        assert_eq!(first_row(json!([{"id": 1}, {"id": 2}])), Some(json!({"id": 1})));
        assert_eq!(first_row(json!([])), None);
        assert_eq!(first_row(json!({"id": 3})), Some(json!({"id": 3})));
    }
}
