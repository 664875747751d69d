//! # State Module
//!
//! Shared application state handed to every hook and page.
//!
//! ## Why Separate State Types?
//! Each piece has a single responsibility and can be built on its own in
//! tests:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  AppContext (cheap to clone)                                            │
//! │  ├── store:   Store             ← table API access (cellparts-data)     │
//! │  ├── queries: Arc<QueryClient>  ← cached collections, staleness         │
//! │  └── toasts:  ToastLog          ← notifications shown to the staff      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod query_client;
mod toast;

pub use query_client::{QueryClient, QueryState, STALE_TIME};
pub use toast::ToastLog;

use std::sync::Arc;

use cellparts_data::{Store, TableApi};

/// Everything a hook needs: the backend, the query cache and the toast log.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub store: Store,
    pub queries: Arc<QueryClient>,
    pub toasts: ToastLog,
}

impl AppContext {
    /// Fresh cache and toast log over `store`.
    pub fn new(store: Store) -> Self {
        AppContext {
            store,
            queries: Arc::new(QueryClient::new()),
            toasts: ToastLog::new(),
        }
    }

    /// Shorthand for a context over a bare backend.
    pub fn with_api(api: Arc<dyn TableApi>) -> Self {
        AppContext::new(Store::new(api))
    }
}
