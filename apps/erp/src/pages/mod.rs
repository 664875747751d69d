//! # Pages
//!
//! Page view-models: everything a screen holds between renders, without the
//! rendering.
//!
//! ## Page Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Back office (table API)          Static / local state only             │
//! │  ├── products::ProductsPage       ├── dashboard::Dashboard              │
//! │  ├── orders::OrdersPage           ├── sales::SalesPage (POS)            │
//! │  └── service_orders::             └── delivery::{hub, customer,         │
//! │         ServiceOrdersPage               store_owner, driver}            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The back-office pages read through the query hooks and write through the
//! mutation hooks. Each keeps a search string, a create form and, for the
//! order pages, the per-row selections staff make before pressing
//! "Atualizar".

pub mod dashboard;
pub mod delivery;
pub mod orders;
pub mod products;
pub mod sales;
pub mod service_orders;

use std::collections::HashMap;

use crate::state::QueryState;

// =============================================================================
// List View
// =============================================================================

/// What a list page should draw in place of its table.
#[derive(Debug, PartialEq)]
pub enum ListView<'a, T> {
    /// First fetch still running.
    Loading,
    /// The fetch failed; the message comes from the server or a fallback.
    Error(&'a str),
    /// Loaded, and the collection is empty.
    Empty,
    /// Loaded, but the search matched nothing.
    NoMatches,
    Rows(Vec<&'a T>),
}

/// Resolves a query state plus the filtered rows into a [`ListView`].
pub(crate) fn list_view<'a, T>(state: &'a QueryState<T>, visible: Vec<&'a T>) -> ListView<'a, T> {
    if state.is_loading {
        return ListView::Loading;
    }
    if let Some(message) = state.error.as_deref().filter(|_| state.is_error) {
        return ListView::Error(message);
    }
    if state.items().is_empty() {
        return ListView::Empty;
    }
    if visible.is_empty() {
        return ListView::NoMatches;
    }
    ListView::Rows(visible)
}

// =============================================================================
// Row Selections
// =============================================================================

/// Per-row values picked locally but not yet saved.
///
/// A row without an entry shows the server value. An entry is dropped once
/// the update for that row succeeds.
#[derive(Debug, Clone)]
pub struct Selections<V> {
    picked: HashMap<String, V>,
}

impl<V> Default for Selections<V> {
    fn default() -> Self {
        Selections {
            picked: HashMap::new(),
        }
    }
}

impl<V: Clone + PartialEq> Selections<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The value to show for `id`: the local pick, else `server`.
    pub fn current(&self, id: &str, server: &V) -> V {
        self.picked.get(id).unwrap_or(server).clone()
    }

    pub fn pick(&mut self, id: &str, value: V) {
        self.picked.insert(id.to_string(), value);
    }

    /// Whether the row shows something other than the server value.
    pub fn is_dirty(&self, id: &str, server: &V) -> bool {
        self.picked.get(id).is_some_and(|v| v != server)
    }

    pub fn get(&self, id: &str) -> Option<&V> {
        self.picked.get(id)
    }

    pub fn clear(&mut self, id: &str) {
        self.picked.remove(id);
    }

    pub fn len(&self) -> usize {
        self.picked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.picked.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_list_view_states() {
        let loading: QueryState<i32> = QueryState::loading();
        assert_eq!(list_view(&loading, Vec::new()), ListView::Loading);

        let failed: QueryState<i32> = QueryState::failure("Invalid API key", None);
        assert_eq!(list_view(&failed, Vec::new()), ListView::Error("Invalid API key"));

        let empty: QueryState<i32> = QueryState::success(Arc::new(Vec::new()));
        assert_eq!(list_view(&empty, Vec::new()), ListView::Empty);

        let loaded = QueryState::success(Arc::new(vec![1, 2]));
        assert_eq!(list_view(&loaded, Vec::new()), ListView::NoMatches);
        let rows = loaded.items().iter().collect();
        assert_eq!(list_view(&loaded, rows), ListView::Rows(vec![&1, &2]));
    }

    #[test]
    fn test_selection_defaults_to_server_value() {
        let mut picks: Selections<&str> = Selections::new();
        assert_eq!(picks.current("#1", &"pending"), "pending");
        assert!(!picks.is_dirty("#1", &"pending"));

        picks.pick("#1", "ready");
        assert_eq!(picks.current("#1", &"pending"), "ready");
        assert!(picks.is_dirty("#1", &"pending"));

        picks.clear("#1");
        assert!(picks.is_empty());
    }
}
