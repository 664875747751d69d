//! # Toast Log
//!
//! Collects the toasts pushed by hooks and pages, newest last.
//!
//! A renderer drains or peeks at the log; tests read it to check what the
//! staff would have seen.

use std::sync::{Arc, Mutex, MutexGuard};

use cellparts_core::notification::Notifier;
use cellparts_core::Toast;
use tracing::debug;
use uuid::Uuid;

/// Maximum toasts kept before the oldest are dropped.
const TOAST_LIMIT: usize = 50;

/// Shared, append-only list of toasts.
#[derive(Debug, Clone, Default)]
pub struct ToastLog {
    toasts: Arc<Mutex<Vec<Toast>>>,
}

impl ToastLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Toast>> {
        self.toasts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Appends a toast.
    pub fn push(&self, toast: Toast) {
        debug!(title = %toast.title, variant = ?toast.variant, "Toast");
        let mut toasts = self.lock();
        toasts.push(toast);
        if toasts.len() > TOAST_LIMIT {
            let excess = toasts.len() - TOAST_LIMIT;
            toasts.drain(..excess);
        }
    }

    /// Copy of every toast currently in the log.
    pub fn all(&self) -> Vec<Toast> {
        self.lock().clone()
    }

    /// The most recent toast.
    pub fn last(&self) -> Option<Toast> {
        self.lock().last().cloned()
    }

    /// Removes one toast (the user closed it).
    pub fn dismiss(&self, id: Uuid) -> bool {
        let mut toasts = self.lock();
        let before = toasts.len();
        toasts.retain(|t| t.id != id);
        toasts.len() != before
    }

    /// Empties the log and returns what it held.
    pub fn drain(&self) -> Vec<Toast> {
        std::mem::take(&mut *self.lock())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl Notifier for ToastLog {
    fn notify(&self, toast: Toast) {
        self.push(toast);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cellparts_core::ToastVariant;

    #[test]
    fn test_push_dismiss_drain() {
        let log = ToastLog::new();
        let first = Toast::new("Produto adicionado ao carrinho", ToastVariant::Default);
        let id = first.id;
        log.push(first);
        log.notify(Toast::new("Produto removido", ToastVariant::Default));

        assert_eq!(log.len(), 2);
        assert!(log.dismiss(id));
        assert!(!log.dismiss(id));
        assert_eq!(log.last().unwrap().title, "Produto removido");

        let drained = log.drain();
        assert_eq!(drained.len(), 1);
        assert!(log.is_empty());
    }

    #[test]
    fn test_log_is_bounded() {
        let log = ToastLog::new();
        for i in 0..(TOAST_LIMIT + 5) {
            log.push(Toast::new(format!("toast {}", i), ToastVariant::Info));
        }
        assert_eq!(log.len(), TOAST_LIMIT);
        assert_eq!(log.all()[0].title, "toast 5");
    }
}
