//! # Notifications
//!
//! Toast descriptors: short, transient messages shown after an action.
//!
//! ```text
//! mutation ok   ──► Toast { "Produto cadastrado", "Cabo foi adicionado...", Success }
//! mutation err  ──► Toast { "Erro ao salvar",     "<server message>",       Destructive }
//! ```
//!
//! Where toasts end up is the application's business; this crate only
//! defines what one looks like and the [`Notifier`] seam to push them.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Visual variant of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastVariant {
    #[default]
    Default,
    Success,
    Info,
    Destructive,
}

/// A transient user notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub id: Uuid,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub variant: ToastVariant,
}

impl Toast {
    /// A toast with a title only.
    pub fn new(title: impl Into<String>, variant: ToastVariant) -> Self {
        Toast {
            id: Uuid::new_v4(),
            title: title.into(),
            description: None,
            variant,
        }
    }

    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Toast::new(title, ToastVariant::Success).with_description(description)
    }

    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Toast::new(title, ToastVariant::Destructive).with_description(description)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_destructive(&self) -> bool {
        self.variant == ToastVariant::Destructive
    }
}

/// Anything that can display a toast.
pub trait Notifier: Send + Sync {
    fn notify(&self, toast: Toast);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toasts_get_distinct_ids() {
        let a = Toast::new("Produto removido", ToastVariant::Default);
        let b = Toast::new("Produto removido", ToastVariant::Default);
        assert_ne!(a.id, b.id);
        assert_eq!(a.description, None);
    }

    #[test]
    fn test_destructive_toast() {
        let toast = Toast::destructive("Erro ao salvar", "Não foi possível salvar o produto.");
        assert!(toast.is_destructive());
        assert_eq!(
            toast.description.as_deref(),
            Some("Não foi possível salvar o produto.")
        );
    }
}
