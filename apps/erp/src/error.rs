//! # Application Error Type
//!
//! What hooks and pages surface when something fails.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  DataError ───────► AppError::Backend ──► query error state / toast     │
//! │  CoreError ───────► AppError::Domain  ──► toast                         │
//! │  FormErrors ──────► AppError::Form    ──► inline field messages         │
//! │                                                                         │
//! │  user_message():                                                        │
//! │    server said something  → that text                                   │
//! │    transport / decode     → None (the hook uses its own fallback)       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use cellparts_core::{CoreError, FormErrors};
use cellparts_data::DataError;

/// Error returned from hooks and page actions.
#[derive(Debug, Error)]
pub enum AppError {
    /// The table API (or the transport to it) failed.
    #[error(transparent)]
    Backend(#[from] DataError),

    /// A domain rule was violated (cart limits, missing cart line).
    #[error(transparent)]
    Domain(#[from] CoreError),

    /// The form did not pass validation; nothing was sent.
    #[error("Form has {} invalid field(s)", .0.len())]
    Form(FormErrors),

    /// The action is not available right now (e.g. a submit already pending).
    #[error("{0}")]
    Unavailable(String),
}

impl AppError {
    /// The message to show the user, when the failure produced one.
    ///
    /// ## Returns
    /// * `Some(text)` - server-provided message (or domain message)
    /// * `None` - caller should show its generic fallback
    pub fn user_message(&self) -> Option<String> {
        match self {
            AppError::Backend(err) => {
                let message = err.server_message();
                if message.is_none() {
                    tracing::error!("Backend failure without server message: {}", err);
                }
                message
            }
            AppError::Domain(err) => Some(err.to_string()),
            AppError::Form(_) => None,
            AppError::Unavailable(reason) => Some(reason.clone()),
        }
    }

    /// Field errors, when this is a validation failure.
    pub fn form_errors(&self) -> Option<&FormErrors> {
        match self {
            AppError::Form(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<FormErrors> for AppError {
    fn from(errors: FormErrors) -> Self {
        AppError::Form(errors)
    }
}

/// Result type for hooks and page actions.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_server_text() {
        let err = AppError::from(DataError::Api {
            status: 400,
            message: "new row violates check constraint".into(),
        });
        assert_eq!(
            err.user_message().as_deref(),
            Some("new row violates check constraint")
        );

        let err = AppError::from(DataError::Request("connection reset".into()));
        assert_eq!(err.user_message(), None);
    }

    #[test]
    fn test_domain_errors_have_messages() {
        let err = AppError::from(CoreError::NotInCart(3));
        assert_eq!(err.user_message().as_deref(), Some("Product 3 not in cart"));
    }
}
