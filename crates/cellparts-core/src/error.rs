//! # Error Types
//!
//! Domain-specific error types for cellparts-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  cellparts-core errors (this file)                                     │
//! │  ├── CoreError        - Cart and domain rule failures                  │
//! │  └── ValidationError  - Form input failures (shown inline)             │
//! │                                                                         │
//! │  cellparts-data errors (separate crate)                                │
//! │  └── DataError        - Table API failures                             │
//! │                                                                         │
//! │  apps/erp errors                                                       │
//! │  └── AppError         - What hooks and pages surface (toasts)          │
//! │                                                                         │
//! │  Flow: ValidationError → inline field message (no request sent)        │
//! │        DataError → AppError → error state + destructive toast          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Validation messages are the inline texts the store staff read next to a
//! form field, so they are written in Portuguese.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The product is not in the cart.
    #[error("Product {0} not in cart")]
    NotInCart(i64),

    /// Cart has exceeded maximum allowed lines.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// Line quantity exceeds maximum allowed.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Each variant carries the field it belongs to so a form can place the
/// message next to the right input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{message}")]
    Required {
        field: &'static str,
        message: &'static str,
    },

    /// A numeric field is below its minimum.
    #[error("{message}")]
    BelowMinimum {
        field: &'static str,
        message: &'static str,
    },

    /// A numeric field could not be parsed.
    #[error("{message}")]
    InvalidNumber {
        field: &'static str,
        message: &'static str,
    },

    /// Field value is too long.
    #[error("Máximo de {max} caracteres")]
    TooLong { field: &'static str, max: usize },
}

impl ValidationError {
    /// The form field this error belongs to.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::Required { field, .. }
            | ValidationError::BelowMinimum { field, .. }
            | ValidationError::InvalidNumber { field, .. }
            | ValidationError::TooLong { field, .. } => field,
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::QuantityTooLarge {
            requested: 1000,
            max: 999,
        };
        assert_eq!(err.to_string(), "Quantity 1000 exceeds maximum allowed (999)");
        assert_eq!(CoreError::NotInCart(7).to_string(), "Product 7 not in cart");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "sku",
            message: "SKU obrigatório",
        };
        assert_eq!(err.to_string(), "SKU obrigatório");
        assert_eq!(err.field(), "sku");

        let err = ValidationError::TooLong { field: "name", max: 200 };
        assert_eq!(err.to_string(), "Máximo de 200 caracteres");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "sku",
            message: "SKU obrigatório",
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
