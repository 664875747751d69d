//! # Validation Module
//!
//! Client-side validation for the create forms.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Form (THIS MODULE)                                           │
//! │  ├── Required fields, numeric parsing, non-negative minimums           │
//! │  └── Errors shown inline; the mutation is NOT invoked                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Table API                                                    │
//! │  ├── Column types, NOT NULL, primary keys                              │
//! │  └── Errors come back as a destructive toast                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Forms hold raw text exactly as typed. `validate()` either produces the
//! typed creation payload or a [`FormErrors`] map keyed by field name.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{
    NewOrder, NewProduct, NewServiceOrder, OrderStatus, OrderType, Priority, ProductStatus,
    ServiceStatus,
};
use crate::MAX_ITEM_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_NAME_LEN: usize = 200;
const MAX_SKU_LEN: usize = 50;

// =============================================================================
// Form Errors
// =============================================================================

/// Per-field validation failures, at most one per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    errors: BTreeMap<&'static str, ValidationError>,
}

impl FormErrors {
    /// Creates an empty error map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an error. The first error for a field wins.
    pub fn push(&mut self, error: ValidationError) {
        self.errors.entry(error.field()).or_insert(error);
    }

    /// Records the error of a failed check, if any.
    pub fn check<T>(&mut self, result: ValidationResult<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                self.push(error);
                None
            }
        }
    }

    /// Returns true when no field failed.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of failing fields.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// The inline message for a field, if it failed.
    pub fn message(&self, field: &str) -> Option<String> {
        self.errors.get(field).map(|e| e.to_string())
    }

    /// Returns true when the field failed.
    pub fn contains(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    /// Iterates over failing fields in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &ValidationError)> {
        self.errors.iter().map(|(field, error)| (*field, error))
    }
}

// =============================================================================
// Field Validators
// =============================================================================

/// Validates that a text field is present (after trimming) and returns it trimmed.
pub fn require_text(
    value: &str,
    field: &'static str,
    message: &'static str,
) -> ValidationResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::Required { field, message });
    }
    Ok(value.to_string())
}

/// Validates a product name: required, at most 200 characters.
pub fn validate_product_name(name: &str) -> ValidationResult<String> {
    let name = require_text(name, "name", "Nome obrigatório")?;
    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name",
            max: MAX_NAME_LEN,
        });
    }
    Ok(name)
}

/// Validates a SKU: required, at most 50 characters.
///
/// ## Example
/// ```rust
/// use cellparts_core::validation::validate_sku;
///
/// assert!(validate_sku("CAP-IP14-001").is_ok());
/// assert!(validate_sku("   ").is_err());
/// ```
pub fn validate_sku(sku: &str) -> ValidationResult<String> {
    let sku = require_text(sku, "sku", "SKU obrigatório")?;
    if sku.chars().count() > MAX_SKU_LEN {
        return Err(ValidationError::TooLong {
            field: "sku",
            max: MAX_SKU_LEN,
        });
    }
    Ok(sku)
}

/// Parses a required, non-negative monetary field.
pub fn validate_amount(
    input: &str,
    field: &'static str,
    required_message: &'static str,
) -> ValidationResult<Money> {
    if input.trim().is_empty() {
        return Err(ValidationError::Required {
            field,
            message: required_message,
        });
    }
    let amount = Money::parse(input).ok_or(ValidationError::InvalidNumber {
        field,
        message: "Valor inválido",
    })?;
    if amount.is_negative() {
        return Err(ValidationError::BelowMinimum {
            field,
            message: "Valor deve ser positivo",
        });
    }
    Ok(amount)
}

/// Parses the stock field: required whole number, not negative.
pub fn validate_stock(input: &str) -> ValidationResult<i64> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ValidationError::Required {
            field: "stock",
            message: "Informe quantidade",
        });
    }
    let stock = input
        .parse::<i64>()
        .map_err(|_| ValidationError::InvalidNumber {
            field: "stock",
            message: "Quantidade inválida",
        })?;
    if stock < 0 {
        return Err(ValidationError::BelowMinimum {
            field: "stock",
            message: "Estoque não pode ser negativo",
        });
    }
    Ok(stock)
}

/// Validates a cart quantity (1..=999).
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::BelowMinimum {
            field: "quantity",
            message: "Quantidade deve ser positiva",
        });
    }
    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::InvalidNumber {
            field: "quantity",
            message: "Quantidade acima do máximo permitido",
        });
    }
    Ok(())
}

/// Normalizes a search query: trimmed and lowercased. Empty means "no filter".
pub fn normalize_search_query(query: &str) -> String {
    query.trim().to_lowercase()
}

fn optional_text(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

// =============================================================================
// Product Form
// =============================================================================

/// The "Novo Produto" form, as typed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductForm {
    pub name: String,
    pub sku: String,
    pub price: String,
    pub stock: String,
    pub category: String,
    pub status: ProductStatus,
    pub description: String,
}

impl Default for ProductForm {
    fn default() -> Self {
        ProductForm {
            name: String::new(),
            sku: String::new(),
            price: "0".to_string(),
            stock: "0".to_string(),
            category: String::new(),
            status: ProductStatus::Active,
            description: String::new(),
        }
    }
}

impl ProductForm {
    /// Validates every field and builds the creation payload.
    ///
    /// ## Example
    /// ```rust
    /// use cellparts_core::validation::ProductForm;
    ///
    /// let form = ProductForm { name: "Cabo".into(), ..ProductForm::default() };
    /// let errors = form.validate().unwrap_err();
    /// assert_eq!(errors.message("sku").as_deref(), Some("SKU obrigatório"));
    /// ```
    pub fn validate(&self) -> Result<NewProduct, FormErrors> {
        let mut errors = FormErrors::new();

        let name = errors.check(validate_product_name(&self.name));
        let sku = errors.check(validate_sku(&self.sku));
        let category = errors.check(require_text(
            &self.category,
            "category",
            "Categoria obrigatória",
        ));
        let price = errors.check(validate_amount(&self.price, "price", "Preço necessário"));
        let stock = errors.check(validate_stock(&self.stock));

        match (name, sku, category, price, stock) {
            (Some(name), Some(sku), Some(category), Some(price), Some(stock)) => Ok(NewProduct {
                name,
                sku,
                price,
                stock,
                category,
                status: Some(self.status.clone()),
                description: optional_text(&self.description),
            }),
            _ => Err(errors),
        }
    }
}

// =============================================================================
// Order Form
// =============================================================================

/// The "Novo Pedido" form, as typed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderForm {
    pub id: String,
    pub customer: String,
    pub items: String,
    pub total: String,
    pub order_type: OrderType,
    pub status: OrderStatus,
    pub address: String,
    pub date: String,
}

impl OrderForm {
    /// Validates every field and builds the creation payload.
    pub fn validate(&self) -> Result<NewOrder, FormErrors> {
        let mut errors = FormErrors::new();

        let id = errors.check(require_text(&self.id, "id", "Código obrigatório"));
        let customer = errors.check(require_text(
            &self.customer,
            "customer",
            "Cliente obrigatório",
        ));
        let items = errors.check(require_text(&self.items, "items", "Itens obrigatórios"));
        let total = errors.check(validate_amount(&self.total, "total", "Total necessário"));
        let address = errors.check(require_text(
            &self.address,
            "address",
            "Endereço obrigatório",
        ));
        let date = errors.check(require_text(&self.date, "date", "Data obrigatória"));

        match (id, customer, items, total, address, date) {
            (Some(id), Some(customer), Some(items), Some(total), Some(address), Some(date)) => {
                Ok(NewOrder {
                    id,
                    customer,
                    items,
                    total,
                    order_type: self.order_type,
                    status: self.status.clone(),
                    address,
                    date,
                })
            }
            _ => Err(errors),
        }
    }
}

// =============================================================================
// Service Order Form
// =============================================================================

/// The "Nova OS" form, as typed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceOrderForm {
    pub id: String,
    pub customer: String,
    pub device: String,
    pub issue: String,
    pub status: ServiceStatus,
    pub priority: Priority,
    pub date: String,
}

impl ServiceOrderForm {
    /// Validates every field and builds the creation payload.
    pub fn validate(&self) -> Result<NewServiceOrder, FormErrors> {
        let mut errors = FormErrors::new();

        let id = errors.check(require_text(&self.id, "id", "Código obrigatório"));
        let customer = errors.check(require_text(
            &self.customer,
            "customer",
            "Cliente obrigatório",
        ));
        let device = errors.check(require_text(&self.device, "device", "Aparelho obrigatório"));
        let issue = errors.check(require_text(&self.issue, "issue", "Defeito obrigatório"));
        let date = errors.check(require_text(&self.date, "date", "Data obrigatória"));

        match (id, customer, device, issue, date) {
            (Some(id), Some(customer), Some(device), Some(issue), Some(date)) => {
                Ok(NewServiceOrder {
                    id,
                    customer,
                    device,
                    issue,
                    status: self.status.clone(),
                    priority: self.priority.clone(),
                    date,
                })
            }
            _ => Err(errors),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
