//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  The table API stores prices as numeric and JSON carries them as        │
//! │  floats: 89.9 + 45.0 + 35.0 must show as R$ 169.90, not 169.89999...   │
//! │                                                                         │
//! │  OUR SOLUTION: Integer centavos                                        │
//! │    JSON 89.9  ──► Money(8990) ──► arithmetic in i64 ──► JSON 89.9      │
//! │    Conversion happens exactly once at the wire boundary, rounded to    │
//! │    the nearest centavo.                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use cellparts_core::money::Money;
//!
//! let price = Money::from_cents(8990); // R$ 89.90
//! let line_total = price.multiply_quantity(2);
//! assert_eq!(line_total.cents(), 17980);
//! assert_eq!(line_total.to_string(), "R$ 179.80");
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in centavos (the smallest unit of the Brazilian real).
///
/// ## Wire Format
/// Serialized as a JSON number in major units (`89.9`), which is how the
/// hosted table API stores `numeric` columns. Deserialization rounds to the
/// nearest centavo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

/// Largest amount, in reais, accepted from forms and the wire.
pub const MAX_DECIMAL: f64 = 1_000_000_000_000.0;

impl Money {
    /// Creates a Money value from centavos.
    ///
    /// ## Example
    /// ```rust
    /// use cellparts_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from a decimal amount in reais.
    ///
    /// Only used at the wire and form boundaries. Returns `None` for NaN,
    /// infinities and anything beyond [`MAX_DECIMAL`] in either direction.
    ///
    /// ## Example
    /// ```rust
    /// use cellparts_core::money::Money;
    ///
    /// assert_eq!(Money::from_decimal(89.9), Some(Money::from_cents(8990)));
    /// assert_eq!(Money::from_decimal(f64::NAN), None);
    /// ```
    pub fn from_decimal(value: f64) -> Option<Self> {
        if !value.is_finite() || value.abs() > MAX_DECIMAL {
            return None;
        }
        Some(Money((value * 100.0).round() as i64))
    }

    /// Parses a form input such as `"89.90"`, `"89,90"` or `"10"`.
    ///
    /// Accepts the Brazilian decimal comma. Returns `None` when the text is
    /// not a finite number.
    ///
    /// ## Example
    /// ```rust
    /// use cellparts_core::money::Money;
    ///
    /// assert_eq!(Money::parse("89,90"), Some(Money::from_cents(8990)));
    /// assert_eq!(Money::parse(" 10 "), Some(Money::from_cents(1000)));
    /// assert_eq!(Money::parse("abc"), None);
    /// ```
    pub fn parse(input: &str) -> Option<Self> {
        let normalized = input.trim().replace(',', ".");
        if normalized.is_empty() {
            return None;
        }
        normalized.parse::<f64>().ok().and_then(Money::from_decimal)
    }

    /// Returns the value in centavos.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the value in reais as a float (wire format only).
    #[inline]
    pub fn to_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns the major unit (reais) portion.
    #[inline]
    pub const fn reais(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (centavos) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity.
    ///
    /// ## User Workflow
    /// ```text
    /// Product: Cabo USB-C 2m R$ 29.90
    /// Quantity: 3
    ///      │
    ///      ▼
    /// multiply_quantity(3) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Line Total: R$ 89.70
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money the way the store pages do: `R$ 89.90`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}R$ {}.{:02}", sign, self.reais().abs(), self.cents_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_decimal())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Money::from_decimal(value)
            .ok_or_else(|| serde::de::Error::custom("monetary value must be a finite number"))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.reais(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(8990).to_string(), "R$ 89.90");
        assert_eq!(Money::from_cents(500).to_string(), "R$ 5.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-R$ 5.50");
        assert_eq!(Money::zero().to_string(), "R$ 0.00");
    }

    #[test]
    fn test_parse_accepts_comma_and_dot() {
        assert_eq!(Money::parse("29.90"), Some(Money::from_cents(2990)));
        assert_eq!(Money::parse("29,9"), Some(Money::from_cents(2990)));
        assert_eq!(Money::parse("0"), Some(Money::zero()));
        assert_eq!(Money::parse("-1"), Some(Money::from_cents(-100)));
        assert_eq!(Money::parse(""), None);
        assert_eq!(Money::parse("dez"), None);
    }

    #[test]
    fn test_out_of_range_amounts_are_rejected() {
        assert_eq!(Money::parse("1e20"), None);
        assert_eq!(Money::parse("-1e13"), None);
        assert_eq!(
            Money::from_decimal(MAX_DECIMAL),
            Some(Money::from_cents(100_000_000_000_000))
        );
        assert!(serde_json::from_value::<Money>(serde_json::json!(1e300)).is_err());
    }

    #[test]
    fn test_float_sum_is_exact() {
        // 89.9 + 45.0 + 35.0 as floats is not 169.9 exactly
        let total: Money = [89.9, 45.0, 35.0]
            .iter()
            .filter_map(|v| Money::from_decimal(*v))
            .sum();
        assert_eq!(total.cents(), 16990);
    }

    #[test]
    fn test_serde_uses_major_units() {
        let json = serde_json::to_value(Money::from_cents(8990)).unwrap();
        assert_eq!(json, serde_json::json!(89.9));

        let back: Money = serde_json::from_value(serde_json::json!(159.9)).unwrap();
        assert_eq!(back.cents(), 15990);

        let integer: Money = serde_json::from_value(serde_json::json!(10)).unwrap();
        assert_eq!(integer.cents(), 1000);
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3).cents(), 3000);
    }
}
