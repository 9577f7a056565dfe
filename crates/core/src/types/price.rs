//! Fixed-point price representation.
//!
//! Prices are stored as an integer count of the smallest currency unit
//! (cents). At the JSON boundary they appear as two-decimal strings
//! (`"12.50"`), accepted back as either a number or a string via
//! [`rust_decimal`]. Integer storage keeps arithmetic exact and maps
//! directly onto an `INTEGER` database column.

use core::fmt;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// Prices cannot be negative.
    #[error("price cannot be negative")]
    Negative,
    /// More than two fractional digits.
    #[error("price cannot have more than two decimal places")]
    TooPrecise,
    /// The value does not fit the cent range.
    #[error("price out of range")]
    OutOfRange,
}

/// A non-negative fixed-point currency amount, in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(i64);

impl Price {
    /// Zero amount.
    pub const ZERO: Self = Self(0);

    /// Create a price from a raw cent count.
    #[must_use]
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Get the raw cent count.
    #[must_use]
    pub const fn as_cents(&self) -> i64 {
        self.0
    }

    /// The amount as a [`Decimal`] in whole currency units (e.g. `12.50`).
    #[must_use]
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.0, 2)
    }

    /// The number of whole currency units, fractional cents discarded.
    ///
    /// Used by loyalty accrual, which credits one point per whole unit.
    #[must_use]
    pub const fn whole_units(&self) -> i64 {
        self.0 / 100
    }

    /// Multiply by a line quantity, `None` on overflow.
    #[must_use]
    pub const fn checked_mul(self, quantity: i64) -> Option<Self> {
        match self.0.checked_mul(quantity) {
            Some(cents) => Some(Self(cents)),
            None => None,
        }
    }

    /// Add another amount, `None` on overflow.
    #[must_use]
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Self(cents)),
            None => None,
        }
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        if value.is_sign_negative() {
            return Err(PriceError::Negative);
        }

        let scaled = value
            .checked_mul(Decimal::ONE_HUNDRED)
            .ok_or(PriceError::OutOfRange)?;

        if !scaled.fract().is_zero() {
            return Err(PriceError::TooPrecise);
        }

        let cents = scaled.to_i64().ok_or(PriceError::OutOfRange)?;
        Ok(Self(cents))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_decimal())
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::str::serialize(&self.to_decimal(), serializer)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = <Decimal as Deserialize>::deserialize(deserializer)?;
        Self::try_from(value).map_err(serde::de::Error::custom)
    }
}

// SQLx support (with sqlite feature): stored as INTEGER cents.
#[cfg(feature = "sqlite")]
impl sqlx::Type<sqlx::Sqlite> for Price {
    fn type_info() -> sqlx::sqlite::SqliteTypeInfo {
        <i64 as sqlx::Type<sqlx::Sqlite>>::type_info()
    }

    fn compatible(ty: &sqlx::sqlite::SqliteTypeInfo) -> bool {
        <i64 as sqlx::Type<sqlx::Sqlite>>::compatible(ty)
    }
}

#[cfg(feature = "sqlite")]
impl<'r> sqlx::Decode<'r, sqlx::Sqlite> for Price {
    fn decode(value: sqlx::sqlite::SqliteValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let cents = <i64 as sqlx::Decode<sqlx::Sqlite>>::decode(value)?;
        Ok(Self(cents))
    }
}

#[cfg(feature = "sqlite")]
impl<'q> sqlx::Encode<'q, sqlx::Sqlite> for Price {
    fn encode_by_ref(
        &self,
        buf: &mut Vec<sqlx::sqlite::SqliteArgumentValue<'q>>,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <i64 as sqlx::Encode<'q, sqlx::Sqlite>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let price = Price::from_cents(1250);
        assert_eq!(price.as_cents(), 1250);
        assert_eq!(price.to_string(), "12.50");
    }

    #[test]
    fn test_try_from_decimal() {
        let price = Price::try_from(Decimal::new(1250, 2)).unwrap();
        assert_eq!(price.as_cents(), 1250);
    }

    #[test]
    fn test_try_from_whole_number() {
        let price = Price::try_from(Decimal::new(10, 0)).unwrap();
        assert_eq!(price.as_cents(), 1000);
    }

    #[test]
    fn test_try_from_negative() {
        assert_eq!(
            Price::try_from(Decimal::new(-1, 0)),
            Err(PriceError::Negative)
        );
    }

    #[test]
    fn test_try_from_too_precise() {
        assert_eq!(
            Price::try_from(Decimal::new(12505, 3)),
            Err(PriceError::TooPrecise)
        );
    }

    #[test]
    fn test_checked_mul() {
        let price = Price::from_cents(1000);
        assert_eq!(price.checked_mul(2).unwrap().as_cents(), 2000);
        assert!(Price::from_cents(i64::MAX).checked_mul(2).is_none());
    }

    #[test]
    fn test_checked_add() {
        let total = Price::from_cents(2000)
            .checked_add(Price::from_cents(500))
            .unwrap();
        assert_eq!(total.to_string(), "25.00");
    }

    #[test]
    fn test_whole_units() {
        assert_eq!(Price::from_cents(1299).whole_units(), 12);
        assert_eq!(Price::from_cents(99).whole_units(), 0);
    }

    #[test]
    fn test_serialize_as_string() {
        let json = serde_json::to_string(&Price::from_cents(1250)).unwrap();
        assert_eq!(json, "\"12.50\"");
    }

    #[test]
    fn test_deserialize_from_number() {
        let price: Price = serde_json::from_str("12.50").unwrap();
        assert_eq!(price.as_cents(), 1250);
    }

    #[test]
    fn test_deserialize_from_string() {
        let price: Price = serde_json::from_str("\"5.00\"").unwrap();
        assert_eq!(price.as_cents(), 500);
    }

    #[test]
    fn test_deserialize_rejects_negative() {
        assert!(serde_json::from_str::<Price>("-1.00").is_err());
    }
}
