//! Money value object (non-negative integer amount in minor units).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// A non-negative monetary amount.
///
/// Amounts are whole minor units (`i64`) and never floats, so they survive
/// any JSON or SQL round trip exactly. Negative input is rejected at the
/// boundary, including on deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Money(i64);

impl Money {
    /// Zero.
    pub const ZERO: Self = Self(0);

    /// Creates an amount, returning error if negative.
    pub fn try_new(amount: i64) -> Result<Self, ValidationError> {
        Self::for_field("amount", amount)
    }

    /// Creates an amount, naming `field` in the error if negative.
    pub fn for_field(field: &str, amount: i64) -> Result<Self, ValidationError> {
        if amount < 0 {
            return Err(ValidationError::out_of_range(field, 0, i64::MAX, amount));
        }
        Ok(Self(amount))
    }

    /// Floors a signed total at zero.
    pub fn clamped(total: i64) -> Self {
        Self(total.max(0))
    }

    /// Returns the amount in minor units.
    pub fn amount(&self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for Money {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<Money> for i64 {
    fn from(money: Money) -> Self {
        money.0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn try_new_accepts_zero_and_positive() {
        assert_eq!(Money::try_new(0).unwrap(), Money::ZERO);
        assert_eq!(Money::try_new(546).unwrap().amount(), 546);
    }

    #[test]
    fn try_new_rejects_negative() {
        match Money::for_field("originalValue", -1) {
            Err(ValidationError::OutOfRange { field, actual, .. }) => {
                assert_eq!(field, "originalValue");
                assert_eq!(actual, -1);
            }
            other => panic!("Expected OutOfRange error, got {:?}", other),
        }
    }

    #[test]
    fn clamped_floors_at_zero() {
        assert_eq!(Money::clamped(-50), Money::ZERO);
        assert_eq!(Money::clamped(50).amount(), 50);
    }

    #[test]
    fn money_serializes_as_integer() {
        let json = serde_json::to_string(&Money::try_new(9_007_199_254_740_993).unwrap()).unwrap();
        assert_eq!(json, "9007199254740993");
    }

    #[test]
    fn money_deserialization_rejects_negative() {
        assert!(serde_json::from_str::<Money>("-10").is_err());
        assert_eq!(serde_json::from_str::<Money>("10").unwrap().amount(), 10);
    }
}
