//! Charge value object - a named monetary adjustment.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

use super::ValuationError;

/// How a charge's value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChargeMode {
    /// `value` is an absolute amount in minor units.
    Fixed,
    /// `value` is parts-per-hundred of the charge's base.
    Percentage,
}

/// A named fee, interest, other-charge, or correction term.
///
/// `value` is signed: a negative value models a discount. The engine never
/// rejects it, it clamps the final total instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Charge {
    pub name: String,
    pub mode: ChargeMode,
    pub value: i64,
}

impl Charge {
    /// Creates a fixed-amount charge.
    pub fn fixed(name: impl Into<String>, value: i64) -> Self {
        Self {
            name: name.into(),
            mode: ChargeMode::Fixed,
            value,
        }
    }

    /// Creates a percentage charge.
    pub fn percentage(name: impl Into<String>, value: i64) -> Self {
        Self {
            name: name.into(),
            mode: ChargeMode::Percentage,
            value,
        }
    }

    /// A zero-valued fixed charge.
    pub fn none(name: impl Into<String>) -> Self {
        Self::fixed(name, 0)
    }

    /// Resolves this charge against `base`.
    ///
    /// Fixed charges ignore the base. Percentage charges return
    /// `base * value / 100` in integer arithmetic, truncating toward zero.
    ///
    /// # Errors
    ///
    /// Returns `ValuationError::Overflow` if the result does not fit in `i64`.
    pub fn resolve(&self, base: i64) -> Result<i64, ValuationError> {
        match self.mode {
            ChargeMode::Fixed => Ok(self.value),
            ChargeMode::Percentage => {
                let scaled = i128::from(base) * i128::from(self.value) / 100;
                i64::try_from(scaled).map_err(|_| ValuationError::overflow(&self.name))
            }
        }
    }

    /// Validates the charge name.
    pub fn validate(&self, field: &str) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::empty_field(format!("{}.name", field)));
        }
        Ok(())
    }
}
