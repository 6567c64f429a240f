//! Debt module - Charges and the valuation engine.
//!
//! A Debt holds the original value and every term that adjusts it. Its
//! present value is always the output of [`ValuationEngine`] over the
//! current terms.

mod charge;
mod debt;
mod valuation;

pub use charge::{Charge, ChargeMode};
pub use debt::{ChargeUpdate, CollateralGuarantee, Debt, DebtError, DebtTerms};
pub use valuation::{Valuation, ValuationEngine, ValuationError, ValuationStep, ValuationWarning};
