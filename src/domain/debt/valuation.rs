//! Valuation engine - derives a debt's present value from its charges.
//!
//! The order of application is fixed:
//!
//! 1. start from the original value
//! 2. fee, based on the original value
//! 3. interest, based on the original value
//! 4. each other charge in list order, based on the original value
//! 5. correction, based on the running total after steps 2-4
//!
//! A negative total is floored at zero and reported as a warning on the
//! otherwise successful result.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::foundation::Money;

use super::Charge;

/// Failures that prevent a valuation from producing a number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValuationError {
    #[error("Applying charge '{charge}' overflows the valuation range")]
    Overflow { charge: String },
}

impl ValuationError {
    pub fn overflow(charge: impl Into<String>) -> Self {
        ValuationError::Overflow {
            charge: charge.into(),
        }
    }
}

/// Recoverable conditions attached to a successful valuation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ValuationWarning {
    /// The raw total was negative and the present value was clamped to zero.
    #[serde(rename_all = "camelCase")]
    NegativeValuation { raw_total: i64 },
}

/// One applied term of a valuation, kept for auditing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationStep {
    pub name: String,
    pub amount: i64,
    pub running_total: i64,
}

/// Output of [`ValuationEngine::compute`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Valuation {
    pub present_value: Money,
    pub raw_total: i64,
    pub steps: Vec<ValuationStep>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<ValuationWarning>,
}

impl Valuation {
    /// Returns true if the raw total had to be clamped.
    pub fn is_clamped(&self) -> bool {
        matches!(self.warning, Some(ValuationWarning::NegativeValuation { .. }))
    }
}

/// Stateless, deterministic present-value calculator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValuationEngine;

impl ValuationEngine {
    /// Computes the present value of a debt.
    ///
    /// `correction` is `None` when the debt is not subject to correction, in
    /// which case step 5 is skipped.
    ///
    /// # Errors
    ///
    /// Returns `ValuationError::Overflow` if any intermediate total leaves the
    /// `i64` range.
    pub fn compute(
        original_value: Money,
        fee: &Charge,
        interest: &Charge,
        other_charges: &[Charge],
        correction: Option<&Charge>,
    ) -> Result<Valuation, ValuationError> {
        let original = original_value.amount();
        let mut running_total = original;
        let mut steps = Vec::with_capacity(other_charges.len() + 3);

        let based_on_original = [fee, interest].into_iter().chain(other_charges.iter());
        for charge in based_on_original {
            running_total = apply(charge, original, running_total, &mut steps)?;
        }

        if let Some(correction) = correction {
            running_total = apply(correction, running_total, running_total, &mut steps)?;
        }

        let warning = (running_total < 0).then_some(ValuationWarning::NegativeValuation {
            raw_total: running_total,
        });

        Ok(Valuation {
            present_value: Money::clamped(running_total),
            raw_total: running_total,
            steps,
            warning,
        })
    }
}

fn apply(
    charge: &Charge,
    base: i64,
    running_total: i64,
    steps: &mut Vec<ValuationStep>,
) -> Result<i64, ValuationError> {
    let amount = charge.resolve(base)?;
    let running_total = running_total
        .checked_add(amount)
        .ok_or_else(|| ValuationError::overflow(&charge.name))?;
    steps.push(ValuationStep {
        name: charge.name.clone(),
        amount,
        running_total,
    });
    Ok(running_total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn money(amount: i64) -> Money {
        Money::try_new(amount).unwrap()
    }

    #[test]
    fn fixed_fee_and_interest_add_to_original_value() {
        let valuation = ValuationEngine::compute(
            money(300),
            &Charge::fixed("taxa", 123),
            &Charge::fixed("juros", 123),
            &[],
            Some(&Charge::fixed("correcao", 0)),
        )
        .unwrap();

        assert_eq!(valuation.present_value, money(546));
        assert!(valuation.warning.is_none());
    }

    #[test]
    fn negative_total_is_clamped_with_warning() {
        let valuation = ValuationEngine::compute(
            money(100),
            &Charge::percentage("taxa", -150),
            &Charge::none("juros"),
            &[],
            Some(&Charge::none("correcao")),
        )
        .unwrap();

        assert_eq!(valuation.present_value, Money::ZERO);
        assert_eq!(valuation.raw_total, -50);
        assert_eq!(
            valuation.warning,
            Some(ValuationWarning::NegativeValuation { raw_total: -50 })
        );
        assert!(valuation.is_clamped());
    }

    #[test]
    fn other_charges_use_original_value_as_base() {
        let valuation = ValuationEngine::compute(
            money(1000),
            &Charge::fixed("taxa", 500),
            &Charge::none("juros"),
            &[Charge::percentage("cartorio", 10)],
            None,
        )
        .unwrap();

        // 10% of 1000, not of 1500
        assert_eq!(valuation.present_value, money(1600));
    }

    #[test]
    fn correction_uses_running_total_as_base() {
        let valuation = ValuationEngine::compute(
            money(1000),
            &Charge::fixed("taxa", 500),
            &Charge::fixed("juros", 500),
            &[],
            Some(&Charge::percentage("ipca", 10)),
        )
        .unwrap();

        // 10% of 2000
        assert_eq!(valuation.present_value, money(2200));
    }

    #[test]
    fn skipped_correction_leaves_total_unchanged() {
        let valuation = ValuationEngine::compute(
            money(1000),
            &Charge::none("taxa"),
            &Charge::none("juros"),
            &[],
            None,
        )
        .unwrap();

        assert_eq!(valuation.present_value, money(1000));
        assert_eq!(valuation.steps.len(), 2);
    }

    #[test]
    fn steps_record_application_order() {
        let valuation = ValuationEngine::compute(
            money(100),
            &Charge::fixed("taxa", 1),
            &Charge::fixed("juros", 2),
            &[Charge::fixed("a", 3), Charge::fixed("b", 4)],
            Some(&Charge::fixed("correcao", 5)),
        )
        .unwrap();

        let names: Vec<_> = valuation.steps.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["taxa", "juros", "a", "b", "correcao"]);
        assert_eq!(valuation.steps.last().unwrap().running_total, 115);
    }

    #[test]
    fn overflowing_sum_is_an_error() {
        let result = ValuationEngine::compute(
            money(i64::MAX),
            &Charge::fixed("taxa", 1),
            &Charge::none("juros"),
            &[],
            None,
        );

        assert_eq!(result, Err(ValuationError::overflow("taxa")));
    }

    #[test]
    fn warning_serializes_with_kind_tag() {
        let warning = ValuationWarning::NegativeValuation { raw_total: -50 };
        let json = serde_json::to_value(&warning).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "negativeValuation", "rawTotal": -50}));
    }

    proptest! {
        #[test]
        fn fixed_mode_total_is_exact_sum(
            original in 0i64..1_000_000_000,
            fee in 0i64..1_000_000,
            interest in 0i64..1_000_000,
            others in proptest::collection::vec(0i64..1_000_000, 0..8),
            correction in 0i64..1_000_000,
        ) {
            let other_charges: Vec<Charge> = others
                .iter()
                .enumerate()
                .map(|(i, v)| Charge::fixed(format!("other-{}", i), *v))
                .collect();

            let valuation = ValuationEngine::compute(
                money(original),
                &Charge::fixed("fee", fee),
                &Charge::fixed("interest", interest),
                &other_charges,
                Some(&Charge::fixed("correction", correction)),
            ).unwrap();

            let expected = original + fee + interest + others.iter().sum::<i64>() + correction;
            prop_assert_eq!(valuation.present_value.amount(), expected);
        }

        #[test]
        fn zero_percentages_return_original_value(
            original in 0i64..1_000_000_000_000,
            count in 0usize..8,
        ) {
            let other_charges: Vec<Charge> =
                (0..count).map(|i| Charge::percentage(format!("other-{}", i), 0)).collect();

            let valuation = ValuationEngine::compute(
                money(original),
                &Charge::percentage("fee", 0),
                &Charge::percentage("interest", 0),
                &other_charges,
                Some(&Charge::percentage("correction", 0)),
            ).unwrap();

            prop_assert_eq!(valuation.present_value.amount(), original);
        }

        #[test]
        fn percentage_resolves_to_scaled_base(base in -1_000_000_000i64..1_000_000_000, v in -10_000i64..10_000) {
            let resolved = Charge::percentage("p", v).resolve(base).unwrap();
            prop_assert_eq!(resolved, base * v / 100);
        }

        #[test]
        fn compute_is_idempotent(
            original in 0i64..1_000_000,
            fee in -2_000_000i64..1_000_000,
            fee_is_pct in any::<bool>(),
            correction in -200i64..200,
        ) {
            let fee = if fee_is_pct {
                Charge::percentage("fee", fee / 1000)
            } else {
                Charge::fixed("fee", fee)
            };
            let correction = Charge::percentage("correction", correction);
            let run = || ValuationEngine::compute(
                money(original),
                &fee,
                &Charge::none("interest"),
                &[],
                Some(&correction),
            );

            let first = run().unwrap();
            let second = run().unwrap();
            prop_assert!(first.present_value.amount() >= 0);
            prop_assert_eq!(first, second);
        }
    }
}
