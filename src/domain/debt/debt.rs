//! Debt entity - the obligation a proposal negotiates.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use crate::domain::debtor::Debtor;
use crate::domain::foundation::{DebtId, Money, Timestamp, ValidationError};

use super::{Charge, Valuation, ValuationEngine, ValuationError, ValuationWarning};

/// Informational guarantee attached to a debt. Not used in valuation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollateralGuarantee {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub value: Money,
}

/// Errors raised while building or revaluing a debt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DebtError {
    #[error("A debt must reference at least one debtor")]
    NoDebtor,

    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error(transparent)]
    Valuation(#[from] ValuationError),
}

/// Everything needed to open a debt, before valuation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebtTerms {
    pub debtors: Vec<Debtor>,
    pub origin: String,
    pub document_id: String,
    pub original_value: i64,
    pub expiration_date: Timestamp,
    pub fee: Charge,
    pub interest: Charge,
    pub other_charges: Vec<Charge>,
    pub collateral: Vec<CollateralGuarantee>,
    pub correction: Charge,
    pub correction_applies: bool,
}

/// A single atomic change to the inputs of a debt's valuation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum ChargeUpdate {
    OriginalValue(i64),
    Fee(Charge),
    Interest(Charge),
    Correction(Charge),
    CorrectionApplies(bool),
    ReplaceOtherCharges(Vec<Charge>),
    AddOtherCharge(Charge),
    RemoveOtherCharge(String),
}

/// The underlying obligation of a proposal.
///
/// `present_value` is derived: it is written only by [`Debt::revalue`], which
/// every charge mutation goes through. Deserializing goes through
/// [`DebtRecord`], so a stored present value is never trusted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "DebtRecord")]
pub struct Debt {
    id: DebtId,
    debtors: Vec<Debtor>,
    origin: String,
    document_id: String,
    original_value: Money,
    expiration_date: Timestamp,
    fee: Charge,
    interest: Charge,
    other_charges: Vec<Charge>,
    collateral: Vec<CollateralGuarantee>,
    correction: Charge,
    #[serde(default = "default_correction_applies")]
    correction_applies: bool,
    present_value: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    valuation_warning: Option<ValuationWarning>,
}

fn default_correction_applies() -> bool {
    true
}

/// Serialized form of a [`Debt`], without its derived valuation.
///
/// Any `presentValue` or `valuationWarning` in the input is ignored and
/// recomputed.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DebtRecord {
    id: DebtId,
    debtors: Vec<Debtor>,
    origin: String,
    document_id: String,
    original_value: Money,
    expiration_date: Timestamp,
    fee: Charge,
    interest: Charge,
    #[serde(default)]
    other_charges: Vec<Charge>,
    #[serde(default)]
    collateral: Vec<CollateralGuarantee>,
    correction: Charge,
    #[serde(default = "default_correction_applies")]
    correction_applies: bool,
}

impl TryFrom<DebtRecord> for Debt {
    type Error = DebtError;

    fn try_from(record: DebtRecord) -> Result<Self, Self::Error> {
        let terms = DebtTerms {
            debtors: record.debtors,
            origin: record.origin,
            document_id: record.document_id,
            original_value: record.original_value.amount(),
            expiration_date: record.expiration_date,
            fee: record.fee,
            interest: record.interest,
            other_charges: record.other_charges,
            collateral: record.collateral,
            correction: record.correction,
            correction_applies: record.correction_applies,
        };
        Debt::open(record.id, terms).map(|(debt, _)| debt)
    }
}

impl Debt {
    /// Opens a debt and computes its present value.
    ///
    /// # Errors
    ///
    /// - `NoDebtor` if `terms.debtors` is empty
    /// - `Invalid` for a negative original value, blank charge names, or
    ///   duplicate other-charge names
    /// - `Valuation` if the charges overflow
    pub fn open(id: DebtId, terms: DebtTerms) -> Result<(Self, Valuation), DebtError> {
        if terms.debtors.is_empty() {
            return Err(DebtError::NoDebtor);
        }

        let mut debt = Self {
            id,
            debtors: terms.debtors,
            origin: terms.origin,
            document_id: terms.document_id,
            original_value: Money::for_field("originalValue", terms.original_value)?,
            expiration_date: terms.expiration_date,
            fee: terms.fee,
            interest: terms.interest,
            other_charges: terms.other_charges,
            collateral: terms.collateral,
            correction: terms.correction,
            correction_applies: terms.correction_applies,
            present_value: Money::ZERO,
            valuation_warning: None,
        };
        debt.validate_charges()?;
        let valuation = debt.revalue()?;
        Ok((debt, valuation))
    }

    // ───────────────────────────────────────────────────────────────
    // Accessors
    // ───────────────────────────────────────────────────────────────

    pub fn id(&self) -> DebtId {
        self.id
    }

    pub fn debtors(&self) -> &[Debtor] {
        &self.debtors
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn document_id(&self) -> &str {
        &self.document_id
    }

    pub fn original_value(&self) -> Money {
        self.original_value
    }

    pub fn expiration_date(&self) -> Timestamp {
        self.expiration_date
    }

    pub fn fee(&self) -> &Charge {
        &self.fee
    }

    pub fn interest(&self) -> &Charge {
        &self.interest
    }

    pub fn other_charges(&self) -> &[Charge] {
        &self.other_charges
    }

    pub fn collateral(&self) -> &[CollateralGuarantee] {
        &self.collateral
    }

    pub fn correction(&self) -> &Charge {
        &self.correction
    }

    pub fn correction_applies(&self) -> bool {
        self.correction_applies
    }

    /// Present value as of the last revaluation.
    pub fn present_value(&self) -> Money {
        self.present_value
    }

    /// Warning raised by the last revaluation, if any.
    pub fn valuation_warning(&self) -> Option<&ValuationWarning> {
        self.valuation_warning.as_ref()
    }

    // ───────────────────────────────────────────────────────────────
    // Valuation
    // ───────────────────────────────────────────────────────────────

    /// Runs the valuation engine over the current charges without storing
    /// the result.
    pub fn valuation(&self) -> Result<Valuation, ValuationError> {
        let correction = self.correction_applies.then_some(&self.correction);
        ValuationEngine::compute(
            self.original_value,
            &self.fee,
            &self.interest,
            &self.other_charges,
            correction,
        )
    }

    /// Applies a charge change and recomputes the present value.
    ///
    /// All-or-nothing: on error `self` is left untouched.
    pub fn apply(&mut self, update: ChargeUpdate) -> Result<Valuation, DebtError> {
        let mut next = self.clone();
        next.apply_unchecked(update)?;
        next.validate_charges()?;
        let valuation = next.revalue()?;
        *self = next;
        Ok(valuation)
    }

    fn apply_unchecked(&mut self, update: ChargeUpdate) -> Result<(), DebtError> {
        match update {
            ChargeUpdate::OriginalValue(value) => {
                self.original_value = Money::for_field("originalValue", value)?;
            }
            ChargeUpdate::Fee(charge) => self.fee = charge,
            ChargeUpdate::Interest(charge) => self.interest = charge,
            ChargeUpdate::Correction(charge) => self.correction = charge,
            ChargeUpdate::CorrectionApplies(applies) => self.correction_applies = applies,
            ChargeUpdate::ReplaceOtherCharges(charges) => self.other_charges = charges,
            ChargeUpdate::AddOtherCharge(charge) => self.other_charges.push(charge),
            ChargeUpdate::RemoveOtherCharge(name) => {
                let position = self
                    .other_charges
                    .iter()
                    .position(|c| c.name == name)
                    .ok_or_else(|| {
                        ValidationError::invalid_format(
                            "otherCharges",
                            format!("no charge named '{}'", name),
                        )
                    })?;
                self.other_charges.remove(position);
            }
        }
        Ok(())
    }

    fn revalue(&mut self) -> Result<Valuation, ValuationError> {
        let valuation = self.valuation()?;
        self.present_value = valuation.present_value;
        self.valuation_warning = valuation.warning.clone();
        Ok(valuation)
    }

    fn validate_charges(&self) -> Result<(), ValidationError> {
        self.fee.validate("fee")?;
        self.interest.validate("interest")?;
        self.correction.validate("correction")?;

        let mut seen = HashSet::new();
        for charge in &self.other_charges {
            charge.validate("otherCharges")?;
            if !seen.insert(charge.name.as_str()) {
                return Err(ValidationError::duplicate("otherCharges", charge.name.clone()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::debtor::{Address, DebtorKind};
    use crate::domain::foundation::DebtorId;

    fn debtor() -> Debtor {
        Debtor {
            id: DebtorId::new(),
            fiscal_document: "12345678".to_string(),
            name: "Devedor".to_string(),
            email: "email@email.com".to_string(),
            type_of_debtor: DebtorKind::Individual,
            address: Address::default(),
        }
    }

    fn terms() -> DebtTerms {
        DebtTerms {
            debtors: vec![debtor()],
            origin: "contrato".to_string(),
            document_id: "doc-1".to_string(),
            original_value: 300,
            expiration_date: Timestamp::parse_rfc3339("exp", "2030-01-01T00:00:00Z").unwrap(),
            fee: Charge::fixed("taxa", 123),
            interest: Charge::fixed("juros", 123),
            other_charges: vec![],
            collateral: vec![],
            correction: Charge::fixed("correcao", 0),
            correction_applies: true,
        }
    }

    fn open(terms: DebtTerms) -> Debt {
        Debt::open(DebtId::new(), terms).unwrap().0
    }

    #[test]
    fn open_computes_present_value() {
        let debt = open(terms());
        assert_eq!(debt.present_value().amount(), 546);
        assert!(debt.valuation_warning().is_none());
    }

    #[test]
    fn open_rejects_empty_debtor_list() {
        let mut t = terms();
        t.debtors.clear();
        assert_eq!(Debt::open(DebtId::new(), t).unwrap_err(), DebtError::NoDebtor);
    }

    #[test]
    fn open_rejects_negative_original_value() {
        let mut t = terms();
        t.original_value = -1;
        assert!(matches!(
            Debt::open(DebtId::new(), t),
            Err(DebtError::Invalid(ValidationError::OutOfRange { .. }))
        ));
    }

    #[test]
    fn open_rejects_duplicate_other_charge_names() {
        let mut t = terms();
        t.other_charges = vec![Charge::fixed("cartorio", 1), Charge::fixed("cartorio", 2)];
        assert!(matches!(
            Debt::open(DebtId::new(), t),
            Err(DebtError::Invalid(ValidationError::Duplicate { .. }))
        ));
    }

    #[test]
    fn open_records_negative_valuation_warning() {
        let mut t = terms();
        t.original_value = 100;
        t.fee = Charge::percentage("taxa", -150);
        t.interest = Charge::none("juros");
        let debt = open(t);

        assert_eq!(debt.present_value(), Money::ZERO);
        assert_eq!(
            debt.valuation_warning(),
            Some(&ValuationWarning::NegativeValuation { raw_total: -50 })
        );
    }

    #[test]
    fn apply_fee_recomputes_present_value() {
        let mut debt = open(terms());
        let valuation = debt.apply(ChargeUpdate::Fee(Charge::fixed("taxa", 0))).unwrap();

        assert_eq!(valuation.present_value.amount(), 423);
        assert_eq!(debt.present_value().amount(), 423);
    }

    #[test]
    fn apply_original_value_recomputes_percentages() {
        let mut t = terms();
        t.fee = Charge::percentage("taxa", 10);
        let mut debt = open(t);

        debt.apply(ChargeUpdate::OriginalValue(1000)).unwrap();
        assert_eq!(debt.present_value().amount(), 1000 + 100 + 123);
    }

    #[test]
    fn apply_add_and_remove_other_charge() {
        let mut debt = open(terms());
        debt.apply(ChargeUpdate::AddOtherCharge(Charge::fixed("cartorio", 54)))
            .unwrap();
        assert_eq!(debt.present_value().amount(), 600);

        debt.apply(ChargeUpdate::RemoveOtherCharge("cartorio".to_string()))
            .unwrap();
        assert_eq!(debt.present_value().amount(), 546);
        assert!(debt.other_charges().is_empty());
    }

    #[test]
    fn apply_correction_toggle_skips_correction_step() {
        let mut t = terms();
        t.correction = Charge::percentage("ipca", 50);
        let mut debt = open(t);
        assert_eq!(debt.present_value().amount(), 819);

        debt.apply(ChargeUpdate::CorrectionApplies(false)).unwrap();
        assert_eq!(debt.present_value().amount(), 546);
    }

    #[test]
    fn failed_apply_leaves_debt_untouched() {
        let mut debt = open(terms());
        let before = debt.clone();

        let result = debt.apply(ChargeUpdate::RemoveOtherCharge("missing".to_string()));
        assert!(result.is_err());
        assert_eq!(debt, before);

        let result = debt.apply(ChargeUpdate::OriginalValue(-5));
        assert!(result.is_err());
        assert_eq!(debt, before);
    }

    #[test]
    fn charge_update_deserializes_from_tagged_json() {
        let update: ChargeUpdate = serde_json::from_value(serde_json::json!({
            "kind": "fee",
            "value": {"name": "taxa", "mode": "fixed", "value": 10}
        }))
        .unwrap();
        assert_eq!(update, ChargeUpdate::Fee(Charge::fixed("taxa", 10)));
    }

    #[test]
    fn debt_round_trips_through_json() {
        let debt = open(terms());
        let json = serde_json::to_string(&debt).unwrap();
        assert!(json.contains("\"presentValue\":546"));
        assert!(json.contains("\"documentId\":\"doc-1\""));

        let back: Debt = serde_json::from_str(&json).unwrap();
        assert_eq!(back, debt);
    }

    #[test]
    fn deserializing_ignores_stored_present_value() {
        let mut json = serde_json::to_value(open(terms())).unwrap();
        json["presentValue"] = serde_json::json!(999_999);

        let debt: Debt = serde_json::from_value(json).unwrap();
        assert_eq!(debt.present_value().amount(), 546);
    }

    #[test]
    fn deserializing_restores_valuation_warning() {
        let mut t = terms();
        t.original_value = 100;
        t.fee = Charge::percentage("taxa", -150);
        t.interest = Charge::none("juros");
        let mut json = serde_json::to_value(open(t)).unwrap();
        json.as_object_mut().unwrap().remove("valuationWarning");

        let debt: Debt = serde_json::from_value(json).unwrap();
        assert_eq!(
            debt.valuation_warning(),
            Some(&ValuationWarning::NegativeValuation { raw_total: -50 })
        );
    }

    #[test]
    fn deserializing_without_debtors_fails() {
        let mut json = serde_json::to_value(open(terms())).unwrap();
        json["debtors"] = serde_json::json!([]);
        assert!(serde_json::from_value::<Debt>(json).is_err());
    }

    #[test]
    fn deserializing_duplicate_other_charges_fails() {
        let mut json = serde_json::to_value(open(terms())).unwrap();
        json["otherCharges"] = serde_json::json!([
            {"name": "cartorio", "mode": "fixed", "value": 1},
            {"name": "cartorio", "mode": "fixed", "value": 2}
        ]);
        assert!(serde_json::from_value::<Debt>(json).is_err());
    }
}
