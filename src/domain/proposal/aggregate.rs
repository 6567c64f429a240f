//! Proposal aggregate - a negotiated repayment offer for a debt.

use serde::{Deserialize, Serialize};

use crate::domain::debt::{ChargeUpdate, Debt, DebtTerms, Valuation};
use crate::domain::foundation::{DebtId, Money, ProposalId, Timestamp, ValidationError};

use super::{
    Checklist, ChecklistKind, Completion, ProposalError, ProposalSituation, ProposalStatus,
};

/// Everything needed to create a proposal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposalTerms {
    pub debt: DebtTerms,
    pub proposed_value: i64,
    pub expiration_date: Timestamp,
    /// Days the debtor has to pay once the proposal is accepted.
    pub payment_deadline: i64,
    pub payment_channels: Vec<String>,
    pub communication_channels: Vec<String>,
}

/// Outcome of completing a payment channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentCompletion {
    pub completion: Completion,
    /// True if this completion moved the proposal from execution to completed.
    pub settled: bool,
}

/// Proposal aggregate.
///
/// Mutation goes through status transitions, charge updates, and checklist
/// completions only. Every operation is all-or-nothing and every operation
/// on a closed proposal fails with `ProposalClosed`. Stored snapshots are
/// re-checked on deserialization through [`ProposalRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "ProposalRecord")]
pub struct Proposal {
    id: ProposalId,
    debt: Debt,
    created_at: Timestamp,
    status: ProposalStatus,
    proposed_value: Money,
    expiration_date: Timestamp,
    payment_deadline: u32,
    payments: Checklist,
    communication: Checklist,
}

/// Serialized form of a [`Proposal`].
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProposalRecord {
    id: ProposalId,
    debt: Debt,
    created_at: Timestamp,
    status: ProposalStatus,
    proposed_value: Money,
    expiration_date: Timestamp,
    payment_deadline: u32,
    payments: Checklist,
    communication: Checklist,
}

impl TryFrom<ProposalRecord> for Proposal {
    type Error = ProposalError;

    fn try_from(record: ProposalRecord) -> Result<Self, Self::Error> {
        if record.payment_deadline == 0 {
            return Err(ValidationError::out_of_range(
                "paymentDeadline",
                1,
                i64::from(u32::MAX),
                0,
            )
            .into());
        }
        if !record.expiration_date.is_after(&record.created_at) {
            return Err(ProposalError::validation(
                "expirationDate",
                "must be after the creation time",
            ));
        }
        if record.status.updated_at.is_before(&record.created_at) {
            return Err(ProposalError::validation(
                "status.updatedAt",
                "must not precede the creation time",
            ));
        }
        Ok(Self {
            id: record.id,
            debt: record.debt,
            created_at: record.created_at,
            status: record.status,
            proposed_value: record.proposed_value,
            expiration_date: record.expiration_date,
            payment_deadline: record.payment_deadline,
            payments: record.payments,
            communication: record.communication,
        })
    }
}

impl Proposal {
    /// Creates a proposal in `sent` status and values its debt.
    ///
    /// # Errors
    ///
    /// - `NoDebtor` if the debt has no debtors
    /// - `Validation` for a non-positive payment deadline, a negative value,
    ///   an expiration date not after `now`, or a malformed checklist
    /// - `Overflow` if the debt's charges overflow
    pub fn create(
        id: ProposalId,
        debt_id: DebtId,
        terms: ProposalTerms,
        now: Timestamp,
    ) -> Result<(Self, Valuation), ProposalError> {
        let payment_deadline = u32::try_from(terms.payment_deadline)
            .ok()
            .filter(|days| *days > 0)
            .ok_or_else(|| {
                ValidationError::out_of_range(
                    "paymentDeadline",
                    1,
                    i64::from(u32::MAX),
                    terms.payment_deadline,
                )
            })?;

        let proposed_value = Money::for_field("proposedValue", terms.proposed_value)?;

        if !terms.expiration_date.is_after(&now) {
            return Err(ProposalError::validation(
                "expirationDate",
                "must be after the creation time",
            ));
        }

        let payments = Checklist::from_names(ChecklistKind::Payments, terms.payment_channels)?;
        let communication =
            Checklist::from_names(ChecklistKind::Communication, terms.communication_channels)?;

        let (debt, valuation) = Debt::open(debt_id, terms.debt)?;

        let proposal = Self {
            id,
            debt,
            created_at: now,
            status: ProposalStatus::initial(now),
            proposed_value,
            expiration_date: terms.expiration_date,
            payment_deadline,
            payments,
            communication,
        };
        Ok((proposal, valuation))
    }

    // ───────────────────────────────────────────────────────────────
    // Accessors
    // ───────────────────────────────────────────────────────────────

    pub fn id(&self) -> ProposalId {
        self.id
    }

    pub fn debt(&self) -> &Debt {
        &self.debt
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn status(&self) -> &ProposalStatus {
        &self.status
    }

    pub fn situation(&self) -> ProposalSituation {
        self.status.situation
    }

    pub fn proposed_value(&self) -> Money {
        self.proposed_value
    }

    pub fn expiration_date(&self) -> Timestamp {
        self.expiration_date
    }

    pub fn payment_deadline(&self) -> u32 {
        self.payment_deadline
    }

    pub fn payments(&self) -> &Checklist {
        &self.payments
    }

    pub fn communication(&self) -> &Checklist {
        &self.communication
    }

    pub fn is_closed(&self) -> bool {
        self.status.is_closed()
    }

    /// True when the offer is still awaiting acceptance and `now` is past
    /// its expiration date.
    ///
    /// Only `sent` and `viewed` count: `accepted` and `execution` have no
    /// transition to `expired`, so once the debtor accepts, the offer's
    /// expiration date no longer applies.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        self.status.situation.is_awaiting_acceptance() && now.is_after(&self.expiration_date)
    }

    // ───────────────────────────────────────────────────────────────
    // Lifecycle
    // ───────────────────────────────────────────────────────────────

    /// Moves the proposal to `target`.
    ///
    /// An offer past its expiration date may only move to `expired`.
    pub fn advance(
        &mut self,
        target: ProposalSituation,
        now: Timestamp,
    ) -> Result<&ProposalStatus, ProposalError> {
        self.ensure_open()?;
        if self.is_expired(now) && target != ProposalSituation::Expired {
            return Err(ProposalError::invalid_transition(self.status.situation, target));
        }
        self.status = self.status.advance(target, now)?;
        Ok(&self.status)
    }

    /// Moves the proposal to `expired` if its offer has lapsed.
    ///
    /// Returns whether the proposal changed.
    pub fn expire_if_due(&mut self, now: Timestamp) -> Result<bool, ProposalError> {
        self.ensure_open()?;
        if !self.is_expired(now) {
            return Ok(false);
        }
        self.advance(ProposalSituation::Expired, now)?;
        Ok(true)
    }

    // ───────────────────────────────────────────────────────────────
    // Charges
    // ───────────────────────────────────────────────────────────────

    /// Applies a charge change to the debt and revalues it.
    pub fn update_charges(&mut self, update: ChargeUpdate) -> Result<Valuation, ProposalError> {
        self.ensure_open()?;
        Ok(self.debt.apply(update)?)
    }

    /// Current valuation of the debt.
    pub fn valuation(&self) -> Result<Valuation, ProposalError> {
        Ok(self.debt.valuation()?)
    }

    // ───────────────────────────────────────────────────────────────
    // Checklists
    // ───────────────────────────────────────────────────────────────

    /// Completes a payment channel.
    ///
    /// A proposal in `execution` whose payments are all complete is settled:
    /// it moves to `completed` in the same operation.
    pub fn complete_payment(
        &mut self,
        name: &str,
        now: Timestamp,
    ) -> Result<PaymentCompletion, ProposalError> {
        self.ensure_open()?;

        let mut next = self.clone();
        let completion = next
            .payments
            .complete(name)
            .map_err(|e| ProposalError::unknown_channel(ChecklistKind::Payments, e.0))?;

        let settled = next.status.situation == ProposalSituation::Execution
            && next.payments.all_completed();
        if settled {
            next.status = next.status.advance(ProposalSituation::Completed, now)?;
        }

        *self = next;
        Ok(PaymentCompletion {
            completion,
            settled,
        })
    }

    /// Completes a communication channel.
    pub fn complete_communication(&mut self, name: &str) -> Result<Completion, ProposalError> {
        self.ensure_open()?;
        self.communication
            .complete(name)
            .map_err(|e| ProposalError::unknown_channel(ChecklistKind::Communication, e.0))
    }

    fn ensure_open(&self) -> Result<(), ProposalError> {
        if self.is_closed() {
            return Err(ProposalError::closed(self.status.situation));
        }
        Ok(())
    }
}
