//! CreateProposalHandler - Command handler for opening a proposal.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::debt::{Charge, CollateralGuarantee, DebtTerms, Valuation};
use crate::domain::debtor::Debtor;
use crate::domain::foundation::{DebtId, DebtorId, ProposalId, Timestamp};
use crate::domain::proposal::{Proposal, ProposalError, ProposalTerms};
use crate::ports::{Clock, DebtorRepository, ProposalRepository, Version};

/// Checklist names used when a command leaves them out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistDefaults {
    pub payment_channels: Vec<String>,
    pub communication_channels: Vec<String>,
}

/// Debt terms as submitted, before debtors are resolved.
#[derive(Debug, Clone)]
pub struct DebtDetails {
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

impl DebtDetails {
    fn into_terms(self, debtors: Vec<Debtor>) -> DebtTerms {
        DebtTerms {
            debtors,
            origin: self.origin,
            document_id: self.document_id,
            original_value: self.original_value,
            expiration_date: self.expiration_date,
            fee: self.fee,
            interest: self.interest,
            other_charges: self.other_charges,
            collateral: self.collateral,
            correction: self.correction,
            correction_applies: self.correction_applies,
        }
    }
}

/// Command to create a proposal.
#[derive(Debug, Clone)]
pub struct CreateProposalCommand {
    pub debtor_ids: Vec<DebtorId>,
    pub debt: DebtDetails,
    pub proposed_value: i64,
    pub expiration_date: Timestamp,
    pub payment_deadline: i64,
    pub payment_channels: Option<Vec<String>>,
    pub communication_channels: Option<Vec<String>>,
}

/// Result of successful proposal creation.
#[derive(Debug, Clone)]
pub struct CreateProposalResult {
    pub proposal: Proposal,
    pub valuation: Valuation,
    pub version: Version,
}

/// Handler for creating proposals.
///
/// Debtor ids are resolved against the debtor store and the resulting
/// debtors are embedded in the proposal's debt.
pub struct CreateProposalHandler {
    debtors: Arc<dyn DebtorRepository>,
    proposals: Arc<dyn ProposalRepository>,
    clock: Arc<dyn Clock>,
    defaults: ChecklistDefaults,
}

impl CreateProposalHandler {
    pub fn new(
        debtors: Arc<dyn DebtorRepository>,
        proposals: Arc<dyn ProposalRepository>,
        clock: Arc<dyn Clock>,
        defaults: ChecklistDefaults,
    ) -> Self {
        Self {
            debtors,
            proposals,
            clock,
            defaults,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateProposalCommand,
    ) -> Result<CreateProposalResult, ProposalError> {
        // 1. Resolve debtors
        if cmd.debtor_ids.is_empty() {
            return Err(ProposalError::NoDebtor);
        }
        let mut debtors = Vec::with_capacity(cmd.debtor_ids.len());
        for id in &cmd.debtor_ids {
            let debtor = self
                .debtors
                .find_by_id(id)
                .await?
                .ok_or(ProposalError::DebtorNotFound(*id))?;
            debtors.push(debtor);
        }

        // 2. Build the aggregate
        let terms = ProposalTerms {
            debt: cmd.debt.into_terms(debtors),
            proposed_value: cmd.proposed_value,
            expiration_date: cmd.expiration_date,
            payment_deadline: cmd.payment_deadline,
            payment_channels: cmd
                .payment_channels
                .unwrap_or_else(|| self.defaults.payment_channels.clone()),
            communication_channels: cmd
                .communication_channels
                .unwrap_or_else(|| self.defaults.communication_channels.clone()),
        };
        let (proposal, valuation) =
            Proposal::create(ProposalId::new(), DebtId::new(), terms, self.clock.now())?;

        if let Some(warning) = &valuation.warning {
            warn!(proposal_id = %proposal.id(), ?warning, "Debt valuation clamped at zero");
        }

        // 3. Persist
        let version = self.proposals.insert(&proposal).await?;

        info!(
            proposal_id = %proposal.id(),
            present_value = %valuation.present_value,
            "Proposal created"
        );

        Ok(CreateProposalResult {
            proposal,
            valuation,
            version,
        })
    }
}
