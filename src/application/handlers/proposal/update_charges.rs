//! UpdateChargesHandler - Command handler for debt charge changes.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::debt::{ChargeUpdate, Valuation};
use crate::domain::foundation::ProposalId;
use crate::domain::proposal::{Proposal, ProposalError};
use crate::ports::{ProposalRepository, Version};

/// Command to change a proposal's debt charges.
#[derive(Debug, Clone)]
pub struct UpdateChargesCommand {
    pub proposal_id: ProposalId,
    pub update: ChargeUpdate,
    pub expected_version: Option<Version>,
}

/// Result of a successful revaluation.
#[derive(Debug, Clone)]
pub struct UpdateChargesResult {
    pub proposal: Proposal,
    pub valuation: Valuation,
    pub version: Version,
}

/// Handler for charge updates.
pub struct UpdateChargesHandler {
    repository: Arc<dyn ProposalRepository>,
}

impl UpdateChargesHandler {
    pub fn new(repository: Arc<dyn ProposalRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: UpdateChargesCommand,
    ) -> Result<UpdateChargesResult, ProposalError> {
        let stored =
            super::load(self.repository.as_ref(), cmd.proposal_id, cmd.expected_version).await?;
        let mut proposal = stored.proposal;

        let valuation = proposal.update_charges(cmd.update)?;
        if let Some(warning) = &valuation.warning {
            warn!(proposal_id = %proposal.id(), ?warning, "Debt valuation clamped at zero");
        }

        let version = super::save(self.repository.as_ref(), &proposal, stored.version).await?;

        info!(
            proposal_id = %proposal.id(),
            present_value = %valuation.present_value,
            "Proposal debt revalued"
        );

        Ok(UpdateChargesResult {
            proposal,
            valuation,
            version,
        })
    }
}
