//! AdvanceProposalHandler - Command handler for status transitions.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::ProposalId;
use crate::domain::proposal::{Proposal, ProposalError, ProposalSituation};
use crate::ports::{Clock, ProposalRepository, Version};

/// Command to move a proposal to a new status.
#[derive(Debug, Clone)]
pub struct AdvanceProposalCommand {
    pub proposal_id: ProposalId,
    pub target: ProposalSituation,
    pub expected_version: Option<Version>,
}

/// Result of a successful transition.
#[derive(Debug, Clone)]
pub struct AdvanceProposalResult {
    pub proposal: Proposal,
    pub previous: ProposalSituation,
    pub version: Version,
}

/// Handler for proposal status transitions.
pub struct AdvanceProposalHandler {
    repository: Arc<dyn ProposalRepository>,
    clock: Arc<dyn Clock>,
}

impl AdvanceProposalHandler {
    pub fn new(repository: Arc<dyn ProposalRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    pub async fn handle(
        &self,
        cmd: AdvanceProposalCommand,
    ) -> Result<AdvanceProposalResult, ProposalError> {
        let stored =
            super::load(self.repository.as_ref(), cmd.proposal_id, cmd.expected_version).await?;
        let mut proposal = stored.proposal;
        let previous = proposal.situation();

        proposal.advance(cmd.target, self.clock.now())?;

        let version = super::save(self.repository.as_ref(), &proposal, stored.version).await?;

        info!(
            proposal_id = %proposal.id(),
            from = %previous,
            to = %cmd.target,
            "Proposal status changed"
        );

        Ok(AdvanceProposalResult {
            proposal,
            previous,
            version,
        })
    }
}
