//! ExpireProposalHandler - applies the expiry policy to one proposal.
//!
//! Meant to be driven by an external scheduler. Proposals that are not yet
//! due are left untouched and not rewritten.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::foundation::ProposalId;
use crate::domain::proposal::{Proposal, ProposalError};
use crate::ports::{Clock, ProposalRepository, Version};

/// Command to expire a proposal if its offer has lapsed.
#[derive(Debug, Clone)]
pub struct ExpireProposalCommand {
    pub proposal_id: ProposalId,
}

/// Result of applying the expiry policy.
#[derive(Debug, Clone)]
pub struct ExpireProposalResult {
    pub proposal: Proposal,
    pub version: Version,
    /// False if the offer had not lapsed yet.
    pub expired: bool,
}

/// Handler for expiring lapsed offers.
pub struct ExpireProposalHandler {
    repository: Arc<dyn ProposalRepository>,
    clock: Arc<dyn Clock>,
}

impl ExpireProposalHandler {
    pub fn new(repository: Arc<dyn ProposalRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    pub async fn handle(
        &self,
        cmd: ExpireProposalCommand,
    ) -> Result<ExpireProposalResult, ProposalError> {
        let stored = super::load(self.repository.as_ref(), cmd.proposal_id, None).await?;
        let mut proposal = stored.proposal;

        if !proposal.expire_if_due(self.clock.now())? {
            debug!(proposal_id = %proposal.id(), "Proposal not due for expiry");
            return Ok(ExpireProposalResult {
                proposal,
                version: stored.version,
                expired: false,
            });
        }

        let version = super::save(self.repository.as_ref(), &proposal, stored.version).await?;
        info!(proposal_id = %proposal.id(), "Proposal expired");

        Ok(ExpireProposalResult {
            proposal,
            version,
            expired: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::Fixture;
    use super::*;
    use crate::domain::proposal::ProposalSituation;

    fn handler(fx: &Fixture) -> ExpireProposalHandler {
        ExpireProposalHandler::new(fx.proposals.clone(), Arc::new(fx.clock.clone()))
    }

    #[tokio::test]
    async fn offer_before_expiration_is_left_alone() {
        let fx = Fixture::new();
        let (id, v1) = fx.proposal().await;
        fx.clock.advance_days(10);

        let result = handler(&fx)
            .handle(ExpireProposalCommand { proposal_id: id })
            .await
            .unwrap();

        assert!(!result.expired);
        assert_eq!(result.version, v1);
        assert_eq!(result.proposal.situation(), ProposalSituation::Sent);
    }

    #[tokio::test]
    async fn lapsed_offer_is_expired() {
        let fx = Fixture::new();
        let (id, v1) = fx.proposal().await;
        fx.clock.advance_days(11);

        let result = handler(&fx)
            .handle(ExpireProposalCommand { proposal_id: id })
            .await
            .unwrap();

        assert!(result.expired);
        assert_eq!(result.version, v1.next());
        assert_eq!(result.proposal.situation(), ProposalSituation::Expired);
    }

    #[tokio::test]
    async fn expiring_twice_reports_closed() {
        let fx = Fixture::new();
        let (id, _) = fx.proposal().await;
        fx.clock.advance_days(11);
        let h = handler(&fx);
        h.handle(ExpireProposalCommand { proposal_id: id }).await.unwrap();

        let err = h
            .handle(ExpireProposalCommand { proposal_id: id })
            .await
            .unwrap_err();
        assert_eq!(err, ProposalError::closed(ProposalSituation::Expired));
    }
}
