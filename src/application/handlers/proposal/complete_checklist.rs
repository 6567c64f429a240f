//! CompleteChecklistHandler - Command handler for payment and communication
//! checklist entries.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::foundation::ProposalId;
use crate::domain::proposal::{ChecklistKind, Completion, Proposal, ProposalError};
use crate::ports::{Clock, ProposalRepository, Version};

/// Command to complete one checklist entry.
#[derive(Debug, Clone)]
pub struct CompleteChecklistCommand {
    pub proposal_id: ProposalId,
    pub checklist: ChecklistKind,
    pub name: String,
    pub expected_version: Option<Version>,
}

/// Result of completing a checklist entry.
#[derive(Debug, Clone)]
pub struct CompleteChecklistResult {
    pub proposal: Proposal,
    pub completion: Completion,
    /// True if this completion settled the proposal.
    pub settled: bool,
    pub version: Version,
}

/// Handler for checklist completion.
///
/// Completing an entry that is already complete changes nothing and is not
/// written back.
pub struct CompleteChecklistHandler {
    repository: Arc<dyn ProposalRepository>,
    clock: Arc<dyn Clock>,
}

impl CompleteChecklistHandler {
    pub fn new(repository: Arc<dyn ProposalRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    pub async fn handle(
        &self,
        cmd: CompleteChecklistCommand,
    ) -> Result<CompleteChecklistResult, ProposalError> {
        let stored =
            super::load(self.repository.as_ref(), cmd.proposal_id, cmd.expected_version).await?;
        let mut proposal = stored.proposal;

        let (completion, settled) = match cmd.checklist {
            ChecklistKind::Payments => {
                let outcome = proposal.complete_payment(&cmd.name, self.clock.now())?;
                (outcome.completion, outcome.settled)
            }
            ChecklistKind::Communication => {
                (proposal.complete_communication(&cmd.name)?, false)
            }
        };

        if completion == Completion::AlreadyCompleted && !settled {
            debug!(
                proposal_id = %proposal.id(),
                checklist = %cmd.checklist,
                name = %cmd.name,
                "Checklist entry already completed"
            );
            return Ok(CompleteChecklistResult {
                proposal,
                completion,
                settled,
                version: stored.version,
            });
        }

        let version = super::save(self.repository.as_ref(), &proposal, stored.version).await?;

        info!(
            proposal_id = %proposal.id(),
            checklist = %cmd.checklist,
            name = %cmd.name,
            settled,
            "Checklist entry completed"
        );

        Ok(CompleteChecklistResult {
            proposal,
            completion,
            settled,
            version,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::Fixture;
    use super::super::{AdvanceProposalCommand, AdvanceProposalHandler};
    use super::*;
    use crate::domain::proposal::ProposalSituation;

    fn handler(fx: &Fixture) -> CompleteChecklistHandler {
        CompleteChecklistHandler::new(fx.proposals.clone(), Arc::new(fx.clock.clone()))
    }

    fn command(id: ProposalId, checklist: ChecklistKind, name: &str) -> CompleteChecklistCommand {
        CompleteChecklistCommand {
            proposal_id: id,
            checklist,
            name: name.to_string(),
            expected_version: None,
        }
    }

    async fn move_to_execution(fx: &Fixture, id: ProposalId) {
        let advance = AdvanceProposalHandler::new(fx.proposals.clone(), Arc::new(fx.clock.clone()));
        for target in [
            ProposalSituation::Viewed,
            ProposalSituation::Accepted,
            ProposalSituation::Execution,
        ] {
            advance
                .handle(AdvanceProposalCommand {
                    proposal_id: id,
                    target,
                    expected_version: None,
                })
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn completing_communication_is_saved() {
        let fx = Fixture::new();
        let (id, v1) = fx.proposal().await;

        let result = handler(&fx)
            .handle(command(id, ChecklistKind::Communication, "sms"))
            .await
            .unwrap();

        assert_eq!(result.completion, Completion::Completed);
        assert_eq!(result.version, v1.next());
        assert!(result.proposal.communication().get("sms").unwrap().completed);
    }

    #[tokio::test]
    async fn already_completed_entry_is_not_rewritten() {
        let fx = Fixture::new();
        let (id, _) = fx.proposal().await;
        let h = handler(&fx);
        let first = h
            .handle(command(id, ChecklistKind::Communication, "email"))
            .await
            .unwrap();

        let second = h
            .handle(command(id, ChecklistKind::Communication, "email"))
            .await
            .unwrap();

        assert_eq!(second.completion, Completion::AlreadyCompleted);
        assert_eq!(second.version, first.version);
    }

    #[tokio::test]
    async fn unknown_entry_is_reported() {
        let fx = Fixture::new();
        let (id, _) = fx.proposal().await;

        let err = handler(&fx)
            .handle(command(id, ChecklistKind::Payments, "cheque"))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ProposalError::unknown_channel(ChecklistKind::Payments, "cheque")
        );
    }

    #[tokio::test]
    async fn last_payment_in_execution_settles_proposal() {
        let fx = Fixture::new();
        let (id, _) = fx.proposal().await;
        move_to_execution(&fx, id).await;
        let h = handler(&fx);

        let first = h
            .handle(command(id, ChecklistKind::Payments, "boleto"))
            .await
            .unwrap();
        assert!(!first.settled);

        let last = h
            .handle(command(id, ChecklistKind::Payments, "pix"))
            .await
            .unwrap();
        assert!(last.settled);
        assert_eq!(last.proposal.situation(), ProposalSituation::Completed);

        let err = h
            .handle(command(id, ChecklistKind::Communication, "email"))
            .await
            .unwrap_err();
        assert_eq!(err, ProposalError::closed(ProposalSituation::Completed));
    }
}
