//! GetProposalHandler - Query handler for a proposal snapshot.

use std::sync::Arc;

use crate::domain::foundation::ProposalId;
use crate::domain::proposal::ProposalError;
use crate::ports::{ProposalRepository, StoredProposal};

/// Query for a proposal by id.
#[derive(Debug, Clone)]
pub struct GetProposalQuery {
    pub proposal_id: ProposalId,
}

/// Handler for fetching proposals with their current version.
pub struct GetProposalHandler {
    repository: Arc<dyn ProposalRepository>,
}

impl GetProposalHandler {
    pub fn new(repository: Arc<dyn ProposalRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetProposalQuery) -> Result<StoredProposal, ProposalError> {
        super::load(self.repository.as_ref(), query.proposal_id, None).await
    }
}
