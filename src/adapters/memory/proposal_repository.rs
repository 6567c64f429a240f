//! In-memory ProposalRepository with the same versioning contract as the
//! PostgreSQL adapter.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, ProposalId};
use crate::domain::proposal::Proposal;
use crate::ports::{ProposalRepository, StoredProposal, Version};

/// In-memory proposal store.
///
/// The version check and the write happen under one write lock, so two
/// writers starting from the same version cannot both succeed.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProposalRepository {
    proposals: Arc<RwLock<HashMap<ProposalId, StoredProposal>>>,
}

impl InMemoryProposalRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of stored proposals
    pub async fn count(&self) -> usize {
        self.proposals.read().await.len()
    }
}

#[async_trait]
impl ProposalRepository for InMemoryProposalRepository {
    async fn insert(&self, proposal: &Proposal) -> Result<Version, DomainError> {
        let mut proposals = self.proposals.write().await;
        if proposals.contains_key(&proposal.id()) {
            return Err(DomainError::validation(
                "id",
                format!("Proposal {} already exists", proposal.id()),
            ));
        }
        proposals.insert(
            proposal.id(),
            StoredProposal {
                proposal: proposal.clone(),
                version: Version::INITIAL,
            },
        );
        Ok(Version::INITIAL)
    }

    async fn find_by_id(&self, id: &ProposalId) -> Result<Option<StoredProposal>, DomainError> {
        Ok(self.proposals.read().await.get(id).cloned())
    }

    async fn save(&self, proposal: &Proposal, expected: Version) -> Result<Version, DomainError> {
        let mut proposals = self.proposals.write().await;
        let stored = proposals.get_mut(&proposal.id()).ok_or_else(|| {
            DomainError::new(
                ErrorCode::ProposalNotFound,
                format!("Proposal not found: {}", proposal.id()),
            )
            .with_detail("id", proposal.id().to_string())
        })?;

        if stored.version != expected {
            return Err(DomainError::new(
                ErrorCode::Conflict,
                format!(
                    "proposal {} is at version {}, expected {}",
                    proposal.id(),
                    stored.version,
                    expected
                ),
            )
            .with_detail("expected", expected.to_string())
            .with_detail("actual", stored.version.to_string()));
        }

        stored.proposal = proposal.clone();
        stored.version = expected.next();
        Ok(stored.version)
    }
}
