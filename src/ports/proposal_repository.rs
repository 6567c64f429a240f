//! Proposal repository port with optimistic versioning.
//!
//! Every stored proposal carries a [`Version`]. A write names the version it
//! started from and is rejected with `ErrorCode::Conflict` if another writer
//! got there first.
//!
//! # Example
//!
//! ```ignore
//! let stored = repo.find_by_id(&id).await?.ok_or(ProposalError::NotFound(id))?;
//! let mut proposal = stored.proposal;
//! proposal.advance(ProposalSituation::Viewed, clock.now())?;
//! let version = repo.save(&proposal, stored.version).await?;
//! ```

use crate::domain::foundation::{DomainError, ProposalId};
use crate::domain::proposal::Proposal;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Monotonic revision number of a stored proposal. Starts at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Version(u64);

impl Version {
    /// Version assigned on insert.
    pub const INITIAL: Version = Version(1);

    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    /// The version that follows this one.
    pub fn next(&self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A proposal together with the version it was loaded at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredProposal {
    pub proposal: Proposal,
    pub version: Version,
}

/// Repository port for Proposal aggregate persistence.
#[async_trait]
pub trait ProposalRepository: Send + Sync {
    /// Save a new proposal at [`Version::INITIAL`].
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the id is already taken
    /// - `DatabaseError` on persistence failure
    async fn insert(&self, proposal: &Proposal) -> Result<Version, DomainError>;

    /// Find a proposal by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &ProposalId) -> Result<Option<StoredProposal>, DomainError>;

    /// Replace a stored proposal if it is still at `expected`.
    ///
    /// Returns the new version.
    ///
    /// # Errors
    ///
    /// - `ProposalNotFound` if the proposal doesn't exist
    /// - `Conflict` if the stored version differs from `expected`
    /// - `DatabaseError` on persistence failure
    async fn save(&self, proposal: &Proposal, expected: Version) -> Result<Version, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn proposal_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn ProposalRepository) {}
    }

    #[test]
    fn version_increments_from_initial() {
        assert_eq!(Version::INITIAL.value(), 1);
        assert_eq!(Version::INITIAL.next(), Version::new(2));
    }
}
