//! Proposal command and query handlers.
//!
//! Every mutating handler follows the same shape: load the proposal and its
//! version, run one aggregate operation, then save against the loaded
//! version. A stale `expected_version` from the caller, or a concurrent
//! writer, surfaces as `ProposalError::Conflict`.

mod advance_proposal;
mod complete_checklist;
mod create_proposal;
mod expire_proposal;
mod get_proposal;
mod update_charges;

#[cfg(test)]
mod test_support;

pub use advance_proposal::{AdvanceProposalCommand, AdvanceProposalHandler, AdvanceProposalResult};
pub use complete_checklist::{
    CompleteChecklistCommand, CompleteChecklistHandler, CompleteChecklistResult,
};
pub use create_proposal::{
    ChecklistDefaults, CreateProposalCommand, CreateProposalHandler, CreateProposalResult,
    DebtDetails,
};
pub use expire_proposal::{ExpireProposalCommand, ExpireProposalHandler, ExpireProposalResult};
pub use get_proposal::{GetProposalHandler, GetProposalQuery};
pub use update_charges::{UpdateChargesCommand, UpdateChargesHandler, UpdateChargesResult};

use tracing::{debug, warn};

use crate::domain::foundation::ProposalId;
use crate::domain::proposal::{Proposal, ProposalError};
use crate::ports::{ProposalRepository, StoredProposal, Version};

/// Loads a proposal, checking the caller's expected version if one was given.
async fn load(
    repository: &dyn ProposalRepository,
    id: ProposalId,
    expected: Option<Version>,
) -> Result<StoredProposal, ProposalError> {
    debug!(proposal_id = %id, "Loading proposal");
    let stored = repository
        .find_by_id(&id)
        .await?
        .ok_or(ProposalError::NotFound(id))?;

    if let Some(expected) = expected {
        if expected != stored.version {
            warn!(
                proposal_id = %id,
                expected = %expected,
                actual = %stored.version,
                "Stale proposal version"
            );
            return Err(ProposalError::Conflict(format!(
                "proposal {} is at version {}, expected {}",
                id, stored.version, expected
            )));
        }
    }
    Ok(stored)
}

/// Saves a proposal against the version it was loaded at.
async fn save(
    repository: &dyn ProposalRepository,
    proposal: &Proposal,
    loaded: Version,
) -> Result<Version, ProposalError> {
    repository
        .save(proposal, loaded)
        .await
        .map_err(|e| {
            let err = ProposalError::from(e);
            if let ProposalError::Conflict(ref reason) = err {
                warn!(proposal_id = %proposal.id(), %reason, "Concurrent proposal update");
            }
            err
        })
}
