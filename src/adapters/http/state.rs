//! Shared state for the HTTP adapter.

use std::sync::Arc;

use crate::application::handlers::{
    AdvanceProposalHandler, ChecklistDefaults, CompleteChecklistHandler, CreateProposalHandler,
    ExpireProposalHandler, GetDebtorHandler, GetProposalHandler, RegisterDebtorHandler,
    UpdateChargesHandler,
};
use crate::ports::{Clock, DebtorRepository, ProposalRepository};

/// Shared application state containing all dependencies.
///
/// This struct is cloned for each request and contains Arc-wrapped dependencies
/// for efficient sharing across handlers.
#[derive(Clone)]
pub struct AppState {
    pub debtor_repository: Arc<dyn DebtorRepository>,
    pub proposal_repository: Arc<dyn ProposalRepository>,
    pub clock: Arc<dyn Clock>,
    pub checklist_defaults: ChecklistDefaults,
}

impl AppState {
    /// Create handlers on demand from the shared state.
    pub fn register_debtor_handler(&self) -> RegisterDebtorHandler {
        RegisterDebtorHandler::new(self.debtor_repository.clone())
    }

    pub fn get_debtor_handler(&self) -> GetDebtorHandler {
        GetDebtorHandler::new(self.debtor_repository.clone())
    }

    pub fn create_proposal_handler(&self) -> CreateProposalHandler {
        CreateProposalHandler::new(
            self.debtor_repository.clone(),
            self.proposal_repository.clone(),
            self.clock.clone(),
            self.checklist_defaults.clone(),
        )
    }

    pub fn get_proposal_handler(&self) -> GetProposalHandler {
        GetProposalHandler::new(self.proposal_repository.clone())
    }

    pub fn advance_proposal_handler(&self) -> AdvanceProposalHandler {
        AdvanceProposalHandler::new(self.proposal_repository.clone(), self.clock.clone())
    }

    pub fn expire_proposal_handler(&self) -> ExpireProposalHandler {
        ExpireProposalHandler::new(self.proposal_repository.clone(), self.clock.clone())
    }

    pub fn update_charges_handler(&self) -> UpdateChargesHandler {
        UpdateChargesHandler::new(self.proposal_repository.clone())
    }

    pub fn complete_checklist_handler(&self) -> CompleteChecklistHandler {
        CompleteChecklistHandler::new(self.proposal_repository.clone(), self.clock.clone())
    }
}
