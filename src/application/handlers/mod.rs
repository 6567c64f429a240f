//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod debtor;
pub mod proposal;

pub use debtor::{
    GetDebtorHandler, GetDebtorQuery, RegisterDebtorCommand, RegisterDebtorHandler,
    RegisterDebtorResult,
};
pub use proposal::{
    AdvanceProposalCommand, AdvanceProposalHandler, AdvanceProposalResult, ChecklistDefaults,
    CompleteChecklistCommand, CompleteChecklistHandler, CompleteChecklistResult,
    CreateProposalCommand, CreateProposalHandler, CreateProposalResult, DebtDetails,
    ExpireProposalCommand, ExpireProposalHandler, ExpireProposalResult, GetProposalHandler,
    GetProposalQuery, UpdateChargesCommand, UpdateChargesHandler, UpdateChargesResult,
};
