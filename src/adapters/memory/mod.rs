//! In-memory repository adapters.
//!
//! Used by tests and when the service runs without a database.

mod debtor_repository;
mod proposal_repository;

pub use debtor_repository::InMemoryDebtorRepository;
pub use proposal_repository::InMemoryProposalRepository;
