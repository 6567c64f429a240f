//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `Clock` - Source of the current time
//! - `DebtorRepository` - Debtor store
//! - `ProposalRepository` - Proposal store with optimistic versioning

mod clock;
mod debtor_repository;
mod proposal_repository;

pub use clock::Clock;
pub use debtor_repository::DebtorRepository;
pub use proposal_repository::{ProposalRepository, StoredProposal, Version};
