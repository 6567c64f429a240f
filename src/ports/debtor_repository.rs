//! Debtor repository port.
//!
//! Debtors are registered once and looked up by id when a proposal is
//! created. The store owns them; proposals embed a snapshot.

use crate::domain::debtor::Debtor;
use crate::domain::foundation::{DebtorId, DomainError};
use async_trait::async_trait;

/// Repository port for Debtor persistence.
#[async_trait]
pub trait DebtorRepository: Send + Sync {
    /// Save a newly registered debtor.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if a debtor with the same id already exists
    /// - `DatabaseError` on persistence failure
    async fn insert(&self, debtor: &Debtor) -> Result<(), DomainError>;

    /// Find a debtor by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &DebtorId) -> Result<Option<Debtor>, DomainError>;
}
