//! In-memory DebtorRepository for tests and database-less runs.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::debtor::Debtor;
use crate::domain::foundation::{DebtorId, DomainError};
use crate::ports::DebtorRepository;

/// In-memory debtor store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDebtorRepository {
    debtors: Arc<RwLock<HashMap<DebtorId, Debtor>>>,
}

impl InMemoryDebtorRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of stored debtors
    pub async fn count(&self) -> usize {
        self.debtors.read().await.len()
    }
}

#[async_trait]
impl DebtorRepository for InMemoryDebtorRepository {
    async fn insert(&self, debtor: &Debtor) -> Result<(), DomainError> {
        let mut debtors = self.debtors.write().await;
        if debtors.contains_key(&debtor.id) {
            return Err(DomainError::validation(
                "id",
                format!("Debtor {} already exists", debtor.id),
            ));
        }
        debtors.insert(debtor.id, debtor.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &DebtorId) -> Result<Option<Debtor>, DomainError> {
        Ok(self.debtors.read().await.get(id).cloned())
    }
}
