//! GetDebtorHandler - Query handler for a single debtor.

use std::sync::Arc;

use tracing::debug;

use crate::domain::debtor::Debtor;
use crate::domain::foundation::DebtorId;
use crate::domain::proposal::ProposalError;
use crate::ports::DebtorRepository;

/// Query for a debtor by id.
#[derive(Debug, Clone)]
pub struct GetDebtorQuery {
    pub debtor_id: DebtorId,
}

/// Handler for fetching debtors.
pub struct GetDebtorHandler {
    repository: Arc<dyn DebtorRepository>,
}

impl GetDebtorHandler {
    pub fn new(repository: Arc<dyn DebtorRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetDebtorQuery) -> Result<Debtor, ProposalError> {
        debug!(debtor_id = %query.debtor_id, "Loading debtor");
        self.repository
            .find_by_id(&query.debtor_id)
            .await?
            .ok_or(ProposalError::DebtorNotFound(query.debtor_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryDebtorRepository;

    #[tokio::test]
    async fn unknown_debtor_is_not_found() {
        let handler = GetDebtorHandler::new(Arc::new(InMemoryDebtorRepository::new()));
        let id = DebtorId::new();

        let err = handler
            .handle(GetDebtorQuery { debtor_id: id })
            .await
            .unwrap_err();

        assert_eq!(err, ProposalError::DebtorNotFound(id));
    }
}
