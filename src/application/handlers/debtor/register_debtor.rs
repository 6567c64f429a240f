//! RegisterDebtorHandler - Command handler for adding debtors to the store.

use std::sync::Arc;

use tracing::info;

use crate::domain::debtor::{Debtor, NewDebtor};
use crate::domain::foundation::DebtorId;
use crate::domain::proposal::ProposalError;
use crate::ports::DebtorRepository;

/// Command to register a debtor.
#[derive(Debug, Clone)]
pub struct RegisterDebtorCommand {
    pub debtor: NewDebtor,
}

/// Result of successful debtor registration.
#[derive(Debug, Clone)]
pub struct RegisterDebtorResult {
    pub debtor: Debtor,
}

/// Handler for registering debtors.
pub struct RegisterDebtorHandler {
    repository: Arc<dyn DebtorRepository>,
}

impl RegisterDebtorHandler {
    pub fn new(repository: Arc<dyn DebtorRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: RegisterDebtorCommand,
    ) -> Result<RegisterDebtorResult, ProposalError> {
        let debtor = Debtor::register(DebtorId::new(), cmd.debtor)?;
        self.repository.insert(&debtor).await?;

        info!(debtor_id = %debtor.id, kind = %debtor.type_of_debtor, "Debtor registered");
        Ok(RegisterDebtorResult { debtor })
    }
}
