//! Shared fixtures for proposal handler tests.

use std::sync::Arc;

use chrono::{TimeZone, Utc};

use crate::adapters::clock::FixedClock;
use crate::adapters::memory::{InMemoryDebtorRepository, InMemoryProposalRepository};
use crate::domain::debt::Charge;
use crate::domain::debtor::{Debtor, DebtorKind, NewDebtor};
use crate::domain::foundation::{DebtorId, ProposalId, Timestamp};
use crate::ports::{DebtorRepository, Version};

use super::{ChecklistDefaults, CreateProposalCommand, CreateProposalHandler, DebtDetails};

pub fn start() -> Timestamp {
    Timestamp::from_datetime(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap())
}

pub struct Fixture {
    pub debtors: Arc<InMemoryDebtorRepository>,
    pub proposals: Arc<InMemoryProposalRepository>,
    pub clock: FixedClock,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            debtors: Arc::new(InMemoryDebtorRepository::new()),
            proposals: Arc::new(InMemoryProposalRepository::new()),
            clock: FixedClock::at(start()),
        }
    }

    pub fn defaults() -> ChecklistDefaults {
        ChecklistDefaults {
            payment_channels: vec!["boleto".to_string(), "pix".to_string()],
            communication_channels: vec!["email".to_string(), "sms".to_string()],
        }
    }

    pub fn create_handler(&self) -> CreateProposalHandler {
        CreateProposalHandler::new(
            self.debtors.clone(),
            self.proposals.clone(),
            Arc::new(self.clock.clone()),
            Self::defaults(),
        )
    }

    pub async fn debtor(&self) -> DebtorId {
        let debtor = Debtor::register(
            DebtorId::new(),
            NewDebtor {
                fiscal_document: "12345678".to_string(),
                name: "Devedor".to_string(),
                email: "email@email.com".to_string(),
                type_of_debtor: DebtorKind::Individual,
                address: Default::default(),
            },
        )
        .unwrap();
        self.debtors.insert(&debtor).await.unwrap();
        debtor.id
    }

    pub async fn command(&self) -> CreateProposalCommand {
        CreateProposalCommand {
            debtor_ids: vec![self.debtor().await],
            debt: DebtDetails {
                origin: "origem".to_string(),
                document_id: "doc-1".to_string(),
                original_value: 300,
                expiration_date: start().add_days(-30),
                fee: Charge::fixed("taxa", 123),
                interest: Charge::fixed("juros", 123),
                other_charges: vec![],
                collateral: vec![],
                correction: Charge::none("correcao"),
                correction_applies: true,
            },
            proposed_value: 500,
            expiration_date: start().add_days(10),
            payment_deadline: 5,
            payment_channels: None,
            communication_channels: None,
        }
    }

    /// Creates a proposal and returns its id and version.
    pub async fn proposal(&self) -> (ProposalId, Version) {
        let result = self
            .create_handler()
            .handle(self.command().await)
            .await
            .unwrap();
        (result.proposal.id(), result.version)
    }
}
