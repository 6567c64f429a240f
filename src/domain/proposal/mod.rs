//! Proposal module - negotiated repayment offers and their lifecycle.
//!
//! A proposal wraps a [`Debt`](crate::domain::debt::Debt) with the terms
//! offered to its debtors, a status driven by [`ProposalSituation`], and two
//! channel checklists.

mod aggregate;
mod checklist;
mod errors;
mod status;

pub use aggregate::{PaymentCompletion, Proposal, ProposalTerms};
pub use checklist::{Checklist, ChecklistEntry, ChecklistKind, Completion, UnknownEntry};
pub use errors::ProposalError;
pub use status::{ProposalSituation, ProposalStatus};
