//! Debt Proposals - debt-collection proposal lifecycle and valuation.
//!
//! Debts are valued from a principal and an ordered list of charges. A
//! proposal offers a debt to its debtors, tracks its status through the
//! negotiation, and keeps payment and communication checklists.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
