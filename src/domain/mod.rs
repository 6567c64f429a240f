//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `debtor` - Parties a debt is owed by
//! - `debt` - Charges and the valuation engine
//! - `proposal` - Proposal aggregate, lifecycle and checklists

pub mod debt;
pub mod debtor;
pub mod foundation;
pub mod proposal;
