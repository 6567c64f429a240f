//! Debtor module - Parties a debt can be collected from.
//!
//! Debtors are owned by the debtor store; proposals only embed a snapshot of
//! the debtors that existed when the proposal was created.

mod debtor;

pub use debtor::{Address, Debtor, DebtorKind, NewDebtor};
