//! Debtor command and query handlers.

mod get_debtor;
mod register_debtor;

pub use get_debtor::{GetDebtorHandler, GetDebtorQuery};
pub use register_debtor::{RegisterDebtorCommand, RegisterDebtorHandler, RegisterDebtorResult};
