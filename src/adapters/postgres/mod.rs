//! PostgreSQL adapters.
//!
//! Schema lives in `migrations/` and is applied with [`run_migrations`].

mod debtor_repository;
mod proposal_repository;

pub use debtor_repository::PostgresDebtorRepository;
pub use proposal_repository::PostgresProposalRepository;

use sqlx::PgPool;

use crate::domain::foundation::DomainError;

/// Applies pending schema migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), DomainError> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| DomainError::database("Failed to run migrations", e))
}
