//! PostgreSQL implementation of ProposalRepository.
//!
//! Proposals are stored as a JSONB snapshot. Writes use a version column
//! for optimistic locking: an update only lands if the row is still at the
//! version the caller loaded.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::warn;

use crate::domain::foundation::{DomainError, ErrorCode, ProposalId};
use crate::domain::proposal::Proposal;
use crate::ports::{ProposalRepository, StoredProposal, Version};

/// PostgreSQL implementation of the ProposalRepository port.
#[derive(Debug, Clone)]
pub struct PostgresProposalRepository {
    pool: PgPool,
}

impl PostgresProposalRepository {
    /// Creates a new PostgresProposalRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a proposal.
#[derive(Debug, sqlx::FromRow)]
struct ProposalRow {
    snapshot: serde_json::Value,
    version: i64,
}

impl TryFrom<ProposalRow> for StoredProposal {
    type Error = DomainError;

    fn try_from(row: ProposalRow) -> Result<Self, Self::Error> {
        let proposal: Proposal = serde_json::from_value(row.snapshot)
            .map_err(|e| DomainError::database("Invalid proposal snapshot", e))?;
        Ok(StoredProposal {
            proposal,
            version: version_from_column(row.version)?,
        })
    }
}

fn version_from_column(value: i64) -> Result<Version, DomainError> {
    u64::try_from(value)
        .map(Version::new)
        .map_err(|_| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid version: {}", value))
        })
}

fn version_to_column(version: Version) -> Result<i64, DomainError> {
    i64::try_from(version.value()).map_err(|_| {
        DomainError::validation("version", format!("Version out of range: {}", version))
    })
}

fn snapshot(proposal: &Proposal) -> Result<serde_json::Value, DomainError> {
    serde_json::to_value(proposal)
        .map_err(|e| DomainError::database("Failed to encode proposal", e))
}

fn updated_at(proposal: &Proposal) -> DateTime<Utc> {
    *proposal.status().updated_at.as_datetime()
}

#[async_trait]
impl ProposalRepository for PostgresProposalRepository {
    async fn insert(&self, proposal: &Proposal) -> Result<Version, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO proposals (
                id, situation, expiration_date, snapshot, version, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(proposal.id().as_uuid())
        .bind(proposal.situation().as_str())
        .bind(proposal.expiration_date().as_datetime())
        .bind(snapshot(proposal)?)
        .bind(version_to_column(Version::INITIAL)?)
        .bind(proposal.created_at().as_datetime())
        .bind(updated_at(proposal))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some("proposals_pkey") {
                    return DomainError::validation(
                        "id",
                        format!("Proposal {} already exists", proposal.id()),
                    );
                }
            }
            DomainError::database("Failed to save proposal", e)
        })?;

        Ok(Version::INITIAL)
    }

    async fn find_by_id(&self, id: &ProposalId) -> Result<Option<StoredProposal>, DomainError> {
        let row: Option<ProposalRow> =
            sqlx::query_as("SELECT snapshot, version FROM proposals WHERE id = $1")
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| DomainError::database("Failed to fetch proposal", e))?;

        row.map(StoredProposal::try_from).transpose()
    }

    async fn save(&self, proposal: &Proposal, expected: Version) -> Result<Version, DomainError> {
        let updated: Option<(i64,)> = sqlx::query_as(
            r#"
            UPDATE proposals SET
                situation = $3,
                expiration_date = $4,
                snapshot = $5,
                updated_at = $6,
                version = version + 1
            WHERE id = $1 AND version = $2
            RETURNING version
            "#,
        )
        .bind(proposal.id().as_uuid())
        .bind(version_to_column(expected)?)
        .bind(proposal.situation().as_str())
        .bind(proposal.expiration_date().as_datetime())
        .bind(snapshot(proposal)?)
        .bind(updated_at(proposal))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to update proposal", e))?;

        if let Some((version,)) = updated {
            return version_from_column(version);
        }

        // Nothing matched: either the row is gone or another writer moved it on.
        let current: Option<(i64,)> = sqlx::query_as("SELECT version FROM proposals WHERE id = $1")
            .bind(proposal.id().as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to fetch proposal version", e))?;

        match current {
            Some((actual,)) => {
                warn!(
                    proposal_id = %proposal.id(),
                    expected = %expected,
                    actual,
                    "Optimistic lock conflict"
                );
                Err(DomainError::new(
                    ErrorCode::Conflict,
                    format!(
                        "proposal {} is at version {}, expected {}",
                        proposal.id(),
                        actual,
                        expected
                    ),
                )
                .with_detail("expected", expected.to_string())
                .with_detail("actual", actual.to_string()))
            }
            None => Err(DomainError::new(
                ErrorCode::ProposalNotFound,
                format!("Proposal not found: {}", proposal.id()),
            )
            .with_detail("id", proposal.id().to_string())),
        }
    }
}
