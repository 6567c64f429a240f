//! PostgreSQL implementation of DebtorRepository.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::debtor::{Address, Debtor, DebtorKind};
use crate::domain::foundation::{DebtorId, DomainError, ErrorCode};
use crate::ports::DebtorRepository;

/// PostgreSQL implementation of the DebtorRepository port.
#[derive(Debug, Clone)]
pub struct PostgresDebtorRepository {
    pool: PgPool,
}

impl PostgresDebtorRepository {
    /// Creates a new PostgresDebtorRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a debtor.
#[derive(Debug, sqlx::FromRow)]
struct DebtorRow {
    id: Uuid,
    fiscal_document: String,
    name: String,
    email: String,
    type_of_debtor: String,
    postal_code: String,
    city: String,
    uf: String,
    street: String,
    number: String,
    complement: String,
}

impl TryFrom<DebtorRow> for Debtor {
    type Error = DomainError;

    fn try_from(row: DebtorRow) -> Result<Self, Self::Error> {
        let type_of_debtor = DebtorKind::parse(&row.type_of_debtor).map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid type_of_debtor value: {}", e),
            )
        })?;

        Ok(Debtor {
            id: DebtorId::from_uuid(row.id),
            fiscal_document: row.fiscal_document,
            name: row.name,
            email: row.email,
            type_of_debtor,
            address: Address {
                postal_code: row.postal_code,
                city: row.city,
                uf: row.uf,
                street: row.street,
                number: row.number,
                complement: row.complement,
            },
        })
    }
}

#[async_trait]
impl DebtorRepository for PostgresDebtorRepository {
    async fn insert(&self, debtor: &Debtor) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO debtors (
                id, fiscal_document, name, email, type_of_debtor,
                postal_code, city, uf, street, number, complement
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(debtor.id.as_uuid())
        .bind(&debtor.fiscal_document)
        .bind(&debtor.name)
        .bind(&debtor.email)
        .bind(debtor.type_of_debtor.as_str())
        .bind(&debtor.address.postal_code)
        .bind(&debtor.address.city)
        .bind(&debtor.address.uf)
        .bind(&debtor.address.street)
        .bind(&debtor.address.number)
        .bind(&debtor.address.complement)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some("debtors_pkey") {
                    return DomainError::validation(
                        "id",
                        format!("Debtor {} already exists", debtor.id),
                    );
                }
            }
            DomainError::database("Failed to save debtor", e)
        })?;

        Ok(())
    }

    async fn find_by_id(&self, id: &DebtorId) -> Result<Option<Debtor>, DomainError> {
        let row: Option<DebtorRow> = sqlx::query_as(
            r#"
            SELECT id, fiscal_document, name, email, type_of_debtor,
                   postal_code, city, uf, street, number, complement
            FROM debtors
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch debtor", e))?;

        row.map(Debtor::try_from).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(kind: &str) -> DebtorRow {
        DebtorRow {
            id: Uuid::new_v4(),
            fiscal_document: "12345678".to_string(),
            name: "Devedor".to_string(),
            email: "email@email.com".to_string(),
            type_of_debtor: kind.to_string(),
            postal_code: "38400200".to_string(),
            city: "cidade".to_string(),
            uf: "estado".to_string(),
            street: "rua".to_string(),
            number: "0".to_string(),
            complement: String::new(),
        }
    }

    #[test]
    fn row_converts_to_debtor() {
        let debtor = Debtor::try_from(row("company")).unwrap();
        assert_eq!(debtor.type_of_debtor, DebtorKind::Company);
        assert_eq!(debtor.address.postal_code, "38400200");
    }

    #[test]
    fn unknown_kind_in_row_is_a_database_error() {
        let err = Debtor::try_from(row("trust")).unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }
}
