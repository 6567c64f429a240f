//! Proposal-specific error types.
//!
//! Every engine and application operation reports failure through
//! [`ProposalError`]. No variant leaves a proposal partially mutated.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | Validation, NoDebtor | 400 |
//! | DebtorNotFound, NotFound, UnknownChannel | 404 |
//! | InvalidTransition, ProposalClosed, Conflict | 409 |
//! | Overflow | 422 |
//! | Infrastructure | 500 |

use crate::domain::debt::{DebtError, ValuationError};
use crate::domain::foundation::{DebtorId, DomainError, ErrorCode, ProposalId, ValidationError};

use super::{ChecklistKind, ProposalSituation};

/// Proposal-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProposalError {
    /// Malformed input, rejected before any state change.
    Validation { field: String, message: String },

    /// A debt was submitted without debtors.
    NoDebtor,

    /// A referenced debtor does not exist in the debtor store.
    DebtorNotFound(DebtorId),

    /// The target status is not reachable from the current one.
    InvalidTransition {
        from: ProposalSituation,
        to: ProposalSituation,
    },

    /// The proposal is in a terminal status and accepts no mutation.
    ProposalClosed { status: ProposalSituation },

    /// No checklist entry with the given name.
    UnknownChannel { checklist: ChecklistKind, name: String },

    /// The proposal does not exist in the proposal store.
    NotFound(ProposalId),

    /// The stored version moved on since the proposal was loaded.
    Conflict(String),

    /// The charges push the valuation out of range.
    Overflow { charge: String },

    /// Infrastructure error.
    Infrastructure(String),
}

impl ProposalError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ProposalError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn invalid_transition(from: ProposalSituation, to: ProposalSituation) -> Self {
        ProposalError::InvalidTransition { from, to }
    }

    pub fn closed(status: ProposalSituation) -> Self {
        ProposalError::ProposalClosed { status }
    }

    pub fn unknown_channel(checklist: ChecklistKind, name: impl Into<String>) -> Self {
        ProposalError::UnknownChannel {
            checklist,
            name: name.into(),
        }
    }

    pub fn not_found(id: ProposalId) -> Self {
        ProposalError::NotFound(id)
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        ProposalError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            ProposalError::Validation { .. } => ErrorCode::ValidationFailed,
            ProposalError::NoDebtor => ErrorCode::NoDebtor,
            ProposalError::DebtorNotFound(_) => ErrorCode::DebtorNotFound,
            ProposalError::InvalidTransition { .. } => ErrorCode::InvalidStateTransition,
            ProposalError::ProposalClosed { .. } => ErrorCode::ProposalClosed,
            ProposalError::UnknownChannel { .. } => ErrorCode::UnknownChannel,
            ProposalError::NotFound(_) => ErrorCode::ProposalNotFound,
            ProposalError::Conflict(_) => ErrorCode::Conflict,
            ProposalError::Overflow { .. } => ErrorCode::ValuationOverflow,
            ProposalError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-facing error message.
    pub fn message(&self) -> String {
        match self {
            ProposalError::Validation { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            ProposalError::NoDebtor => "A debt must reference at least one debtor".to_string(),
            ProposalError::DebtorNotFound(id) => format!("Debtor not found: {}", id),
            ProposalError::InvalidTransition { from, to } => {
                format!("Cannot transition proposal from {} to {}", from, to)
            }
            ProposalError::ProposalClosed { status } => {
                format!("Proposal is closed ({}) and cannot be modified", status)
            }
            ProposalError::UnknownChannel { checklist, name } => {
                format!("No {} entry named '{}'", checklist, name)
            }
            ProposalError::NotFound(id) => format!("Proposal not found: {}", id),
            ProposalError::Conflict(msg) => format!("Concurrent modification: {}", msg),
            ProposalError::Overflow { charge } => {
                format!("Charge '{}' overflows the valuation range", charge)
            }
            ProposalError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }

    /// Returns true if retrying (after reloading) may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ProposalError::Conflict(_) | ProposalError::Infrastructure(_)
        )
    }
}

impl std::fmt::Display for ProposalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ProposalError {}

impl From<ValidationError> for ProposalError {
    fn from(err: ValidationError) -> Self {
        ProposalError::Validation {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<ValuationError> for ProposalError {
    fn from(err: ValuationError) -> Self {
        match err {
            ValuationError::Overflow { charge } => ProposalError::Overflow { charge },
        }
    }
}

impl From<DebtError> for ProposalError {
    fn from(err: DebtError) -> Self {
        match err {
            DebtError::NoDebtor => ProposalError::NoDebtor,
            DebtError::Invalid(e) => e.into(),
            DebtError::Valuation(e) => e.into(),
        }
    }
}

impl From<DomainError> for ProposalError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Conflict => ProposalError::Conflict(err.message),
            ErrorCode::ProposalNotFound => {
                match err.details.get("id").map(|id| id.parse::<ProposalId>()) {
                    Some(Ok(id)) => ProposalError::NotFound(id),
                    _ => ProposalError::Infrastructure(err.to_string()),
                }
            }
            ErrorCode::ValidationFailed => ProposalError::Validation {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => ProposalError::Infrastructure(err.to_string()),
        }
    }
}

impl From<ProposalError> for DomainError {
    fn from(err: ProposalError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}
