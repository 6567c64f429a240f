//! HTTP DTOs (Data Transfer Objects) for proposal endpoints.
//!
//! Timestamps arrive as RFC 3339 strings and situations as lowercase
//! strings; both are parsed here so malformed values surface as
//! validation errors rather than body rejections.

use serde::{Deserialize, Serialize};

use crate::application::handlers::{CreateProposalCommand, DebtDetails};
use crate::domain::debt::{Charge, ChargeUpdate, CollateralGuarantee, Valuation};
use crate::domain::foundation::{DebtorId, Timestamp, ValidationError};
use crate::domain::proposal::{Completion, Proposal, ProposalSituation};
use crate::ports::Version;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Debt terms inside a creation request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtRequest {
    pub origin: String,
    pub document_id: String,
    pub original_value: i64,
    /// Original due date (RFC 3339).
    pub expiration_date: String,
    pub fee: Charge,
    pub interest: Charge,
    #[serde(default)]
    pub other_charges: Vec<Charge>,
    #[serde(default)]
    pub collateral: Vec<CollateralGuarantee>,
    pub correction: Charge,
    #[serde(default = "default_true")]
    pub correction_applies: bool,
}

fn default_true() -> bool {
    true
}

/// Request to create a proposal.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProposalRequest {
    pub debtor_ids: Vec<DebtorId>,
    pub debt: DebtRequest,
    pub proposed_value: i64,
    /// Offer expiration (RFC 3339).
    pub expiration_date: String,
    /// Days to pay once accepted.
    pub payment_deadline: i64,
    #[serde(default)]
    pub payments: Option<Vec<String>>,
    #[serde(default)]
    pub communication: Option<Vec<String>>,
}

impl TryFrom<CreateProposalRequest> for CreateProposalCommand {
    type Error = ValidationError;

    fn try_from(request: CreateProposalRequest) -> Result<Self, Self::Error> {
        let debt = request.debt;
        Ok(CreateProposalCommand {
            debtor_ids: request.debtor_ids,
            debt: DebtDetails {
                origin: debt.origin,
                document_id: debt.document_id,
                original_value: debt.original_value,
                expiration_date: Timestamp::parse_rfc3339(
                    "debt.expirationDate",
                    &debt.expiration_date,
                )?,
                fee: debt.fee,
                interest: debt.interest,
                other_charges: debt.other_charges,
                collateral: debt.collateral,
                correction: debt.correction,
                correction_applies: debt.correction_applies,
            },
            proposed_value: request.proposed_value,
            expiration_date: Timestamp::parse_rfc3339("expirationDate", &request.expiration_date)?,
            payment_deadline: request.payment_deadline,
            payment_channels: request.payments,
            communication_channels: request.communication,
        })
    }
}

/// Request to move a proposal to a new status.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvanceProposalRequest {
    pub target: String,
    #[serde(default)]
    pub expected_version: Option<Version>,
}

impl AdvanceProposalRequest {
    pub fn target(&self) -> Result<ProposalSituation, ValidationError> {
        ProposalSituation::parse(self.target.trim())
    }
}

/// Request to change a proposal's debt charges.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateChargesRequest {
    pub update: ChargeUpdate,
    #[serde(default)]
    pub expected_version: Option<Version>,
}

/// Optional query string for checklist completion.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionParams {
    #[serde(default)]
    pub expected_version: Option<Version>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Proposal snapshot with its stored version.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalResponse {
    pub proposal: Proposal,
    pub version: Version,
}

/// Response for creation and charge updates.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuedProposalResponse {
    pub proposal: Proposal,
    pub valuation: Valuation,
    pub version: Version,
}

/// Response for a status transition.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionResponse {
    pub proposal: Proposal,
    pub previous: ProposalSituation,
    pub version: Version,
}

/// Response for the expiry endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpireResponse {
    pub proposal: Proposal,
    pub expired: bool,
    pub version: Version,
}

/// Response for checklist completion.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionResponse {
    pub proposal: Proposal,
    pub completion: Completion,
    pub settled: bool,
    pub version: Version,
}
