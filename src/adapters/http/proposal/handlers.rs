//! HTTP handlers for proposal endpoints.
//!
//! These handlers connect Axum routes to application layer command/query handlers.

use axum::extract::{Path, Query, State};
use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::{
    AdvanceProposalCommand, CompleteChecklistCommand, CreateProposalCommand,
    ExpireProposalCommand, GetProposalQuery, UpdateChargesCommand,
};
use crate::domain::foundation::ProposalId;
use crate::domain::proposal::ChecklistKind;

use super::super::{ApiError, ApiJson, AppState};
use super::dto::{
    AdvanceProposalRequest, CompletionResponse, CreateProposalRequest, ExpireResponse,
    ProposalResponse, TransitionResponse, UpdateChargesRequest, ValuedProposalResponse,
    VersionParams,
};

// ════════════════════════════════════════════════════════════════════════════════
// Query Handlers (GET endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/proposals/:id - Proposal snapshot with version
pub async fn get_proposal(
    State(state): State<AppState>,
    Path(proposal_id): Path<ProposalId>,
) -> Result<impl IntoResponse, ApiError> {
    let stored = state
        .get_proposal_handler()
        .handle(GetProposalQuery { proposal_id })
        .await?;

    Ok(Json(ProposalResponse {
        proposal: stored.proposal,
        version: stored.version,
    }))
}

// ════════════════════════════════════════════════════════════════════════════════
// Command Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/proposals - Create a proposal
pub async fn create_proposal(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateProposalRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = CreateProposalCommand::try_from(request)?;
    let result = state.create_proposal_handler().handle(cmd).await?;

    let response = ValuedProposalResponse {
        proposal: result.proposal,
        valuation: result.valuation,
        version: result.version,
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/proposals/:id/status - Move to a new status
pub async fn advance_proposal(
    State(state): State<AppState>,
    Path(proposal_id): Path<ProposalId>,
    ApiJson(request): ApiJson<AdvanceProposalRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = AdvanceProposalCommand {
        proposal_id,
        target: request.target()?,
        expected_version: request.expected_version,
    };
    let result = state.advance_proposal_handler().handle(cmd).await?;

    Ok(Json(TransitionResponse {
        proposal: result.proposal,
        previous: result.previous,
        version: result.version,
    }))
}

/// POST /api/proposals/:id/expire - Apply the expiry policy
pub async fn expire_proposal(
    State(state): State<AppState>,
    Path(proposal_id): Path<ProposalId>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .expire_proposal_handler()
        .handle(ExpireProposalCommand { proposal_id })
        .await?;

    Ok(Json(ExpireResponse {
        proposal: result.proposal,
        expired: result.expired,
        version: result.version,
    }))
}

/// PUT /api/proposals/:id/charges - Change debt charges and revalue
pub async fn update_charges(
    State(state): State<AppState>,
    Path(proposal_id): Path<ProposalId>,
    ApiJson(request): ApiJson<UpdateChargesRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = UpdateChargesCommand {
        proposal_id,
        update: request.update,
        expected_version: request.expected_version,
    };
    let result = state.update_charges_handler().handle(cmd).await?;

    Ok(Json(ValuedProposalResponse {
        proposal: result.proposal,
        valuation: result.valuation,
        version: result.version,
    }))
}

/// POST /api/proposals/:id/payments/:name/complete
pub async fn complete_payment(
    state: State<AppState>,
    Path((proposal_id, name)): Path<(ProposalId, String)>,
    params: Query<VersionParams>,
) -> Result<impl IntoResponse, ApiError> {
    complete(state, proposal_id, ChecklistKind::Payments, name, params).await
}

/// POST /api/proposals/:id/communication/:name/complete
pub async fn complete_communication(
    state: State<AppState>,
    Path((proposal_id, name)): Path<(ProposalId, String)>,
    params: Query<VersionParams>,
) -> Result<impl IntoResponse, ApiError> {
    complete(state, proposal_id, ChecklistKind::Communication, name, params).await
}

async fn complete(
    State(state): State<AppState>,
    proposal_id: ProposalId,
    checklist: ChecklistKind,
    name: String,
    Query(params): Query<VersionParams>,
) -> Result<Json<CompletionResponse>, ApiError> {
    let cmd = CompleteChecklistCommand {
        proposal_id,
        checklist,
        name,
        expected_version: params.expected_version,
    };
    let result = state.complete_checklist_handler().handle(cmd).await?;

    Ok(Json(CompletionResponse {
        proposal: result.proposal,
        completion: result.completion,
        settled: result.settled,
        version: result.version,
    }))
}
