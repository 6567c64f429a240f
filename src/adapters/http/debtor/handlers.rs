//! HTTP handlers for debtor endpoints.

use axum::extract::{Path, State};
use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::{GetDebtorQuery, RegisterDebtorCommand};
use crate::domain::debtor::NewDebtor;
use crate::domain::foundation::DebtorId;

use super::super::{ApiError, ApiJson, AppState};

/// POST /api/debtors - Register a debtor
pub async fn register_debtor(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<NewDebtor>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .register_debtor_handler()
        .handle(RegisterDebtorCommand { debtor: request })
        .await?;

    Ok((StatusCode::CREATED, Json(result.debtor)))
}

/// GET /api/debtors/:id - Fetch a debtor
pub async fn get_debtor(
    State(state): State<AppState>,
    Path(debtor_id): Path<DebtorId>,
) -> Result<impl IntoResponse, ApiError> {
    let debtor = state
        .get_debtor_handler()
        .handle(GetDebtorQuery { debtor_id })
        .await?;

    Ok(Json(debtor))
}
