//! Error responses shared by every endpoint.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::domain::foundation::ValidationError;
use crate::domain::proposal::ProposalError;

/// Standard error response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// API error type that converts proposal errors to HTTP responses.
#[derive(Debug)]
pub struct ApiError(pub ProposalError);

impl ApiError {
    /// HTTP status for the wrapped error.
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            ProposalError::Validation { .. } | ProposalError::NoDebtor => StatusCode::BAD_REQUEST,
            ProposalError::DebtorNotFound(_)
            | ProposalError::NotFound(_)
            | ProposalError::UnknownChannel { .. } => StatusCode::NOT_FOUND,
            ProposalError::InvalidTransition { .. }
            | ProposalError::ProposalClosed { .. }
            | ProposalError::Conflict(_) => StatusCode::CONFLICT,
            ProposalError::Overflow { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ProposalError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ProposalError> for ApiError {
    fn from(err: ProposalError) -> Self {
        Self(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self(err.into())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(ProposalError::validation("body", rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self.0, "Request failed");
        }
        let body = ErrorResponse::new(self.0.code().to_string(), self.0.message());
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{DebtorId, ProposalId};
    use crate::domain::proposal::{ChecklistKind, ProposalSituation};

    #[test]
    fn each_error_maps_to_its_status() {
        let cases = [
            (ProposalError::validation("name", "empty"), StatusCode::BAD_REQUEST),
            (ProposalError::NoDebtor, StatusCode::BAD_REQUEST),
            (ProposalError::DebtorNotFound(DebtorId::new()), StatusCode::NOT_FOUND),
            (ProposalError::NotFound(ProposalId::new()), StatusCode::NOT_FOUND),
            (
                ProposalError::unknown_channel(ChecklistKind::Payments, "cheque"),
                StatusCode::NOT_FOUND,
            ),
            (
                ProposalError::invalid_transition(
                    ProposalSituation::Sent,
                    ProposalSituation::Completed,
                ),
                StatusCode::CONFLICT,
            ),
            (ProposalError::closed(ProposalSituation::Expired), StatusCode::CONFLICT),
            (ProposalError::Conflict("stale".to_string()), StatusCode::CONFLICT),
            (
                ProposalError::Overflow {
                    charge: "taxa".to_string(),
                },
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                ProposalError::infrastructure("down"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(ApiError(err.clone()).status(), status, "{:?}", err);
        }
    }

    #[test]
    fn response_carries_code_and_status() {
        let response =
            ApiError(ProposalError::closed(ProposalSituation::Completed)).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
