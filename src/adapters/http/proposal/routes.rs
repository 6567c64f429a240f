//! Axum router configuration for proposal endpoints.

use axum::{
    routing::{get, post, put},
    Router,
};

use super::super::AppState;
use super::handlers::{
    advance_proposal, complete_communication, complete_payment, create_proposal,
    expire_proposal, get_proposal, update_charges,
};

/// Create the proposal API router.
///
/// # Routes
/// - `POST /` - Create a proposal
/// - `GET /:id` - Proposal snapshot with version
/// - `POST /:id/status` - Move to a new status
/// - `POST /:id/expire` - Apply the expiry policy
/// - `PUT /:id/charges` - Change debt charges and revalue
/// - `POST /:id/payments/:name/complete` - Complete a payment channel
/// - `POST /:id/communication/:name/complete` - Complete a communication channel
pub fn proposal_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_proposal))
        .route("/:id", get(get_proposal))
        .route("/:id/status", post(advance_proposal))
        .route("/:id/expire", post(expire_proposal))
        .route("/:id/charges", put(update_charges))
        .route("/:id/payments/:name/complete", post(complete_payment))
        .route("/:id/communication/:name/complete", post(complete_communication))
}
