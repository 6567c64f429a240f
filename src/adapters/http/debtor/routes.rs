//! Axum router configuration for debtor endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::super::AppState;
use super::handlers::{get_debtor, register_debtor};

/// Create the debtor API router.
///
/// # Routes
/// - `POST /` - Register a debtor
/// - `GET /:id` - Fetch a debtor
pub fn debtor_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(register_debtor))
        .route("/:id", get(get_debtor))
}
