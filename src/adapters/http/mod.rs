//! HTTP adapters - REST API implementations.
//!
//! Each domain module has its own HTTP adapter for endpoint exposure;
//! [`app_router`] mounts them under `/api` with tracing and timeouts.

pub mod debtor;
mod error;
mod extract;
pub mod proposal;
mod state;

pub use error::{ApiError, ErrorResponse};
pub use extract::ApiJson;
pub use state::AppState;

use std::time::Duration;

use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// GET /health - Liveness check
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Create the complete application router.
///
/// # Example
///
/// ```ignore
/// let app = app_router(state, Duration::from_secs(30));
/// axum::serve(listener, app).await?;
/// ```
pub fn app_router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api/debtors", debtor::debtor_routes())
        .nest("/api/proposals", proposal::proposal_routes())
        .with_state(state)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::adapters::clock::SystemClock;
    use crate::adapters::memory::{InMemoryDebtorRepository, InMemoryProposalRepository};
    use crate::application::handlers::ChecklistDefaults;

    fn test_state() -> AppState {
        AppState {
            debtor_repository: Arc::new(InMemoryDebtorRepository::new()),
            proposal_repository: Arc::new(InMemoryProposalRepository::new()),
            clock: Arc::new(SystemClock),
            checklist_defaults: ChecklistDefaults {
                payment_channels: vec!["pix".to_string()],
                communication_channels: vec!["email".to_string()],
            },
        }
    }

    #[test]
    fn app_router_creates_router() {
        // Just verify it creates without panic
        let _router = app_router(test_state(), Duration::from_secs(30));
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let Json(body) = health().await;
        assert_eq!(body["status"], "ok");
    }
}
