//! HTTP adapter for debtor endpoints.
//!
//! - `POST /api/debtors` - Register a debtor
//! - `GET /api/debtors/:id` - Fetch a debtor

mod handlers;
mod routes;

pub use routes::debtor_routes;
