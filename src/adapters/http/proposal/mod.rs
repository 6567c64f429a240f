//! HTTP adapter for proposal endpoints.

pub mod dto;
mod handlers;
mod routes;

pub use routes::proposal_routes;
