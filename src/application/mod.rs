//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Handlers own no state beyond their `Arc<dyn Port>` dependencies.

pub mod handlers;

pub use handlers::*;
