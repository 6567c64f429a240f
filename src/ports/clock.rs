//! Clock port - the single source of "now" for the application layer.
//!
//! Lifecycle transitions and expiry checks take the current time as an
//! argument. Handlers obtain it from this port so tests can pin it.

use crate::domain::foundation::Timestamp;

/// Port for reading the current time.
pub trait Clock: Send + Sync {
    /// Returns the current instant.
    fn now(&self) -> Timestamp;
}
