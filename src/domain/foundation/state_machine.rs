//! State machine trait for status enums.
//!
//! Provides a consistent interface for validating state transitions. The
//! proposal lifecycle is the main implementor.

/// Trait for status enums that represent state machines.
///
/// Implementors define the transition table once in `valid_transitions`;
/// `can_transition_to` and `is_terminal` derive from it.
///
/// # Example
///
/// ```ignore
/// impl StateMachine for ProposalSituation {
///     fn valid_transitions(&self) -> Vec<Self> {
///         match self {
///             Sent => vec![Viewed, Expired, Cancelled, Error],
///             // ... etc
///         }
///     }
/// }
///
/// if situation.can_transition_to(&ProposalSituation::Viewed) { /* ... */ }
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool {
        self.valid_transitions().contains(target)
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum TestStatus {
        Draft,
        Active,
        Archived,
    }

    impl StateMachine for TestStatus {
        fn valid_transitions(&self) -> Vec<Self> {
            use TestStatus::*;
            match self {
                Draft => vec![Active],
                Active => vec![Archived],
                Archived => vec![],
            }
        }
    }

    #[test]
    fn can_transition_to_follows_table() {
        assert!(TestStatus::Draft.can_transition_to(&TestStatus::Active));
        assert!(!TestStatus::Draft.can_transition_to(&TestStatus::Archived));
    }

    #[test]
    fn is_terminal_returns_true_without_targets() {
        assert!(TestStatus::Archived.is_terminal());
        assert!(!TestStatus::Active.is_terminal());
    }
}
