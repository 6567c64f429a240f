//! Proposal status and its lifecycle rules.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{StateMachine, Timestamp, ValidationError};

use super::ProposalError;

/// Where a proposal stands in the negotiation.
///
/// # State Machine
///
/// ```text
/// sent ──► viewed ──► accepted ──► execution ──► completed
///   │        │           │            │
///   ├────────┴──► expired│            │
///   └────────────────────┴────────────┴──► cancelled | error
/// ```
///
/// `completed`, `expired`, `cancelled` and `error` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProposalSituation {
    Sent,
    Viewed,
    Accepted,
    Execution,
    Completed,
    Expired,
    Cancelled,
    Error,
}

impl ProposalSituation {
    pub const ALL: [ProposalSituation; 8] = [
        ProposalSituation::Sent,
        ProposalSituation::Viewed,
        ProposalSituation::Accepted,
        ProposalSituation::Execution,
        ProposalSituation::Completed,
        ProposalSituation::Expired,
        ProposalSituation::Cancelled,
        ProposalSituation::Error,
    ];

    /// Returns true while the debtor has not yet accepted the offer.
    ///
    /// Only offers in this window can lapse.
    pub fn is_awaiting_acceptance(&self) -> bool {
        matches!(self, ProposalSituation::Sent | ProposalSituation::Viewed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProposalSituation::Sent => "sent",
            ProposalSituation::Viewed => "viewed",
            ProposalSituation::Accepted => "accepted",
            ProposalSituation::Execution => "execution",
            ProposalSituation::Completed => "completed",
            ProposalSituation::Expired => "expired",
            ProposalSituation::Cancelled => "cancelled",
            ProposalSituation::Error => "error",
        }
    }

    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        Self::ALL
            .into_iter()
            .find(|s| s.as_str() == value)
            .ok_or_else(|| {
                ValidationError::invalid_format("situation", format!("unknown status '{}'", value))
            })
    }
}

impl StateMachine for ProposalSituation {
    fn valid_transitions(&self) -> Vec<Self> {
        use ProposalSituation::*;
        match self {
            Sent => vec![Viewed, Expired, Cancelled, Error],
            Viewed => vec![Accepted, Expired, Cancelled, Error],
            Accepted => vec![Execution, Cancelled, Error],
            Execution => vec![Completed, Cancelled, Error],
            Completed | Expired | Cancelled | Error => vec![],
        }
    }
}

impl fmt::Display for ProposalSituation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current situation plus the instant it last changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalStatus {
    pub situation: ProposalSituation,
    pub updated_at: Timestamp,
}

impl ProposalStatus {
    /// Status of a freshly created proposal.
    pub fn initial(now: Timestamp) -> Self {
        Self {
            situation: ProposalSituation::Sent,
            updated_at: now,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.situation.is_terminal()
    }

    /// Returns the status after moving to `target` at `now`.
    ///
    /// `updated_at` never moves backwards, even if `now` is earlier than the
    /// last recorded change.
    ///
    /// # Errors
    ///
    /// - `ProposalClosed` if the current situation is terminal
    /// - `InvalidTransition` if `target` is not reachable
    pub fn advance(&self, target: ProposalSituation, now: Timestamp) -> Result<Self, ProposalError> {
        if self.is_closed() {
            return Err(ProposalError::closed(self.situation));
        }
        if !self.situation.can_transition_to(&target) {
            return Err(ProposalError::invalid_transition(self.situation, target));
        }
        Ok(Self {
            situation: target,
            updated_at: self.updated_at.latest(now),
        })
    }
}
