//! # Mutation Lifecycle
//!
//! Per-record state machine of an order edit.
//!
//! ```text
//! Idle ──Edit──→ Editing ──Submit──→ Persisting ──PersistSucceeded──→ Reconciled ──Settle──→ Idle
//!                                               └─PersistFailed─────→ RolledBack ──Settle──→ Idle
//! ```
//!
//! `Edit` is accepted from every state: a record may be edited again while
//! an earlier edit is still persisting.

use crate::domain::errors::OrderingError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a record is in its mutation lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MutationPhase {
    /// No edit in progress.
    #[default]
    Idle,
    /// Local value replaced, list not yet re-sorted.
    Editing,
    /// Update request in flight.
    Persisting,
    /// Persist succeeded and the list was re-sorted.
    Reconciled,
    /// Persist failed and the authoritative value was restored.
    RolledBack,
}

/// Input to the lifecycle state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhaseEvent {
    Edit,
    Submit,
    PersistSucceeded,
    PersistFailed,
    Settle,
}

impl MutationPhase {
    /// Apply an event, rejecting transitions the lifecycle does not allow.
    pub fn advance(self, event: PhaseEvent) -> Result<Self, OrderingError> {
        use MutationPhase::*;
        use PhaseEvent::*;

        match (self, event) {
            (_, Edit) => Ok(Editing),
            (Editing, Submit) => Ok(Persisting),
            (Persisting, PersistSucceeded) => Ok(Reconciled),
            (Persisting, PersistFailed) => Ok(RolledBack),
            (Reconciled | RolledBack, Settle) => Ok(Idle),
            (from, event) => Err(OrderingError::InvalidTransition { from, event }),
        }
    }

    /// Whether an update request is outstanding.
    pub fn is_in_flight(&self) -> bool {
        matches!(self, MutationPhase::Editing | MutationPhase::Persisting)
    }

    /// Whether the phase ends a mutation.
    pub fn is_terminal(&self) -> bool {
        matches!(self, MutationPhase::Reconciled | MutationPhase::RolledBack)
    }
}

impl fmt::Display for MutationPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MutationPhase::Idle => "idle",
            MutationPhase::Editing => "editing",
            MutationPhase::Persisting => "persisting",
            MutationPhase::Reconciled => "reconciled",
            MutationPhase::RolledBack => "rolled back",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_path() {
        let phase = MutationPhase::Idle
            .advance(PhaseEvent::Edit)
            .and_then(|p| p.advance(PhaseEvent::Submit))
            .and_then(|p| p.advance(PhaseEvent::PersistSucceeded))
            .unwrap();
        assert_eq!(phase, MutationPhase::Reconciled);
        assert_eq!(phase.advance(PhaseEvent::Settle).unwrap(), MutationPhase::Idle);
    }

    #[test]
    fn test_failure_path() {
        let phase = MutationPhase::Persisting.advance(PhaseEvent::PersistFailed).unwrap();
        assert_eq!(phase, MutationPhase::RolledBack);
        assert!(phase.is_terminal());
    }

    #[test]
    fn test_reentrant_edit_allowed() {
        assert_eq!(
            MutationPhase::Persisting.advance(PhaseEvent::Edit).unwrap(),
            MutationPhase::Editing
        );
    }

    #[test]
    fn test_illegal_transitions_rejected() {
        assert!(matches!(
            MutationPhase::Idle.advance(PhaseEvent::PersistSucceeded),
            Err(OrderingError::InvalidTransition { .. })
        ));
        assert!(MutationPhase::Idle.advance(PhaseEvent::Submit).is_err());
        assert!(MutationPhase::Persisting.advance(PhaseEvent::Settle).is_err());
    }
}
