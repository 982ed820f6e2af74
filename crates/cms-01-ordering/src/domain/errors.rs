//! Error types for ordered collection reconciliation.

use crate::domain::lifecycle::{MutationPhase, PhaseEvent};
use shared_types::StoreError;
use thiserror::Error;

/// Errors raised by the ordering domain and the order mutator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderingError {
    /// The id is not in the local list.
    #[error("Record not found: {id}")]
    RecordNotFound { id: String },

    /// Re-entrant edit refused by `ReentryPolicy::Reject`.
    #[error("Order update already in flight for {id}")]
    MutationPending { id: String },

    /// Lifecycle state machine violation.
    #[error("Invalid transition from {from} on {event:?}")]
    InvalidTransition {
        from: MutationPhase,
        event: PhaseEvent,
    },

    /// Remote store failure.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}
