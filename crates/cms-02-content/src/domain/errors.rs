//! Error types for content workflows.

use shared_types::{StoreError, ValidationError};
use thiserror::Error;

/// Errors raised by content workflows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentError {
    /// Client-side validation failed; nothing was sent.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// A backend call failed.
    #[error("Backend error: {0}")]
    Store(#[from] StoreError),

    /// Every slot of a capacity-limited table is taken.
    #[error("All {capacity} slots are in use")]
    CapacityReached { capacity: u32 },

    /// A record the workflow depends on is missing.
    #[error("{what} not found")]
    NotFound { what: String },

    /// Marking the project featured exceeds the home page limit. Resubmit
    /// with `FeaturedConfirmation::Confirmed` to proceed.
    #[error("{current} projects are already featured")]
    FeaturedLimit { current: usize },
}

pub type ContentResult<T> = Result<T, ContentError>;
