//! Order mutator configuration.

use serde::{Deserialize, Serialize};

/// What to do when a record is edited while an earlier edit is in flight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReentryPolicy {
    /// Issue the second request anyway. The pending flag is only a hint.
    #[default]
    Advisory,
    /// Refuse the edit with `OrderingError::MutationPending`.
    Reject,
}

/// How completions of superseded mutations are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StalePolicy {
    /// A failed completion that is not the newest for its record does not
    /// roll back; the newest mutation owns reconciliation.
    #[default]
    IgnoreStale,
    /// Every completion is applied in arrival order.
    ApplyAll,
}

/// Order mutator configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MutatorConfig {
    pub reentry: ReentryPolicy,
    pub stale_completions: StalePolicy,
}

impl MutatorConfig {
    /// Configuration reproducing the unguarded behaviour: re-entrant edits
    /// allowed and every completion applied.
    pub fn permissive() -> Self {
        Self {
            reentry: ReentryPolicy::Advisory,
            stale_completions: StalePolicy::ApplyAll,
        }
    }
}
