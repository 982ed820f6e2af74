//! # Slot Allocation
//!
//! Two allocation strategies exist for new records:
//!
//! - **Slots** (intro banners): a fixed capacity; a new record takes the
//!   smallest free index in `1..=capacity`.
//! - **Dense** (services, menu items): a new record goes to `len + 1`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Number of intro banner slots.
pub const BANNER_CAPACITY: u32 = 3;

/// How a new record's order value is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AllocationPolicy {
    /// Smallest unused value in `1..=capacity`.
    Slots { capacity: u32 },
    /// One past the current record count.
    Dense,
}

impl AllocationPolicy {
    /// Order value for the next record given the orders already in use.
    pub fn next_order(&self, occupied: &[i64]) -> i64 {
        match self {
            AllocationPolicy::Slots { capacity } => {
                first_free_slot(occupied.iter().copied(), *capacity)
            }
            AllocationPolicy::Dense => next_dense_order(occupied.len()),
        }
    }
}

/// First value in `1..=capacity` not present in `occupied`.
///
/// Returns `capacity + 1` when every slot is taken. Values outside the
/// range are ignored. Callers must check `has_free_slot` before creating
/// a record with the returned value.
pub fn first_free_slot<I>(occupied: I, capacity: u32) -> i64
where
    I: IntoIterator<Item = i64>,
{
    let used: BTreeSet<i64> = occupied.into_iter().collect();
    let capacity = i64::from(capacity);

    (1..=capacity)
        .find(|slot| !used.contains(slot))
        .unwrap_or(capacity + 1)
}

/// Whether another record may be created in a capacity-limited table.
pub fn has_free_slot(count: usize, capacity: u32) -> bool {
    count < capacity as usize
}

/// Order for a record appended to a densely numbered list.
pub fn next_dense_order(len: usize) -> i64 {
    len as i64 + 1
}
