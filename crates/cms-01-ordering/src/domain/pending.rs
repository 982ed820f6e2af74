//! # Pending Set
//!
//! Tracks which records have an order update in flight.
//!
//! Each mutation receives a `MutationStamp`. The set remembers the newest
//! stamp per record and how many mutations are outstanding, so that the
//! pending mark is only cleared when the last of them completes and so
//! that superseded completions can be recognised.

use shared_types::RecordId;
use std::collections::HashMap;
use std::fmt;

/// Monotonic identifier of one mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MutationStamp(u64);

impl MutationStamp {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for MutationStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy)]
struct PendingEntry {
    latest: MutationStamp,
    in_flight: u32,
}

/// In-flight mutations keyed by record id.
#[derive(Debug, Default)]
pub struct PendingSet {
    entries: HashMap<RecordId, PendingEntry>,
    next_stamp: u64,
}

impl PendingSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new mutation for `id` and return its stamp.
    pub fn begin(&mut self, id: &RecordId) -> MutationStamp {
        self.next_stamp += 1;
        let stamp = MutationStamp(self.next_stamp);

        self.entries
            .entry(id.clone())
            .and_modify(|entry| {
                entry.latest = stamp;
                entry.in_flight += 1;
            })
            .or_insert(PendingEntry {
                latest: stamp,
                in_flight: 1,
            });

        stamp
    }

    /// Mark one mutation of `id` as complete.
    ///
    /// Returns `true` when no mutation of `id` remains in flight.
    pub fn finish(&mut self, id: &RecordId) -> bool {
        let Some(entry) = self.entries.get_mut(id) else {
            return true;
        };

        entry.in_flight = entry.in_flight.saturating_sub(1);
        if entry.in_flight == 0 {
            self.entries.remove(id);
            return true;
        }
        false
    }

    /// Whether `stamp` is the newest mutation issued for `id`.
    ///
    /// Also true when nothing is tracked for `id` any more.
    pub fn is_latest(&self, id: &RecordId, stamp: MutationStamp) -> bool {
        self.entries
            .get(id)
            .map_or(true, |entry| entry.latest == stamp)
    }

    pub fn is_pending(&self, id: &RecordId) -> bool {
        self.entries.contains_key(id)
    }

    /// Outstanding mutations for `id`.
    pub fn in_flight(&self, id: &RecordId) -> u32 {
        self.entries.get(id).map_or(0, |entry| entry.in_flight)
    }

    pub fn ids(&self) -> Vec<RecordId> {
        let mut ids: Vec<RecordId> = self.entries.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_mutation_clears() {
        let mut pending = PendingSet::new();
        let id = RecordId::Int(1);

        let stamp = pending.begin(&id);
        assert!(pending.is_pending(&id));
        assert!(pending.is_latest(&id, stamp));

        assert!(pending.finish(&id));
        assert!(!pending.is_pending(&id));
        assert!(pending.is_empty());
    }

    #[test]
    fn test_overlapping_mutations_clear_on_last() {
        let mut pending = PendingSet::new();
        let id = RecordId::Int(1);

        let first = pending.begin(&id);
        let second = pending.begin(&id);
        assert!(first < second);
        assert_eq!(pending.in_flight(&id), 2);
        assert!(!pending.is_latest(&id, first));

        assert!(!pending.finish(&id));
        assert!(pending.is_pending(&id));
        assert!(pending.finish(&id));
        assert!(!pending.is_pending(&id));
    }

    #[test]
    fn test_records_are_independent() {
        let mut pending = PendingSet::new();
        let a = RecordId::Int(1);
        let b = RecordId::Text("b".into());

        pending.begin(&a);
        pending.begin(&b);
        assert_eq!(pending.len(), 2);

        pending.finish(&a);
        assert_eq!(pending.ids(), vec![b]);
    }

    #[test]
    fn test_finish_unknown_is_noop() {
        let mut pending = PendingSet::new();
        assert!(pending.finish(&RecordId::Int(9)));
    }
}
