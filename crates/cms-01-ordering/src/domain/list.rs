//! # Ordered List
//!
//! The locally displayed copy of an orderable table. The list is a cache:
//! the remote table stays the source of truth and the mutator reconciles
//! the list against it after every mutation.

use crate::domain::errors::OrderingError;
use crate::domain::slots::AllocationPolicy;
use crate::domain::sort::sort_for_display;
use shared_types::{Orderable, RecordId};

/// Render state of a list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListState {
    /// Nothing to show ("not found").
    Empty,
    /// `n` records to show.
    Populated(usize),
}

/// Display-ordered records of one table.
#[derive(Debug, Clone)]
pub struct OrderedList<R> {
    records: Vec<R>,
}

impl<R> Default for OrderedList<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<R: Orderable> OrderedList<R> {
    /// Build a list from fetched rows, in display order.
    pub fn from_records(mut records: Vec<R>) -> Self {
        sort_for_display(&mut records);
        Self { records }
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn state(&self) -> ListState {
        match self.records.len() {
            0 => ListState::Empty,
            n => ListState::Populated(n),
        }
    }

    pub fn position(&self, id: &RecordId) -> Option<usize> {
        self.records
            .iter()
            .position(|record| record.id() == Some(id))
    }

    pub fn get(&self, id: &RecordId) -> Option<&R> {
        self.position(id).map(|index| &self.records[index])
    }

    /// Replace a record's order value in place without re-sorting.
    ///
    /// Returns the previous value.
    pub fn set_order(&mut self, id: &RecordId, order: Option<i64>) -> Result<Option<i64>, OrderingError> {
        let index = self
            .position(id)
            .ok_or_else(|| OrderingError::RecordNotFound { id: id.to_string() })?;
        let record = &mut self.records[index];
        let previous = record.order();
        record.set_order(order);
        Ok(previous)
    }

    /// Restore display order.
    pub fn resort(&mut self) {
        sort_for_display(&mut self.records);
    }

    /// Replace every record with freshly fetched rows.
    pub fn replace(&mut self, records: Vec<R>) {
        self.records = records;
        self.resort();
    }

    /// Add a newly created record.
    pub fn insert(&mut self, record: R) {
        self.records.push(record);
        self.resort();
    }

    /// Drop a deleted record. Remaining order values are left as they are.
    pub fn remove(&mut self, id: &RecordId) -> Option<R> {
        self.position(id).map(|index| self.records.remove(index))
    }

    /// Order values currently in use.
    pub fn occupied_orders(&self) -> Vec<i64> {
        self.records.iter().filter_map(Orderable::order).collect()
    }

    /// Order value a new record would receive under `policy`.
    pub fn next_order(&self, policy: AllocationPolicy) -> i64 {
        match policy {
            AllocationPolicy::Dense => crate::domain::slots::next_dense_order(self.len()),
            AllocationPolicy::Slots { .. } => policy.next_order(&self.occupied_orders()),
        }
    }
}
