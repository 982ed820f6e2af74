//! In-memory `OrderStore` with scripted failures, for tests and demos.

use crate::ports::outbound::OrderStore;
use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use shared_types::{Orderable, RecordId, StoreError};
use std::collections::VecDeque;

/// Order store holding records in memory.
///
/// Failures queued with `fail_next_persist` / `fail_next_fetch` are
/// returned by the next calls, one per call.
pub struct InMemoryOrderStore<R> {
    records: RwLock<Vec<R>>,
    persist_failures: Mutex<VecDeque<StoreError>>,
    fetch_failures: Mutex<VecDeque<StoreError>>,
    persisted: Mutex<Vec<(RecordId, i64)>>,
}

impl<R: Orderable> InMemoryOrderStore<R> {
    pub fn new(records: Vec<R>) -> Self {
        Self {
            records: RwLock::new(records),
            persist_failures: Mutex::new(VecDeque::new()),
            fetch_failures: Mutex::new(VecDeque::new()),
            persisted: Mutex::new(Vec::new()),
        }
    }

    /// Make the next `persist_order` call fail.
    pub fn fail_next_persist(&self, error: StoreError) {
        self.persist_failures.lock().push_back(error);
    }

    /// Make the next `fetch` call fail.
    pub fn fail_next_fetch(&self, error: StoreError) {
        self.fetch_failures.lock().push_back(error);
    }

    /// Successful persists, in call order.
    pub fn persisted(&self) -> Vec<(RecordId, i64)> {
        self.persisted.lock().clone()
    }

    /// Stored copy of one record.
    pub fn stored(&self, id: &RecordId) -> Option<R> {
        self.records
            .read()
            .iter()
            .find(|record| record.id() == Some(id))
            .cloned()
    }
}

#[async_trait]
impl<R: Orderable> OrderStore<R> for InMemoryOrderStore<R> {
    async fn load_all(&self) -> Result<Vec<R>, StoreError> {
        Ok(self.records.read().clone())
    }

    async fn persist_order(&self, id: &RecordId, order: i64) -> Result<(), StoreError> {
        if let Some(error) = self.persist_failures.lock().pop_front() {
            return Err(error);
        }

        let mut records = self.records.write();
        let record = records
            .iter_mut()
            .find(|record| record.id() == Some(id))
            .ok_or_else(|| StoreError::not_found(R::TABLE, id))?;
        record.set_order(Some(order));
        self.persisted.lock().push((id.clone(), order));
        Ok(())
    }

    async fn fetch(&self, id: &RecordId) -> Result<R, StoreError> {
        if let Some(error) = self.fetch_failures.lock().pop_front() {
            return Err(error);
        }
        self.stored(id)
            .ok_or_else(|| StoreError::not_found(R::TABLE, id))
    }
}
