//! # Outbound Ports
//!
//! What the order mutator needs from the outside world: a store that owns
//! the durable order values and a channel to tell the operator about
//! failures.

use async_trait::async_trait;
use shared_types::{Notification, Orderable, RecordId, StoreError};

/// Remote table holding records of type `R`.
#[async_trait]
pub trait OrderStore<R: Orderable>: Send + Sync {
    /// Load every record of the table.
    async fn load_all(&self) -> Result<Vec<R>, StoreError>;

    /// Persist a new order value for one record.
    async fn persist_order(&self, id: &RecordId, order: i64) -> Result<(), StoreError>;

    /// Fetch the authoritative copy of one record.
    async fn fetch(&self, id: &RecordId) -> Result<R, StoreError>;
}

/// Surfaces notifications to the operator.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}
