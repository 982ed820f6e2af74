//! # Inbound Port
//!
//! Type-erased view of an order mutator, so that front-ends can drive any
//! orderable table through one trait object.

use crate::domain::errors::OrderingError;
use crate::domain::lifecycle::MutationPhase;
use crate::domain::list::ListState;
use crate::domain::slots::AllocationPolicy;
use crate::service::MutationOutcome;
use async_trait::async_trait;
use shared_types::RecordId;

/// One displayed row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub id: RecordId,
    pub label: String,
    pub order: Option<i64>,
    pub pending: bool,
    pub phase: MutationPhase,
}

/// Operations a list front-end performs on an orderable table.
#[async_trait]
pub trait OrderingApi: Send + Sync {
    /// Backend table name.
    fn table(&self) -> &'static str;

    /// Re-fetch the table from the store.
    async fn reload(&self) -> Result<ListState, OrderingError>;

    /// Apply an order edit (optimistic update, persist, reconcile).
    async fn change_order(&self, id: &RecordId, order: i64) -> Result<MutationOutcome, OrderingError>;

    /// Rows in display order.
    fn rows(&self) -> Vec<RowView>;

    fn list_state(&self) -> ListState;

    /// Order value a newly created record would receive.
    fn next_order(&self, policy: AllocationPolicy) -> i64;
}
