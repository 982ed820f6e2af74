//! # Ordered Collection Reconciliation (cms-01)
//!
//! Keeps a locally displayed list of orderable records consistent with the
//! remote table that owns them, while showing order edits immediately.
//!
//! ## Mutation Lifecycle
//!
//! ```text
//!  Idle ──edit──→ Editing ──submit──→ Persisting ──ok───→ Reconciled ──→ Idle
//!                  (value replaced,      (id in pending     (list re-sorted)
//!                   list NOT re-sorted)   set)        └─err──→ RolledBack ──→ Idle
//!                                                          (authoritative value
//!                                                           fetched and restored)
//! ```
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Description |
//! |----|-----------|-------------|
//! | 1 | Display Order | Ascending on the order field, missing values last, stable |
//! | 2 | No Jump While Editing | The optimistic step replaces the value without re-sorting |
//! | 3 | Convergence | After a failed persist the local value equals a fresh fetch |
//! | 4 | Pending Always Cleared | Every completion clears its in-flight mark |
//! | 5 | Slot Allocation | First unused slot in `1..=capacity`, else `capacity + 1` |
//! | 6 | No Compaction | Deleting a record leaves a gap in the order sequence |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Pure ordering logic (sort, slots, lifecycle, pending set, menu)
//! - `ports/` - `OrderingApi` (inbound), `OrderStore` and `Notifier` (outbound)
//! - `service.rs` - `OrderMutator`, the optimistic update + rollback service
//! - `adapters/` - Table-backed and in-memory stores, notifiers
//!
//! ## Usage
//!
//! ```ignore
//! use cms_01_ordering::{OrderMutator, MutatorConfig, TableOrderStore, TracingNotifier};
//!
//! let store = Arc::new(TableOrderStore::new(tables));
//! let mutator = OrderMutator::<Project, _>::new(store, Arc::new(TracingNotifier), MutatorConfig::default());
//! mutator.load().await?;
//! let outcome = mutator.change_order(&id, 5).await?;
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

#[cfg(test)]
mod test_utils;

pub use adapters::{InMemoryOrderStore, QueueNotifier, TableOrderStore, TracingNotifier};
pub use domain::config::{MutatorConfig, ReentryPolicy, StalePolicy};
pub use domain::errors::OrderingError;
pub use domain::input::coerce_order_input;
pub use domain::lifecycle::{MutationPhase, PhaseEvent};
pub use domain::list::{ListState, OrderedList};
pub use domain::menu::{MenuEditor, MoveDirection};
pub use domain::pending::{MutationStamp, PendingSet};
pub use domain::slots::{
    first_free_slot, has_free_slot, next_dense_order, AllocationPolicy, BANNER_CAPACITY,
};
pub use domain::sort::{is_display_sorted, sort_for_display, sorted_for_display, MISSING_ORDER_SENTINEL};
pub use ports::inbound::{OrderingApi, RowView};
pub use ports::outbound::{Notifier, OrderStore};
pub use service::{MutationOutcome, MutatorStats, OrderMutator, PendingMutation, StatsSnapshot};
