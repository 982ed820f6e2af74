//! Order Mutator Service - optimistic reordering with server reconciliation
//!
//! # Flow
//! 1. `begin_change`: replace the local order value (no re-sort), mark the
//!    record pending, take a stamp. Synchronous.
//! 2. `complete`: persist. On success re-sort the list. On failure fetch the
//!    authoritative record, restore its order value and notify.
//! 3. The pending mark is cleared once the record's last in-flight mutation
//!    completes, whatever the outcome.
//!
//! # Concurrency
//! The list, pending set and phases share one `parking_lot::Mutex`. The
//! lock is never held across an `.await`, so different records can be in
//! flight at the same time.

use crate::domain::config::{MutatorConfig, ReentryPolicy, StalePolicy};
use crate::domain::errors::OrderingError;
use crate::domain::input::coerce_order_input;
use crate::domain::lifecycle::{MutationPhase, PhaseEvent};
use crate::domain::list::{ListState, OrderedList};
use crate::domain::pending::{MutationStamp, PendingSet};
use crate::domain::slots::AllocationPolicy;
use crate::ports::inbound::{OrderingApi, RowView};
use crate::ports::outbound::{Notifier, OrderStore};
use async_trait::async_trait;
use parking_lot::Mutex;
use shared_types::{Notification, Orderable, RecordId, StoreError};
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, error, info, warn};


/// Result of one order mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    /// Persisted; the list was re-sorted.
    Reconciled,
    /// Persist failed; the local value was replaced by the stored one.
    RolledBack { authoritative: Option<i64> },
    /// Persist failed and the authoritative record could not be fetched
    /// either. The local value is left as the optimistic one.
    RollbackFailed { error: StoreError },
    /// Persist failed but a newer edit of the same record is in flight,
    /// which will reconcile the record instead.
    Superseded,
}

/// A mutation that has been applied locally and awaits persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingMutation {
    pub id: RecordId,
    pub order: i64,
    pub stamp: MutationStamp,
    /// Local value before the optimistic update.
    pub previous: Option<i64>,
}

/// Mutation counters.
#[derive(Debug, Default)]
pub struct MutatorStats {
    pub started: AtomicU64,
    pub reconciled: AtomicU64,
    pub rolled_back: AtomicU64,
    pub rollback_failures: AtomicU64,
    pub superseded: AtomicU64,
    pub rejected: AtomicU64,
}

/// Point-in-time copy of `MutatorStats`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub started: u64,
    pub reconciled: u64,
    pub rolled_back: u64,
    pub rollback_failures: u64,
    pub superseded: u64,
    pub rejected: u64,
}

impl MutatorStats {
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            started: self.started.load(Ordering::Relaxed),
            reconciled: self.reconciled.load(Ordering::Relaxed),
            rolled_back: self.rolled_back.load(Ordering::Relaxed),
            rollback_failures: self.rollback_failures.load(Ordering::Relaxed),
            superseded: self.superseded.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
        }
    }
}

struct MutatorState<R> {
    list: OrderedList<R>,
    pending: PendingSet,
    phases: HashMap<RecordId, MutationPhase>,
}

impl<R> MutatorState<R> {
    fn phase(&self, id: &RecordId) -> MutationPhase {
        self.phases.get(id).copied().unwrap_or_default()
    }

    fn advance(&mut self, id: &RecordId, event: PhaseEvent) -> Result<MutationPhase, OrderingError> {
        let next = self.phase(id).advance(event)?;
        self.phases.insert(id.clone(), next);
        Ok(next)
    }

    /// Record one completion; settles the phase when nothing is left in flight.
    fn finish(&mut self, id: &RecordId) {
        if !self.pending.finish(id) {
            return;
        }
        match self.phase(id).advance(PhaseEvent::Settle) {
            Ok(_) => {}
            Err(err) => debug!(id = %id, error = %err, "Settling from unexpected phase"),
        }
        self.phases.remove(id);
    }
}

/// Order mutator for one orderable table.
pub struct OrderMutator<R, S>
where
    R: Orderable,
    S: OrderStore<R>,
{
    store: Arc<S>,
    notifier: Arc<dyn Notifier>,
    config: MutatorConfig,
    state: Mutex<MutatorState<R>>,
    stats: MutatorStats,
    _record: PhantomData<fn() -> R>,
}

impl<R, S> OrderMutator<R, S>
where
    R: Orderable,
    S: OrderStore<R>,
{
    /// Create a mutator with an empty list. Call `load` to populate it.
    pub fn new(store: Arc<S>, notifier: Arc<dyn Notifier>, config: MutatorConfig) -> Self {
        Self {
            store,
            notifier,
            config,
            state: Mutex::new(MutatorState {
                list: OrderedList::default(),
                pending: PendingSet::new(),
                phases: HashMap::new(),
            }),
            stats: MutatorStats::default(),
            _record: PhantomData,
        }
    }

    /// Create a mutator over records that were already fetched.
    pub fn with_records(
        store: Arc<S>,
        notifier: Arc<dyn Notifier>,
        config: MutatorConfig,
        records: Vec<R>,
    ) -> Self {
        let mutator = Self::new(store, notifier, config);
        mutator.state.lock().list.replace(records);
        mutator
    }

    pub fn config(&self) -> &MutatorConfig {
        &self.config
    }

    pub fn stats(&self) -> &MutatorStats {
        &self.stats
    }

    /// Fetch every record from the store and replace the local list.
    pub async fn load(&self) -> Result<ListState, OrderingError> {
        let records = match self.store.load_all().await {
            Ok(records) => records,
            Err(err) => {
                error!(table = R::TABLE, error = %err, "Failed to load records");
                self.notifier
                    .notify(Notification::error(format!("Could not load {}: {}", R::TABLE, err)));
                return Err(err.into());
            }
        };

        let mut state = self.state.lock();
        state.list.replace(records);
        let list_state = state.list.state();
        debug!(table = R::TABLE, count = state.list.len(), "Loaded records");
        Ok(list_state)
    }

    /// Records in display order.
    pub fn snapshot(&self) -> Vec<R> {
        self.state.lock().list.records().to_vec()
    }

    pub fn list_state(&self) -> ListState {
        self.state.lock().list.state()
    }

    pub fn is_pending(&self, id: &RecordId) -> bool {
        self.state.lock().pending.is_pending(id)
    }

    pub fn pending_ids(&self) -> Vec<RecordId> {
        self.state.lock().pending.ids()
    }

    pub fn phase_of(&self, id: &RecordId) -> MutationPhase {
        self.state.lock().phase(id)
    }

    /// Order value a new record would receive under `policy`.
    pub fn next_order(&self, policy: AllocationPolicy) -> i64 {
        self.state.lock().list.next_order(policy)
    }

    /// Add a record created elsewhere to the local list.
    pub fn insert_local(&self, record: R) {
        self.state.lock().list.insert(record);
    }

    /// Drop a deleted record from the local list. Other order values are
    /// not compacted.
    pub fn remove_local(&self, id: &RecordId) -> Option<R> {
        self.state.lock().list.remove(id)
    }

    /// Apply an edit locally and register it as in flight.
    ///
    /// The list is deliberately left unsorted so the edited row does not
    /// move while the operator is still typing.
    pub fn begin_change(&self, id: &RecordId, order: i64) -> Result<PendingMutation, OrderingError> {
        let mut state = self.state.lock();

        if self.config.reentry == ReentryPolicy::Reject && state.pending.is_pending(id) {
            self.stats.rejected.fetch_add(1, Ordering::Relaxed);
            debug!(table = R::TABLE, id = %id, "Re-entrant order edit rejected");
            return Err(OrderingError::MutationPending { id: id.to_string() });
        }

        let previous = state.list.set_order(id, Some(order))?;
        state.advance(id, PhaseEvent::Edit)?;
        state.advance(id, PhaseEvent::Submit)?;
        let stamp = state.pending.begin(id);
        self.stats.started.fetch_add(1, Ordering::Relaxed);

        debug!(
            table = R::TABLE,
            id = %id,
            order,
            previous = ?previous,
            stamp = %stamp,
            "Order applied locally"
        );

        Ok(PendingMutation {
            id: id.clone(),
            order,
            stamp,
            previous,
        })
    }

    /// Persist a mutation started with `begin_change` and reconcile.
    pub async fn complete(&self, mutation: PendingMutation) -> MutationOutcome {
        let PendingMutation { id, order, stamp, .. } = mutation;

        match self.store.persist_order(&id, order).await {
            Ok(()) => {
                let mut state = self.state.lock();
                state.list.resort();
                if state.pending.is_latest(&id, stamp) {
                    if let Err(err) = state.advance(&id, PhaseEvent::PersistSucceeded) {
                        debug!(id = %id, error = %err, "Phase not advanced");
                    }
                }
                state.finish(&id);
                self.stats.reconciled.fetch_add(1, Ordering::Relaxed);

                info!(table = R::TABLE, id = %id, order, "Order updated");
                MutationOutcome::Reconciled
            }
            Err(err) => self.roll_back(&id, stamp, err).await,
        }
    }

    /// Apply, persist and reconcile one edit.
    pub async fn change_order(&self, id: &RecordId, order: i64) -> Result<MutationOutcome, OrderingError> {
        let mutation = self.begin_change(id, order)?;
        Ok(self.complete(mutation).await)
    }

    /// Like `change_order`, for raw input text (coerced, never rejected).
    pub async fn change_order_input(
        &self,
        id: &RecordId,
        raw: &str,
    ) -> Result<MutationOutcome, OrderingError> {
        self.change_order(id, coerce_order_input(raw)).await
    }

    async fn roll_back(&self, id: &RecordId, stamp: MutationStamp, err: StoreError) -> MutationOutcome {
        warn!(table = R::TABLE, id = %id, stamp = %stamp, error = %err, "Order update failed");

        let superseded = !self.state.lock().pending.is_latest(id, stamp);
        if superseded && self.config.stale_completions == StalePolicy::IgnoreStale {
            self.state.lock().finish(id);
            self.stats.superseded.fetch_add(1, Ordering::Relaxed);
            self.notifier
                .notify(Notification::error(format!("Order update failed: {}", err)));
            return MutationOutcome::Superseded;
        }

        let outcome = match self.store.fetch(id).await {
            Ok(record) => {
                let authoritative = record.order();
                let mut state = self.state.lock();
                if let Err(missing) = state.list.set_order(id, authoritative) {
                    debug!(id = %id, error = %missing, "Record left the list before rollback");
                }
                self.stats.rolled_back.fetch_add(1, Ordering::Relaxed);
                info!(table = R::TABLE, id = %id, authoritative = ?authoritative, "Order rolled back");
                MutationOutcome::RolledBack { authoritative }
            }
            Err(fetch_err) => {
                self.stats.rollback_failures.fetch_add(1, Ordering::Relaxed);
                error!(
                    table = R::TABLE,
                    id = %id,
                    persist_error = %err,
                    fetch_error = %fetch_err,
                    "Rollback fetch failed, local value may diverge"
                );
                MutationOutcome::RollbackFailed { error: fetch_err }
            }
        };

        {
            let mut state = self.state.lock();
            if !superseded {
                if let Err(phase_err) = state.advance(id, PhaseEvent::PersistFailed) {
                    debug!(id = %id, error = %phase_err, "Phase not advanced");
                }
            }
            state.finish(id);
        }

        self.notifier
            .notify(Notification::error(format!("Order update failed: {}", err)));
        outcome
    }
}

#[async_trait]
impl<R, S> OrderingApi for OrderMutator<R, S>
where
    R: Orderable,
    S: OrderStore<R>,
{
    fn table(&self) -> &'static str {
        R::TABLE
    }

    async fn reload(&self) -> Result<ListState, OrderingError> {
        self.load().await
    }

    async fn change_order(&self, id: &RecordId, order: i64) -> Result<MutationOutcome, OrderingError> {
        OrderMutator::change_order(self, id, order).await
    }

    fn rows(&self) -> Vec<RowView> {
        let state = self.state.lock();
        state
            .list
            .records()
            .iter()
            .filter_map(|record| {
                let id = record.id()?.clone();
                Some(RowView {
                    pending: state.pending.is_pending(&id),
                    phase: state.phase(&id),
                    label: record.label().to_string(),
                    order: record.order(),
                    id,
                })
            })
            .collect()
    }

    fn list_state(&self) -> ListState {
        OrderMutator::list_state(self)
    }

    fn next_order(&self, policy: AllocationPolicy) -> i64 {
        OrderMutator::next_order(self, policy)
    }
}
