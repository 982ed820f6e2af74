//! Binds one reorderable table to the app model.

use std::sync::Arc;

use cms_01_ordering::{
    has_free_slot, AllocationPolicy, ListState, MutationOutcome, MutatorConfig, Notifier,
    OrderingApi, OrderingError, QueueNotifier,
};
use cms_02_content::ContentService;
use shared_types::{AboutSliderItem, IntroBanner, Project, RecordId, Service};

use crate::domain::{App, TableKind};

/// The order mutator of the table on screen, plus the queue its
/// notifications land in.
#[derive(Clone)]
pub struct Panel {
    table: TableKind,
    api: Arc<dyn OrderingApi>,
    notifier: Arc<QueueNotifier>,
}

impl Panel {
    pub fn open(content: &ContentService, table: TableKind, config: MutatorConfig) -> Self {
        let notifier = Arc::new(QueueNotifier::new());
        let sink: Arc<dyn Notifier> = notifier.clone();

        let api: Arc<dyn OrderingApi> = match table {
            TableKind::Projects => Arc::new(content.mutator::<Project>(sink, config)),
            TableKind::Banners => Arc::new(content.mutator::<IntroBanner>(sink, config)),
            TableKind::Services => Arc::new(content.mutator::<Service>(sink, config)),
            TableKind::Slider => Arc::new(content.mutator::<AboutSliderItem>(sink, config)),
        };

        Self {
            table,
            api,
            notifier,
        }
    }

    pub fn table(&self) -> TableKind {
        self.table
    }

    /// Re-fetch the table.
    pub async fn refresh(&self) -> Result<ListState, OrderingError> {
        self.api.reload().await
    }

    /// Persist a new order value for one row.
    pub async fn commit(&self, id: &RecordId, order: i64) -> Result<MutationOutcome, OrderingError> {
        self.api.change_order(id, order).await
    }

    /// Copy rows, the next order value and queued notifications into the app.
    ///
    /// `next_order` is `None` when a slotted table has no free slot left.
    pub fn sync(&self, app: &mut App) {
        let rows = self.api.rows();
        app.next_order = match self.table.allocation() {
            AllocationPolicy::Slots { capacity } if !has_free_slot(rows.len(), capacity) => None,
            policy => Some(self.api.next_order(policy)),
        };
        app.set_rows(rows);
        for notification in self.notifier.drain() {
            app.notify(notification);
        }
    }
}
