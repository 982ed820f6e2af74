//! Content Service - per-page workflows of the admin panel
//!
//! # Rules
//! - Drafts are validated before any backend call.
//! - Every backend result is checked; failures surface as `ContentError`.
//! - Row deletions must succeed. Deleting the media behind a row is best
//!   effort and only logged on failure.
//!
//! Workflows are split by page: `projects`, `gallery`, `news`, `banners`,
//! `services`, `header` and `pages` (about, contact, what-we-do copy).

mod banners;
mod gallery;
mod header;
mod news;
mod pages;
mod projects;
mod services;


use crate::domain::errors::ContentResult;
use crate::domain::media::{object_name, MediaFile, MediaKind, MediaName};
use crate::ports::Clock;
use cms_01_ordering::{MutatorConfig, Notifier, OrderMutator, TableOrderStore};
use shared_types::{ListQuery, MediaStore, Orderable, TableStore};
use std::sync::Arc;
use tracing::{debug, warn};

/// Order store used by the admin panel's reorderable lists.
pub type TableOrders = TableOrderStore<dyn TableStore>;

/// Dependencies for ContentService
pub struct ContentDependencies {
    pub tables: Arc<dyn TableStore>,
    /// Bucket for page media (`uploads`).
    pub uploads: Arc<dyn MediaStore>,
    /// Bucket for header logos (`images`).
    pub images: Arc<dyn MediaStore>,
    pub clock: Arc<dyn Clock>,
}

/// Content Service
pub struct ContentService {
    tables: Arc<dyn TableStore>,
    uploads: Arc<dyn MediaStore>,
    images: Arc<dyn MediaStore>,
    clock: Arc<dyn Clock>,
}

impl ContentService {
    pub fn new(deps: ContentDependencies) -> Self {
        Self {
            tables: deps.tables,
            uploads: deps.uploads,
            images: deps.images,
            clock: deps.clock,
        }
    }

    pub fn tables(&self) -> &Arc<dyn TableStore> {
        &self.tables
    }

    /// Order store over `R`'s table, ordered by its order column.
    pub fn order_store(&self) -> TableOrders {
        TableOrderStore::new(self.tables.clone())
    }

    /// Order store over a filtered list (e.g. one project's gallery).
    pub fn order_store_with(&self, query: ListQuery) -> TableOrders {
        TableOrderStore::with_query(self.tables.clone(), query)
    }

    /// Order mutator for `R`'s table.
    pub fn mutator<R: Orderable>(
        &self,
        notifier: Arc<dyn Notifier>,
        config: MutatorConfig,
    ) -> OrderMutator<R, TableOrders> {
        OrderMutator::new(Arc::new(self.order_store()), notifier, config)
    }

    /// Upload a file to the uploads bucket under a generated name.
    async fn upload_media(&self, kind: MediaKind, file: &MediaFile) -> ContentResult<MediaName> {
        let name = MediaName::generate(
            kind.prefix(),
            &file.file_name,
            self.clock.now_millis(),
            &mut rand::thread_rng(),
        );
        self.uploads
            .upload(name.as_str(), file.bytes.clone(), &file.content_type)
            .await?;
        debug!(name = name.as_str(), size = file.size(), "Uploaded media");
        Ok(name)
    }

    /// Remove the object behind a stored media reference, logging failures.
    async fn remove_media(&self, stored: &str) {
        let name = object_name(stored);
        if name.is_empty() {
            return;
        }
        if let Err(err) = self.uploads.remove(name).await {
            warn!(object = name, error = %err, "Failed to delete media object");
        }
    }
}
