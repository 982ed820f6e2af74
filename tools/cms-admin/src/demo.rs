//! Demo backend: seeded in-memory tables, no network.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use cms_02_content::{ContentDependencies, InMemoryMediaStore, InMemoryTableStore, SystemClock};
use serde_json::Value;
use shared_types::{
    AboutSliderItem, IntroBanner, ListQuery, Project, RecordId, Service, StoreError, TableStore,
};

/// Write latency of the demo backend, long enough to see rows in flight.
pub const DEMO_LATENCY: Duration = Duration::from_millis(400);

/// Delays every write of an inner store.
pub struct DelayedTableStore {
    inner: Arc<dyn TableStore>,
    delay: Duration,
}

impl DelayedTableStore {
    pub fn new(inner: Arc<dyn TableStore>, delay: Duration) -> Self {
        Self { inner, delay }
    }

    async fn pause(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

#[async_trait]
impl TableStore for DelayedTableStore {
    async fn list(&self, table: &str, query: &ListQuery) -> Result<Vec<Value>, StoreError> {
        self.inner.list(table, query).await
    }

    async fn get(&self, table: &str, id: &RecordId) -> Result<Value, StoreError> {
        self.inner.get(table, id).await
    }

    async fn insert(&self, table: &str, row: Value) -> Result<Value, StoreError> {
        self.pause().await;
        self.inner.insert(table, row).await
    }

    async fn update(&self, table: &str, id: &RecordId, patch: Value) -> Result<Value, StoreError> {
        self.pause().await;
        self.inner.update(table, id, patch).await
    }

    async fn upsert(&self, table: &str, row: Value) -> Result<Value, StoreError> {
        self.pause().await;
        self.inner.upsert(table, row).await
    }

    async fn delete(&self, table: &str, id: &RecordId) -> Result<(), StoreError> {
        self.pause().await;
        self.inner.delete(table, id).await
    }
}

fn project(title: &str, order: Option<i64>) -> Project {
    Project {
        title: title.to_string(),
        slug: title.to_lowercase().replace(' ', "-"),
        order,
        ..Default::default()
    }
}

fn banner(title: &str, slot: i64) -> IntroBanner {
    IntroBanner {
        image: format!("/uploads/introbanner-{slot}.jpg"),
        title_line1: title.to_string(),
        button_text: "View project".to_string(),
        order_index: Some(slot),
        ..Default::default()
    }
}

fn service(title: &str, order: i64) -> Service {
    Service {
        title: title.to_string(),
        order_index: Some(order),
        ..Default::default()
    }
}

fn slide(caption: &str, order: i64) -> AboutSliderItem {
    AboutSliderItem {
        image_path: format!("/uploads/about-slider-{order}.jpg"),
        caption: caption.to_string(),
        order_index: Some(order),
        ..Default::default()
    }
}

/// In-memory tables with a small portfolio.
pub fn seeded_tables() -> Result<Arc<InMemoryTableStore>, StoreError> {
    let tables = Arc::new(InMemoryTableStore::new());

    tables.seed(&[
        project("Atlas Rebrand", Some(1)),
        project("Birch Editorial", Some(2)),
        project("Cedar Packaging", None),
        project("Delta Campaign", Some(3)),
    ])?;
    // Slot 2 is free.
    tables.seed(&[banner("Quiet design", 1), banner("Work with us", 3)])?;
    tables.seed(&[
        service("Brand identity", 1),
        service("Editorial design", 2),
        service("Packaging", 3),
    ])?;
    tables.seed(&[slide("Studio", 1), slide("Workshop", 2)])?;

    Ok(tables)
}

/// Content dependencies backed by the seeded tables.
pub fn dependencies(latency: Duration) -> Result<ContentDependencies, StoreError> {
    let tables: Arc<dyn TableStore> = seeded_tables()?;

    Ok(ContentDependencies {
        tables: Arc::new(DelayedTableStore::new(tables, latency)),
        uploads: Arc::new(InMemoryMediaStore::new("uploads")),
        images: Arc::new(InMemoryMediaStore::new("images")),
        clock: Arc::new(SystemClock),
    })
}
