//! `OrderStore` backed by any `TableStore`.

use crate::ports::outbound::OrderStore;
use async_trait::async_trait;
use serde_json::{Map, Value};
use shared_types::{ListQuery, Orderable, RecordId, StoreError, TableStore, TableStoreExt};
use std::sync::Arc;

/// Persists order values as single-column patches on the record's table.
pub struct TableOrderStore<S: ?Sized> {
    tables: Arc<S>,
    query: Option<ListQuery>,
}

impl<S: TableStore + ?Sized> TableOrderStore<S> {
    /// Load records ordered by their order column, NULLs last.
    pub fn new(tables: Arc<S>) -> Self {
        Self {
            tables,
            query: None,
        }
    }

    /// Load records with a custom query (filters, secondary ordering).
    pub fn with_query(tables: Arc<S>, query: ListQuery) -> Self {
        Self {
            tables,
            query: Some(query),
        }
    }
}

/// `{ "<order column>": order }`
pub fn order_patch<R: Orderable>(order: i64) -> Value {
    let mut patch = Map::new();
    patch.insert(R::ORDER_FIELD.to_string(), Value::from(order));
    Value::Object(patch)
}

#[async_trait]
impl<R, S> OrderStore<R> for TableOrderStore<S>
where
    R: Orderable,
    S: TableStore + ?Sized,
{
    async fn load_all(&self) -> Result<Vec<R>, StoreError> {
        match &self.query {
            Some(query) => self.tables.list_records::<R>(query).await,
            None => {
                let query = ListQuery::new().order_by_nulls_last(R::ORDER_FIELD, true);
                self.tables.list_records::<R>(&query).await
            }
        }
    }

    async fn persist_order(&self, id: &RecordId, order: i64) -> Result<(), StoreError> {
        self.tables
            .update(R::TABLE, id, order_patch::<R>(order))
            .await
            .map(|_| ())
    }

    async fn fetch(&self, id: &RecordId) -> Result<R, StoreError> {
        self.tables.get_record::<R>(id).await
    }
}
