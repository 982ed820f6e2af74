//! # Backend Ports
//!
//! The CMS talks to exactly two external collaborators: a tabular store and
//! an object store for media. Both are described here as async traits so
//! that the HTTP adapters and the in-memory test adapters are
//! interchangeable.
//!
//! The table port works on `serde_json::Value` rows to stay object-safe;
//! `TableStoreExt` layers typed helpers on top for any `TableRecord`.

use crate::errors::StoreError;
use crate::record::{RecordId, TableRecord};
use async_trait::async_trait;
use serde_json::Value;

/// One `ORDER BY` term of a list query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub column: String,
    pub ascending: bool,
    /// Rows with a NULL value go last regardless of direction.
    pub nulls_last: bool,
}

/// Filters and ordering for a list request.
///
/// Only equality filters are needed by the admin panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub filters: Vec<(String, String)>,
    pub order: Vec<OrderBy>,
}

impl ListQuery {
    /// Unfiltered, server-ordered query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an equality filter.
    pub fn eq(mut self, column: impl Into<String>, value: impl ToString) -> Self {
        self.filters.push((column.into(), value.to_string()));
        self
    }

    /// Add an ordering term.
    pub fn order_by(mut self, column: impl Into<String>, ascending: bool) -> Self {
        self.order.push(OrderBy {
            column: column.into(),
            ascending,
            nulls_last: false,
        });
        self
    }

    /// Add an ordering term that places NULLs last.
    pub fn order_by_nulls_last(mut self, column: impl Into<String>, ascending: bool) -> Self {
        self.order.push(OrderBy {
            column: column.into(),
            ascending,
            nulls_last: true,
        });
        self
    }
}

/// Remote tabular store (one collection per table).
#[async_trait]
pub trait TableStore: Send + Sync {
    /// List rows of a table.
    async fn list(&self, table: &str, query: &ListQuery) -> Result<Vec<Value>, StoreError>;

    /// Fetch exactly one row by primary key.
    async fn get(&self, table: &str, id: &RecordId) -> Result<Value, StoreError>;

    /// Insert a row and return the stored representation.
    async fn insert(&self, table: &str, row: Value) -> Result<Value, StoreError>;

    /// Apply a partial update to one row and return the stored representation.
    async fn update(&self, table: &str, id: &RecordId, patch: Value) -> Result<Value, StoreError>;

    /// Insert or merge a row keyed by its primary key.
    async fn upsert(&self, table: &str, row: Value) -> Result<Value, StoreError>;

    /// Delete one row by primary key.
    async fn delete(&self, table: &str, id: &RecordId) -> Result<(), StoreError>;
}

/// Typed helpers over `TableStore`.
#[async_trait]
pub trait TableStoreExt: TableStore {
    /// List and decode rows of `R`'s table.
    async fn list_records<R: TableRecord>(&self, query: &ListQuery) -> Result<Vec<R>, StoreError> {
        let rows = self.list(R::TABLE, query).await?;
        rows.into_iter()
            .map(|row| serde_json::from_value(row).map_err(StoreError::from))
            .collect()
    }

    /// Fetch and decode one row of `R`'s table.
    async fn get_record<R: TableRecord>(&self, id: &RecordId) -> Result<R, StoreError> {
        let row = self.get(R::TABLE, id).await?;
        Ok(serde_json::from_value(row)?)
    }

    /// Insert a record and decode the stored representation.
    async fn insert_record<R: TableRecord>(&self, record: &R) -> Result<R, StoreError> {
        let row = serde_json::to_value(record)?;
        let stored = self.insert(R::TABLE, row).await?;
        Ok(serde_json::from_value(stored)?)
    }

    /// Patch a record and decode the stored representation.
    async fn update_record<R: TableRecord>(
        &self,
        id: &RecordId,
        patch: Value,
    ) -> Result<R, StoreError> {
        let stored = self.update(R::TABLE, id, patch).await?;
        Ok(serde_json::from_value(stored)?)
    }

    /// Delete a record of `R`'s table.
    async fn delete_record<R: TableRecord>(&self, id: &RecordId) -> Result<(), StoreError> {
        self.delete(R::TABLE, id).await
    }
}

impl<T: TableStore + ?Sized> TableStoreExt for T {}

/// Hosted object storage bucket for media files.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Upload bytes under `path` and return the stored object path.
    async fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StoreError>;

    /// Remove the object stored under `path`.
    async fn remove(&self, path: &str) -> Result<(), StoreError>;

    /// Resolve a stored path to a fetchable URL.
    fn public_url(&self, path: &str) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_query_builder_keeps_term_order() {
        let query = ListQuery::new()
            .eq("project_id", 12)
            .order_by_nulls_last("order", true)
            .order_by("created_at", false);

        assert_eq!(query.filters, vec![("project_id".to_string(), "12".to_string())]);
        assert_eq!(query.order.len(), 2);
        assert!(query.order[0].nulls_last);
        assert_eq!(query.order[1].column, "created_at");
        assert!(!query.order[1].ascending);
    }
}
