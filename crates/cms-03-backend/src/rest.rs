//! `TableStore` over the PostgREST API (`<url>/rest/v1/<table>`).

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, Response};
use serde_json::Value;
use shared_types::{ListQuery, RecordId, StoreError, TableStore};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::client::HttpCore;
use crate::error::BackendError;
use crate::query::{
    eq_filter, id_params, list_params, render, ACCEPT_OBJECT, PREFER_RETURN, PREFER_UPSERT,
    STATUS_NOT_SINGULAR,
};

/// Remote tables reached over HTTP.
#[derive(Clone)]
pub struct RestTableStore {
    core: Arc<HttpCore>,
}

impl RestTableStore {
    pub(crate) fn new(core: Arc<HttpCore>) -> Self {
        Self { core }
    }

    fn request(&self, method: Method, table: &str) -> RequestBuilder {
        self.core.request(method, &self.core.config.rest_url(table))
    }

    /// Send a single-row request; a "not singular" answer means the id
    /// matched nothing.
    async fn send_single(
        &self,
        request: RequestBuilder,
        table: &str,
        id: Option<&RecordId>,
    ) -> Result<Value, StoreError> {
        let response = self
            .core
            .send(request.header(ACCEPT, ACCEPT_OBJECT))
            .await
            .map_err(|err| match (err.status(), id) {
                (Some(STATUS_NOT_SINGULAR), Some(id)) => StoreError::not_found(table, id),
                _ => {
                    warn!(table = %table, error = %err, "Table request failed");
                    StoreError::from(err)
                }
            })?;
        decode(response).await
    }
}

async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, StoreError> {
    response
        .json()
        .await
        .map_err(|e| StoreError::from(BackendError::Parse(e.to_string())))
}

#[async_trait]
impl TableStore for RestTableStore {
    async fn list(&self, table: &str, query: &ListQuery) -> Result<Vec<Value>, StoreError> {
        let params = list_params(query);
        debug!(table = %table, query = %render(&params), "Listing rows");

        let response = self
            .core
            .send(self.request(Method::GET, table).query(&params))
            .await
            .map_err(|err| {
                warn!(table = %table, error = %err, "List request failed");
                StoreError::from(err)
            })?;
        decode(response).await
    }

    async fn get(&self, table: &str, id: &RecordId) -> Result<Value, StoreError> {
        debug!(table = %table, id = %id, "Fetching row");
        let request = self.request(Method::GET, table).query(&id_params(id));
        self.send_single(request, table, Some(id)).await
    }

    async fn insert(&self, table: &str, row: Value) -> Result<Value, StoreError> {
        debug!(table = %table, "Inserting row");
        let request = self
            .request(Method::POST, table)
            .header("Prefer", PREFER_RETURN)
            .json(&row);
        self.send_single(request, table, None).await
    }

    async fn update(&self, table: &str, id: &RecordId, patch: Value) -> Result<Value, StoreError> {
        debug!(table = %table, id = %id, "Updating row");
        let request = self
            .request(Method::PATCH, table)
            .query(&[("id", eq_filter(id))])
            .header("Prefer", PREFER_RETURN)
            .json(&patch);
        self.send_single(request, table, Some(id)).await
    }

    async fn upsert(&self, table: &str, row: Value) -> Result<Value, StoreError> {
        debug!(table = %table, "Upserting row");
        let request = self
            .request(Method::POST, table)
            .header("Prefer", PREFER_UPSERT)
            .json(&row);
        self.send_single(request, table, None).await
    }

    async fn delete(&self, table: &str, id: &RecordId) -> Result<(), StoreError> {
        debug!(table = %table, id = %id, "Deleting row");
        let request = self
            .request(Method::DELETE, table)
            .query(&[("id", eq_filter(id))])
            .header(CONTENT_TYPE, "application/json");

        self.core.send(request).await.map_err(|err| {
            warn!(table = %table, id = %id, error = %err, "Delete request failed");
            StoreError::from(err)
        })?;
        Ok(())
    }
}
