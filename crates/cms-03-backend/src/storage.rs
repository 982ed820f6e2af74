//! `MediaStore` over the storage API (`<url>/storage/v1/object/<bucket>`).

use async_trait::async_trait;
use reqwest::header::{CACHE_CONTROL, CONTENT_TYPE};
use reqwest::Method;
use serde_json::json;
use shared_types::{MediaStore, StoreError};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::client::HttpCore;

/// Objects are cached by the CDN for an hour.
const CACHE_MAX_AGE: &str = "max-age=3600";

/// One storage bucket.
#[derive(Clone)]
pub struct BucketMediaStore {
    core: Arc<HttpCore>,
    bucket: String,
}

impl BucketMediaStore {
    pub(crate) fn new(core: Arc<HttpCore>, bucket: impl Into<String>) -> Self {
        Self {
            core,
            bucket: bucket.into(),
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

#[async_trait]
impl MediaStore for BucketMediaStore {
    async fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StoreError> {
        let path = path.trim_start_matches('/');
        let size = bytes.len();
        let url = self.core.config.object_url(&self.bucket, path);

        let request = self
            .core
            .request(Method::POST, &url)
            .header(CONTENT_TYPE, content_type)
            .header(CACHE_CONTROL, CACHE_MAX_AGE)
            .header("x-upsert", "false")
            .body(bytes);

        self.core.send(request).await.map_err(|err| {
            warn!(bucket = %self.bucket, path = %path, error = %err, "Upload failed");
            StoreError::from(err)
        })?;

        info!(bucket = %self.bucket, path = %path, size, "Uploaded object");
        Ok(path.to_string())
    }

    async fn remove(&self, path: &str) -> Result<(), StoreError> {
        let path = path.trim_start_matches('/');
        debug!(bucket = %self.bucket, path = %path, "Removing object");

        let request = self
            .core
            .request(Method::DELETE, &self.core.config.bucket_url(&self.bucket))
            .json(&json!({ "prefixes": [path] }));

        self.core.send(request).await.map_err(|err| {
            warn!(bucket = %self.bucket, path = %path, error = %err, "Remove failed");
            StoreError::from(err)
        })?;
        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        self.core.config.public_object_url(&self.bucket, path)
    }
}
