//! Shared HTTP client for every backend endpoint.

use parking_lot::RwLock;
use reqwest::{Client, Method, RequestBuilder, Response};
use std::sync::Arc;
use tracing::debug;

use crate::auth::{AuthClient, Session};
use crate::config::BackendConfig;
use crate::error::BackendError;
use crate::rest::RestTableStore;
use crate::storage::BucketMediaStore;

/// State shared by the table, storage and auth adapters.
pub(crate) struct HttpCore {
    pub(crate) client: Client,
    pub(crate) config: BackendConfig,
    pub(crate) session: RwLock<Option<Session>>,
}

impl HttpCore {
    /// A request carrying the `apikey` header and the current bearer token
    /// (the session's access token once signed in, the anon key before).
    pub(crate) fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let bearer = self
            .session
            .read()
            .as_ref()
            .map(|session| session.access_token.clone())
            .unwrap_or_else(|| self.config.anon_key.clone());

        self.client
            .request(method, url)
            .header("apikey", &self.config.anon_key)
            .bearer_auth(bearer)
    }

    /// Send a request and turn non-2xx answers into `BackendError::Status`.
    pub(crate) async fn send(&self, request: RequestBuilder) -> Result<Response, BackendError> {
        let response = request.send().await.map_err(|e| {
            if e.is_connect() {
                BackendError::Connection(format!("Cannot connect to {}", self.config.url))
            } else {
                BackendError::Http(e)
            }
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        debug!(status = status.as_u16(), body = %body, "Backend rejected request");
        Err(BackendError::from_body(status.as_u16(), &body))
    }
}

/// Entry point to the hosted backend.
///
/// Cheap to clone; every adapter handed out shares one connection pool and
/// one auth session.
#[derive(Clone)]
pub struct BackendClient {
    core: Arc<HttpCore>,
}

impl BackendClient {
    /// Build a client. Only the connect phase is bounded by a timeout.
    pub fn new(config: BackendConfig) -> Result<Self, BackendError> {
        config.validate()?;

        let client = Client::builder()
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(BackendError::Http)?;

        Ok(Self {
            core: Arc::new(HttpCore {
                client,
                config,
                session: RwLock::new(None),
            }),
        })
    }

    /// Build a client from `CMS_*` environment variables.
    pub fn from_env() -> Result<Self, BackendError> {
        Self::new(BackendConfig::from_env()?)
    }

    pub fn config(&self) -> &BackendConfig {
        &self.core.config
    }

    /// Table adapter.
    pub fn tables(&self) -> RestTableStore {
        RestTableStore::new(self.core.clone())
    }

    /// Storage adapter for the media bucket (`uploads`).
    pub fn uploads(&self) -> BucketMediaStore {
        self.bucket(&self.core.config.media_bucket)
    }

    /// Storage adapter for the logo bucket (`images`).
    pub fn images(&self) -> BucketMediaStore {
        self.bucket(&self.core.config.images_bucket)
    }

    /// Storage adapter for any bucket.
    pub fn bucket(&self, name: &str) -> BucketMediaStore {
        BucketMediaStore::new(self.core.clone(), name)
    }

    /// Password sign-in and session handling.
    pub fn auth(&self) -> AuthClient {
        AuthClient::new(self.core.clone())
    }
}

impl std::fmt::Debug for BackendClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendClient")
            .field("url", &self.core.config.url)
            .field("signed_in", &self.core.session.read().is_some())
            .finish()
    }
}
