//! # Hosted Backend Adapters (cms-03)
//!
//! HTTP implementations of the `TableStore` and `MediaStore` ports plus
//! password sign-in, for a PostgREST + object storage backend.
//!
//! ## Endpoints
//!
//! | Concern | Endpoint |
//! |---------|----------|
//! | Tables | `<url>/rest/v1/<table>` |
//! | Media | `<url>/storage/v1/object/<bucket>/<path>` |
//! | Public media | `<url>/storage/v1/object/public/<bucket>/<path>` |
//! | Auth | `<url>/auth/v1/{token,logout,user}` |
//!
//! Every request carries `apikey: <anon key>` and
//! `Authorization: Bearer <session token or anon key>`.
//!
//! ## Usage
//!
//! ```ignore
//! let backend = BackendClient::from_env()?;
//! backend.auth().sign_in(&email, &password).await?;
//! let deps = ContentDependencies {
//!     tables: Arc::new(backend.tables()),
//!     uploads: Arc::new(backend.uploads()),
//!     images: Arc::new(backend.images()),
//!     clock: Arc::new(SystemClock),
//! };
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod query;
pub mod rest;
pub mod storage;

pub use auth::{AuthClient, AuthUser, Session};
pub use client::BackendClient;
pub use config::BackendConfig;
pub use error::BackendError;
pub use rest::RestTableStore;
pub use storage::BucketMediaStore;
