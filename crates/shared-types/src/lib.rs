//! # Shared Types Crate
//!
//! This crate contains the content entities, the record traits and the
//! backend ports shared by every CMS crate.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All wire-level row types are defined here,
//!   with the column names the hosted backend uses.
//! - **Explicit Results**: Every backend call returns `Result<T, StoreError>`.
//!   There is no out-of-band error object to forget to check.
//! - **Ports, not clients**: `TableStore` and `MediaStore` describe what the
//!   CMS needs from the backend. HTTP and in-memory adapters live elsewhere.

pub mod entities;
pub mod errors;
pub mod notification;
pub mod record;
pub mod store;

pub use entities::*;
pub use errors::*;
pub use notification::{Notification, NotificationLevel};
pub use record::{Orderable, RecordId, TableRecord};
pub use store::{ListQuery, MediaStore, OrderBy, TableStore, TableStoreExt};
