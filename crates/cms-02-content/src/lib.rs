//! # Content Workflows (cms-02)
//!
//! Per-page workflows of the portfolio admin panel, built on the backend
//! ports from `shared-types` and the ordering core from `cms-01-ordering`.
//!
//! ## Pages
//!
//! | Page | Table(s) | Ordering |
//! |------|----------|----------|
//! | Projects | `projects`, `project_gallery` | free `order`, gallery `sort` |
//! | News | `news` | newest first |
//! | Intro banners | `intro_banners` | fixed slots 1..=3 |
//! | Services | `services` | dense `order_index` |
//! | Header | `header_settings` | dense menu order |
//! | About / Contact / What we do | single-row tables | - |
//!
//! ## Media
//!
//! Uploads are named `<prefix>-<millis>-<random>.<ext>`. Replacing media
//! deletes the old object first; deleting a row deletes its media first.
//! Object deletions never fail a workflow.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::{FixedClock, InMemoryMediaStore, InMemoryTableStore, OperationLog, SystemClock};
pub use domain::errors::{ContentError, ContentResult};
pub use domain::featured::{evaluate_featured, featured_count_excluding, FeaturedCheck, FEATURED_LIMIT};
pub use domain::forms::{
    validate_selection, BannerDraft, FeaturedConfirmation, NewsDraft, ProjectDraft, ServiceDraft,
    SlideDraft, CALL_TO_ACTION_SLOT,
};
pub use domain::media::{
    file_name_from_path, is_video_path, object_name, public_object_url, validate_logo, MediaFile,
    MediaKind, MediaName, MAX_LOGO_BYTES,
};
pub use domain::slug::slugify;
pub use ports::Clock;
pub use service::{ContentDependencies, ContentService, TableOrders};
