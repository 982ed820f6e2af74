//! Intro banner workflows.
//!
//! Banners occupy the fixed slots `1..=3`. A new banner takes the first
//! free slot; creation is refused once every slot is used.

use super::ContentService;
use crate::domain::errors::{ContentError, ContentResult};
use crate::domain::forms::BannerDraft;
use crate::domain::media::MediaKind;
use cms_01_ordering::{first_free_slot, has_free_slot, BANNER_CAPACITY};
use shared_types::{IntroBanner, ListQuery, Orderable, RecordId, StoreError, TableStoreExt};
use tracing::info;

impl ContentService {
    /// Newest first; the admin list re-sorts by slot.
    pub async fn list_banners(&self) -> ContentResult<Vec<IntroBanner>> {
        let query = ListQuery::new().order_by("id", false);
        Ok(self.tables.list_records::<IntroBanner>(&query).await?)
    }

    pub async fn get_banner(&self, id: &RecordId) -> ContentResult<IntroBanner> {
        Ok(self.tables.get_record::<IntroBanner>(id).await?)
    }

    /// Slot the next banner would take, or `None` when all are used.
    pub async fn next_banner_slot(&self) -> ContentResult<Option<i64>> {
        let banners = self.list_banners().await?;
        if !has_free_slot(banners.len(), BANNER_CAPACITY) {
            return Ok(None);
        }
        let slot = first_free_slot(banners.iter().filter_map(Orderable::order), BANNER_CAPACITY);
        Ok((slot <= i64::from(BANNER_CAPACITY)).then_some(slot))
    }

    pub async fn create_banner(&self, draft: &BannerDraft) -> ContentResult<IntroBanner> {
        let slot = self
            .next_banner_slot()
            .await?
            .ok_or(ContentError::CapacityReached {
                capacity: BANNER_CAPACITY,
            })?;
        draft.validate_new(slot)?;

        let mut image = String::new();
        if let Some(file) = &draft.image {
            image = self.upload_media(MediaKind::IntroBanner, file).await?.stored_path();
        }

        let banner = IntroBanner {
            id: None,
            image,
            title_line1: draft.title_line1.clone(),
            title_line2: draft.title_line2.clone(),
            button_text: draft.button_text.clone(),
            button_link: draft.button_link.clone(),
            scroll_text: draft.scroll_text.clone(),
            project_id: draft.project_id.clone(),
            order_index: Some(slot),
        };
        let created = self.tables.insert_record(&banner).await?;
        info!(slot, "Intro banner created");
        Ok(created)
    }

    pub async fn update_banner(&self, id: &RecordId, draft: &BannerDraft) -> ContentResult<IntroBanner> {
        let existing = self.get_banner(id).await?;
        draft.validate_edit(&existing.image)?;

        let mut image = existing.image.clone();
        if let Some(file) = &draft.image {
            if !existing.image.is_empty() {
                self.remove_media(&existing.image).await;
            }
            image = self.upload_media(MediaKind::IntroBanner, file).await?.stored_path();
        }

        let banner = IntroBanner {
            id: None,
            image,
            title_line1: draft.title_line1.clone(),
            title_line2: draft.title_line2.clone(),
            button_text: draft.button_text.clone(),
            button_link: draft.button_link.clone(),
            scroll_text: draft.scroll_text.clone(),
            project_id: draft.project_id.clone(),
            order_index: Some(draft.order_index.unwrap_or(1)),
        };
        let patch = serde_json::to_value(&banner).map_err(StoreError::from)?;
        Ok(self.tables.update_record::<IntroBanner>(id, patch).await?)
    }

    /// Delete a banner's image, then the banner. The freed slot is reused
    /// by the next creation; other banners keep their slots.
    pub async fn delete_banner(&self, id: &RecordId) -> ContentResult<()> {
        let banner = self.get_banner(id).await?;
        if !banner.image.is_empty() {
            self.remove_media(&banner.image).await;
        }
        self.tables.delete_record::<IntroBanner>(id).await?;
        info!(id = %id, slot = ?banner.order_index, "Intro banner deleted");
        Ok(())
    }
}
