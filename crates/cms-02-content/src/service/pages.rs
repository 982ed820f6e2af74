//! Page copy (single-row tables) and the about page slider.

use super::ContentService;
use crate::domain::errors::{ContentError, ContentResult};
use crate::domain::forms::SlideDraft;
use crate::domain::media::MediaKind;
use cms_01_ordering::next_dense_order;
use serde_json::{Map, Value};
use shared_types::{
    AboutSliderItem, ListQuery, PageContent, RecordId, SingletonTable, StoreError, TableStoreExt,
};
use tracing::info;

impl ContentService {
    /// The single row of a page-copy table, if it exists.
    pub async fn page_content(&self, page: SingletonTable) -> ContentResult<Option<PageContent>> {
        let rows = self.tables.list(page.table(), &ListQuery::new()).await?;
        rows.into_iter()
            .next()
            .map(|row| {
                serde_json::from_value::<PageContent>(row)
                    .map_err(|err| ContentError::from(StoreError::from(err)))
            })
            .transpose()
    }

    /// Update the existing row, or insert one when the table is empty.
    pub async fn save_page_content(
        &self,
        page: SingletonTable,
        fields: Map<String, Value>,
    ) -> ContentResult<PageContent> {
        let existing = self.page_content(page).await?;

        let saved = match existing.and_then(|content| content.id) {
            Some(id) => {
                self.tables
                    .update(page.table(), &id, Value::Object(fields))
                    .await?
            }
            None => self.tables.insert(page.table(), Value::Object(fields)).await?,
        };
        info!(table = page.table(), "Page content saved");
        Ok(serde_json::from_value(saved).map_err(StoreError::from)?)
    }

    pub async fn list_slides(&self) -> ContentResult<Vec<AboutSliderItem>> {
        let query = ListQuery::new().order_by("order_index", true);
        Ok(self.tables.list_records::<AboutSliderItem>(&query).await?)
    }

    pub async fn create_slide(&self, draft: &SlideDraft) -> ContentResult<AboutSliderItem> {
        draft.validate()?;

        let order_index = match draft.order_index {
            Some(order) => order,
            None => next_dense_order(self.list_slides().await?.len()),
        };
        let mut image_path = String::new();
        if let Some(file) = &draft.image {
            image_path = self.upload_media(MediaKind::AboutSlider, file).await?.stored_path();
        }

        let slide = AboutSliderItem {
            id: None,
            image_path,
            caption: draft.caption.clone(),
            order_index: Some(order_index),
        };
        Ok(self.tables.insert_record(&slide).await?)
    }

    pub async fn delete_slide(&self, id: &RecordId) -> ContentResult<()> {
        let slide = self.tables.get_record::<AboutSliderItem>(id).await?;
        if !slide.image_path.is_empty() {
            self.remove_media(&slide.image_path).await;
        }
        self.tables.delete_record::<AboutSliderItem>(id).await?;
        Ok(())
    }
}
