//! News workflows.
//!
//! News rows store the bare object name in `image_path`, not `/uploads/...`.

use super::ContentService;
use crate::domain::errors::ContentResult;
use crate::domain::forms::NewsDraft;
use crate::domain::media::MediaKind;
use shared_types::{ListQuery, NewsArticle, RecordId, TableStoreExt};
use tracing::info;

impl ContentService {
    /// Newest first.
    pub async fn list_news(&self) -> ContentResult<Vec<NewsArticle>> {
        let query = ListQuery::new().order_by("created_at", false);
        Ok(self.tables.list_records::<NewsArticle>(&query).await?)
    }

    pub async fn get_news(&self, id: &RecordId) -> ContentResult<NewsArticle> {
        Ok(self.tables.get_record::<NewsArticle>(id).await?)
    }

    fn article_from_draft(draft: &NewsDraft, image_path: Option<String>) -> NewsArticle {
        NewsArticle {
            id: None,
            title: draft.title.clone(),
            subtitle: draft.subtitle.clone(),
            slug: draft.slug.clone(),
            category_text: draft.category_text.clone(),
            photographer: draft.photographer.clone(),
            aspect_ratio: draft.aspect_ratio.clone(),
            featured: draft.featured,
            content: draft.content.clone(),
            image_path,
            created_at: None,
        }
    }

    pub async fn create_news(&self, draft: &NewsDraft) -> ContentResult<NewsArticle> {
        draft.validate()?;

        let image_path = match &draft.image {
            Some(file) => Some(self.upload_media(MediaKind::News, file).await?.into_string()),
            None => None,
        };
        let created = self
            .tables
            .insert_record(&Self::article_from_draft(draft, image_path))
            .await?;
        info!(slug = %created.slug, "News article created");
        Ok(created)
    }

    /// Update an article; a new image replaces and deletes the previous one.
    pub async fn update_news(&self, id: &RecordId, draft: &NewsDraft) -> ContentResult<NewsArticle> {
        draft.validate()?;

        let existing = self.get_news(id).await?;
        let mut image_path = existing.image_path.clone();
        if let Some(file) = &draft.image {
            if let Some(old) = existing.image_path.as_deref().filter(|old| !old.is_empty()) {
                self.remove_media(old).await;
            }
            image_path = Some(self.upload_media(MediaKind::News, file).await?.into_string());
        }

        let patch = serde_json::to_value(Self::article_from_draft(draft, image_path))
            .map_err(shared_types::StoreError::from)?;
        let updated = self.tables.update_record::<NewsArticle>(id, patch).await?;
        info!(id = %id, "News article updated");
        Ok(updated)
    }

    pub async fn delete_news(&self, id: &RecordId) -> ContentResult<()> {
        let article = self.get_news(id).await?;
        if let Some(image) = article.image_path.as_deref() {
            self.remove_media(image).await;
        }
        self.tables.delete_record::<NewsArticle>(id).await?;
        Ok(())
    }
}
