//! Project workflows.

use super::ContentService;
use crate::domain::errors::{ContentError, ContentResult};
use crate::domain::featured::{evaluate_featured, FeaturedCheck};
use crate::domain::forms::{FeaturedConfirmation, ProjectDraft};
use crate::domain::media::MediaKind;
use shared_types::{
    ListQuery, Project, ProjectGalleryImage, RecordId, TableRecord, TableStoreExt,
};
use tracing::{info, warn};

fn projects_query() -> ListQuery {
    ListQuery::new()
        .order_by_nulls_last("order", true)
        .order_by("created_at", false)
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl ContentService {
    /// Projects ordered for the admin list.
    pub async fn list_projects(&self) -> ContentResult<Vec<Project>> {
        Ok(self.tables.list_records::<Project>(&projects_query()).await?)
    }

    pub async fn get_project(&self, id: &RecordId) -> ContentResult<Project> {
        Ok(self.tables.get_record::<Project>(id).await?)
    }

    /// Check the featured limit before ticking "featured" for `slug`.
    ///
    /// Returns `Unavailable` when the count cannot be fetched; the toggle
    /// should then be refused.
    pub async fn check_featured(&self, slug: &str) -> FeaturedCheck {
        match self.tables.list_records::<Project>(&projects_query()).await {
            Ok(projects) => evaluate_featured(&projects, slug),
            Err(err) => {
                warn!(slug, error = %err, "Could not count featured projects");
                FeaturedCheck::Unavailable
            }
        }
    }

    /// Featured check on submit. A failed count does not block submission.
    async fn guard_featured(&self, draft: &ProjectDraft, confirmation: FeaturedConfirmation) -> ContentResult<()> {
        if !draft.is_featured || confirmation == FeaturedConfirmation::Confirmed {
            return Ok(());
        }
        match self.check_featured(&draft.slug).await {
            FeaturedCheck::NeedsConfirmation { current } => Err(ContentError::FeaturedLimit { current }),
            FeaturedCheck::Allowed | FeaturedCheck::Unavailable => Ok(()),
        }
    }

    fn project_from_draft(draft: &ProjectDraft) -> Project {
        Project {
            id: None,
            title: draft.title.clone(),
            subtitle: draft.subtitle.clone(),
            slug: draft.slug.clone(),
            description: draft.description.clone(),
            client_name: non_blank(&draft.client_name),
            year: non_blank(&draft.year),
            role: non_blank(&draft.role),
            external_link: non_blank(&draft.external_link),
            is_featured: draft.is_featured,
            featured_order: draft.featured_order,
            order: draft.order,
            thumbnail_media: None,
            banner_media: None,
            created_at: None,
        }
    }

    /// Create a project, uploading its thumbnail and banner first.
    pub async fn create_project(
        &self,
        draft: &ProjectDraft,
        confirmation: FeaturedConfirmation,
    ) -> ContentResult<Project> {
        draft.validate()?;
        self.guard_featured(draft, confirmation).await?;

        let mut project = Self::project_from_draft(draft);
        if let Some(file) = &draft.thumbnail {
            project.thumbnail_media = Some(self.upload_media(MediaKind::ProjectThumbnail, file).await?.stored_path());
        }
        if let Some(file) = &draft.banner {
            project.banner_media = Some(self.upload_media(MediaKind::ProjectBanner, file).await?.stored_path());
        }

        let created = self.tables.insert_record(&project).await?;
        info!(slug = %created.slug, "Project created");
        Ok(created)
    }

    /// Update a project. New media replaces (and deletes) the old objects;
    /// media not re-selected is kept. The stored order is kept unless the
    /// draft sets one.
    pub async fn update_project(
        &self,
        id: &RecordId,
        draft: &ProjectDraft,
        confirmation: FeaturedConfirmation,
    ) -> ContentResult<Project> {
        draft.validate()?;
        self.guard_featured(draft, confirmation).await?;

        let existing = self.get_project(id).await?;
        let mut project = Self::project_from_draft(draft);
        project.thumbnail_media = existing.thumbnail_media.clone();
        project.banner_media = existing.banner_media.clone();
        project.order = draft.order.or(existing.order);

        if let Some(file) = &draft.thumbnail {
            if let Some(old) = &existing.thumbnail_media {
                self.remove_media(old).await;
            }
            project.thumbnail_media = Some(self.upload_media(MediaKind::ProjectThumbnail, file).await?.stored_path());
        }
        if let Some(file) = &draft.banner {
            if let Some(old) = &existing.banner_media {
                self.remove_media(old).await;
            }
            project.banner_media = Some(self.upload_media(MediaKind::ProjectBanner, file).await?.stored_path());
        }

        let patch = serde_json::to_value(&project).map_err(shared_types::StoreError::from)?;
        let updated = self.tables.update_record::<Project>(id, patch).await?;
        info!(id = %id, slug = %updated.slug, "Project updated");
        Ok(updated)
    }

    /// Delete a project with its gallery and media.
    ///
    /// Order: gallery objects and rows, then thumbnail and banner objects,
    /// then the project row. Object deletions are best effort.
    pub async fn delete_project(&self, id: &RecordId) -> ContentResult<()> {
        let project = self.get_project(id).await?;
        let gallery = self.project_gallery(id).await?;

        for image in &gallery {
            self.remove_media(&image.image_path).await;
            if let Some(image_id) = image.id() {
                self.tables.delete_record::<ProjectGalleryImage>(image_id).await?;
            }
        }
        if let Some(thumbnail) = &project.thumbnail_media {
            self.remove_media(thumbnail).await;
        }
        if let Some(banner) = &project.banner_media {
            self.remove_media(banner).await;
        }

        self.tables.delete_record::<Project>(id).await?;
        info!(id = %id, gallery = gallery.len(), "Project deleted");
        Ok(())
    }
}
