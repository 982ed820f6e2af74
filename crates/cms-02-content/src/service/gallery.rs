//! Project gallery and about page gallery workflows.

use super::ContentService;
use crate::domain::errors::ContentResult;
use crate::domain::forms::validate_selection;
use crate::domain::media::{MediaFile, MediaKind};
use shared_types::{
    AboutGalleryImage, ListQuery, ProjectGalleryImage, RecordId, TableStoreExt,
};
use tracing::info;

impl ContentService {
    /// Query for one project's gallery, in `sort` order.
    pub fn gallery_query(project_id: &RecordId) -> ListQuery {
        ListQuery::new()
            .eq("project_id", project_id)
            .order_by("sort", true)
    }

    pub async fn project_gallery(&self, project_id: &RecordId) -> ContentResult<Vec<ProjectGalleryImage>> {
        Ok(self
            .tables
            .list_records::<ProjectGalleryImage>(&Self::gallery_query(project_id))
            .await?)
    }

    /// Upload images and append them to a project's gallery.
    ///
    /// Each new row's `sort` continues after the existing images. Stops at
    /// the first failure; rows created before it are kept.
    pub async fn upload_gallery(
        &self,
        project_id: &RecordId,
        files: &[MediaFile],
    ) -> ContentResult<Vec<ProjectGalleryImage>> {
        validate_selection(files)?;

        let existing = self.project_gallery(project_id).await?.len() as i64;
        let mut created = Vec::with_capacity(files.len());
        for file in files {
            let name = self.upload_media(MediaKind::ProjectGallery, file).await?;
            let row = ProjectGalleryImage {
                id: None,
                project_id: Some(project_id.clone()),
                image_path: name.stored_path(),
                sort: Some(existing + created.len() as i64),
            };
            created.push(self.tables.insert_record(&row).await?);
        }

        info!(project_id = %project_id, count = created.len(), "Gallery images added");
        Ok(created)
    }

    /// Delete one gallery image: object first, then the row.
    pub async fn delete_gallery_image(&self, id: &RecordId) -> ContentResult<()> {
        let image = self.tables.get_record::<ProjectGalleryImage>(id).await?;
        self.remove_media(&image.image_path).await;
        self.tables.delete_record::<ProjectGalleryImage>(id).await?;
        Ok(())
    }

    pub async fn about_gallery(&self) -> ContentResult<Vec<AboutGalleryImage>> {
        let query = ListQuery::new().order_by("created_at", false);
        Ok(self.tables.list_records::<AboutGalleryImage>(&query).await?)
    }

    pub async fn add_about_images(&self, files: &[MediaFile]) -> ContentResult<Vec<AboutGalleryImage>> {
        validate_selection(files)?;

        let mut created = Vec::with_capacity(files.len());
        for file in files {
            let name = self.upload_media(MediaKind::AboutGallery, file).await?;
            let row = AboutGalleryImage {
                image_path: name.stored_path(),
                ..Default::default()
            };
            created.push(self.tables.insert_record(&row).await?);
        }
        Ok(created)
    }

    pub async fn delete_about_image(&self, id: &RecordId) -> ContentResult<()> {
        let image = self.tables.get_record::<AboutGalleryImage>(id).await?;
        self.remove_media(&image.image_path).await;
        self.tables.delete_record::<AboutGalleryImage>(id).await?;
        Ok(())
    }
}
