//! Header settings: logo and menu.

use super::ContentService;
use crate::domain::errors::ContentResult;
use crate::domain::media::{logo_object_path, logo_object_path_from_url, validate_logo, MediaFile};
use cms_01_ordering::MenuEditor;
use shared_types::{HeaderSettings, ListQuery, StoreError, TableRecord};
use tracing::{info, warn};

impl ContentService {
    /// Saved header settings, or the default menu when none exist yet.
    pub async fn load_header(&self) -> ContentResult<HeaderSettings> {
        let rows = self
            .tables
            .list(HeaderSettings::TABLE, &ListQuery::new())
            .await?;

        match rows.into_iter().next() {
            Some(row) => {
                let mut settings: HeaderSettings = serde_json::from_value(row).map_err(StoreError::from)?;
                settings.menu_items = MenuEditor::new(settings.menu_items).into_items();
                Ok(settings)
            }
            None => Ok(HeaderSettings {
                menu_items: MenuEditor::default_menu(),
                ..Default::default()
            }),
        }
    }

    /// Save header settings, replacing the logo when a new one is given.
    ///
    /// The logo is validated before anything is sent. Deleting the old logo
    /// is best effort.
    pub async fn save_header(
        &self,
        settings: &HeaderSettings,
        logo: Option<&MediaFile>,
    ) -> ContentResult<HeaderSettings> {
        if let Some(file) = logo {
            validate_logo(file)?;
        }

        let mut settings = settings.clone();
        if let Some(file) = logo {
            if let Some(old_url) = settings.logo_image_url.as_deref().filter(|url| !url.is_empty()) {
                let old_path = logo_object_path_from_url(old_url);
                if let Err(err) = self.images.remove(&old_path).await {
                    warn!(path = %old_path, error = %err, "Failed to delete old logo");
                }
            }

            let path = logo_object_path(&file.file_name, self.clock.now_millis());
            let stored = self
                .images
                .upload(&path, file.bytes.clone(), &file.content_type)
                .await?;
            settings.logo_image_url = Some(self.images.public_url(&stored));
        }
        settings.updated_at = Some(self.clock.now_rfc3339());

        let row = serde_json::to_value(&settings).map_err(StoreError::from)?;
        let saved = self.tables.upsert(HeaderSettings::TABLE, row).await?;
        info!(items = settings.menu_items.len(), "Header settings saved");
        Ok(serde_json::from_value(saved).map_err(StoreError::from)?)
    }
}
