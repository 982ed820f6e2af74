//! # Drafts
//!
//! Form input for each content type. Every draft validates itself before
//! any backend call is made.

use crate::domain::media::MediaFile;
use crate::domain::slug::slugify;
use shared_types::{RecordId, ValidationError};

fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::required(field));
    }
    Ok(())
}

/// Project form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectDraft {
    pub title: String,
    pub subtitle: String,
    pub slug: String,
    pub description: String,
    pub client_name: String,
    pub year: String,
    pub role: String,
    pub external_link: String,
    pub is_featured: bool,
    pub featured_order: i64,
    /// Explicit sort position. `None` leaves the column NULL on create and
    /// keeps the stored value on update.
    pub order: Option<i64>,
    pub thumbnail: Option<MediaFile>,
    pub banner: Option<MediaFile>,
}

impl ProjectDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("title", &self.title)?;
        require("slug", &self.slug)
    }
}

/// Operator answer to the featured-limit prompt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FeaturedConfirmation {
    /// Not asked yet; the limit is checked on submit.
    #[default]
    NotAsked,
    /// The operator accepted exceeding the limit.
    Confirmed,
}

/// News article form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsDraft {
    pub title: String,
    pub subtitle: String,
    pub slug: String,
    pub category_text: String,
    pub photographer: String,
    pub aspect_ratio: String,
    pub featured: bool,
    pub content: String,
    pub image: Option<MediaFile>,
}

impl Default for NewsDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            subtitle: String::new(),
            slug: String::new(),
            category_text: "DESIGN".to_string(),
            photographer: String::new(),
            aspect_ratio: "aspect-square".to_string(),
            featured: false,
            content: String::new(),
            image: None,
        }
    }
}

impl NewsDraft {
    /// Fill the slug from the subtitle.
    pub fn generate_slug(&mut self) {
        self.slug = slugify(&self.subtitle);
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require("title", &self.title)?;
        require("subtitle", &self.subtitle)?;
        require("slug", &self.slug)
    }
}

/// Intro banner form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BannerDraft {
    pub image: Option<MediaFile>,
    pub title_line1: String,
    pub title_line2: String,
    pub button_text: String,
    pub button_link: String,
    pub scroll_text: String,
    pub project_id: Option<RecordId>,
    /// Used on edit; new banners get an allocated slot.
    pub order_index: Option<i64>,
}

/// Slot whose banner carries the call-to-action button.
pub const CALL_TO_ACTION_SLOT: i64 = 3;

impl BannerDraft {
    /// Validate a new banner that will occupy `slot`.
    pub fn validate_new(&self, slot: i64) -> Result<(), ValidationError> {
        if self.image.is_none() {
            return Err(ValidationError::required("image"));
        }
        if slot == CALL_TO_ACTION_SLOT {
            require("title_line1", &self.title_line1)?;
            require("button_text", &self.button_text)?;
            require("button_link", &self.button_link)?;
        }
        Ok(())
    }

    /// Validate an edit of a banner that currently shows `existing_image`.
    pub fn validate_edit(&self, existing_image: &str) -> Result<(), ValidationError> {
        if self.image.is_none() && existing_image.trim().is_empty() {
            return Err(ValidationError::required("image"));
        }
        Ok(())
    }
}

/// Service form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceDraft {
    pub title: String,
    pub description: String,
    /// `None` appends after the existing services.
    pub order_index: Option<i64>,
}

impl ServiceDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("title", &self.title)?;
        require("description", &self.description)
    }
}

/// About page slide form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlideDraft {
    pub image: Option<MediaFile>,
    pub caption: String,
    pub order_index: Option<i64>,
}

impl SlideDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.image.is_none() {
            return Err(ValidationError::required("image"));
        }
        Ok(())
    }
}

/// Files selected for a gallery upload.
pub fn validate_selection(files: &[MediaFile]) -> Result<(), ValidationError> {
    if files.is_empty() {
        return Err(ValidationError::new("images", "select at least one image"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image() -> MediaFile {
        MediaFile::new("a.png", "image/png", vec![1, 2, 3])
    }

    #[test]
    fn test_project_requires_title_and_slug() {
        let mut draft = ProjectDraft {
            title: "  ".into(),
            slug: "atlas".into(),
            ..Default::default()
        };
        assert_eq!(draft.validate().unwrap_err().field, "title");

        draft.title = "Atlas".into();
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_news_slug_from_subtitle() {
        let mut draft = NewsDraft {
            title: "Opening".into(),
            subtitle: "We Moved Downtown!".into(),
            ..Default::default()
        };
        assert_eq!(draft.validate().unwrap_err().field, "slug");

        draft.generate_slug();
        assert_eq!(draft.slug, "we-moved-downtown");
        assert!(draft.validate().is_ok());
        assert_eq!(draft.category_text, "DESIGN");
    }

    #[test]
    fn test_banner_slot_three_needs_call_to_action() {
        let draft = BannerDraft {
            image: Some(image()),
            title_line1: "Hello".into(),
            ..Default::default()
        };
        assert!(draft.validate_new(1).is_ok());
        assert_eq!(draft.validate_new(3).unwrap_err().field, "button_text");
    }

    #[test]
    fn test_banner_needs_image() {
        let draft = BannerDraft::default();
        assert_eq!(draft.validate_new(1).unwrap_err().field, "image");
        assert!(draft.validate_edit("/uploads/old.png").is_ok());
        assert!(draft.validate_edit("").is_err());
    }

    #[test]
    fn test_empty_gallery_selection() {
        assert!(validate_selection(&[]).is_err());
        assert!(validate_selection(&[image()]).is_ok());
    }
}
