//! # Content Entities
//!
//! Row types of the portfolio website's backend, with the backend's column
//! names.
//!
//! ## Clusters
//!
//! - **Work**: `Project`, `ProjectGalleryImage`
//! - **Home page**: `IntroBanner`, `Service`
//! - **Editorial**: `NewsArticle`
//! - **About**: `AboutSliderItem`, `AboutGalleryImage`, `PageContent`
//! - **Chrome**: `HeaderSettings`, `MenuItem`

use crate::record::{Orderable, RecordId, TableRecord};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Implements `TableRecord` (and `Orderable` when an order column is given).
macro_rules! table_record {
    ($ty:ty, $table:literal) => {
        impl TableRecord for $ty {
            const TABLE: &'static str = $table;

            fn id(&self) -> Option<&RecordId> {
                self.id.as_ref()
            }
        }
    };
    ($ty:ty, $table:literal, order = $field:ident, label = $label:ident) => {
        table_record!($ty, $table);

        impl Orderable for $ty {
            const ORDER_FIELD: &'static str = stringify!($field);

            fn order(&self) -> Option<i64> {
                self.$field
            }

            fn set_order(&mut self, order: Option<i64>) {
                self.$field = order;
            }

            fn label(&self) -> &str {
                &self.$label
            }
        }
    };
}

// =============================================================================
// WORK
// =============================================================================

/// A portfolio project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub title: String,
    pub subtitle: String,
    pub slug: String,
    pub description: String,
    pub client_name: Option<String>,
    pub year: Option<String>,
    pub role: Option<String>,
    pub external_link: Option<String>,
    pub is_featured: bool,
    pub featured_order: i64,
    /// Free-form sort position; NULL sorts last.
    pub order: Option<i64>,
    /// Stored media path (`/uploads/<file>`).
    pub thumbnail_media: Option<String>,
    pub banner_media: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

table_record!(Project, "projects", order = order, label = title);

/// One image of a project's gallery.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectGalleryImage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub project_id: Option<RecordId>,
    pub image_path: String,
    pub sort: Option<i64>,
}

table_record!(ProjectGalleryImage, "project_gallery", order = sort, label = image_path);

// =============================================================================
// HOME PAGE
// =============================================================================

/// A home page intro banner. At most three exist, in slots 1..=3.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntroBanner {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub image: String,
    pub title_line1: String,
    pub title_line2: String,
    pub button_text: String,
    pub button_link: String,
    pub scroll_text: String,
    /// Project the banner links to, if any.
    pub project_id: Option<RecordId>,
    pub order_index: Option<i64>,
}

table_record!(IntroBanner, "intro_banners", order = order_index, label = title_line1);

/// A service offered by the studio, densely ordered 1..N.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Service {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub title: String,
    pub description: String,
    pub order_index: Option<i64>,
}

table_record!(Service, "services", order = order_index, label = title);

// =============================================================================
// EDITORIAL
// =============================================================================

/// A news article.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsArticle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub title: String,
    pub subtitle: String,
    pub slug: String,
    pub category_text: String,
    pub photographer: String,
    /// CSS aspect class used by the public site (`aspect-square`, ...).
    pub aspect_ratio: String,
    pub featured: bool,
    /// HTML body.
    pub content: String,
    /// Bare object name inside the media bucket.
    pub image_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

table_record!(NewsArticle, "news");

// =============================================================================
// ABOUT
// =============================================================================

/// A slide of the about page slider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AboutSliderItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub image_path: String,
    pub caption: String,
    pub order_index: Option<i64>,
}

table_record!(AboutSliderItem, "about_slider", order = order_index, label = caption);

/// An image of the about page gallery.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AboutGalleryImage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub image_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

table_record!(AboutGalleryImage, "about_gallery");

/// Tables that hold exactly one row of page copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SingletonTable {
    About,
    Contact,
    WhatWeDo,
}

impl SingletonTable {
    pub const ALL: [SingletonTable; 3] = [
        SingletonTable::About,
        SingletonTable::Contact,
        SingletonTable::WhatWeDo,
    ];

    /// Backend table name.
    pub fn table(&self) -> &'static str {
        match self {
            SingletonTable::About => "about_content",
            SingletonTable::Contact => "contact",
            SingletonTable::WhatWeDo => "what_we_do",
        }
    }
}

/// The single row of a page-copy table. Columns other than `id` are kept
/// as free-form JSON since every page has its own set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl PageContent {
    /// Read a text field.
    pub fn text(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(Value::as_str)
    }

    /// Set a field value.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }
}

// =============================================================================
// CHROME
// =============================================================================

/// One entry of the site header menu. Menu items live inside the
/// `header_settings` row, not in their own table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub href: String,
    pub label: String,
    pub order: i64,
}

impl MenuItem {
    pub fn new(id: impl Into<String>, href: impl Into<String>, label: impl Into<String>, order: i64) -> Self {
        Self {
            id: id.into(),
            href: href.into(),
            label: label.into(),
            order,
        }
    }
}

/// Header logo and menu.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub logo_text: Option<String>,
    /// Public URL of the uploaded logo.
    pub logo_image_url: Option<String>,
    pub menu_items: Vec<MenuItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

table_record!(HeaderSettings, "header_settings");

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_project_decodes_missing_columns() {
        let project: Project =
            serde_json::from_value(json!({"id": 3, "title": "Atlas", "order": null})).unwrap();

        assert_eq!(project.id, Some(RecordId::Int(3)));
        assert_eq!(project.order(), None);
        assert_eq!(project.label(), "Atlas");
        assert!(!project.is_featured);
    }

    #[test]
    fn test_new_row_omits_id() {
        let service = Service {
            title: "Branding".into(),
            description: "Identity systems".into(),
            order_index: Some(1),
            ..Default::default()
        };

        let row = serde_json::to_value(&service).unwrap();
        assert!(row.get("id").is_none());
        assert_eq!(row["order_index"], 1);
    }

    #[test]
    fn test_order_field_names_match_columns() {
        assert_eq!(Project::ORDER_FIELD, "order");
        assert_eq!(IntroBanner::ORDER_FIELD, "order_index");
        assert_eq!(ProjectGalleryImage::ORDER_FIELD, "sort");
    }

    #[test]
    fn test_page_content_keeps_unknown_columns() {
        let content: PageContent =
            serde_json::from_value(json!({"id": "a1", "email": "hi@studio.test", "phone": "+90"}))
                .unwrap();

        assert_eq!(content.id, Some(RecordId::Text("a1".into())));
        assert_eq!(content.text("email"), Some("hi@studio.test"));

        let row = serde_json::to_value(&content).unwrap();
        assert_eq!(row["phone"], "+90");
    }
}
