//! Tables the panel can reorder.

use clap::ValueEnum;
use cms_01_ordering::{AllocationPolicy, BANNER_CAPACITY};
use shared_types::{AboutSliderItem, IntroBanner, Project, Service, TableRecord};

/// A reorderable table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum TableKind {
    #[default]
    Projects,
    Banners,
    Services,
    Slider,
}

impl TableKind {
    pub const ALL: [TableKind; 4] = [
        TableKind::Projects,
        TableKind::Banners,
        TableKind::Services,
        TableKind::Slider,
    ];

    /// Human-readable name.
    pub fn title(&self) -> &'static str {
        match self {
            TableKind::Projects => "Projects",
            TableKind::Banners => "Intro Banners",
            TableKind::Services => "Services",
            TableKind::Slider => "About Slider",
        }
    }

    /// Backend table name.
    pub fn table_name(&self) -> &'static str {
        match self {
            TableKind::Projects => Project::TABLE,
            TableKind::Banners => IntroBanner::TABLE,
            TableKind::Services => Service::TABLE,
            TableKind::Slider => AboutSliderItem::TABLE,
        }
    }

    /// How a new record of this table gets its order value.
    pub fn allocation(&self) -> AllocationPolicy {
        match self {
            TableKind::Banners => AllocationPolicy::Slots {
                capacity: BANNER_CAPACITY,
            },
            _ => AllocationPolicy::Dense,
        }
    }

    /// Header caption for the next order value.
    pub fn next_label(&self) -> &'static str {
        match self {
            TableKind::Banners => "Next free slot",
            _ => "Next order",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_banners_use_slots() {
        for kind in TableKind::ALL {
            let slots = matches!(kind.allocation(), AllocationPolicy::Slots { capacity: 3 });
            assert_eq!(slots, kind == TableKind::Banners);
        }
    }

    #[test]
    fn test_table_names() {
        assert_eq!(TableKind::Projects.table_name(), "projects");
        assert_eq!(TableKind::Banners.table_name(), "intro_banners");
        assert_eq!(TableKind::Slider.table_name(), "about_slider");
    }
}
