//! Featured project limit.
//!
//! The home page shows at most four featured projects. Marking a fifth is
//! allowed, but only after the operator confirms.

use shared_types::Project;

/// Featured projects shown on the home page.
pub const FEATURED_LIMIT: usize = 4;

/// Result of checking whether a project may be marked featured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeaturedCheck {
    /// Below the limit.
    Allowed,
    /// `current` other projects are featured already; ask the operator.
    NeedsConfirmation { current: usize },
    /// The featured count could not be fetched.
    Unavailable,
}

/// Featured projects other than the one identified by `slug`.
///
/// The project is looked up by slug, as in the edit form, and only the
/// first match is discounted.
pub fn featured_count_excluding(projects: &[Project], slug: &str) -> usize {
    let featured = projects.iter().filter(|p| p.is_featured).count();
    let current_is_featured = projects
        .iter()
        .find(|p| p.slug == slug)
        .map_or(false, |p| p.is_featured);

    if current_is_featured {
        featured - 1
    } else {
        featured
    }
}

/// Decide whether marking `slug` featured needs confirmation.
pub fn evaluate_featured(projects: &[Project], slug: &str) -> FeaturedCheck {
    let current = featured_count_excluding(projects, slug);
    if current >= FEATURED_LIMIT {
        FeaturedCheck::NeedsConfirmation { current }
    } else {
        FeaturedCheck::Allowed
    }
}
