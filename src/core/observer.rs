//! Viewport observer: which section is "in view" right now.
//!
//! A section is a candidate when its top edge sits in the upper half of the
//! viewport: `0 <= top <= height / 2`.  The first candidate in catalog order
//! wins.  Categories and subcategories are scanned independently.

use super::anchors::{AnchorRegistry, SectionId};
use super::catalog::{Catalog, Id};
use super::selection::SelectionState;

/// Result of one observation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Observation {
    pub category: Option<Id>,
    pub subcategory: Option<Id>,
}

/// `true` when a section whose top is `top` rows below the viewport's top
/// edge counts as in view.
pub fn in_upper_half(top: i32, viewport_height: i32) -> bool {
    top >= 0 && 2 * top <= viewport_height
}

/// Scan every rendered section and pick the active candidates.
pub fn observe(
    catalog: &Catalog,
    anchors: &AnchorRegistry,
    scroll_top: i32,
    viewport_height: i32,
) -> Observation {
    let visible = |section: SectionId| {
        anchors
            .content(&section)
            .is_some_and(|a| in_upper_half(a.top_in_viewport(scroll_top), viewport_height))
    };

    let category = catalog
        .categories()
        .iter()
        .find(|c| visible(SectionId::Category(c.id.clone())))
        .map(|c| c.id.clone());

    let subcategory = catalog
        .subcategories()
        .find(|s| visible(SectionId::Subcategory(s.id.clone())))
        .map(|s| s.id.clone());

    tracing::trace!(?category, ?subcategory, scroll_top, "observed");
    Observation {
        category,
        subcategory,
    }
}

/// Fold an observation into the selection.
///
/// A category hit goes through [`SelectionState::set_active_category`], which
/// defaults to the category's first subcategory unless the current one
/// already belongs to it.  A subcategory hit is applied afterwards, so it
/// takes precedence over that default.  No category hit leaves the active
/// category untouched.
pub fn apply(selection: &mut SelectionState, catalog: &Catalog, observation: &Observation) -> bool {
    let mut changed = false;
    if let Some(category) = &observation.category {
        changed |= selection.set_active_category(catalog, category);
    }
    if let Some(subcategory) = &observation.subcategory {
        changed |= selection.set_active_subcategory(subcategory);
    }
    changed
}
