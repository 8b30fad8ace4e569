//! Anchor registry: where each section and each nav button currently sits.
//!
//! Content anchors are vertical positions in the content pane's document
//! (rows from the top of the document).  Button anchors are horizontal
//! positions inside a nav bar's scrollable strip (columns from the strip's
//! left edge).  The two maps are separate, and category / subcategory ids
//! are distinguished by [`SectionId`], so no lookup can collide.

use std::collections::HashMap;

use super::catalog::Id;

/// A category or subcategory, addressed unambiguously.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SectionId {
    Category(Id),
    Subcategory(Id),
}

impl SectionId {
    pub fn id(&self) -> &Id {
        match self {
            SectionId::Category(id) | SectionId::Subcategory(id) => id,
        }
    }
}

/// Vertical extent of a rendered section in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentAnchor {
    pub top: i32,
    pub height: i32,
}

impl ContentAnchor {
    /// Top edge relative to a viewport scrolled to `scroll_top`.
    pub fn top_in_viewport(&self, scroll_top: i32) -> i32 {
        self.top - scroll_top
    }
}

/// Horizontal extent of a nav button inside its bar's scroll strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonAnchor {
    pub left: i32,
    pub width: i32,
}

impl ButtonAnchor {
    pub fn contains(&self, x: i32) -> bool {
        x >= self.left && x < self.left + self.width
    }
}

#[derive(Debug, Default)]
pub struct AnchorRegistry {
    content: HashMap<SectionId, ContentAnchor>,
    buttons: HashMap<SectionId, ButtonAnchor>,
}

impl AnchorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_content(&mut self, id: SectionId, anchor: ContentAnchor) {
        self.content.insert(id, anchor);
    }

    pub fn set_button(&mut self, id: SectionId, anchor: ButtonAnchor) {
        self.buttons.insert(id, anchor);
    }

    pub fn content(&self, id: &SectionId) -> Option<ContentAnchor> {
        self.content.get(id).copied()
    }

    pub fn button(&self, id: &SectionId) -> Option<ButtonAnchor> {
        self.buttons.get(id).copied()
    }

    /// Drop every content anchor (called before a fresh layout pass).
    pub fn clear_content(&mut self) {
        self.content.clear();
    }

    /// Drop the button anchors of one kind of section.
    pub fn clear_buttons(&mut self, subcategories: bool) {
        self.buttons
            .retain(|id, _| matches!(id, SectionId::Subcategory(_)) != subcategories);
    }

    pub fn clear(&mut self) {
        self.content.clear();
        self.buttons.clear();
    }

    /// Which button of the given kind sits under column `x` of its strip.
    pub fn button_at(&self, x: i32, subcategories: bool) -> Option<&SectionId> {
        self.buttons
            .iter()
            .filter(|(id, _)| matches!(id, SectionId::Subcategory(_)) == subcategories)
            .find(|(_, b)| b.contains(x))
            .map(|(id, _)| id)
    }
}
