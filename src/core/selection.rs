//! Active category and subcategory, the one selection both nav bars and the
//! content observer read and write.

use super::catalog::{Catalog, Id};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    active_category: Option<Id>,
    active_subcategory: Option<Id>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_category(&self) -> Option<&Id> {
        self.active_category.as_ref()
    }

    pub fn active_subcategory(&self) -> Option<&Id> {
        self.active_subcategory.as_ref()
    }

    /// Activate category `id`.
    ///
    /// If the current subcategory does not belong to `id`, it is replaced by
    /// the category's first subcategory (or cleared when it has none).
    /// Returns `true` when either id changed.  Unknown ids are ignored.
    pub fn set_active_category(&mut self, catalog: &Catalog, id: &Id) -> bool {
        let Some(category) = catalog.category(id) else {
            tracing::debug!(category = %id, "ignoring unknown category");
            return false;
        };

        let before = self.clone();
        self.active_category = Some(id.clone());

        let sub_belongs = self
            .active_subcategory
            .as_ref()
            .is_some_and(|sub| category.subcategories.iter().any(|s| &s.id == sub));
        if !sub_belongs {
            self.active_subcategory = category.first_subcategory().map(|s| s.id.clone());
        }

        debug_assert!(self.subcategory_matches_category(catalog));

        let changed = *self != before;
        if changed {
            tracing::debug!(
                category = %id,
                subcategory = ?self.active_subcategory.as_ref().map(Id::as_str),
                "active category"
            );
        }
        changed
    }

    /// Activate subcategory `id` without touching the active category.
    pub fn set_active_subcategory(&mut self, id: &Id) -> bool {
        if self.active_subcategory.as_ref() == Some(id) {
            return false;
        }
        tracing::debug!(subcategory = %id, "active subcategory");
        self.active_subcategory = Some(id.clone());
        true
    }

    /// Activate a category and force its first subcategory, the way a click
    /// on a category button does.
    pub fn select_category_from_start(&mut self, catalog: &Catalog, id: &Id) -> bool {
        let Some(category) = catalog.category(id) else {
            tracing::debug!(category = %id, "ignoring unknown category");
            return false;
        };
        let before = self.clone();
        self.active_category = Some(id.clone());
        self.active_subcategory = category.first_subcategory().map(|s| s.id.clone());
        *self != before
    }

    /// `true` when the subcategory (if any) is a child of the active category.
    pub fn subcategory_matches_category(&self, catalog: &Catalog) -> bool {
        match (&self.active_category, &self.active_subcategory) {
            (_, None) => true,
            (None, Some(_)) => false,
            (Some(cat), Some(sub)) => catalog.parent_of(sub).is_some_and(|p| &p.id == cat),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::from_json(
            r#"[
                {"id": "a", "subcategories": [{"id": "a1"}, {"id": "a2"}]},
                {"id": "b"},
                {"id": "c", "subcategories": [{"id": "c1"}]}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn category_switch_never_leaves_dangling_subcategory() {
        let catalog = catalog();
        let mut sel = SelectionState::new();

        for id in ["a", "c", "b", "a", "b", "c"] {
            sel.set_active_category(&catalog, &Id::from(id));
            assert!(sel.subcategory_matches_category(&catalog), "after {id}");
        }
    }

    #[test]
    fn category_defaults_to_first_subcategory() {
        let catalog = catalog();
        let mut sel = SelectionState::new();

        assert!(sel.set_active_category(&catalog, &Id::from("a")));
        assert_eq!(sel.active_subcategory().map(Id::as_str), Some("a1"));

        assert!(sel.set_active_category(&catalog, &Id::from("b")));
        assert_eq!(sel.active_subcategory(), None);
    }

    #[test]
    fn keeps_subcategory_already_inside_category() {
        let catalog = catalog();
        let mut sel = SelectionState::new();
        sel.set_active_category(&catalog, &Id::from("a"));
        sel.set_active_subcategory(&Id::from("a2"));

        assert!(!sel.set_active_category(&catalog, &Id::from("a")));
        assert_eq!(sel.active_subcategory().map(Id::as_str), Some("a2"));

        assert!(sel.select_category_from_start(&catalog, &Id::from("a")));
        assert_eq!(sel.active_subcategory().map(Id::as_str), Some("a1"));
    }

    #[test]
    fn subcategory_does_not_touch_category() {
        let catalog = catalog();
        let mut sel = SelectionState::new();
        sel.set_active_category(&catalog, &Id::from("b"));

        assert!(sel.set_active_subcategory(&Id::from("a2")));
        assert_eq!(sel.active_category().map(Id::as_str), Some("b"));
        assert!(!sel.set_active_subcategory(&Id::from("a2")));
    }

    #[test]
    fn unknown_category_is_ignored() {
        let catalog = catalog();
        let mut sel = SelectionState::new();
        assert!(!sel.set_active_category(&catalog, &Id::from("nope")));
        assert_eq!(sel, SelectionState::new());
    }
}
