//! Row / column layout of the catalog, independent of any rendering crate.
//!
//! The content pane is a flat list of rows (headings, card lines, notes);
//! each nav bar is a strip of buttons laid out left to right.  Laying out
//! also fills the [`AnchorRegistry`] so the sync engine never has to search
//! rendered output for a section.

use super::anchors::{AnchorRegistry, ButtonAnchor, ContentAnchor, SectionId};
use super::catalog::{Catalog, Category, Id, Item};

pub const NO_ITEMS: &str = "No items available";
pub const NO_SUBCATEGORIES: &str = "No subcategories available";

/// Columns between two adjacent buttons.
const BUTTON_GAP: i32 = 1;
/// Padding inside a button on each side of its title.
const BUTTON_PAD: i32 = 1;

// ───────────────────────────────────────── content ───────────

/// One row of the content document.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentRow {
    CategoryHeading(String),
    SubcategoryHeading(String),
    ItemTitle { item: Id, text: String },
    ItemDescription { item: Id, text: String },
    ItemPrice { item: Id, text: String },
    Note(&'static str),
    Blank,
}

impl ContentRow {
    /// The item card this row belongs to, if any.
    pub fn item(&self) -> Option<&Id> {
        match self {
            ContentRow::ItemTitle { item, .. }
            | ContentRow::ItemDescription { item, .. }
            | ContentRow::ItemPrice { item, .. } => Some(item),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ContentLayout {
    pub rows: Vec<ContentRow>,
}

impl ContentLayout {
    pub fn height(&self) -> i32 {
        self.rows.len() as i32
    }

    /// Item whose card covers document row `row`.
    pub fn item_at(&self, row: i32) -> Option<&Id> {
        usize::try_from(row).ok().and_then(|r| self.rows.get(r)).and_then(ContentRow::item)
    }

    /// First item card whose title row lies within `[top, top + height)`.
    pub fn first_item_in(&self, top: i32, height: i32) -> Option<&Id> {
        let start = top.max(0) as usize;
        let end = (top + height).max(0) as usize;
        self.rows
            .iter()
            .take(end)
            .skip(start)
            .find_map(|row| match row {
                ContentRow::ItemTitle { item, .. } => Some(item),
                _ => None,
            })
    }
}

/// Lay out every category and register its content anchors.
///
/// A subcategory without items renders nothing and gets no anchor.
pub fn layout_content(catalog: &Catalog, anchors: &mut AnchorRegistry) -> ContentLayout {
    anchors.clear_content();
    let mut rows = Vec::new();

    for category in catalog.categories() {
        let top = rows.len() as i32;
        layout_category(category, &mut rows, anchors);
        anchors.set_content(
            SectionId::Category(category.id.clone()),
            ContentAnchor {
                top,
                height: rows.len() as i32 - top,
            },
        );
    }

    ContentLayout { rows }
}

fn layout_category(category: &Category, rows: &mut Vec<ContentRow>, anchors: &mut AnchorRegistry) {
    rows.push(ContentRow::CategoryHeading(category.title.clone()));
    rows.push(ContentRow::Blank);

    if category.items.is_empty() {
        rows.push(ContentRow::Note(NO_ITEMS));
        rows.push(ContentRow::Blank);
    } else {
        for item in &category.items {
            push_card(item, rows);
        }
    }

    if category.subcategories.is_empty() {
        rows.push(ContentRow::Note(NO_SUBCATEGORIES));
        rows.push(ContentRow::Blank);
        return;
    }

    for sub in &category.subcategories {
        if sub.items.is_empty() {
            continue;
        }
        let top = rows.len() as i32;
        rows.push(ContentRow::SubcategoryHeading(sub.title.clone()));
        rows.push(ContentRow::Blank);
        for item in &sub.items {
            push_card(item, rows);
        }
        anchors.set_content(
            SectionId::Subcategory(sub.id.clone()),
            ContentAnchor {
                top,
                height: rows.len() as i32 - top,
            },
        );
    }
}

fn push_card(item: &Item, rows: &mut Vec<ContentRow>) {
    rows.push(ContentRow::ItemTitle {
        item: item.id.clone(),
        text: item.title.clone(),
    });
    if let Some(desc) = item.description.as_deref().filter(|d| !d.trim().is_empty()) {
        // Cards are one row per field; long descriptions are cut at render time.
        let first_line = desc.lines().next().unwrap_or_default().trim().to_owned();
        rows.push(ContentRow::ItemDescription {
            item: item.id.clone(),
            text: first_line,
        });
    }
    if let Some(price) = item.price_label() {
        rows.push(ContentRow::ItemPrice {
            item: item.id.clone(),
            text: price,
        });
    }
    rows.push(ContentRow::Blank);
}

// ───────────────────────────────────────── bars ──────────────

#[derive(Debug, Clone, PartialEq)]
pub struct BarButton {
    pub section: SectionId,
    pub title: String,
    pub left: i32,
    pub width: i32,
}

/// Buttons of one bar, left to right.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BarLayout {
    pub buttons: Vec<BarButton>,
}

impl BarLayout {
    /// Total strip width including gaps.
    pub fn strip_width(&self) -> i32 {
        self.buttons.last().map_or(0, |b| b.left + b.width)
    }
}

/// Lay out the buttons for `entries` and register their anchors.
pub fn layout_bar<'a>(
    entries: impl IntoIterator<Item = (SectionId, &'a str)>,
    anchors: &mut AnchorRegistry,
) -> BarLayout {
    let mut buttons = Vec::new();
    let mut left = 0;

    for (section, title) in entries {
        let width = title.chars().count() as i32 + 2 * BUTTON_PAD;
        anchors.set_button(section.clone(), ButtonAnchor { left, width });
        buttons.push(BarButton {
            section,
            title: title.to_owned(),
            left,
            width,
        });
        left += width + BUTTON_GAP;
    }

    BarLayout { buttons }
}

/// Category bar: every category.
pub fn layout_category_bar(catalog: &Catalog, anchors: &mut AnchorRegistry) -> BarLayout {
    anchors.clear_buttons(false);
    layout_bar(
        catalog
            .categories()
            .iter()
            .map(|c| (SectionId::Category(c.id.clone()), c.title.as_str())),
        anchors,
    )
}

/// Subcategory bar: the subcategories of `category` (empty when `None`).
pub fn layout_subcategory_bar(
    catalog: &Catalog,
    category: Option<&Id>,
    anchors: &mut AnchorRegistry,
) -> BarLayout {
    anchors.clear_buttons(true);
    let Some(category) = category.and_then(|id| catalog.category(id)) else {
        return BarLayout::default();
    };
    layout_bar(
        category
            .subcategories
            .iter()
            .map(|s| (SectionId::Subcategory(s.id.clone()), s.title.as_str())),
        anchors,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::from_json(
            r#"[
                {
                    "id": "A", "title": "Alpha",
                    "items": [{"id": "i1", "title": "One", "description": "first\nsecond", "price": 10}],
                    "subcategories": [
                        {"id": "A1", "title": "A-one", "items": [{"id": "i2", "title": "Two"}]},
                        {"id": "A2", "title": "A-two", "items": []}
                    ]
                },
                {"id": "B", "title": "Beta"}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn content_rows_and_anchors_line_up() {
        let catalog = catalog();
        let mut anchors = AnchorRegistry::new();
        let layout = layout_content(&catalog, &mut anchors);

        let a = anchors.content(&SectionId::Category(Id::from("A"))).unwrap();
        let a1 = anchors.content(&SectionId::Subcategory(Id::from("A1"))).unwrap();
        let b = anchors.content(&SectionId::Category(Id::from("B"))).unwrap();

        assert_eq!(a.top, 0);
        assert_eq!(layout.rows[a1.top as usize], ContentRow::SubcategoryHeading("A-one".into()));
        assert_eq!(layout.rows[b.top as usize], ContentRow::CategoryHeading("Beta".into()));
        assert_eq!(a.top + a.height, b.top);
        assert_eq!(b.top + b.height, layout.height());

        // Empty subcategory renders nothing.
        assert!(anchors.content(&SectionId::Subcategory(Id::from("A2"))).is_none());
    }

    #[test]
    fn card_rows_map_back_to_items() {
        let catalog = catalog();
        let mut anchors = AnchorRegistry::new();
        let layout = layout_content(&catalog, &mut anchors);

        // Heading, blank, then card i1: title, description, price, blank.
        assert_eq!(layout.item_at(2), Some(&Id::from("i1")));
        assert_eq!(
            layout.rows[3],
            ContentRow::ItemDescription { item: Id::from("i1"), text: "first".into() }
        );
        assert_eq!(layout.item_at(4), Some(&Id::from("i1")));
        assert_eq!(layout.item_at(5), None);
        assert_eq!(layout.item_at(-1), None);
        assert_eq!(layout.first_item_in(3, 10), Some(&Id::from("i2")));
    }

    #[test]
    fn notes_for_empty_category() {
        let catalog = catalog();
        let mut anchors = AnchorRegistry::new();
        let layout = layout_content(&catalog, &mut anchors);
        let b = anchors.content(&SectionId::Category(Id::from("B"))).unwrap();

        let tail: Vec<_> = layout.rows[b.top as usize..].to_vec();
        assert!(tail.contains(&ContentRow::Note(NO_ITEMS)));
        assert!(tail.contains(&ContentRow::Note(NO_SUBCATEGORIES)));
    }

    #[test]
    fn bar_buttons_are_padded_and_gapped() {
        let catalog = catalog();
        let mut anchors = AnchorRegistry::new();
        let bar = layout_category_bar(&catalog, &mut anchors);

        assert_eq!(bar.buttons[0].width, 7);
        assert_eq!(bar.buttons[1].left, 8);
        assert_eq!(bar.strip_width(), 8 + 6);
        assert_eq!(
            anchors.button(&SectionId::Category(Id::from("B"))),
            Some(ButtonAnchor { left: 8, width: 6 })
        );
    }

    #[test]
    fn subcategory_bar_follows_category() {
        let catalog = catalog();
        let mut anchors = AnchorRegistry::new();

        let bar = layout_subcategory_bar(&catalog, Some(&Id::from("A")), &mut anchors);
        assert_eq!(bar.buttons.len(), 2);

        let bar = layout_subcategory_bar(&catalog, Some(&Id::from("B")), &mut anchors);
        assert!(bar.buttons.is_empty());
        assert!(anchors.button(&SectionId::Subcategory(Id::from("A1"))).is_none());
    }
}
