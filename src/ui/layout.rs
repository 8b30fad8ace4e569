//! Layout helpers: split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Rows taken by a bordered nav bar.
pub const BAR_HEIGHT: u16 = 3;

/// Primary screen layout: category bar, optional subcategory bar, content
/// pane, and a bottom status bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    pub category_bar: Rect,
    pub subcategory_bar: Option<Rect>,
    pub content_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect, show_subcategory_bar: bool) -> Self {
        let sub_height = if show_subcategory_bar { BAR_HEIGHT } else { 0 };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(BAR_HEIGHT), // category bar
                Constraint::Length(sub_height), // subcategory bar (may be empty)
                Constraint::Min(1),             // content pane (takes all remaining space)
                Constraint::Length(1),          // status bar
            ])
            .split(area);

        Self {
            category_bar: chunks[0],
            subcategory_bar: show_subcategory_bar.then_some(chunks[1]),
            content_area: chunks[2],
            status_area: chunks[3],
        }
    }
}

/// Is `(col, row)` inside `rect`?
pub fn point_in_rect(rect: Rect, col: u16, row: u16) -> bool {
    col >= rect.x
        && col < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subcategory_bar_takes_rows_from_content() {
        let area = Rect::new(0, 0, 80, 24);
        let without = AppLayout::from_area(area, false);
        let with = AppLayout::from_area(area, true);

        assert!(without.subcategory_bar.is_none());
        assert_eq!(without.content_area.height, 24 - 3 - 1);
        assert_eq!(with.content_area.height, 24 - 3 - 3 - 1);
        assert_eq!(with.subcategory_bar.map(|r| r.y), Some(3));
        assert_eq!(with.status_area.y, 23);
    }

    #[test]
    fn hit_testing() {
        let r = Rect::new(2, 3, 4, 2);
        assert!(point_in_rect(r, 2, 3));
        assert!(point_in_rect(r, 5, 4));
        assert!(!point_in_rect(r, 6, 4));
        assert!(!point_in_rect(r, 3, 5));
    }
}
