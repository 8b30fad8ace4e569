//! Content pane widget: the laid-out catalog rows, drawn from the current
//! scroll offset downwards.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};

use crate::core::{
    catalog::Id,
    sections::{ContentLayout, ContentRow},
};

use super::theme::Theme;

/// Left margin for card lines, so headings stand out.
const CARD_INDENT: &str = "  ";

pub struct ContentWidget<'a> {
    layout: &'a ContentLayout,
    offset: i32,
    focused: Option<&'a Id>,
}

impl<'a> ContentWidget<'a> {
    pub fn new(layout: &'a ContentLayout, offset: i32) -> Self {
        Self {
            layout,
            offset,
            focused: None,
        }
    }

    /// Highlight the card of this item.
    pub fn focused(mut self, id: Option<&'a Id>) -> Self {
        self.focused = id;
        self
    }
}

impl Widget for ContentWidget<'_> {
    // Unbordered: the pane's extent is the full height of `area`.
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = area;
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let start = self.offset.max(0) as usize;
        let visible = self.layout.rows.iter().skip(start).take(inner.height as usize);

        for (i, row) in visible.enumerate() {
            let y = inner.y + i as u16;
            let focused = row.item().is_some() && row.item() == self.focused;
            if focused {
                buf.set_style(
                    Rect::new(inner.x, y, inner.width, 1),
                    Theme::focused_item_style(),
                );
            }
            if let Some(line) = row_line(row) {
                buf.set_line(inner.x, y, &truncate(line, inner.width), inner.width);
            }
        }
    }
}

fn row_line(row: &ContentRow) -> Option<Line<'_>> {
    let line = match row {
        ContentRow::CategoryHeading(title) => {
            Line::from(Span::styled(title.as_str(), Theme::category_heading_style()))
        }
        ContentRow::SubcategoryHeading(title) => Line::from(vec![
            Span::raw(CARD_INDENT),
            Span::styled(title.as_str(), Theme::subcategory_heading_style()),
        ]),
        ContentRow::ItemTitle { text, .. } => styled_card_line(text, Theme::item_title_style()),
        ContentRow::ItemDescription { text, .. } => {
            styled_card_line(text, Theme::item_detail_style())
        }
        ContentRow::ItemPrice { text, .. } => styled_card_line(text, Theme::price_style()),
        ContentRow::Note(text) => styled_card_line(text, Theme::note_style()),
        ContentRow::Blank => return None,
    };
    Some(line)
}

fn styled_card_line(text: &str, style: Style) -> Line<'_> {
    Line::from(vec![
        Span::raw(CARD_INDENT),
        Span::raw(CARD_INDENT),
        Span::styled(text, style),
    ])
}

/// Cut a line to `width` columns, ending with `…` when something was lost.
fn truncate(line: Line<'_>, width: u16) -> Line<'_> {
    let width = width as usize;
    if line.width() <= width {
        return line;
    }
    let mut remaining = width.saturating_sub(1);
    let mut spans = Vec::new();
    for span in line.spans {
        if remaining == 0 {
            break;
        }
        let text: String = span.content.chars().take(remaining).collect();
        remaining -= text.chars().count();
        spans.push(Span::styled(text, span.style));
    }
    spans.push(Span::raw("…"));
    Line::from(spans)
}
