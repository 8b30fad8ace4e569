//! Item detail overlay.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget, Wrap},
};

use crate::core::catalog::Item;

use super::theme::Theme;

const MODAL_WIDTH: u16 = 60;

/// Detail card for one item.  Closed with Esc / Enter / q or a click
/// outside it.
pub struct ItemModal<'a> {
    pub item: &'a Item,
}

impl ItemModal<'_> {
    fn lines(&self) -> Vec<Line<'_>> {
        let label = Style::default().fg(Color::DarkGray);
        let mut lines = vec![Line::raw("")];

        if let Some(desc) = self.item.description.as_deref() {
            for text in desc.lines() {
                lines.push(Line::styled(text, Theme::item_detail_style()));
            }
            lines.push(Line::raw(""));
        }
        if let Some(price) = self.item.price_label() {
            lines.push(Line::from(vec![
                Span::styled("price  ", label),
                Span::styled(price, Theme::price_style()),
            ]));
        }
        if let Some(image) = self.item.image.as_deref() {
            lines.push(Line::from(vec![
                Span::styled("image  ", label),
                Span::raw(image),
            ]));
        }
        for (key, value) in &self.item.payload {
            let value = match value {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            lines.push(Line::from(vec![
                Span::styled(format!("{key}  "), label),
                Span::raw(value),
            ]));
        }

        lines.push(Line::raw(""));
        lines.push(Line::styled(
            "Esc / Enter to close",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ));
        lines
    }
}

impl Widget for ItemModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = modal_area(self.item, area);
        Clear.render(popup, buf);

        let block = Block::default()
            .title(format!(" {} ", self.item.title))
            .title_style(Theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray));

        Paragraph::new(self.lines())
            .block(block)
            .wrap(Wrap { trim: false })
            .render(popup, buf);
    }
}

/// Where the modal for `item` lands inside `area`.  Shared with mouse
/// hit-testing so a click outside closes it.
pub fn modal_area(item: &Item, area: Rect) -> Rect {
    let body = ItemModal { item }.lines().len() as u16;
    centered_fixed(MODAL_WIDTH, body + 2, area)
}

/// Centre a fixed-size rectangle inside `area`.
fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}
