//! Horizontal nav bar widget: a strip of buttons scrolled by the sync
//! engine, with the active one highlighted.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::{Block, Widget},
};

use crate::core::{catalog::Id, sections::BarLayout};

use super::theme::Theme;

pub struct NavBarWidget<'a> {
    layout: &'a BarLayout,
    /// First visible column of the strip.
    offset: i32,
    active: Option<&'a Id>,
    block: Option<Block<'a>>,
}

impl<'a> NavBarWidget<'a> {
    pub fn new(layout: &'a BarLayout, offset: i32) -> Self {
        Self {
            layout,
            offset,
            active: None,
            block: None,
        }
    }

    pub fn active(mut self, id: Option<&'a Id>) -> Self {
        self.active = id;
        self
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

impl Widget for NavBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = if let Some(ref block) = self.block {
            let inner = block.inner(area);
            block.clone().render(area, buf);
            inner
        } else {
            area
        };
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let width = i32::from(inner.width);
        for button in &self.layout.buttons {
            let is_active = self.active == Some(button.section.id());
            let style = if is_active {
                Theme::active_button_style()
            } else {
                Theme::button_style()
            };
            let label = format!(" {} ", button.title);
            draw_clipped(buf, inner, button.left - self.offset, width, &label, style);
        }

        // Overflow hints on the edges.
        let marker = Theme::overflow_marker_style();
        if self.offset > 0 {
            buf.set_string(inner.x, inner.y, "‹", marker);
        }
        if self.layout.strip_width() - self.offset > width {
            buf.set_string(inner.x + inner.width - 1, inner.y, "›", marker);
        }
    }
}

/// Write `text` starting at strip column `x` (relative to the visible
/// window), dropping whatever falls outside `[0, width)`.
fn draw_clipped(buf: &mut Buffer, inner: Rect, x: i32, width: i32, text: &str, style: Style) {
    for (i, ch) in text.chars().enumerate() {
        let col = x + i as i32;
        if col < 0 {
            continue;
        }
        if col >= width {
            break;
        }
        let mut tmp = [0u8; 4];
        buf.set_string(
            inner.x + col as u16,
            inner.y,
            ch.encode_utf8(&mut tmp),
            style,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::anchors::AnchorRegistry;
    use crate::core::catalog::Catalog;
    use crate::core::sections::layout_category_bar;

    fn bar() -> BarLayout {
        let catalog =
            Catalog::from_json(r#"[{"id": "a", "title": "Alpha"}, {"id": "b", "title": "Beta"}]"#)
                .unwrap();
        layout_category_bar(&catalog, &mut AnchorRegistry::new())
    }

    fn row(buf: &Buffer, width: u16) -> String {
        (0..width).map(|x| buf[(x, 0)].symbol().to_string()).collect()
    }

    #[test]
    fn renders_buttons_at_their_offsets() {
        let layout = bar();
        let area = Rect::new(0, 0, 20, 1);
        let mut buf = Buffer::empty(area);
        NavBarWidget::new(&layout, 0).render(area, &mut buf);
        assert_eq!(row(&buf, 20), " Alpha   Beta       ");
    }

    #[test]
    fn scrolled_strip_is_clipped_and_marked() {
        let layout = bar();
        let area = Rect::new(0, 0, 8, 1);
        let mut buf = Buffer::empty(area);
        NavBarWidget::new(&layout, 4)
            .active(Some(&Id::from("b")))
            .render(area, &mut buf);

        assert_eq!(row(&buf, 8), "‹a   Be›");
        assert_eq!(buf[(5, 0)].style().bg, Theme::active_button_style().bg);
    }
}
