//! UI / rendering layer: everything that touches Ratatui widgets.
//!
//! This layer takes the *core* data structures and turns them into cells on
//! the terminal.  No I/O and no state changes happen here.

pub mod content;
pub mod layout;
pub mod modal;
pub mod nav_bar;
pub mod spinner;
pub mod theme;

use ratatui::{
    layout::Rect,
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::state::{ActiveView, AppState};
use crate::core::{nav_bar::BarKind, sync::ScrollSync};

use self::{
    content::ContentWidget, modal::ItemModal, nav_bar::NavBarWidget, spinner::LoadingIndicator,
    theme::Theme,
};

/// Shown in place of the content when the catalog has no categories.
pub const NO_CATEGORIES: &str = "No categories available";

/// Draw one full frame.
pub fn draw(frame: &mut Frame, state: &AppState) {
    let layout = state.layout();

    match state.sync.as_ref() {
        Some(sync) => {
            draw_bars(frame, sync, &layout, &state.source_label);
            draw_content(frame, sync, layout.content_area);
        }
        None => {
            frame.render_widget(
                bar_block(format!(" {} ", state.source_label)),
                layout.category_bar,
            );
            if let Some(err) = state.load.error() {
                let text = Paragraph::new(err)
                    .style(Theme::error_style())
                    .wrap(Wrap { trim: true });
                frame.render_widget(text, layout.content_area);
            } else {
                frame.render_widget(LoadingIndicator { tick: state.tick }, layout.content_area);
            }
        }
    }

    let hint = state.config.status_bar_hint();
    let status_text = match state.active_view {
        ActiveView::Catalog => state.status_message.as_deref().unwrap_or(&hint),
        ActiveView::ItemDetail => "",
    };
    let status = Paragraph::new(status_text).style(Theme::status_bar_style());
    frame.render_widget(status, layout.status_area);

    if state.active_view == ActiveView::ItemDetail {
        if let Some(item) = state.current_item() {
            frame.render_widget(ItemModal { item }, frame.area());
        }
    }
}

fn bar_block(title: String) -> Block<'static> {
    Block::default()
        .title(title)
        .title_style(Theme::title_style())
        .borders(Borders::ALL)
        .border_style(Theme::border_style())
}

fn draw_bars(frame: &mut Frame, sync: &ScrollSync, layout: &layout::AppLayout, source: &str) {
    let selection = sync.selection();

    let categories = NavBarWidget::new(
        sync.bar_layout(BarKind::Categories),
        sync.bar(BarKind::Categories).pane.offset(),
    )
    .active(selection.active_category())
    .block(bar_block(format!(" {source} ")));
    frame.render_widget(categories, layout.category_bar);

    if let Some(area) = layout.subcategory_bar {
        let heading = selection
            .active_category()
            .and_then(|id| sync.catalog().category(id))
            .map(|c| format!(" {} ", c.title))
            .unwrap_or_default();
        let subcategories = NavBarWidget::new(
            sync.bar_layout(BarKind::Subcategories),
            sync.bar(BarKind::Subcategories).pane.offset(),
        )
        .active(selection.active_subcategory())
        .block(bar_block(heading));
        frame.render_widget(subcategories, area);
    }
}

fn draw_content(frame: &mut Frame, sync: &ScrollSync, area: Rect) {
    if sync.catalog().is_empty() {
        let note = Paragraph::new(NO_CATEGORIES).style(Theme::note_style());
        frame.render_widget(note, area);
        return;
    }
    let widget = ContentWidget::new(sync.content_layout(), sync.content().offset())
        .focused(sync.focused_item());
    frame.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use ratatui::{backend::TestBackend, Terminal};

    use super::*;
    use crate::config::AppConfig;
    use crate::core::catalog::Catalog;

    fn screen(terminal: &Terminal<TestBackend>) -> String {
        let buf = terminal.backend().buffer();
        (0..buf.area.height)
            .map(|y| {
                (0..buf.area.width)
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn state(width: u16, height: u16) -> AppState {
        let mut state = AppState::new("menu".into(), AppConfig::default(), None);
        state.terminal_area = Rect::new(0, 0, width, height);
        state
    }

    #[test]
    fn draws_loading_then_error() {
        let mut terminal = Terminal::new(TestBackend::new(40, 10)).unwrap();
        let mut state = state(40, 10);

        terminal.draw(|f| draw(f, &state)).unwrap();
        assert!(screen(&terminal).contains("loading catalog"));

        state.load = crate::app::state::LoadState::Failed("Failed to load catalog: boom".into());
        terminal.draw(|f| draw(f, &state)).unwrap();
        assert!(screen(&terminal).contains("boom"));
    }

    #[test]
    fn draws_bars_and_subcategory_heading() {
        let mut terminal = Terminal::new(TestBackend::new(40, 20)).unwrap();
        let mut state = state(40, 20);
        let catalog = Catalog::from_json(
            r#"[{"id": "a", "title": "Hair", "subcategories": [{"id": "a1", "title": "Color", "items": [{"id": "x", "title": "Dye"}]}]}]"#,
        )
        .unwrap();
        state.finish_load(Ok(catalog), Instant::now());

        terminal.draw(|f| draw(f, &state)).unwrap();
        let screen = screen(&terminal);
        let lines: Vec<&str> = screen.lines().collect();
        assert!(lines[0].contains("menu"));
        assert!(lines[1].contains("Hair"));
        // Subcategory bar titled with the active category.
        assert!(lines[3].contains("Hair"));
        assert!(lines[4].contains("Color"));
        assert!(screen.contains("Dye"));
    }

    #[test]
    fn empty_catalog_shows_note() {
        let mut terminal = Terminal::new(TestBackend::new(40, 10)).unwrap();
        let mut state = state(40, 10);
        state.finish_load(Ok(Catalog::default()), Instant::now());

        terminal.draw(|f| draw(f, &state)).unwrap();
        assert!(screen(&terminal).contains(NO_CATEGORIES));
    }
}
