//! Input handling: maps key/mouse events to state mutations.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::config::Action;
use crate::core::nav_bar::BarKind;
use crate::ui::{layout::point_in_rect, modal::modal_area};

use super::state::{ActiveView, AppState};

/// Status line shown when the open key finds no card on screen.
const NO_ITEM_IN_VIEW: &str = "No item in view";

/// Process a key event, dispatching based on the active view.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    // Ctrl+c always quits, regardless of view.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    match state.active_view {
        ActiveView::Catalog => handle_catalog_key(state, key),
        ActiveView::ItemDetail => handle_detail_key(state, key),
    }
}

fn handle_catalog_key(state: &mut AppState, key: KeyEvent) {
    let Some(action) = state.config.match_key(key) else {
        return;
    };
    state.status_message = None;
    if action == Action::Quit {
        state.should_quit = true;
        return;
    }

    let now = Instant::now();
    let mut open = None;
    let Some(sync) = state.sync.as_mut() else {
        return;
    };
    let page = (sync.content().extent() - 1).max(1);

    match action {
        Action::ScrollUp => sync.scroll_content(-1),
        Action::ScrollDown => sync.scroll_content(1),
        Action::PageUp => sync.scroll_content(-page),
        Action::PageDown => sync.scroll_content(page),
        Action::Top => sync.jump_content(0),
        Action::Bottom => {
            let bottom = sync.content().max_offset();
            sync.jump_content(bottom);
        }
        Action::PrevCategory => sync.step_category(-1, now),
        Action::NextCategory => sync.step_category(1, now),
        Action::PrevSubcategory => sync.step_subcategory(-1, now),
        Action::NextSubcategory => sync.step_subcategory(1, now),
        Action::OpenItem => open = sync.focused_item().cloned(),
        Action::Quit => {}
    }

    match open {
        Some(id) => state.open_item(id),
        None if action == Action::OpenItem => {
            state.status_message = Some(NO_ITEM_IN_VIEW.into());
        }
        None => {}
    }
}

fn handle_detail_key(state: &mut AppState, key: KeyEvent) {
    if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
        state.close_item();
    }
}

/// Process a mouse event.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    if state.active_view == ActiveView::ItemDetail {
        handle_detail_mouse(state, mouse);
        return;
    }

    let layout = state.layout();
    let wheel = state.config.wheel_rows;
    let (col, row) = (mouse.column, mouse.row);

    let bar_under_pointer = || {
        if point_in_rect(layout.category_bar, col, row) {
            Some((BarKind::Categories, layout.category_bar))
        } else {
            layout
                .subcategory_bar
                .filter(|r| point_in_rect(*r, col, row))
                .map(|r| (BarKind::Subcategories, r))
        }
    };
    let in_content = point_in_rect(layout.content_area, col, row);

    let now = Instant::now();
    let mut open = None;
    let Some(sync) = state.sync.as_mut() else {
        return;
    };

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some((kind, rect)) = bar_under_pointer() {
                if let Some(section) = bar_column(rect, col).and_then(|c| sync.button_at(kind, c)) {
                    sync.activate(&section, now);
                }
            } else if in_content {
                let rel = i32::from(row - layout.content_area.y);
                open = sync.item_at_row(rel).cloned();
            }
        }
        MouseEventKind::ScrollUp | MouseEventKind::ScrollDown => {
            let delta = if mouse.kind == MouseEventKind::ScrollUp {
                -wheel
            } else {
                wheel
            };
            if let Some((kind, _)) = bar_under_pointer() {
                sync.scroll_bar(kind, delta);
            } else if in_content {
                sync.scroll_content(delta);
            }
        }
        MouseEventKind::ScrollLeft | MouseEventKind::ScrollRight => {
            let delta = if mouse.kind == MouseEventKind::ScrollLeft {
                -wheel
            } else {
                wheel
            };
            if let Some((kind, _)) = bar_under_pointer() {
                sync.scroll_bar(kind, delta);
            }
        }
        _ => {}
    }

    if let Some(id) = open {
        state.open_item(id);
    }
}

fn handle_detail_mouse(state: &mut AppState, mouse: MouseEvent) {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return;
    }
    let inside = state
        .current_item()
        .map(|item| modal_area(item, state.terminal_area))
        .is_some_and(|r| point_in_rect(r, mouse.column, mouse.row));
    if !inside {
        state.close_item();
    }
}

/// Column inside a bordered bar's button strip, if `col` is not on a border.
fn bar_column(rect: Rect, col: u16) -> Option<i32> {
    let inner_left = rect.x + 1;
    let inner_right = rect.x + rect.width.saturating_sub(1);
    (col >= inner_left && col < inner_right).then(|| i32::from(col - inner_left))
}
