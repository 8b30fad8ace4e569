//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

/// Central theme.
pub struct Theme;

impl Theme {
    // ── nav bars ───────────────────────────────────────────────
    pub fn button_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn active_button_style() -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    }

    pub fn overflow_marker_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    // ── content ────────────────────────────────────────────────
    pub fn category_heading_style() -> Style {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    }

    pub fn subcategory_heading_style() -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }

    pub fn item_title_style() -> Style {
        Style::default().fg(Color::White)
    }

    pub fn item_detail_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn price_style() -> Style {
        Style::default().fg(Color::Cyan)
    }

    pub fn focused_item_style() -> Style {
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD)
    }

    pub fn note_style() -> Style {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC)
    }

    pub fn error_style() -> Style {
        Style::default()
            .fg(Color::Red)
            .add_modifier(Modifier::BOLD)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn border_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn title_style() -> Style {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }
}
