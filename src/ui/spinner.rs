//! Loading indicator: a small spinner + label centred in a given area.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

/// Braille-dot spinner frames.  Cycles through these on each tick.
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Frames per spinner step; the event loop ticks much faster than the eye
/// wants the spinner to turn.
const FRAMES_PER_STEP: u64 = 5;

/// "loading catalog…" with a spinning icon, shown while the fetch runs.
pub struct LoadingIndicator {
    /// Monotonically increasing tick counter (drives the spinner frame).
    pub tick: u64,
}

impl Widget for LoadingIndicator {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 4 || area.height == 0 {
            return;
        }

        let step = (self.tick / FRAMES_PER_STEP) as usize;
        let frame = SPINNER_FRAMES[step % SPINNER_FRAMES.len()];
        let line = Line::from(Span::styled(
            format!("{frame} loading catalog…"),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));

        let label_width = (line.width() as u16).min(area.width);
        let x = area.x + (area.width - label_width) / 2;
        let y = area.y + area.height / 2;

        buf.set_line(x, y, &line, label_width);
    }
}
