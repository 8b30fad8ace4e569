//! Navigation bar scroller: keeps the active button centred in its bar.

use std::time::{Duration, Instant};

use super::anchors::ButtonAnchor;
use super::pane::ScrollPane;

/// Which of the two bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarKind {
    Categories,
    Subcategories,
}

/// A horizontally scrolling strip of nav buttons.
#[derive(Debug, Clone, Default)]
pub struct NavBar {
    pub pane: ScrollPane,
}

impl NavBar {
    pub fn new(width: i32, strip_width: i32) -> Self {
        Self {
            pane: ScrollPane::new(width, strip_width),
        }
    }

    /// Smoothly scroll so `button` ends up horizontally centred.
    ///
    /// A missing button is a silent no-op.  Returns the scroll delta that was
    /// started; calling again with the same button and an unchanged bar
    /// returns zero.
    pub fn center_on(
        &mut self,
        button: Option<ButtonAnchor>,
        now: Instant,
        duration: Duration,
    ) -> i32 {
        let Some(button) = button else {
            tracing::trace!("nav button not laid out, skipping centre");
            return 0;
        };
        let target = centred_offset(button, self.pane.extent());
        self.pane.animate_to(target, now, duration)
    }

    /// Jump straight to the centred offset for `button`, dropping any
    /// running animation.  Used when the bar itself changed width.
    pub fn snap_to(&mut self, button: Option<ButtonAnchor>) -> i32 {
        match button {
            Some(button) => self.pane.jump_to(centred_offset(button, self.pane.extent())),
            None => 0,
        }
    }

    pub fn tick(&mut self, now: Instant) -> bool {
        self.pane.tick(now)
    }
}

/// `left - bar_width / 2 + button_width / 2`, before clamping.
pub fn centred_offset(button: ButtonAnchor, bar_width: i32) -> i32 {
    button.left - bar_width / 2 + button.width / 2
}

#[cfg(test)]
mod tests {
    use super::*;

    const DUR: Duration = Duration::from_millis(300);

    #[test]
    fn centres_button_in_middle_of_strip() {
        let t0 = Instant::now();
        let mut bar = NavBar::new(20, 100);
        let button = ButtonAnchor { left: 50, width: 6 };

        assert_eq!(bar.center_on(Some(button), t0, DUR), 43);
        bar.tick(t0 + DUR);
        assert_eq!(bar.pane.offset(), 43);
        // Button now spans columns 7..13 of the visible 20.
        assert_eq!(button.left - bar.pane.offset(), 7);
    }

    #[test]
    fn second_call_produces_no_delta() {
        let t0 = Instant::now();
        let mut bar = NavBar::new(20, 100);
        let button = Some(ButtonAnchor { left: 70, width: 8 });

        assert_ne!(bar.center_on(button, t0, DUR), 0);
        assert_eq!(bar.center_on(button, t0 + Duration::from_millis(5), DUR), 0);

        bar.tick(t0 + DUR);
        let settled = bar.pane.offset();
        assert_eq!(bar.center_on(button, t0 + DUR, DUR), 0);
        assert_eq!(bar.pane.offset(), settled);
        assert!(!bar.pane.is_animating());
    }

    #[test]
    fn edges_are_clamped() {
        let t0 = Instant::now();
        let mut bar = NavBar::new(20, 60);

        assert_eq!(bar.center_on(Some(ButtonAnchor { left: 1, width: 4 }), t0, DUR), 0);
        assert_eq!(bar.center_on(Some(ButtonAnchor { left: 56, width: 4 }), t0, DUR), 40);
    }

    #[test]
    fn snap_recentres_after_bar_widens() {
        let t0 = Instant::now();
        let button = Some(ButtonAnchor { left: 10, width: 6 });
        let mut bar = NavBar::new(0, 60);
        bar.center_on(button, t0, DUR);
        assert_eq!(bar.pane.destination(), 13);

        bar.pane.resize(20, 60);
        bar.snap_to(button);
        assert_eq!(bar.pane.offset(), 3);
        assert!(!bar.pane.is_animating());
    }

    #[test]
    fn missing_button_is_ignored() {
        let mut bar = NavBar::new(20, 60);
        assert_eq!(bar.center_on(None, Instant::now(), DUR), 0);
        assert!(!bar.pane.is_animating());
    }
}
