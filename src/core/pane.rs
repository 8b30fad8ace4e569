//! One-dimensional scroll container.
//!
//! Used vertically for the content pane (offset = first visible row) and
//! horizontally for each nav bar (offset = first visible column).  Offsets
//! are always clamped to `[0, content - extent]`, mirroring how a native
//! scroll container clamps out-of-range requests.

use std::time::{Duration, Instant};

use super::animation::ScrollAnimation;

#[derive(Debug, Clone, Default)]
pub struct ScrollPane {
    offset: i32,
    /// Visible size (rows or columns).
    extent: i32,
    /// Total scrollable size.
    content: i32,
    animation: Option<ScrollAnimation>,
}

impl ScrollPane {
    pub fn new(extent: i32, content: i32) -> Self {
        Self {
            offset: 0,
            extent: extent.max(0),
            content: content.max(0),
            animation: None,
        }
    }

    pub fn offset(&self) -> i32 {
        self.offset
    }

    pub fn extent(&self) -> i32 {
        self.extent
    }

    pub fn content(&self) -> i32 {
        self.content
    }

    pub fn max_offset(&self) -> i32 {
        (self.content - self.extent).max(0)
    }

    pub fn clamp(&self, target: i32) -> i32 {
        target.clamp(0, self.max_offset())
    }

    /// Where the pane will rest once any running animation finishes.
    pub fn destination(&self) -> i32 {
        self.animation
            .as_ref()
            .map_or(self.offset, |anim| self.clamp(anim.target()))
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Update the visible and total sizes, re-clamping the offset.  A running
    /// animation keeps going; its positions are clamped as it ticks.
    /// Returns `true` when anything changed.
    pub fn resize(&mut self, extent: i32, content: i32) -> bool {
        let (extent, content) = (extent.max(0), content.max(0));
        if extent == self.extent && content == self.content {
            return false;
        }
        self.extent = extent;
        self.content = content;
        self.offset = self.clamp(self.offset);
        true
    }

    /// Move immediately, cancelling any animation.  Returns the applied delta.
    pub fn jump_to(&mut self, target: i32) -> i32 {
        self.animation = None;
        let target = self.clamp(target);
        let delta = target - self.offset;
        self.offset = target;
        delta
    }

    /// Relative user scroll; cancels any animation.
    pub fn scroll_by(&mut self, delta: i32) -> i32 {
        let base = self.offset;
        self.jump_to(base + delta)
    }

    /// Start a smooth scroll toward `target`.
    ///
    /// Returns the distance between the old destination and the new one:
    /// zero means the pane was already at (or heading to) `target` and no
    /// new motion was started.
    pub fn animate_to(&mut self, target: i32, now: Instant, duration: Duration) -> i32 {
        let target = self.clamp(target);
        let delta = target - self.destination();
        if delta == 0 {
            return 0;
        }
        if target == self.offset {
            self.animation = None;
        } else {
            self.animation = Some(ScrollAnimation::new(self.offset, target, now, duration));
        }
        delta
    }

    /// Advance the running animation.  Returns `true` when the offset moved.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(anim) = self.animation.as_ref() else {
            return false;
        };
        let next = self.clamp(anim.position_at(now));
        if anim.is_finished(now) {
            self.animation = None;
        }
        let moved = next != self.offset;
        self.offset = next;
        moved
    }
}
