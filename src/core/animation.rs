//! Time-based smooth scroll between two integer offsets.
//!
//! The animation owns no clock: callers pass `Instant`s in, which keeps it
//! deterministic under test.  Position follows a quartic ease-in-out curve,
//! so scrolling starts gently, speeds up, and settles without overshoot.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct ScrollAnimation {
    from: i32,
    to: i32,
    started: Instant,
    duration: Duration,
}

impl ScrollAnimation {
    pub fn new(from: i32, to: i32, started: Instant, duration: Duration) -> Self {
        Self {
            from,
            to,
            started,
            duration,
        }
    }

    pub fn target(&self) -> i32 {
        self.to
    }

    /// Offset at time `now`, rounded to the nearest whole row / column.
    pub fn position_at(&self, now: Instant) -> i32 {
        let t = self.progress(now);
        let eased = ease_in_out_quart(t);
        let span = (self.to - self.from) as f64;
        self.from + (span * eased).round() as i32
    }

    /// True once `now` is at or past the end of the animation.
    pub fn is_finished(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }

    fn progress(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }
}

fn ease_in_out_quart(t: f64) -> f64 {
    if t < 0.5 {
        8.0 * t * t * t * t
    } else {
        let u = -2.0 * t + 2.0;
        1.0 - u * u * u * u / 2.0
    }
}
