//! Coalesce bursts of scroll events into at most one recomputation per frame.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct FrameThrottle {
    interval: Duration,
    last_run: Option<Instant>,
    pending: bool,
}

impl FrameThrottle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_run: None,
            pending: false,
        }
    }

    /// Record that a recomputation is wanted.  Cheap; call on every event.
    pub fn request(&mut self) {
        self.pending = true;
    }

    /// Forget any pending request.
    pub fn cancel(&mut self) {
        self.pending = false;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// `true` (and the request is consumed) when a recomputation is pending
    /// and at least one frame interval has passed since the last one.
    pub fn poll(&mut self, now: Instant) -> bool {
        if !self.pending {
            return false;
        }
        let due = self
            .last_run
            .map_or(true, |last| now.saturating_duration_since(last) >= self.interval);
        if due {
            self.pending = false;
            self.last_run = Some(now);
        }
        due
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bursts_collapse_to_one_run_per_frame() {
        let frame = Duration::from_millis(16);
        let t0 = Instant::now();
        let mut throttle = FrameThrottle::new(frame);

        for _ in 0..50 {
            throttle.request();
        }
        assert!(throttle.poll(t0));
        assert!(!throttle.poll(t0));

        throttle.request();
        assert!(!throttle.poll(t0 + Duration::from_millis(5)));
        assert!(throttle.is_pending());
        assert!(throttle.poll(t0 + frame));
        assert!(!throttle.is_pending());
    }

    #[test]
    fn idle_throttle_never_fires() {
        let mut throttle = FrameThrottle::new(Duration::from_millis(16));
        assert!(!throttle.poll(Instant::now()));
    }
}
