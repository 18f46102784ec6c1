use std::time::{Duration, Instant};

use crate::geometry::DockRect;

/// Fast start, decelerating finish.
pub fn ease_out_cubic(t: f32) -> f32 {
    let inv = 1.0 - t.clamp(0.0, 1.0);
    1.0 - inv * inv * inv
}

/// A single rect-to-rect slide, sampled against the host clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slide {
    from: DockRect,
    to: DockRect,
    started: Instant,
    duration: Duration,
}

impl Slide {
    pub fn new(from: DockRect, to: DockRect, started: Instant, duration: Duration) -> Self {
        Self {
            from,
            to,
            started,
            duration,
        }
    }

    pub fn target(&self) -> DockRect {
        self.to
    }

    /// Linear progress in `[0, 1]`.
    pub fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started) >= self.duration
    }

    /// Interpolated rect at `now`; exactly the target once finished.
    pub fn sample(&self, now: Instant) -> DockRect {
        if self.is_finished(now) {
            return self.to;
        }
        self.from.lerp(&self.to, ease_out_cubic(self.progress(now)))
    }
}
