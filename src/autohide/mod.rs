//! Auto-hide state machine.
//!
//! The controller owns the hide-delay timer and the slide animation. It never
//! reads a clock itself: every notification carries the host's `now`, and
//! [`AutoHideController::tick`] must be called from the host's frame or timer
//! callback while [`AutoHideController::needs_tick`] is true.

mod animation;
#[cfg(test)]
mod tests;

use std::time::{Duration, Instant};

use tracing::debug;

pub use self::animation::{Slide, ease_out_cubic};
use crate::geometry::{DockRect, Placement};

/// Sustained pointer absence required before the dock hides.
pub const HIDE_DELAY: Duration = Duration::from_millis(500);
/// Length of both the hide and the reveal slide.
pub const SLIDE_DURATION: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AutoHideState {
    Visible,
    Hidden,
    AnimatingIn,
    AnimatingOut,
}

#[derive(Debug, Clone)]
pub struct AutoHideController {
    state: AutoHideState,
    placement: Placement,
    rect: DockRect,
    hide_deadline: Option<Instant>,
    slide: Option<Slide>,
    dialog_open: bool,
}

impl AutoHideController {
    /// Starts visible, at the placement's visible rect.
    pub fn new(placement: Placement) -> Self {
        Self {
            state: AutoHideState::Visible,
            placement,
            rect: placement.visible_rect(),
            hide_deadline: None,
            slide: None,
            dialog_open: false,
        }
    }

    pub fn state(&self) -> AutoHideState {
        self.state
    }

    /// Geometry as of the last notification or tick.
    pub fn current_rect(&self) -> DockRect {
        self.rect
    }

    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    pub fn visible_rect(&self) -> DockRect {
        self.placement.visible_rect()
    }

    pub fn hidden_rect(&self) -> DockRect {
        self.placement.hidden_rect(&self.rect)
    }

    pub fn is_dialog_open(&self) -> bool {
        self.dialog_open
    }

    pub fn hide_pending(&self) -> bool {
        self.hide_deadline.is_some()
    }

    /// True while a timer is armed or a slide is running.
    pub fn needs_tick(&self) -> bool {
        self.hide_deadline.is_some() || self.slide.is_some()
    }

    pub fn pointer_entered(&mut self, now: Instant) {
        if self.hide_deadline.take().is_some() {
            debug!("hide delay cancelled");
        }
        match self.state {
            AutoHideState::Hidden | AutoHideState::AnimatingOut => self.reveal(now),
            AutoHideState::Visible | AutoHideState::AnimatingIn => {}
        }
    }

    /// Every leave restarts the delay, so only a sustained absence hides.
    pub fn pointer_left(&mut self, now: Instant) {
        match self.state {
            AutoHideState::Visible | AutoHideState::AnimatingIn => {
                self.hide_deadline = Some(now + HIDE_DELAY);
            }
            AutoHideState::Hidden | AutoHideState::AnimatingOut => {}
        }
    }

    /// While a dialog is open the dock refuses to hide. Opening one while
    /// the dock is away brings it back.
    pub fn set_dialog_open(&mut self, open: bool, now: Instant) {
        self.dialog_open = open;
        if open && matches!(self.state, AutoHideState::Hidden | AutoHideState::AnimatingOut) {
            self.reveal(now);
        }
    }

    /// Fires the hide delay if it is due and advances any slide.
    pub fn tick(&mut self, now: Instant) -> DockRect {
        if let Some(deadline) = self.hide_deadline
            && now >= deadline
        {
            self.hide_deadline = None;
            self.hide_delay_elapsed(deadline);
        }
        self.advance(now);
        self.rect
    }

    /// Adopts new geometry inputs, e.g. after a settings change. No
    /// animation is involved; the dock snaps to its new resting rect.
    pub fn relayout(&mut self, placement: Placement) {
        if placement == self.placement {
            return;
        }
        let same_edge = placement.edge == self.placement.edge;
        self.placement = placement;
        self.slide = None;

        match self.state {
            AutoHideState::Hidden | AutoHideState::AnimatingOut if same_edge => {
                self.rect = placement.hidden_rect(&self.rect);
                self.state = AutoHideState::Hidden;
            }
            _ => {
                self.rect = placement.visible_rect();
                self.state = AutoHideState::Visible;
            }
        }
        debug!(state = ?self.state, rect = ?self.rect, "relayout");
    }

    fn hide_delay_elapsed(&mut self, at: Instant) {
        if self.dialog_open {
            debug!("hide delay elapsed while a dialog is open, staying visible");
            return;
        }
        // Catch an inbound slide up to the firing instant first.
        self.advance(at);
        match self.state {
            AutoHideState::Visible | AutoHideState::AnimatingIn => {
                let target = self.placement.hidden_rect(&self.rect);
                self.start_slide(AutoHideState::AnimatingOut, target, at);
            }
            AutoHideState::Hidden | AutoHideState::AnimatingOut => {}
        }
    }

    /// Slides back in from wherever the dock is right now.
    fn reveal(&mut self, now: Instant) {
        self.advance(now);
        let target = self.placement.visible_rect();
        self.start_slide(AutoHideState::AnimatingIn, target, now);
    }

    fn start_slide(&mut self, state: AutoHideState, target: DockRect, at: Instant) {
        debug!(from = ?self.state, to = ?state, ?target, "slide started");
        self.state = state;
        self.slide = Some(Slide::new(self.rect, target, at, SLIDE_DURATION));
    }

    fn advance(&mut self, now: Instant) {
        let Some(slide) = self.slide else {
            return;
        };
        self.rect = slide.sample(now);
        if !slide.is_finished(now) {
            return;
        }
        self.slide = None;
        self.state = match self.state {
            AutoHideState::AnimatingOut => AutoHideState::Hidden,
            AutoHideState::AnimatingIn => AutoHideState::Visible,
            settled => settled,
        };
        debug!(state = ?self.state, rect = ?self.rect, "slide finished");
    }
}
