//! Edge-relative placement of the dock panel.
//!
//! Everything here is pure: the same placement always yields the same
//! rectangles, which lets the auto-hide controller use them as animation
//! endpoints without caching.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Units of a hidden dock that stay on screen so the pointer can reach it.
pub const REVEAL_SLIVER: i32 = 5;

/// Screen boundary the dock is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    Top,
    Bottom,
    #[default]
    Left,
    Right,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Bottom, Edge::Left, Edge::Right];

    /// Top and bottom docks lie along the horizontal axis and slide vertically.
    pub fn is_horizontal(self) -> bool {
        matches!(self, Edge::Top | Edge::Bottom)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Edge::Top => "top",
            Edge::Bottom => "bottom",
            Edge::Left => "left",
            Edge::Right => "right",
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Axis-aligned rectangle in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DockRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// The screen is described with the same rectangle type as the dock.
pub type ScreenRect = DockRect;

impl DockRect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// Interpolates every scalar independently; `t` is clamped to `[0, 1]`.
    pub fn lerp(&self, to: &DockRect, t: f32) -> DockRect {
        let t = f64::from(t.clamp(0.0, 1.0));
        let mix = |a: i32, b: i32| -> i32 {
            (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as i32
        };
        DockRect {
            x: mix(self.x, to.x),
            y: mix(self.y, to.y),
            width: mix(self.width, to.width),
            height: mix(self.height, to.height),
        }
    }

    /// Length of the overlap between this rect and `other` along the x axis.
    pub fn overlap_x(&self, other: &DockRect) -> i32 {
        (self.right().min(other.right()))
            .saturating_sub(self.x.max(other.x))
            .max(0)
    }

    /// Length of the overlap between this rect and `other` along the y axis.
    pub fn overlap_y(&self, other: &DockRect) -> i32 {
        (self.bottom().min(other.bottom()))
            .saturating_sub(self.y.max(other.y))
            .max(0)
    }
}

/// Inputs that fully determine where the dock sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub edge: Edge,
    /// Distance between the screen edge and the visible dock.
    pub offset: i32,
    pub width: i32,
    pub height: i32,
    pub screen: ScreenRect,
}

impl Placement {
    /// Flush against the edge, inset by `offset`, centered on the cross axis.
    /// Coordinates saturate at the `i32` range instead of wrapping.
    pub fn visible_rect(&self) -> DockRect {
        let s = &self.screen;
        let centered_x = s
            .x
            .saturating_add(s.width.saturating_sub(self.width).div_euclid(2));
        let centered_y = s
            .y
            .saturating_add(s.height.saturating_sub(self.height).div_euclid(2));

        let (x, y) = match self.edge {
            Edge::Top => (centered_x, s.y.saturating_add(self.offset)),
            Edge::Bottom => (
                centered_x,
                s.bottom()
                    .saturating_sub(self.height)
                    .saturating_sub(self.offset),
            ),
            Edge::Left => (s.x.saturating_add(self.offset), centered_y),
            Edge::Right => (
                s.right()
                    .saturating_sub(self.width)
                    .saturating_sub(self.offset),
                centered_y,
            ),
        };
        DockRect::new(x, y, self.width, self.height)
    }

    /// Pushed off-screen on its own edge with [`REVEAL_SLIVER`] units left
    /// inside. The cross-axis coordinate is taken from `current` so the dock
    /// does not jump sideways while hiding.
    pub fn hidden_rect(&self, current: &DockRect) -> DockRect {
        let s = &self.screen;
        let (x, y) = match self.edge {
            Edge::Top => (
                current.x,
                s.y.saturating_sub(self.height).saturating_add(REVEAL_SLIVER),
            ),
            Edge::Bottom => (current.x, s.bottom().saturating_sub(REVEAL_SLIVER)),
            Edge::Left => (
                s.x.saturating_sub(self.width).saturating_add(REVEAL_SLIVER),
                current.y,
            ),
            Edge::Right => (s.right().saturating_sub(REVEAL_SLIVER), current.y),
        };
        DockRect::new(x, y, self.width, self.height)
    }
}
