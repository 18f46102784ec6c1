use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::geometry::Edge;

/// Thinnest the dock may be across its edge.
pub const MIN_THICKNESS: i32 = 40;
/// Shortest the dock may be along its edge.
pub const MIN_LENGTH: i32 = 120;
/// Largest accepted gap between the screen edge and the dock. Keeps the
/// placement arithmetic far from the `i32` limits.
pub const MAX_OFFSET: u32 = (i32::MAX / 4) as u32;

/// An RGB color, persisted as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(0xff, 0xff, 0xff);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let channel = |digits: &str| u8::from_str_radix(digits, 16).ok();

        let parsed = match hex.len() {
            6 if hex.is_ascii() => (
                channel(&hex[0..2]),
                channel(&hex[2..4]),
                channel(&hex[4..6]),
            ),
            // Shorthand: each digit is doubled.
            3 if hex.is_ascii() => (
                channel(&hex[0..1]).map(|v| v * 0x11),
                channel(&hex[1..2]).map(|v| v * 0x11),
                channel(&hex[2..3]).map(|v| v * 0x11),
            ),
            _ => (None, None, None),
        };

        match parsed {
            (Some(r), Some(g), Some(b)) => Ok(Rgb::new(r, g, b)),
            _ => Err(format!("invalid color '{s}', expected #rrggbb")),
        }
    }
}

impl TryFrom<String> for Rgb {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_string()
    }
}

/// Appearance and placement of the dock, persisted as `settings.json`.
///
/// Keys missing from an older file take their default individually.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DockSettings {
    #[serde(rename = "dock_position")]
    pub edge: Edge,
    /// 0 is opaque, 100 fully transparent.
    pub transparency: u8,
    #[serde(rename = "dock_color")]
    pub color: Rgb,
    pub corner_radius: u32,
    pub icon_size: u32,
    pub layout_spacing: u32,
    /// Gap between the screen edge and the visible dock.
    #[serde(rename = "dock_offset")]
    pub offset: u32,
    pub border_width: f32,
    pub border_color: Rgb,
}

impl Default for DockSettings {
    fn default() -> Self {
        Self {
            edge: Edge::Left,
            transparency: 60,
            color: Rgb::BLACK,
            corner_radius: 16,
            icon_size: 40,
            layout_spacing: 8,
            offset: 10,
            border_width: 0.0,
            border_color: Rgb::WHITE,
        }
    }
}

impl DockSettings {
    /// Brings out-of-range values back inside their documented bounds.
    pub fn sanitized(mut self) -> Self {
        self.transparency = self.transparency.min(100);
        self.icon_size = self.icon_size.max(1);
        self.offset = self.offset.min(MAX_OFFSET);
        if !self.border_width.is_finite() || self.border_width < 0.0 {
            self.border_width = 0.0;
        }
        self
    }

    /// Background alpha derived from the transparency percentage.
    pub fn background_alpha(&self) -> u8 {
        let opacity = 1.0 - f32::from(self.transparency.min(100)) / 100.0;
        (255.0 * opacity) as u8
    }

    /// Width and height of the panel holding `button_count` launchers plus
    /// the settings button, oriented for the configured edge.
    pub fn panel_size(&self, button_count: usize) -> (i32, i32) {
        let icon = saturate(self.icon_size);
        let spacing = saturate(self.layout_spacing);
        let items = saturate_usize(button_count.saturating_add(1));

        let thickness = icon.saturating_add(spacing.saturating_mul(2)).max(MIN_THICKNESS);
        let length = items
            .saturating_mul(icon)
            .saturating_add(items.saturating_add(1).saturating_mul(spacing))
            .max(MIN_LENGTH);

        if self.edge.is_horizontal() {
            (length, thickness)
        } else {
            (thickness, length)
        }
    }
}

fn saturate(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

fn saturate_usize(value: usize) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}
