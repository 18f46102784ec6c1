//! Detection of the screen rectangle the dock attaches to.

use std::fs;
use std::process::Command;

use serde::Deserialize;
use tracing::{debug, info};

use crate::geometry::ScreenRect;

type DetectResult = Result<ScreenInfo, Box<dyn std::error::Error>>;

/// Origin and size of the target screen in global coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenInfo {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Default for ScreenInfo {
    fn default() -> Self {
        Self {
            x: 0,
            y: 0,
            width: 1920,
            height: 1080,
        }
    }
}

impl ScreenInfo {
    pub fn rect(&self) -> ScreenRect {
        ScreenRect::new(self.x, self.y, self.width, self.height)
    }

    /// Focused screen if the compositor tells us, else the primary one, else
    /// a 1920x1080 screen at the origin.
    pub fn detect() -> Self {
        let result = Self::detect_linux().unwrap_or_else(|err| {
            info!(error = %err, "screen detection failed, using default");
            Self::default()
        });
        info!(
            x = result.x,
            y = result.y,
            width = result.width,
            height = result.height,
            "target screen"
        );
        result
    }

    fn detect_linux() -> DetectResult {
        if let Ok(screen) = Self::detect_hyprland() {
            debug!("using Hyprland monitor");
            return Ok(screen);
        }
        if let Ok(screen) = Self::detect_sway() {
            debug!("using Sway output");
            return Ok(screen);
        }
        if let Ok(screen) = Self::detect_xrandr() {
            debug!("using xrandr output");
            return Ok(screen);
        }
        if let Ok(screen) = Self::detect_from_sysfs() {
            debug!("using DRM sysfs mode");
            return Ok(screen);
        }
        Err("no screen detection backend succeeded".into())
    }

    fn run(program: &str, args: &[&str]) -> Result<String, Box<dyn std::error::Error>> {
        let output = Command::new(program).args(args).output()?;
        if !output.status.success() {
            return Err(format!("{program} exited with {}", output.status).into());
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn detect_hyprland() -> DetectResult {
        let json = Self::run("hyprctl", &["monitors", "-j"])?;
        Self::parse_hyprctl_monitors(&json).ok_or_else(|| "no usable Hyprland monitor".into())
    }

    fn detect_sway() -> DetectResult {
        let json = Self::run("swaymsg", &["-t", "get_outputs", "--raw"])?;
        Self::parse_sway_outputs(&json).ok_or_else(|| "no usable Sway output".into())
    }

    fn detect_xrandr() -> DetectResult {
        let text = Self::run("xrandr", &["--current"])?;
        Self::parse_xrandr(&text).ok_or_else(|| "no connected xrandr output".into())
    }

    fn detect_from_sysfs() -> DetectResult {
        for entry in fs::read_dir("/sys/class/drm")?.flatten() {
            let path = entry.path();
            let is_connector = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with("card") && n.contains('-'));
            if !is_connector {
                continue;
            }
            if let Ok(modes) = fs::read_to_string(path.join("modes"))
                && let Some(screen) = Self::parse_drm_modes(&modes)
            {
                return Ok(screen);
            }
        }
        Err("no DRM connector reported a mode".into())
    }

    /// Focused monitor from `hyprctl monitors -j`, falling back to the first.
    fn parse_hyprctl_monitors(json: &str) -> Option<ScreenInfo> {
        #[derive(Deserialize)]
        struct Monitor {
            x: i32,
            y: i32,
            width: i32,
            height: i32,
            #[serde(default)]
            focused: bool,
        }

        let monitors: Vec<Monitor> = serde_json::from_str(json).ok()?;
        let monitor = monitors
            .iter()
            .find(|m| m.focused)
            .or_else(|| monitors.first())?;
        Some(ScreenInfo {
            x: monitor.x,
            y: monitor.y,
            width: monitor.width,
            height: monitor.height,
        })
    }

    /// Focused active output from `swaymsg -t get_outputs`, falling back to
    /// the first active one.
    fn parse_sway_outputs(json: &str) -> Option<ScreenInfo> {
        #[derive(Deserialize)]
        struct Rect {
            x: i32,
            y: i32,
            width: i32,
            height: i32,
        }

        #[derive(Deserialize)]
        struct Output {
            #[serde(default)]
            active: bool,
            #[serde(default)]
            focused: bool,
            rect: Rect,
        }

        let outputs: Vec<Output> = serde_json::from_str(json).ok()?;
        let active = || outputs.iter().filter(|o| o.active);
        let output = active().find(|o| o.focused).or_else(|| active().next())?;
        Some(ScreenInfo {
            x: output.rect.x,
            y: output.rect.y,
            width: output.rect.width,
            height: output.rect.height,
        })
    }

    /// Primary output if marked, otherwise the first connected one with a
    /// geometry like `1920x1080+0+0`.
    fn parse_xrandr(text: &str) -> Option<ScreenInfo> {
        let connected = text
            .lines()
            .filter(|line| line.contains(" connected"))
            .filter_map(|line| {
                let geometry = line.split_whitespace().find_map(Self::parse_xrandr_geometry)?;
                Some((line.contains(" primary "), geometry))
            })
            .collect::<Vec<_>>();

        connected
            .iter()
            .find(|(primary, _)| *primary)
            .or_else(|| connected.first())
            .map(|(_, screen)| *screen)
    }

    fn parse_xrandr_geometry(token: &str) -> Option<ScreenInfo> {
        let (size, position) = token.split_once('+')?;
        let (width, height) = size.split_once('x')?;
        let (x, y) = position.split_once('+')?;
        Some(ScreenInfo {
            x: x.parse().ok()?,
            y: y.parse().ok()?,
            width: width.parse().ok()?,
            height: height.parse().ok()?,
        })
    }

    /// First mode line (the preferred one) of a DRM connector.
    fn parse_drm_modes(content: &str) -> Option<ScreenInfo> {
        let (width, height) = content.lines().next()?.trim().split_once('x')?;
        // Interlaced modes carry a trailing `i`.
        let height = height.trim_end_matches('i');
        Some(ScreenInfo {
            width: width.parse().ok()?,
            height: height.parse().ok()?,
            ..ScreenInfo::default()
        })
    }
}
